use rand::Rng;

use crate::data::session::{Session, SESSION_RECORD_NAME};
use crate::store::Store;

static ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Source of fresh entity identifiers. Injected so hosts can substitute their
/// own scheme; the only contract is collision-resistant opaque strings.
pub trait IdProvider {
    fn fresh(&mut self, prefix: &str) -> String;
}

/// Default provider: `<prefix>_` followed by eight lowercase alphanumerics.
pub struct RandomIds;

impl IdProvider for RandomIds {
    fn fresh(&mut self, prefix: &str) -> String {
        let mut rng = rand::thread_rng();
        let tail: String = (0..8)
            .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
            .collect();
        format!("{}_{}", prefix, tail)
    }
}

/// The engine instance. Owns the persistence handle and the identifier
/// source; every operation is a synchronous read-modify-write against the
/// records behind `store`. Constructed once (see `crate::create`) and passed
/// by reference to consumers.
pub struct Backend {
    pub(crate) store: Store,
    pub(crate) ids: Box<dyn IdProvider>,
}

impl Backend {
    pub fn new(store: Store, ids: Box<dyn IdProvider>) -> Backend {
        Backend { store, ids }
    }

    pub(crate) fn fresh_id(&mut self, prefix: &str) -> String {
        self.ids.fresh(prefix)
    }

    pub fn session(&self) -> Session {
        self.store.load(SESSION_RECORD_NAME, Session::default())
    }

    pub(crate) fn set_session(
        &mut self,
        session: Session,
    ) -> Result<(), crate::error::StoreError> {
        self.store.save(SESSION_RECORD_NAME, &session)
    }
}

///////////////////////
//       TESTS
///////////////////////

#[cfg(test)]
mod ids {
    use super::{IdProvider, RandomIds};

    #[test]
    fn fresh_ids_are_prefixed_and_opaque() {
        let mut ids = RandomIds;
        let id = ids.fresh("course");

        let tail = id.strip_prefix("course_").expect("missing prefix");
        assert_eq!(tail.len(), 8);
        assert!(tail.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }
}
