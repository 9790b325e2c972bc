use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// Raw record transport. A record is an opaque JSON payload addressed by a
/// stable name; `read` answers `None` for records that are absent or
/// unreadable rather than erroring.
pub trait Backing {
    fn read(&self, record: &str) -> Option<String>;
    fn write(&mut self, record: &str, payload: &str) -> Result<(), StoreError>;
}

/// One `<record>.json` file per record under a root directory.
pub struct DirBacking {
    root: PathBuf,
}

impl DirBacking {
    pub fn new(root: impl Into<PathBuf>) -> DirBacking {
        DirBacking { root: root.into() }
    }

    fn record_path(&self, record: &str) -> PathBuf {
        self.root.join(format!("{}.json", record))
    }
}

impl Backing for DirBacking {
    fn read(&self, record: &str) -> Option<String> {
        fs::read_to_string(self.record_path(record)).ok()
    }

    fn write(&mut self, record: &str, payload: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.record_path(record), payload)?;
        Ok(())
    }
}

/// Volatile backing used by tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryBacking {
    records: HashMap<String, String>,
}

impl Backing for MemoryBacking {
    fn read(&self, record: &str) -> Option<String> {
        self.records.get(record).cloned()
    }

    fn write(&mut self, record: &str, payload: &str) -> Result<(), StoreError> {
        self.records.insert(record.to_string(), payload.to_string());
        Ok(())
    }
}

pub struct Store {
    backing: Box<dyn Backing>,
}

impl Store {
    pub fn open(root: impl Into<PathBuf>) -> Store {
        Store::with_backing(Box::new(DirBacking::new(root)))
    }

    pub fn in_memory() -> Store {
        Store::with_backing(Box::new(MemoryBacking::default()))
    }

    pub fn with_backing(backing: Box<dyn Backing>) -> Store {
        Store { backing }
    }

    /// Reads a record if it is present and parses. Corrupt payloads are
    /// treated the same as absent ones, with a warning.
    pub fn probe<T: DeserializeOwned>(&self, record: &str) -> Option<T> {
        let payload = self.backing.read(record)?;
        match serde_json::from_str(&payload) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("discarding unreadable record '{}': {}", record, e);
                None
            }
        }
    }

    /// Reads a record, falling back to `fallback` when it is absent or
    /// unreadable. Never errors.
    pub fn load<T: DeserializeOwned>(&self, record: &str, fallback: T) -> T {
        self.probe(record).unwrap_or(fallback)
    }

    pub fn save<T: Serialize>(&mut self, record: &str, value: &T) -> Result<(), StoreError> {
        let payload = serde_json::to_string(value)?;
        self.backing.write(record, &payload)?;
        Ok(())
    }
}

///////////////////////
//       TESTS
///////////////////////
