use serde::{Deserialize, Serialize};

pub static SESSION_RECORD_NAME: &str = "session";

/// The single process-wide login record. `None` means logged out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub current_user_id: Option<String>,
}
