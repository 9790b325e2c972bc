use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod db;

pub static GROUP_RECORD_NAME: &str = "groups";

/// A student work group inside one course. Membership order is insertion
/// order and decides leadership succession.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub leader_id: String,
    pub member_ids: Vec<String>,
    pub course_id: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Group {
    pub fn is_member(&self, student_id: &str) -> bool {
        self.member_ids.iter().any(|id| id == student_id)
    }

    pub fn is_led_by(&self, student_id: &str) -> bool {
        self.leader_id == student_id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupCreateData {
    pub name: String,
    pub leader_id: String,
    pub course_id: String,
    /// Defaults to just the leader; a group never starts empty.
    #[serde(default)]
    pub member_ids: Option<Vec<String>>,
}
