use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod db;

pub static ASSIGNMENT_RECORD_NAME: &str = "assignments";

fn individual() -> SubmissionType {
    SubmissionType::Individual
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionType {
    Individual,
    Group,
}

/// Per-student acknowledgement state. Group acknowledgements carry the
/// leader's id so views can tell "confirmed directly" from "confirmed on my
/// behalf"; a retraction returns to `NotSubmitted` for both kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Submission {
    NotSubmitted,
    Submitted {
        confirmed_at: DateTime<Utc>,
    },
    AcknowledgedByLeader {
        confirmed_at: DateTime<Utc>,
        acknowledged_by: String,
    },
}

impl Submission {
    pub fn is_submitted(&self) -> bool {
        !matches!(self, Submission::NotSubmitted)
    }

    pub fn confirmed_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Submission::NotSubmitted => None,
            Submission::Submitted { confirmed_at } => Some(*confirmed_at),
            Submission::AcknowledgedByLeader { confirmed_at, .. } => Some(*confirmed_at),
        }
    }
}

impl std::default::Default for Submission {
    fn default() -> Self {
        Submission::NotSubmitted
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub drive_link: String,
    pub course_id: String,
    pub created_by: String,
    #[serde(default = "individual")]
    pub submission_type: SubmissionType,
    #[serde(default)]
    pub assigned_student_ids: Vec<String>,
    #[serde(default)]
    pub submissions: HashMap<String, Submission>,
}

impl Assignment {
    pub fn is_submitted_by(&self, student_id: &str) -> bool {
        self.submissions
            .get(student_id)
            .map(Submission::is_submitted)
            .unwrap_or(false)
    }

    /// How many assigned students have confirmed, for progress displays.
    pub fn submitted_count(&self) -> usize {
        self.assigned_student_ids
            .iter()
            .filter(|id| self.is_submitted_by(id))
            .count()
    }

    pub fn is_fully_submitted(&self) -> bool {
        !self.assigned_student_ids.is_empty()
            && self.submitted_count() == self.assigned_student_ids.len()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentCreateData {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub drive_link: String,
    pub course_id: String,
    pub created_by: String,
    #[serde(default = "individual")]
    pub submission_type: SubmissionType,
    pub assigned_student_ids: Vec<String>,
}
