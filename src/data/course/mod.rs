use serde::{Deserialize, Serialize};

pub mod db;

pub static COURSE_RECORD_NAME: &str = "courses";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub code: String,
    pub professor_id: String,
    pub semester: String,
    #[serde(default)]
    pub enrolled_student_ids: Vec<String>,
}

impl Course {
    pub fn is_enrolled(&self, student_id: &str) -> bool {
        self.enrolled_student_ids.iter().any(|id| id == student_id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CourseCreateData {
    pub name: String,
    pub code: String,
    pub professor_id: String,
    pub semester: String,
    #[serde(default)]
    pub enrolled_student_ids: Vec<String>,
}
