use crate::backend::Backend;
use crate::error::BackendError;

use super::{Course, CourseCreateData, COURSE_RECORD_NAME};

pub trait CourseDbExt {
    fn courses(&self) -> Vec<Course>;

    /// Appends a course. Codes are not deduplicated and the professor id is
    /// taken on faith; callers gate who may invoke this.
    fn create_course(&mut self, data: CourseCreateData) -> Result<Course, BackendError>;
}

impl CourseDbExt for Backend {
    fn courses(&self) -> Vec<Course> {
        self.store.load(COURSE_RECORD_NAME, vec![])
    }

    fn create_course(&mut self, data: CourseCreateData) -> Result<Course, BackendError> {
        let mut courses = self.courses();

        let course = Course {
            id: self.fresh_id("course"),
            name: data.name,
            code: data.code,
            professor_id: data.professor_id,
            semester: data.semester,
            enrolled_student_ids: data.enrolled_student_ids,
        };

        courses.push(course.clone());
        self.store.save(COURSE_RECORD_NAME, &courses)?;

        tracing::info!("created course {} ({})", course.id, course.code);
        Ok(course)
    }
}

///////////////////////
//       TESTS
///////////////////////

#[cfg(test)]
mod course_operations {
    use crate::backend::{Backend, RandomIds};
    use crate::store::Store;

    use super::{CourseCreateData, CourseDbExt};

    fn test_backend() -> Backend {
        Backend::new(Store::in_memory(), Box::new(RandomIds))
    }

    fn example_course_data(code: impl AsRef<str>) -> CourseCreateData {
        CourseCreateData {
            name: format!("{} - Example Course", code.as_ref()),
            code: code.as_ref().to_string(),
            professor_id: "admin_1".to_string(),
            semester: "Fall 2024".to_string(),
            enrolled_student_ids: vec!["student_1".to_string()],
        }
    }

    #[test]
    fn create_course_appends_and_keeps_enrollment() {
        let mut backend = test_backend();

        let first = backend
            .create_course(example_course_data("CS101"))
            .expect("unable to create course");
        let second = backend
            .create_course(example_course_data("CS201"))
            .expect("unable to create course");

        let courses = backend.courses();
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].id, first.id);
        assert_eq!(courses[1].id, second.id);
        assert!(courses[0].is_enrolled("student_1"));
        assert!(!courses[0].is_enrolled("student_2"));
    }

    #[test]
    fn duplicate_codes_are_allowed() {
        let mut backend = test_backend();

        backend
            .create_course(example_course_data("CS101"))
            .expect("unable to create course");
        backend
            .create_course(example_course_data("CS101"))
            .expect("repeated course code must be accepted");

        assert_eq!(backend.courses().len(), 2);
    }
}
