use chrono::{Duration, Utc};
use std::collections::HashMap;

use crate::backend::Backend;
use crate::data::assignment::{Assignment, Submission, SubmissionType, ASSIGNMENT_RECORD_NAME};
use crate::data::course::{Course, COURSE_RECORD_NAME};
use crate::data::group::{Group, GROUP_RECORD_NAME};
use crate::data::session::{Session, SESSION_RECORD_NAME};
use crate::data::user::{User, USER_RECORD_NAME};
use crate::data::user::db::UserDbExt;
use crate::error::BackendError;
use crate::role::Role;

/// First-run population. Each record is checked and written independently so
/// a store that already holds some of them only gains the missing ones.
pub fn seed(backend: &mut Backend) -> Result<(), BackendError> {
    if backend.store.probe::<Vec<User>>(USER_RECORD_NAME).is_none() {
        // Demo credentials. Do NOT reuse outside local demos.
        let users = vec![
            User {
                id: "admin_1".to_string(),
                username: "ada".to_string(),
                name: "Prof. Ada".to_string(),
                role: Role::Admin,
                password: "admin123".to_string(),
            },
            User {
                id: "student_1".to_string(),
                username: "alice".to_string(),
                name: "Alice".to_string(),
                role: Role::Student,
                password: "student123".to_string(),
            },
            User {
                id: "student_2".to_string(),
                username: "bob".to_string(),
                name: "Bob".to_string(),
                role: Role::Student,
                password: "student123".to_string(),
            },
        ];
        backend.store.save(USER_RECORD_NAME, &users)?;
        tracing::info!("seeded {} demo users", users.len());
    }

    if backend
        .store
        .probe::<Vec<Course>>(COURSE_RECORD_NAME)
        .is_none()
    {
        let users = backend.users();
        let admin_id = users
            .iter()
            .find(|u| u.role == Role::Admin)
            .map(|u| u.id.clone())
            .unwrap_or_else(|| "admin_1".to_string());
        let student_ids: Vec<String> = users
            .iter()
            .filter(|u| u.role == Role::Student)
            .map(|u| u.id.clone())
            .collect();

        let courses = vec![
            Course {
                id: backend.fresh_id("course"),
                name: "CS101 - Introduction to Computer Science".to_string(),
                code: "CS101".to_string(),
                professor_id: admin_id.clone(),
                semester: "Fall 2024".to_string(),
                enrolled_student_ids: student_ids.clone(),
            },
            Course {
                id: backend.fresh_id("course"),
                name: "CS201 - Data Structures".to_string(),
                code: "CS201".to_string(),
                professor_id: admin_id,
                semester: "Fall 2024".to_string(),
                enrolled_student_ids: student_ids,
            },
        ];
        backend.store.save(COURSE_RECORD_NAME, &courses)?;
        tracing::info!("seeded {} demo courses", courses.len());
    }

    if backend
        .store
        .probe::<Vec<Group>>(GROUP_RECORD_NAME)
        .is_none()
    {
        backend.store.save(GROUP_RECORD_NAME, &Vec::<Group>::new())?;
    }

    if backend
        .store
        .probe::<Vec<Assignment>>(ASSIGNMENT_RECORD_NAME)
        .is_none()
    {
        let users = backend.users();
        let admin_id = users
            .iter()
            .find(|u| u.role == Role::Admin)
            .map(|u| u.id.clone())
            .unwrap_or_else(|| "admin_1".to_string());
        let student_ids: Vec<String> = users
            .iter()
            .filter(|u| u.role == Role::Student)
            .map(|u| u.id.clone())
            .collect();
        let course_id = backend
            .store
            .load::<Vec<Course>>(COURSE_RECORD_NAME, vec![])
            .first()
            .map(|c| c.id.clone())
            .unwrap_or_default();

        let blank: HashMap<String, Submission> = student_ids
            .iter()
            .map(|sid| (sid.clone(), Submission::NotSubmitted))
            .collect();

        let assignments = vec![
            Assignment {
                id: backend.fresh_id("asg"),
                title: "Intro to Algorithms Essay".to_string(),
                description: "Write a short essay on divide-and-conquer.".to_string(),
                due_date: Utc::now() + Duration::days(7),
                drive_link: "https://drive.google.com".to_string(),
                course_id: course_id.clone(),
                created_by: admin_id.clone(),
                submission_type: SubmissionType::Individual,
                assigned_student_ids: student_ids.clone(),
                submissions: blank.clone(),
            },
            Assignment {
                id: backend.fresh_id("asg"),
                title: "Data Structures Group Project".to_string(),
                description: "Complete exercises on trees and graphs as a team.".to_string(),
                due_date: Utc::now() + Duration::days(14),
                drive_link: "https://drive.google.com".to_string(),
                course_id,
                created_by: admin_id,
                submission_type: SubmissionType::Group,
                assigned_student_ids: student_ids,
                submissions: blank,
            },
        ];
        backend.store.save(ASSIGNMENT_RECORD_NAME, &assignments)?;
        tracing::info!("seeded {} demo assignments", assignments.len());
    }

    if backend.store.probe::<Session>(SESSION_RECORD_NAME).is_none() {
        backend.store.save(SESSION_RECORD_NAME, &Session::default())?;
    }

    Ok(())
}

///////////////////////
//       TESTS
///////////////////////

#[cfg(test)]
mod seeding {
    use crate::backend::{Backend, RandomIds};
    use crate::data::assignment::db::AssignmentDbExt;
    use crate::data::assignment::SubmissionType;
    use crate::data::course::db::CourseDbExt;
    use crate::data::group::db::GroupDbExt;
    use crate::data::user::db::UserDbExt;
    use crate::data::user::{User, USER_RECORD_NAME};
    use crate::role::Role;
    use crate::store::Store;

    use super::seed;

    fn test_backend() -> Backend {
        Backend::new(Store::in_memory(), Box::new(RandomIds))
    }

    #[test]
    fn first_run_materializes_all_records() {
        let mut backend = test_backend();
        seed(&mut backend).expect("seeding must succeed");

        let users = backend.users();
        assert_eq!(users.len(), 3);
        assert_eq!(users[0].username, "ada");
        assert_eq!(users[0].role, Role::Admin);

        let courses = backend.courses();
        assert_eq!(courses.len(), 2);
        assert!(courses.iter().all(|c| c.professor_id == "admin_1"));
        assert!(courses[0].is_enrolled("student_1"));
        assert!(courses[0].is_enrolled("student_2"));

        assert!(backend.groups().is_empty());

        let assignments = backend.assignments();
        assert_eq!(assignments.len(), 2);
        assert_eq!(assignments[0].submission_type, SubmissionType::Individual);
        assert_eq!(assignments[1].submission_type, SubmissionType::Group);
        assert_eq!(assignments[0].course_id, courses[0].id);
        assert_eq!(assignments[0].submitted_count(), 0);

        assert_eq!(backend.session().current_user_id, None);
    }

    #[test]
    fn seeding_twice_changes_nothing() {
        let mut backend = test_backend();
        seed(&mut backend).expect("seeding must succeed");

        let course_ids: Vec<String> = backend.courses().iter().map(|c| c.id.clone()).collect();
        let assignment_ids: Vec<String> =
            backend.assignments().iter().map(|a| a.id.clone()).collect();

        seed(&mut backend).expect("reseeding must succeed");

        assert_eq!(backend.users().len(), 3);
        assert_eq!(
            backend
                .courses()
                .iter()
                .map(|c| c.id.clone())
                .collect::<Vec<_>>(),
            course_ids
        );
        assert_eq!(
            backend
                .assignments()
                .iter()
                .map(|a| a.id.clone())
                .collect::<Vec<_>>(),
            assignment_ids
        );
    }

    #[test]
    fn only_missing_records_are_filled_in() {
        let mut backend = test_backend();

        let custom_users = vec![User {
            id: "admin_9".to_string(),
            username: "grace".to_string(),
            name: "Prof. Grace".to_string(),
            role: Role::Admin,
            password: "hopper".to_string(),
        }];
        backend
            .store
            .save(USER_RECORD_NAME, &custom_users)
            .expect("unable to pre-populate users");

        seed(&mut backend).expect("seeding must succeed");

        // Pre-existing users survive; derived records build on them.
        assert_eq!(backend.users().len(), 1);
        assert!(backend.courses().iter().all(|c| c.professor_id == "admin_9"));
        assert!(backend
            .assignments()
            .iter()
            .all(|a| a.assigned_student_ids.is_empty()));
    }
}
