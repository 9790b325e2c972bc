use chrono::Utc;

use crate::backend::Backend;
use crate::data::group::db::GroupDbExt;
use crate::error::BackendError;

use super::{
    Assignment, AssignmentCreateData, Submission, SubmissionType, ASSIGNMENT_RECORD_NAME,
};

pub trait AssignmentDbExt {
    /// All assignments, newest first.
    fn assignments(&self) -> Vec<Assignment>;

    /// Builds a `NotSubmitted` entry per assigned student and prepends the
    /// assignment; the stored list stays newest-first.
    fn create_assignment(&mut self, data: AssignmentCreateData)
        -> Result<Assignment, BackendError>;

    /// Records an acknowledgement (or retracts one). Individual assignments
    /// touch only the calling student. Group assignments accept the call
    /// solely from the leader of the student's group in the assignment's
    /// course and fan the new state out to every assigned member in one
    /// write; other callers are ignored, as is an unknown assignment id.
    fn update_submission(
        &mut self,
        assignment_id: &str,
        student_id: &str,
        submitted: bool,
    ) -> Result<(), BackendError>;
}

impl AssignmentDbExt for Backend {
    fn assignments(&self) -> Vec<Assignment> {
        self.store.load(ASSIGNMENT_RECORD_NAME, vec![])
    }

    fn create_assignment(
        &mut self,
        data: AssignmentCreateData,
    ) -> Result<Assignment, BackendError> {
        let mut assignments = self.assignments();

        let submissions = data
            .assigned_student_ids
            .iter()
            .map(|sid| (sid.clone(), Submission::NotSubmitted))
            .collect();

        let assignment = Assignment {
            id: self.fresh_id("asg"),
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            drive_link: data.drive_link,
            course_id: data.course_id,
            created_by: data.created_by,
            submission_type: data.submission_type,
            assigned_student_ids: data.assigned_student_ids,
            submissions,
        };

        assignments.insert(0, assignment.clone());
        self.store.save(ASSIGNMENT_RECORD_NAME, &assignments)?;

        tracing::info!(
            "created assignment {} for course {}",
            assignment.id,
            assignment.course_id
        );
        Ok(assignment)
    }

    fn update_submission(
        &mut self,
        assignment_id: &str,
        student_id: &str,
        submitted: bool,
    ) -> Result<(), BackendError> {
        let mut assignments = self.assignments();
        let idx = match assignments.iter().position(|a| a.id == assignment_id) {
            Some(idx) => idx,
            None => return Ok(()),
        };

        match assignments[idx].submission_type {
            SubmissionType::Individual => {
                let entry = if submitted {
                    Submission::Submitted {
                        confirmed_at: Utc::now(),
                    }
                } else {
                    Submission::NotSubmitted
                };
                assignments[idx]
                    .submissions
                    .insert(student_id.to_string(), entry);
            }
            SubmissionType::Group => {
                let course_id = assignments[idx].course_id.clone();
                let group = match self.student_group(student_id, &course_id) {
                    Some(group) => group,
                    // Ungrouped students can't touch a group assignment.
                    None => return Ok(()),
                };
                if !group.is_led_by(student_id) {
                    // Only the leader's confirmation counts.
                    return Ok(());
                }

                let confirmed_at = Utc::now();
                let assignment = &mut assignments[idx];
                for member in &group.member_ids {
                    if !assignment.assigned_student_ids.iter().any(|id| id == member) {
                        continue;
                    }
                    let entry = if submitted {
                        Submission::AcknowledgedByLeader {
                            confirmed_at,
                            acknowledged_by: student_id.to_string(),
                        }
                    } else {
                        Submission::NotSubmitted
                    };
                    assignment.submissions.insert(member.clone(), entry);
                }

                tracing::info!(
                    "leader {} marked group {} as submitted={} on assignment {}",
                    student_id,
                    group.id,
                    submitted,
                    assignment_id
                );
            }
        }

        self.store.save(ASSIGNMENT_RECORD_NAME, &assignments)?;
        Ok(())
    }
}

///////////////////////
//       TESTS
///////////////////////
