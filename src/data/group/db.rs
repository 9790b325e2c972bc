use chrono::Utc;

use crate::backend::Backend;
use crate::error::BackendError;

use super::{Group, GroupCreateData, GROUP_RECORD_NAME};

pub trait GroupDbExt {
    fn groups(&self) -> Vec<Group>;

    /// The group `student_id` belongs to inside `course_id`. Membership is
    /// kept to at most one group per student per course, so this is unique.
    fn student_group(&self, student_id: &str, course_id: &str) -> Option<Group>;

    /// Creates a group led by `leader_id`. The leader is always part of the
    /// membership. Fails with `AlreadyGrouped` when any proposed member is in
    /// a group for that course already.
    fn create_group(&mut self, data: GroupCreateData) -> Result<Group, BackendError>;

    /// Adds a student; idempotent when already a member, `Ok(None)` for an
    /// unknown group id.
    fn join_group(&mut self, group_id: &str, student_id: &str)
        -> Result<Option<Group>, BackendError>;

    /// Removes a student and returns the post-departure snapshot. A departing
    /// leader hands leadership to the first remaining member; a group left
    /// empty is deleted from storage.
    fn leave_group(&mut self, group_id: &str, student_id: &str)
        -> Result<Option<Group>, BackendError>;
}

impl GroupDbExt for Backend {
    fn groups(&self) -> Vec<Group> {
        self.store.load(GROUP_RECORD_NAME, vec![])
    }

    fn student_group(&self, student_id: &str, course_id: &str) -> Option<Group> {
        self.groups()
            .into_iter()
            .find(|g| g.course_id == course_id && g.is_member(student_id))
    }

    fn create_group(&mut self, data: GroupCreateData) -> Result<Group, BackendError> {
        let mut member_ids = data
            .member_ids
            .clone()
            .unwrap_or_else(|| vec![data.leader_id.clone()]);
        if !member_ids.iter().any(|id| id == &data.leader_id) {
            member_ids.insert(0, data.leader_id.clone());
        }

        for member in &member_ids {
            if self.student_group(member, &data.course_id).is_some() {
                return Err(BackendError::AlreadyGrouped {
                    student: member.clone(),
                    course: data.course_id,
                });
            }
        }

        let mut groups = self.groups();
        let group = Group {
            id: self.fresh_id("group"),
            name: data.name,
            leader_id: data.leader_id,
            member_ids,
            course_id: data.course_id,
            created_at: Utc::now(),
        };

        groups.push(group.clone());
        self.store.save(GROUP_RECORD_NAME, &groups)?;

        tracing::info!(
            "created group {} in course {} with {} member(s)",
            group.id,
            group.course_id,
            group.member_ids.len()
        );
        Ok(group)
    }

    fn join_group(
        &mut self,
        group_id: &str,
        student_id: &str,
    ) -> Result<Option<Group>, BackendError> {
        let mut groups = self.groups();
        let idx = match groups.iter().position(|g| g.id == group_id) {
            Some(idx) => idx,
            None => return Ok(None),
        };

        if groups[idx].is_member(student_id) {
            return Ok(Some(groups[idx].clone()));
        }
        if self
            .student_group(student_id, &groups[idx].course_id)
            .is_some()
        {
            return Err(BackendError::AlreadyGrouped {
                student: student_id.to_string(),
                course: groups[idx].course_id.clone(),
            });
        }

        groups[idx].member_ids.push(student_id.to_string());
        self.store.save(GROUP_RECORD_NAME, &groups)?;

        tracing::info!("student {} joined group {}", student_id, group_id);
        Ok(Some(groups[idx].clone()))
    }

    fn leave_group(
        &mut self,
        group_id: &str,
        student_id: &str,
    ) -> Result<Option<Group>, BackendError> {
        let mut groups = self.groups();
        let idx = match groups.iter().position(|g| g.id == group_id) {
            Some(idx) => idx,
            None => return Ok(None),
        };

        let mut group = groups[idx].clone();
        group.member_ids.retain(|id| id != student_id);

        if group.is_led_by(student_id) && !group.member_ids.is_empty() {
            group.leader_id = group.member_ids[0].clone();
            tracing::info!(
                "group {} leadership passed to {}",
                group.id,
                group.leader_id
            );
        }

        if group.member_ids.is_empty() {
            groups.remove(idx);
            tracing::info!("group {} disbanded", group.id);
        } else {
            groups[idx] = group.clone();
        }

        self.store.save(GROUP_RECORD_NAME, &groups)?;
        Ok(Some(group))
    }
}

///////////////////////
//       TESTS
///////////////////////
