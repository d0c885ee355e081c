//! Typed partial updates.
//!
//! A patch holds one optional slot per updatable attribute; `None` leaves
//! the attribute untouched. Because the type only names real fields there is
//! no "unknown field" failure mode.

use super::{State, Task};
use crate::error::Result;
use chrono::{DateTime, Utc};

/// Partial update for a [`Task`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub responsible: Option<String>,
    pub created_by: Option<String>,
    pub position: Option<i64>,
    pub state: Option<State>,
    pub deadline: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl TaskPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Names of the fields this patch sets, for logging.
    #[must_use]
    pub fn field_names(&self) -> Vec<&'static str> {
        let slots = [
            ("title", self.title.is_some()),
            ("description", self.description.is_some()),
            ("responsible", self.responsible.is_some()),
            ("created_by", self.created_by.is_some()),
            ("position", self.position.is_some()),
            ("state", self.state.is_some()),
            ("deadline", self.deadline.is_some()),
            ("completed_at", self.completed_at.is_some()),
        ];
        slots
            .into_iter()
            .filter_map(|(name, set)| set.then_some(name))
            .collect()
    }
}

/// Partial update for a to-do item, addressed by its current position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub text: Option<String>,
    pub position: Option<i64>,
}

impl Task {
    /// Applies every field of `patch` except `position`, then checks the
    /// `completed_at`/state rule.
    ///
    /// Position changes affect the whole collection and are resolved by the
    /// service. On error `self` may be partially modified, so callers apply
    /// patches to a copy.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Validation`](crate::error::TaskError::Validation)
    /// for an empty title or when `completed_at` ends up set on a task that
    /// is not `COMPLETED`.
    pub fn apply_patch(&mut self, patch: &TaskPatch) -> Result<()> {
        if let Some(title) = &patch.title {
            self.set_title(title.clone())?;
        }
        if let Some(description) = &patch.description {
            self.set_description(Some(description.clone()));
        }
        if let Some(responsible) = &patch.responsible {
            self.set_responsible(Some(responsible.clone()));
        }
        if let Some(created_by) = &patch.created_by {
            self.set_created_by(Some(created_by.clone()));
        }
        if let Some(state) = patch.state {
            self.set_state(state);
        }
        if let Some(deadline) = patch.deadline {
            self.set_deadline(deadline);
        }
        if let Some(completed_at) = patch.completed_at {
            self.set_completed_at(Some(completed_at));
        }
        self.check_completion_consistency()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::TaskError;
    use crate::model::NewTask;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, day, 0, 0, 0).unwrap()
    }

    fn task() -> Task {
        Task::create(NewTask::new("Write report", at(10)), &FixedClock(at(1))).unwrap()
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut t = task();
        let before = t.clone();
        assert!(TaskPatch::default().is_empty());
        t.apply_patch(&TaskPatch::default()).unwrap();
        assert_eq!(t, before);
    }

    #[test]
    fn patch_sets_plain_fields() {
        let mut t = task();
        let patch = TaskPatch {
            title: Some("Write final report".into()),
            responsible: Some("ana".into()),
            deadline: Some(at(12)),
            state: Some(State::InProgress),
            ..TaskPatch::default()
        };
        t.apply_patch(&patch).unwrap();
        assert_eq!(t.title(), "Write final report");
        assert_eq!(t.responsible(), Some("ana"));
        assert_eq!(t.deadline(), at(12));
        assert_eq!(t.state(), State::InProgress);
        assert_eq!(
            patch.field_names(),
            ["title", "responsible", "state", "deadline"]
        );
    }

    #[test]
    fn patch_rejects_completed_at_without_completed_state() {
        let mut t = task();
        let patch = TaskPatch {
            completed_at: Some(at(3)),
            ..TaskPatch::default()
        };
        assert!(matches!(
            t.apply_patch(&patch),
            Err(TaskError::Validation { field: "completed_at", .. })
        ));
    }

    #[test]
    fn patch_accepts_completed_at_with_completed_state() {
        let mut t = task();
        let patch = TaskPatch {
            state: Some(State::Completed),
            completed_at: Some(at(3)),
            ..TaskPatch::default()
        };
        t.apply_patch(&patch).unwrap();
        assert_eq!(t.completed_at(), Some(at(3)));
    }

    #[test]
    fn patch_rejects_empty_title() {
        let mut t = task();
        let patch = TaskPatch {
            title: Some(String::new()),
            ..TaskPatch::default()
        };
        assert!(t.apply_patch(&patch).is_err());
    }
}
