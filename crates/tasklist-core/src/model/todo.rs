use crate::clock::Clock;
use crate::error::{Result, TaskError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One checklist entry owned by a [`Task`](super::task::Task).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToDoItem {
    guid: String,
    text: String,
    position: u32,
    completed: bool,
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "super::timestamp::deserialize_opt")]
    completed_at: Option<DateTime<Utc>>,
}

impl ToDoItem {
    /// Creates an unplaced item.
    ///
    /// The position stays at `0` until the owning task appends it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Validation`] if `text` is empty or blank.
    pub fn create(text: impl Into<String>, clock: &impl Clock) -> Result<Self> {
        let text = validate_text(text.into())?;
        Ok(Self {
            guid: Uuid::new_v4().to_string(),
            text,
            position: 0,
            completed: false,
            created_at: clock.now(),
            completed_at: None,
        })
    }

    #[must_use]
    pub fn guid(&self) -> &str {
        &self.guid
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn position(&self) -> u32 {
        self.position
    }

    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Marks the item done. A no-op if it already is, so the first
    /// `completed_at` is kept.
    pub fn mark_complete(&mut self, clock: &impl Clock) {
        if !self.completed {
            self.completed = true;
            self.completed_at = Some(clock.now());
        }
    }

    /// Replaces the item text.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Validation`] if `text` is empty or blank.
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<()> {
        self.text = validate_text(text.into())?;
        Ok(())
    }

    pub(crate) const fn set_position(&mut self, position: u32) {
        self.position = position;
    }
}

fn validate_text(text: String) -> Result<String> {
    if text.trim().is_empty() {
        return Err(TaskError::validation("text", "must not be empty"));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{Duration, TimeZone};

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap())
    }

    #[test]
    fn create_starts_unplaced_and_open() {
        let item = ToDoItem::create("Call the doctor", &clock()).unwrap();
        assert_eq!(item.text(), "Call the doctor");
        assert_eq!(item.position(), 0);
        assert!(!item.is_completed());
        assert!(item.completed_at().is_none());
        assert_eq!(item.created_at(), clock().now());
        assert!(Uuid::parse_str(item.guid()).is_ok());
    }

    #[test]
    fn create_rejects_empty_text() {
        assert!(matches!(
            ToDoItem::create("", &clock()),
            Err(TaskError::Validation { field: "text", .. })
        ));
        assert!(ToDoItem::create("   ", &clock()).is_err());
    }

    #[test]
    fn every_item_gets_its_own_guid() {
        let a = ToDoItem::create("a", &clock()).unwrap();
        let b = ToDoItem::create("a", &clock()).unwrap();
        assert_ne!(a.guid(), b.guid());
    }

    #[test]
    fn mark_complete_keeps_first_timestamp() {
        let mut item = ToDoItem::create("Step one", &clock()).unwrap();
        item.mark_complete(&clock());
        assert!(item.is_completed());
        assert_eq!(item.completed_at(), Some(clock().now()));

        let later = FixedClock(clock().now() + Duration::hours(3));
        item.mark_complete(&later);
        assert_eq!(item.completed_at(), Some(clock().now()));
    }

    #[test]
    fn set_text_validates() {
        let mut item = ToDoItem::create("Step one", &clock()).unwrap();
        item.set_text("Step 1").unwrap();
        assert_eq!(item.text(), "Step 1");
        assert!(item.set_text("").is_err());
        assert_eq!(item.text(), "Step 1");
    }
}
