//! Pure filters and sorts over task lists.
//!
//! None of these touch storage; the service wraps them with a load when the
//! caller has no list at hand.

use crate::model::{State, Task};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Sort keys for [`sort_tasks`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Position,
    Deadline,
}

impl SortKey {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Deadline => "deadline",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "position" => Ok(Self::Position),
            "deadline" => Ok(Self::Deadline),
            _ => Err(format!("invalid sort key: '{s}' (expected position or deadline)")),
        }
    }
}

#[must_use]
pub fn filter_by_state(tasks: &[Task], state: State) -> Vec<Task> {
    tasks.iter().filter(|t| t.state() == state).cloned().collect()
}

/// Case-insensitive substring match on the title.
#[must_use]
pub fn filter_by_title(tasks: &[Task], keyword: &str) -> Vec<Task> {
    let needle = keyword.to_lowercase();
    tasks
        .iter()
        .filter(|t| t.title().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Tasks whose deadline falls in `[now, now + days]`, both ends inclusive.
///
/// A window reaching past the last representable instant covers everything
/// from `now` on.
#[must_use]
pub fn filter_due_soon(tasks: &[Task], days: u32, now: DateTime<Utc>) -> Vec<Task> {
    let horizon = now
        .checked_add_signed(Duration::days(i64::from(days)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    tasks
        .iter()
        .filter(|t| (now..=horizon).contains(&t.deadline()))
        .cloned()
        .collect()
}

/// Stable ascending sort by `key`.
#[must_use]
pub fn sort_tasks(mut tasks: Vec<Task>, key: SortKey) -> Vec<Task> {
    match key {
        SortKey::Position => tasks.sort_by_key(Task::position),
        SortKey::Deadline => tasks.sort_by_key(Task::deadline),
    }
    tasks
}
