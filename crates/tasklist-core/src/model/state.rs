use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The six task states.
///
/// Any state may be set from any other; only [`Task::mark_complete`]
/// carries extra behavior (cascading completion).
///
/// Persisted as its 1-based ordinal, so `Pending` is stored as `1` and
/// `Paused` as `6`.
///
/// [`Task::mark_complete`]: crate::model::task::Task::mark_complete
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum State {
    #[default]
    Pending,
    InProgress,
    Completed,
    Failed,
    Cancelled,
    Paused,
}

impl State {
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Failed,
        Self::Cancelled,
        Self::Paused,
    ];

    /// Canonical upper-case name, as shown to users.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Cancelled => "CANCELLED",
            Self::Paused => "PAUSED",
        }
    }

    /// Storage ordinal (1-based).
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Pending => 1,
            Self::InProgress => 2,
            Self::Completed => 3,
            Self::Failed => 4,
            Self::Cancelled => 5,
            Self::Paused => 6,
        }
    }

    /// Inverse of [`State::ordinal`].
    #[must_use]
    pub const fn from_ordinal(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Pending),
            2 => Some(Self::InProgress),
            3 => Some(Self::Completed),
            4 => Some(Self::Failed),
            5 => Some(Self::Cancelled),
            6 => Some(Self::Paused),
            _ => None,
        }
    }
}

impl From<State> for u8 {
    fn from(state: State) -> Self {
        state.ordinal()
    }
}

impl TryFrom<u8> for State {
    type Error = ParseStateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_ordinal(value).ok_or_else(|| ParseStateError {
            got: value.to_string(),
        })
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn normalize(input: &str) -> String {
    input.trim().to_ascii_uppercase().replace(['-', ' '], "_")
}

impl FromStr for State {
    type Err = ParseStateError;

    /// Accepts names case-insensitively, with `-` or `_` separators, and the
    /// storage ordinals `1`..=`6`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        if let Ok(ordinal) = normalized.parse::<u8>() {
            return Self::try_from(ordinal).map_err(|_| ParseStateError { got: s.to_string() });
        }
        match normalized.as_str() {
            "PENDING" => Ok(Self::Pending),
            "IN_PROGRESS" | "INPROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            "FAILED" => Ok(Self::Failed),
            "CANCELLED" | "CANCELED" => Ok(Self::Cancelled),
            "PAUSED" => Ok(Self::Paused),
            _ => Err(ParseStateError { got: s.to_string() }),
        }
    }
}

/// Error returned when a state name or ordinal is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStateError {
    pub got: String,
}

impl fmt::Display for ParseStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid state: '{}' (expected one of PENDING, IN_PROGRESS, COMPLETED, FAILED, CANCELLED, PAUSED)",
            self.got
        )
    }
}

impl std::error::Error for ParseStateError {}
