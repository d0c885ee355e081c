use std::fmt;
use std::io;
use std::path::PathBuf;

/// Machine-readable error codes for scripts and agents driving the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    InvalidField,
    TaskNotFound,
    ItemNotFound,
    DuplicateTask,
    StoreReadFailed,
    StoreWriteFailed,
    CorruptStore,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1002",
            Self::InvalidField => "E2001",
            Self::TaskNotFound => "E2002",
            Self::ItemNotFound => "E2003",
            Self::DuplicateTask => "E2004",
            Self::StoreReadFailed => "E5001",
            Self::StoreWriteFailed => "E5002",
            Self::CorruptStore => "E5003",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::InvalidField => "Invalid field value",
            Self::TaskNotFound => "Task not found",
            Self::ItemNotFound => "To-do item not found",
            Self::DuplicateTask => "Duplicate task identifier",
            Self::StoreReadFailed => "Task store read failed",
            Self::StoreWriteFailed => "Task store write failed",
            Self::CorruptStore => "Task store is not valid JSON",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in tasklist.toml and retry."),
            Self::InvalidField => None,
            Self::TaskNotFound => Some("Run `tl list` to see task GUIDs."),
            Self::ItemNotFound => Some("Run `tl view <guid>` to see item positions."),
            Self::DuplicateTask => Some("Retry; a fresh GUID is generated per task."),
            Self::StoreReadFailed | Self::StoreWriteFailed => {
                Some("Check the store path and its permissions.")
            }
            Self::CorruptStore => Some("Restore the store from a backup or fix the JSON by hand."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised by the task model, the repositories and the service.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// A factory, setter or cross-field check rejected its input.
    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    /// No task has the given GUID.
    #[error("task not found: {0}")]
    TaskNotFound(String),

    /// The task exists but does not own the referenced item.
    #[error("to-do item {item} not found in task {task}")]
    ItemNotFound { task: String, item: String },

    /// A task with the same GUID is already stored.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(String),

    /// Reading the backing file failed.
    #[error("failed to read task store {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the backing file failed.
    #[error("failed to write task store {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The backing file does not hold a valid task collection.
    #[error("task store at {} could not be decoded: {source}", path.display())]
    Codec {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl TaskError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn item_not_found(task: &str, item: impl fmt::Display) -> Self {
        Self::ItemNotFound {
            task: task.to_string(),
            item: item.to_string(),
        }
    }

    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { .. } => ErrorCode::InvalidField,
            Self::TaskNotFound(_) => ErrorCode::TaskNotFound,
            Self::ItemNotFound { .. } => ErrorCode::ItemNotFound,
            Self::DuplicateTask(_) => ErrorCode::DuplicateTask,
            Self::Read { .. } => ErrorCode::StoreReadFailed,
            Self::Write { .. } => ErrorCode::StoreWriteFailed,
            Self::Codec { .. } => ErrorCode::CorruptStore,
        }
    }

    /// Optional remediation hint for operators and agents.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }

    /// Returns `true` for the not-found family of errors.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::TaskNotFound(_) | Self::ItemNotFound { .. })
    }
}

/// Result alias used across the core crate.
pub type Result<T, E = TaskError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::{ErrorCode, TaskError};
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::ConfigParseError,
            ErrorCode::InvalidField,
            ErrorCode::TaskNotFound,
            ErrorCode::ItemNotFound,
            ErrorCode::DuplicateTask,
            ErrorCode::StoreReadFailed,
            ErrorCode::StoreWriteFailed,
            ErrorCode::CorruptStore,
        ];

        let mut seen = HashSet::new();
        for code in all {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        let code = ErrorCode::TaskNotFound.code();
        assert_eq!(code.len(), 5);
        assert!(code.starts_with('E'));
        assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn task_errors_map_to_codes() {
        let err = TaskError::validation("title", "must not be empty");
        assert_eq!(err.code(), ErrorCode::InvalidField);
        assert_eq!(err.to_string(), "invalid title: must not be empty");

        let err = TaskError::item_not_found("abc", 4);
        assert_eq!(err.code(), ErrorCode::ItemNotFound);
        assert!(err.is_not_found());
        assert!(err.hint().is_some());

        assert!(!TaskError::DuplicateTask("x".into()).is_not_found());
    }
}
