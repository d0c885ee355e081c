use crate::output::CliError;
use chrono::{DateTime, Utc};
use std::fmt;
use tasklist_core::model::parse_timestamp;
use tasklist_core::{ErrorCode, SortKey, State};

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: &'static str,
    pub value: String,
    pub reason: String,
    pub suggestion: String,
}

impl ValidationError {
    pub fn new(
        field: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            field,
            value: value.into(),
            reason: reason.into(),
            suggestion: suggestion.into(),
        }
    }

    pub fn to_cli_error(&self) -> CliError {
        CliError::with_details(
            self.to_string(),
            self.suggestion.clone(),
            ErrorCode::InvalidField.code(),
        )
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {} '{}': {}", self.field, self.value, self.reason)
    }
}

impl std::error::Error for ValidationError {}

pub fn validate_title(s: &str) -> Result<(), ValidationError> {
    if s.trim().is_empty() {
        return Err(ValidationError::new(
            "title",
            s,
            "must not be empty",
            "provide a non-empty --title",
        ));
    }
    Ok(())
}

pub fn validate_guid(s: &str) -> Result<(), ValidationError> {
    if s.trim().is_empty() {
        return Err(ValidationError::new(
            "guid",
            s,
            "must not be empty",
            "run `tl list` to see task GUIDs",
        ));
    }
    if s.chars().any(char::is_whitespace) {
        return Err(ValidationError::new(
            "guid",
            s,
            "must not contain whitespace",
            "quote only the GUID itself",
        ));
    }
    Ok(())
}

pub fn validate_item_position(position: u32) -> Result<(), ValidationError> {
    if position == 0 {
        return Err(ValidationError::new(
            "item position",
            "0",
            "positions start at 1",
            "run `tl view <guid>` to see item positions",
        ));
    }
    Ok(())
}

/// Task positions for `create` start at 1; larger values are clamped later.
pub fn validate_task_position(position: i64) -> Result<u32, ValidationError> {
    if position < 1 {
        return Err(ValidationError::new(
            "position",
            position.to_string(),
            "must be >= 1",
            "use --position 1 for the top of the list",
        ));
    }
    Ok(u32::try_from(position).unwrap_or(u32::MAX))
}

pub fn parse_state(s: &str) -> Result<State, ValidationError> {
    s.parse().map_err(|_| {
        ValidationError::new(
            "state",
            s,
            "expected one of pending, in_progress, completed, failed, cancelled, paused",
            "use --state pending|in_progress|completed|failed|cancelled|paused",
        )
    })
}

pub fn parse_deadline(s: &str) -> Result<DateTime<Utc>, ValidationError> {
    parse_timestamp(s).ok_or_else(|| {
        ValidationError::new(
            "deadline",
            s,
            "expected YYYY-MM-DD or an RFC 3339 timestamp",
            "use --deadline 2025-05-10 or --deadline 2025-05-10T17:00:00Z",
        )
    })
}

pub fn parse_sort_key(s: &str) -> Result<SortKey, ValidationError> {
    s.parse()
        .map_err(|reason: String| ValidationError::new("sort key", s, reason, "use --sort-by position|deadline"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn title_rules() {
        assert!(validate_title("Buy milk").is_ok());
        assert!(validate_title("   ").is_err());
        assert!(validate_title("tab\there").is_ok());
        assert!(validate_title("line one\nline two").is_ok());
        assert!(validate_title(&"x".repeat(500)).is_ok());
    }

    #[test]
    fn guid_rules() {
        assert!(validate_guid("0f6c2b8e-5d0a-4a57-9a55-1f0c7d1e2b3a").is_ok());
        assert!(validate_guid("").is_err());
        assert!(validate_guid("two words").is_err());
    }

    #[test]
    fn states_parse_case_insensitively() {
        assert_eq!(parse_state("completed").unwrap(), State::Completed);
        assert_eq!(parse_state("In-Progress").unwrap(), State::InProgress);
        let err = parse_state("done").unwrap_err();
        assert_eq!(err.field, "state");
        assert!(err.to_string().contains("'done'"));
    }

    #[test]
    fn deadlines_accept_dates_and_timestamps() {
        assert_eq!(
            parse_deadline("2025-05-10").unwrap(),
            Utc.with_ymd_and_hms(2025, 5, 10, 0, 0, 0).unwrap()
        );
        assert_eq!(
            parse_deadline("2025-05-10T17:00:00+02:00").unwrap(),
            Utc.with_ymd_and_hms(2025, 5, 10, 15, 0, 0).unwrap()
        );
        assert!(parse_deadline("10/05/2025").is_err());
    }

    #[test]
    fn positions() {
        assert!(validate_item_position(0).is_err());
        assert!(validate_item_position(3).is_ok());
        assert_eq!(validate_task_position(4).unwrap(), 4);
        assert!(validate_task_position(0).is_err());
        assert!(validate_task_position(-2).is_err());
    }

    #[test]
    fn cli_error_carries_invalid_field_code() {
        let cli = parse_sort_key("title").unwrap_err().to_cli_error();
        assert_eq!(cli.error_code.as_deref(), Some("E2001"));
        assert!(cli.suggestion.is_some());
    }
}
