//! Timestamp decoding for store records.
//!
//! Records are written as RFC 3339 in UTC. Older stores hold naive ISO-8601
//! strings (`2025-05-01T09:30:00.123456`, no offset); those read as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, de};

/// Parses RFC 3339, a naive ISO-8601 date-time, or a bare `YYYY-MM-DD`
/// (midnight UTC).
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp '{raw}'")))
}

pub(crate) fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| {
            parse_timestamp(&raw)
                .ok_or_else(|| de::Error::custom(format!("invalid timestamp '{raw}'")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_rfc3339_with_any_offset() {
        let expected = Utc.with_ymd_and_hms(2025, 5, 10, 12, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2025-05-10T12:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-05-10T14:00:00+02:00"), Some(expected));
    }

    #[test]
    fn naive_timestamps_read_as_utc() {
        let parsed = parse_timestamp("2025-05-10T08:15:30.250000").unwrap();
        assert_eq!(
            parsed,
            Utc.with_ymd_and_hms(2025, 5, 10, 8, 15, 30).unwrap()
                + chrono::Duration::milliseconds(250)
        );
    }

    #[test]
    fn bare_date_is_midnight() {
        assert_eq!(
            parse_timestamp("2025-05-10"),
            Some(Utc.with_ymd_and_hms(2025, 5, 10, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_timestamp("next tuesday").is_none());
        assert!(parse_timestamp("2025-13-40").is_none());
        assert!(parse_timestamp("").is_none());
    }
}
