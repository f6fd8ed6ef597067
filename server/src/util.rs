// util.rs
use chrono::{DateTime, Datelike, Local, Timelike};
use uuid::Uuid;

use crate::error::StoreError;

pub type BookId = String;

/// Fresh 32-character lowercase hex identifier.
pub fn generate_book_id() -> BookId {
    Uuid::new_v4().simple().to_string()
}

/// Converts milliseconds since the epoch into a local-time ISO 8601 string.
/// Fractional seconds are rounded to microseconds and only printed when
/// non-zero, e.g. `2023-11-14T22:13:20` or `2023-11-14T22:13:20.123000`.
/// Only years 1 through 9999 are accepted.
pub fn format_epoch_millis(millis: f64) -> Result<String, StoreError> {
    let micros = (millis * 1000.0).round();
    if !micros.is_finite() || micros.abs() >= i64::MAX as f64 {
        return Err(StoreError::InvalidTimestamp(millis));
    }
    let micros = micros as i64;
    let secs = micros.div_euclid(1_000_000);
    let nanos = (micros.rem_euclid(1_000_000) * 1_000) as u32;
    let instant =
        DateTime::from_timestamp(secs, nanos).ok_or(StoreError::InvalidTimestamp(millis))?;
    let local = instant.with_timezone(&Local);
    if !(1..=9999).contains(&local.year()) {
        return Err(StoreError::InvalidTimestamp(millis));
    }
    let formatted = if local.nanosecond() == 0 {
        local.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        local.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    };
    Ok(formatted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, TimeZone};

    fn parse_back(formatted: &str) -> DateTime<Local> {
        let naive = NaiveDateTime::parse_from_str(formatted, "%Y-%m-%dT%H:%M:%S%.f").unwrap();
        Local.from_local_datetime(&naive).earliest().unwrap()
    }

    #[test]
    fn test_book_ids_are_hex_and_distinct() {
        let a = generate_book_id();
        let b = generate_book_id();
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_whole_seconds_have_no_fraction() {
        let formatted = format_epoch_millis(1_700_000_000_000.0).unwrap();
        assert_eq!(formatted.len(), "2023-11-14T22:13:20".len());
        assert!(!formatted.contains('.'));
        assert_eq!(parse_back(&formatted).timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_fraction_printed_as_microseconds() {
        let formatted = format_epoch_millis(1_700_000_000_123.0).unwrap();
        assert!(formatted.ends_with(".123000"));
        assert_eq!(parse_back(&formatted).timestamp_millis(), 1_700_000_000_123);
    }

    #[test]
    fn test_unrepresentable_timestamp() {
        assert!(matches!(
            format_epoch_millis(1e30),
            Err(StoreError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_years_past_9999_rejected() {
        assert!(matches!(
            format_epoch_millis(4e14),
            Err(StoreError::InvalidTimestamp(_))
        ));
        assert!(format_epoch_millis(2.5e14).is_ok());
    }
}
