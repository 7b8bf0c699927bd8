//! Points in time used by datetime values and price lookups

use crate::error::AmountError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};

/// A calendar date and wall-clock time without timezone.
pub type Moment = NaiveDateTime;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const TIME_FORMAT: &str = "%H:%M:%S";

/// The current moment (UTC).
pub fn now() -> Moment {
    Utc::now().naive_utc()
}

/// Parse `YYYY-MM-DD` or `YYYY/MM/DD`.
pub fn parse_date(text: &str) -> Result<NaiveDate, AmountError> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .ok_or_else(|| AmountError::InvalidDate(text.to_string()))
}

/// Parse a date with an optional ` HH:MM:SS` suffix. A bare date means midnight.
pub fn parse_moment(text: &str) -> Result<Moment, AmountError> {
    let text = text.trim();
    match text.split_once(' ') {
        Some((date, time)) => {
            let date = parse_date(date)?;
            let time = NaiveTime::parse_from_str(time.trim(), TIME_FORMAT)
                .map_err(|_| AmountError::InvalidDate(text.to_string()))?;
            Ok(date.and_time(time))
        }
        None => parse_date(text)?
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| AmountError::InvalidDate(text.to_string())),
    }
}

/// Seconds since the Unix epoch, reading the moment as UTC.
pub fn timestamp(moment: &Moment) -> i64 {
    moment.and_utc().timestamp()
}

/// Inverse of [`timestamp`]; `None` when out of range.
pub fn from_timestamp(seconds: i64) -> Option<Moment> {
    DateTime::from_timestamp(seconds, 0).map(|dt| dt.naive_utc())
}

/// Shift a moment by whole seconds; `None` on overflow.
pub fn add_seconds(moment: &Moment, seconds: i64) -> Option<Moment> {
    TimeDelta::try_seconds(seconds).and_then(|delta| moment.checked_add_signed(delta))
}

/// Render a moment as `YYYY/MM/DD HH:MM:SS`.
pub fn format_moment(moment: &Moment) -> String {
    moment.format("%Y/%m/%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(parse_date("2024-03-09").unwrap(), expected);
        assert_eq!(parse_date("2024/03/09").unwrap(), expected);
        assert!(parse_date("09.03.2024").is_err());
    }

    #[test]
    fn test_parse_moment_with_and_without_time() {
        let midnight = parse_moment("2024/03/09").unwrap();
        assert_eq!(format_moment(&midnight), "2024/03/09 00:00:00");

        let afternoon = parse_moment("2024-03-09 14:30:05").unwrap();
        assert_eq!(format_moment(&afternoon), "2024/03/09 14:30:05");

        assert_eq!(
            parse_moment("2024-03-09 25:00:00"),
            Err(AmountError::InvalidDate("2024-03-09 25:00:00".to_string()))
        );
    }

    #[test]
    fn test_timestamps_and_shifts() {
        let epoch = parse_moment("1970-01-01").unwrap();
        assert_eq!(timestamp(&epoch), 0);
        assert_eq!(from_timestamp(86_400), Some(parse_moment("1970-01-02").unwrap()));

        let later = add_seconds(&epoch, 90).unwrap();
        assert_eq!(format_moment(&later), "1970/01/01 00:01:30");
        assert_eq!(add_seconds(&epoch, i64::MAX), None);
    }
}
