// This file is part of the when utility.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.
//! Free-text timestamp parsing.
//!
//! Tried in order: numeric Unix timestamps (seconds, or milliseconds when
//! the value is too large for seconds), an ordered battery of calendar
//! formats, then GNU-style relative text via `parse_datetime`. The result
//! is a naive wall-clock value; anchoring it to a zone is the converter's
//! job.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::errors::{WhenError, WhenResult};

/// Values at or above this are taken as milliseconds since the epoch.
const MILLIS_CUTOVER: f64 = 1e12;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%b %d, %Y %I:%M:%S%P",
    "%b %d, %Y %I:%M%P",
    "%b %d, %Y %I %P",
    "%b %d, %Y %I%P",
    "%b %d, %Y %H:%M:%S",
    "%b %d, %Y %H:%M",
    "%b %d %Y %I:%M%P",
    "%b %d %Y %H:%M",
    "%d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %b %Y",
    "%m/%d/%Y",
    "%m/%d/%y",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M", "%I:%M%P", "%I%P"];

/// Interpret an all-numeric token as a Unix timestamp, expressed as local
/// wall-clock time so it can be re-anchored like any other parse result.
fn from_unix_timestamp(text: &str) -> Option<NaiveDateTime> {
    if !text
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '-')
    {
        return None;
    }
    let value: f64 = text.parse().ok()?;
    let seconds = if value.abs() >= MILLIS_CUTOVER {
        value / 1000.0
    } else {
        value
    };
    let utc = DateTime::from_timestamp(seconds as i64, 0)?;
    Some(utc.with_timezone(&Local).naive_local())
}

/// Parse timestamp text into naive wall-clock fields.
pub fn parse_input(text: &str) -> WhenResult<NaiveDateTime> {
    let text = text.trim();

    if let Some(dt) = from_unix_timestamp(text) {
        return Ok(dt);
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(dt);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                return Ok(dt);
            }
        }
    }

    let today = Local::now().date_naive();
    for format in TIME_FORMATS {
        if let Ok(time) = NaiveTime::parse_from_str(text, format) {
            return Ok(today.and_time(time));
        }
    }

    parse_datetime::parse_datetime(text)
        .map(|dt| dt.naive_local())
        .map_err(|_| WhenError::ParseError(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd_hms(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn month_name_forms() {
        assert_eq!(
            parse_input("Jan 10, 2023 4:30am").unwrap(),
            ymd_hms(2023, 1, 10, 4, 30, 0)
        );
        assert_eq!(
            parse_input("Jan 19, 2024 22:00").unwrap(),
            ymd_hms(2024, 1, 19, 22, 0, 0)
        );
        assert_eq!(
            parse_input("July 29, 2024 10am").unwrap(),
            ymd_hms(2024, 7, 29, 10, 0, 0)
        );
    }

    #[test]
    fn iso_forms() {
        assert_eq!(
            parse_input("2023-01-10 04:30:00").unwrap(),
            ymd_hms(2023, 1, 10, 4, 30, 0)
        );
        assert_eq!(
            parse_input("2023-01-10T04:30").unwrap(),
            ymd_hms(2023, 1, 10, 4, 30, 0)
        );
        assert_eq!(
            parse_input("2023-01-10").unwrap(),
            ymd_hms(2023, 1, 10, 0, 0, 0)
        );
    }

    #[test]
    fn unix_timestamps_in_seconds_and_millis() {
        let expected = DateTime::from_timestamp(1_721_774_096, 0)
            .unwrap()
            .with_timezone(&Local)
            .naive_local();
        assert_eq!(parse_input("1721774096").unwrap(), expected);
        assert_eq!(parse_input("1721774096000").unwrap(), expected);
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(
            parse_input("the moon is made of cheese zzz"),
            Err(WhenError::ParseError(_))
        ));
    }

    #[test]
    fn time_only_lands_on_today() {
        let parsed = parse_input("21:35").unwrap();
        assert_eq!(parsed.time(), NaiveTime::from_hms_opt(21, 35, 0).unwrap());
        assert_eq!(parsed.date(), Local::now().date_naive());
    }
}
