// This file is part of the when utility.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.
//! Compact timedelta syntax: `1w2d3h4m5s`, optionally signed with `-` or
//! `~`. Used by `--offset` to shift a parsed timestamp and, in reverse, to
//! print deltas in holiday listings.

use chrono::TimeDelta;
use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::{WhenError, WhenResult};

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86400;
const SECONDS_PER_WEEK: i64 = 7 * 86400;

lazy_static! {
    static ref OFFSET_RE: Regex = Regex::new(r"^[~+-]?(\d+[wdhms])+$").unwrap();
    static ref PART_RE: Regex = Regex::new(r"(\d+)([wdhms])").unwrap();
    static ref BARE_NUMBER_RE: Regex = Regex::new(r"^[~+-]?\d+$").unwrap();
}

/// Parse an offset expression into a signed duration. `~` negates like `-`.
pub fn parse_offset(text: &str) -> WhenResult<TimeDelta> {
    let trimmed = text.trim();
    if !OFFSET_RE.is_match(trimmed) {
        if BARE_NUMBER_RE.is_match(trimmed) {
            return Err(WhenError::InvalidOffset(text.to_string()));
        }
        return Err(WhenError::UnrecognizedOffset(text.to_string()));
    }

    let negative = trimmed.starts_with('-') || trimmed.starts_with('~');
    let mut seconds: i64 = 0;
    for caps in PART_RE.captures_iter(trimmed) {
        let amount: i64 = caps[1].parse().unwrap_or(0);
        seconds += amount
            * match &caps[2] {
                "w" => SECONDS_PER_WEEK,
                "d" => SECONDS_PER_DAY,
                "h" => SECONDS_PER_HOUR,
                "m" => SECONDS_PER_MINUTE,
                _ => 1,
            };
    }
    if negative {
        seconds = -seconds;
    }
    Ok(TimeDelta::seconds(seconds))
}

/// Render a duration the way people say it: `1 week, 2 days, 3 hours` or,
/// in short form, `1w2d3h`. Negative durations get a leading `-`.
pub fn format_timedelta(delta: TimeDelta, short: bool) -> String {
    let total = delta.num_seconds();
    let mut seconds = total.abs();

    let units = [
        ("week", SECONDS_PER_WEEK),
        ("day", SECONDS_PER_DAY),
        ("hour", SECONDS_PER_HOUR),
        ("minute", SECONDS_PER_MINUTE),
        ("second", 1),
    ];

    let mut parts = Vec::new();
    for (unit, size) in units {
        let count = seconds / size;
        seconds %= size;
        if count == 0 {
            continue;
        }
        if short {
            parts.push(format!("{count}{}", &unit[..1]));
        } else if count == 1 {
            parts.push(format!("1 {unit}"));
        } else {
            parts.push(format!("{count} {unit}s"));
        }
    }

    if parts.is_empty() {
        return if short { "0s".to_string() } else { "0 seconds".to_string() };
    }

    let sign = if total < 0 { "-" } else { "" };
    let joined = if short {
        parts.concat()
    } else {
        parts.join(", ")
    };
    format!("{sign}{joined}")
}
