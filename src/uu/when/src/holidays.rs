// This file is part of the when utility.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.
//! Holiday rule evaluation.
//!
//! Rules are small text expressions read from configuration and evaluated
//! against a year. Three grammars, tried in order, first match wins:
//!
//! * `Easter +N` / `Easter -N` — offset in days from Easter Sunday
//! * `3rd Mon in Jan`, `Last Thr in Nov` — Nth (or last) weekday of a month
//! * `Jul 4` — a fixed date
//!
//! Keeping the grammars as an ordered list of (matcher, evaluator) pairs
//! means adding a fourth grammar cannot change how existing rules parse.

use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::config::Settings;

const MONTH_ABBRS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holiday {
    pub title: String,
    pub date: NaiveDate,
}

lazy_static! {
    static ref EASTER_RE: Regex = Regex::new(r"(?i)^easter ([+-]\d+)").unwrap();
    static ref FLOATING_RE: Regex = Regex::new(
        r"(?i)^(la|\d)(?:st|rd|th|nd) (mon|tue|wed|thr|fri|sat|sun) in (jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)$"
    )
    .unwrap();
    static ref FIXED_RE: Regex =
        Regex::new(r"(?i)^(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec) (\d\d?)$").unwrap();
}

/// Easter Sunday in the Gregorian calendar (Meeus/Jones/Butcher).
pub fn easter(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

fn month_number(abbr: &str) -> Option<u32> {
    let lower = abbr.to_lowercase();
    MONTH_ABBRS
        .iter()
        .position(|m| *m == lower)
        .map(|i| i as u32 + 1)
}

fn weekday_from_abbr(abbr: &str) -> Option<Weekday> {
    match abbr.to_lowercase().get(..2)? {
        "mo" => Some(Weekday::Mon),
        "tu" => Some(Weekday::Tue),
        "we" => Some(Weekday::Wed),
        "th" => Some(Weekday::Thu),
        "fr" => Some(Weekday::Fri),
        "sa" => Some(Weekday::Sat),
        "su" => Some(Weekday::Sun),
        _ => None,
    }
}

/// All dates of `weekday` within (year, month), calendar order.
fn weekday_occurrences(year: i32, month: u32, weekday: Weekday) -> Vec<NaiveDate> {
    let mut out = Vec::with_capacity(5);
    let mut date = match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(d) => d,
        None => return out,
    };
    while date.month() == month {
        if date.weekday() == weekday {
            out.push(date);
        }
        date += TimeDelta::days(1);
    }
    out
}

fn eval_easter(caps: &Captures, year: i32) -> Option<NaiveDate> {
    let days: i64 = caps[1].parse().ok()?;
    easter(year).map(|d| d + TimeDelta::days(days))
}

fn eval_floating(caps: &Captures, year: i32) -> Option<NaiveDate> {
    let weekday = weekday_from_abbr(&caps[2])?;
    let month = month_number(&caps[3])?;
    let occurrences = weekday_occurrences(year, month, weekday);
    if caps[1].eq_ignore_ascii_case("la") {
        occurrences.last().copied()
    } else {
        let ordinal: usize = caps[1].parse().ok()?;
        occurrences.get(ordinal.checked_sub(1)?).copied()
    }
}

fn eval_fixed(caps: &Captures, year: i32) -> Option<NaiveDate> {
    let month = month_number(&caps[1])?;
    let day: u32 = caps[2].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

type Evaluator = fn(&Captures, i32) -> Option<NaiveDate>;

/// Evaluate one rule expression for a year. Pure: the same (rule, year)
/// always yields the same date.
pub fn evaluate_rule(expr: &str, year: i32) -> Option<NaiveDate> {
    let strategies: [(&Regex, Evaluator); 3] = [
        (&EASTER_RE, eval_easter),
        (&FLOATING_RE, eval_floating),
        (&FIXED_RE, eval_fixed),
    ];
    for (regex, eval) in strategies {
        if let Some(caps) = regex.captures(expr.trim()) {
            return eval(&caps, year);
        }
    }
    None
}

/// Evaluate a country's configured rules for a year, sorted by date.
/// Expressions matching no grammar are reported and skipped rather than
/// silently dropped, so configuration typos stay visible.
pub fn holidays_for(settings: &Settings, country: &str, year: i32) -> Vec<Holiday> {
    let mut out = Vec::new();
    for (title, expr) in settings.holiday_rules(country) {
        match evaluate_rule(&expr, year) {
            Some(date) => out.push(Holiday { title, date }),
            None => show_warning!("skipping holiday rule {title:?}: unrecognized expression {expr:?}"),
        }
    }
    out.sort_by_key(|h| h.date);
    out
}
