// This file is part of the when utility.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.
//! Lunar phase arithmetic.
//!
//! Two independent computations live here. The phase *index* is a cheap
//! fractional-age calculation: Julian day number, elapsed synodic months
//! since a known new moon, age mapped onto eight named phases. Full-moon
//! *instants* use a proper ephemeris approximation: a mean-phase estimate
//! stepped one synodic month at a time until it brackets the query instant,
//! then a true-phase correction built from sinusoidal perturbation terms in
//! the Moon's mean anomaly, argument of latitude, and mean elongation.
//!
//! All instants are UTC. The full-moon iterator is infinite and strictly
//! increasing; callers bound consumption themselves.

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc};

use crate::errors::{WhenError, WhenResult};

/// Days between successive new moons.
pub const SYNODIC_MONTH: f64 = 29.5305;

/// Proleptic-Gregorian ordinal (day 1 = 0001-01-01) to Julian day number.
const JULIAN_OFFSET: f64 = 1_721_424.5;

/// Julian day of the new moon of 2000-01-06.
const KNOWN_NEW_MOON: f64 = 2_451_549.5;

/// Julian day of the Unix epoch.
const EPOCH_JULIAN: f64 = 2_440_587.5;

const SECONDS_PER_DAY: f64 = 86400.0;

/// A date's position within the synodic cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phase {
    /// 0 new moon .. 4 full moon .. 7 waning crescent.
    pub index: usize,
    /// Days since the preceding new moon.
    pub age: f64,
}

/// Phase of the moon on a calendar date.
pub fn phase_on(date: NaiveDate) -> Phase {
    let julian = f64::from(date.num_days_from_ce()) + JULIAN_OFFSET;
    let new_moons = (julian - KNOWN_NEW_MOON) / SYNODIC_MONTH;
    let age = (new_moons - new_moons.floor()) * SYNODIC_MONTH;
    let index = ((age / (SYNODIC_MONTH / 8.0)) as usize).min(7);
    Phase { index, age }
}

fn dsin(degrees: f64) -> f64 {
    degrees.to_radians().sin()
}

fn dcos(degrees: f64) -> f64 {
    degrees.to_radians().cos()
}

/// Calendar (year, month) for a Julian day, used to seed the synodic month
/// index.
fn julian_year_month(jd: f64) -> (f64, f64) {
    let jd = jd + 0.5;
    let z = jd.floor();
    let a = if z < 2_299_161.0 {
        z
    } else {
        let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
        z + 1.0 + alpha - (alpha / 4.0).floor()
    };
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
    (year, month)
}

/// Julian day of the mean phase for synodic month index `k`, counted from
/// the 1900 epoch.
fn mean_phase(start_jd: f64, k: f64) -> f64 {
    // time in centuries since 1900 January 0.5
    let t = (start_jd - 2_415_020.0) / 365.25;
    let t2 = t * t;
    2_415_020.75933 + SYNODIC_MONTH * k + 0.0001178 * t2 - 0.000000155 * t * t2
        + 0.00033 * dsin(166.56 + 132.87 * t - 0.009173 * t2)
}

/// Apply the perturbation series to a mean phase time. `phase` is the cycle
/// fraction: 0.0 new, 0.5 full, 0.25/0.75 quarters.
fn true_phase(k: f64, phase: f64) -> f64 {
    let k = k + phase;
    let t = k / 1236.85;
    let t2 = t * t;
    let t3 = t2 * t;

    let mut pt = 2_415_020.75933 + SYNODIC_MONTH * k + 0.0001178 * t2 - 0.000000155 * t3
        + 0.00033 * dsin(166.56 + 132.87 * t - 0.009173 * t2);

    // Sun's mean anomaly, Moon's mean anomaly, Moon's argument of latitude
    let m = 359.2242 + 29.10535608 * k - 0.0000333 * t2 - 0.00000347 * t3;
    let mprime = 306.0253 + 385.81691806 * k + 0.0107306 * t2 + 0.00001236 * t3;
    let f = 21.2964 + 390.67050646 * k - 0.0016528 * t2 - 0.00000239 * t3;

    if phase < 0.01 || (phase - 0.5).abs() < 0.01 {
        pt += (0.1734 - 0.000393 * t) * dsin(m) + 0.0021 * dsin(2.0 * m) - 0.4068 * dsin(mprime)
            + 0.0161 * dsin(2.0 * mprime)
            - 0.0004 * dsin(3.0 * mprime)
            + 0.0104 * dsin(2.0 * f)
            - 0.0051 * dsin(m + mprime)
            - 0.0074 * dsin(m - mprime)
            + 0.0004 * dsin(2.0 * f + m)
            - 0.0004 * dsin(2.0 * f - m)
            - 0.0006 * dsin(2.0 * f + mprime)
            + 0.0010 * dsin(2.0 * f - mprime)
            + 0.0005 * dsin(m + 2.0 * mprime);
    } else if (phase - 0.25).abs() < 0.01 || (phase - 0.75).abs() < 0.01 {
        pt += (0.1721 - 0.0004 * t) * dsin(m) + 0.0021 * dsin(2.0 * m) - 0.6280 * dsin(mprime)
            + 0.0089 * dsin(2.0 * mprime)
            - 0.0004 * dsin(3.0 * mprime)
            + 0.0079 * dsin(2.0 * f)
            - 0.0119 * dsin(m + mprime)
            - 0.0047 * dsin(m - mprime)
            + 0.0003 * dsin(2.0 * f + m)
            - 0.0004 * dsin(2.0 * f - m)
            - 0.0006 * dsin(2.0 * f + mprime)
            + 0.0021 * dsin(2.0 * f - mprime)
            + 0.0003 * dsin(m + 2.0 * mprime)
            + 0.0004 * dsin(m - 2.0 * mprime)
            - 0.0003 * dsin(2.0 * m + mprime);
        // quarters lead or lag depending on which side of full
        if phase < 0.5 {
            pt += 0.0028 - 0.0004 * dcos(m) + 0.0003 * dcos(mprime);
        } else {
            pt += -0.0028 + 0.0004 * dcos(m) - 0.0003 * dcos(mprime);
        }
    }

    pt
}

/// The two synodic month indices whose mean phase times straddle `ts`.
fn bracketing_indices(ts: f64) -> (f64, f64) {
    let start_jd = ts / SECONDS_PER_DAY + EPOCH_JULIAN;
    let seed_jd = start_jd - 45.0;
    let (year, month) = julian_year_month(seed_jd);
    let mut k1 = ((year + (month - 1.0) / 12.0 - 1900.0) * 12.3685).floor();

    let mut walk = mean_phase(seed_jd, k1);
    let mut nt1 = walk;
    loop {
        walk += SYNODIC_MONTH;
        let k2 = k1 + 1.0;
        let nt2 = mean_phase(walk, k2);
        if nt1 <= walk && nt2 > start_jd {
            return (k1, k2);
        }
        nt1 = nt2;
        k1 = k2;
    }
}

/// Corrected instant (epoch seconds) of the given phase in the bracketing
/// month before (`second = false`) or after the query instant.
fn phase_instant(ts: f64, phase: f64, second: bool) -> f64 {
    let (k1, k2) = bracketing_indices(ts);
    let jd = true_phase(if second { k2 } else { k1 }, phase);
    (jd - EPOCH_JULIAN) * SECONDS_PER_DAY
}

/// Infinite iterator over full-moon instants, strictly increasing.
pub struct FullMoonIter {
    from_ts: i64,
}

impl Iterator for FullMoonIter {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        let ts = self.from_ts as f64;
        let candidate = phase_instant(ts, 0.5, false);
        let instant = if candidate < ts {
            phase_instant(ts, 0.5, true).floor() as i64
        } else {
            candidate.floor() as i64
        };
        self.from_ts = instant + SECONDS_PER_DAY as i64;
        DateTime::from_timestamp(instant, 0)
    }
}

/// Full moons at or after an instant.
pub fn full_moons_after(instant: DateTime<Utc>) -> FullMoonIter {
    FullMoonIter {
        from_ts: instant.timestamp(),
    }
}

/// The next full moon strictly after `instant`.
pub fn next_full_moon(instant: DateTime<Utc>) -> Option<NaiveDate> {
    full_moons_after(instant).next().map(|dt| dt.date_naive())
}

/// The most recent full moon at or before `instant`: seed the iterator one
/// synodic month back and take the first hit.
pub fn prev_full_moon(instant: DateTime<Utc>) -> Option<NaiveDate> {
    full_moons_after(instant - TimeDelta::days(30))
        .next()
        .map(|dt| dt.date_naive())
}

/// Every full moon whose UTC date falls in `year` — twelve most years,
/// thirteen now and then.
pub fn full_moons_in_year(year: i32) -> Vec<NaiveDate> {
    collect_full_moons(year, None)
}

/// Full moons within one month; two in a blue-moon month.
pub fn full_moons_in_month(year: i32, month: u32) -> Vec<NaiveDate> {
    collect_full_moons(year, Some(month))
}

fn collect_full_moons(year: i32, month: Option<u32>) -> Vec<NaiveDate> {
    let Some(start) = NaiveDate::from_ymd_opt(year, 1, 1) else {
        return Vec::new();
    };
    let seed = (start - TimeDelta::days(1)).and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    let Some(seed) = seed else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for instant in full_moons_after(seed) {
        let date = instant.date_naive();
        if date.year() > year {
            break;
        }
        if date.year() == year && month.map_or(true, |m| date.month() == m) {
            out.push(date);
        }
    }
    out
}

/// Argument accepted by the full-moon listing: a keyword, a year, or
/// `YYYY.MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullMoonRequest {
    Next,
    Prev,
    Year(i32),
    Month(i32, u32),
}

impl FullMoonRequest {
    pub fn parse(arg: &str) -> WhenResult<Self> {
        match arg {
            "next" => Ok(Self::Next),
            "last" | "prev" => Ok(Self::Prev),
            _ => {
                if let Some((year, month)) = arg.split_once('.') {
                    let year = year.parse().ok();
                    let month: Option<u32> = month.parse().ok();
                    if let (Some(year), Some(month @ 1..=12)) = (year, month) {
                        return Ok(Self::Month(year, month));
                    }
                } else if let Ok(year) = arg.parse() {
                    return Ok(Self::Year(year));
                }
                Err(WhenError::UnknownFullMoonArg(arg.to_string()))
            }
        }
    }

    /// Evaluate against "now", yielding one or more dates.
    pub fn dates(self, now: DateTime<Utc>) -> Vec<NaiveDate> {
        match self {
            Self::Next => next_full_moon(now).into_iter().collect(),
            Self::Prev => prev_full_moon(now).into_iter().collect(),
            Self::Year(year) => full_moons_in_year(year),
            Self::Month(year, month) => full_moons_in_month(year, month),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn instant(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        date(y, m, d).and_hms_opt(0, 0, 0).unwrap().and_utc()
    }

    #[test]
    fn known_full_moons_have_index_four() {
        assert_eq!(phase_on(date(2024, 6, 22)).index, 4);
        assert_eq!(phase_on(date(2023, 4, 6)).index, 4);
    }

    #[test]
    fn epoch_new_moon_has_index_zero() {
        let phase = phase_on(date(2000, 1, 6));
        assert_eq!(phase.index, 0);
        assert!(phase.age < 0.5);
    }

    #[test]
    fn iterator_finds_next_full_moon() {
        let mut it = full_moons_after(instant(2024, 6, 1));
        assert_eq!(it.next().unwrap().date_naive(), date(2024, 6, 21));
    }

    #[test]
    fn iterator_never_regresses() {
        // one day after the June 2024 full moon: the next hit is ~29 days
        // out, not the moon just passed
        assert_eq!(next_full_moon(instant(2024, 6, 23)), Some(date(2024, 7, 21)));

        let moons: Vec<_> = full_moons_after(instant(2024, 1, 1)).take(20).collect();
        for pair in moons.windows(2) {
            let gap = pair[1] - pair[0];
            assert!(gap > TimeDelta::days(29), "gap {gap:?}");
            assert!(gap < TimeDelta::days(31), "gap {gap:?}");
        }
    }

    #[test]
    fn a_common_year_has_twelve_full_moons() {
        let moons = full_moons_in_year(2024);
        assert_eq!(
            moons,
            vec![
                date(2024, 1, 25),
                date(2024, 2, 24),
                date(2024, 3, 25),
                date(2024, 4, 23),
                date(2024, 5, 23),
                date(2024, 6, 21),
                date(2024, 7, 21),
                date(2024, 8, 19),
                date(2024, 9, 17),
                date(2024, 10, 17),
                date(2024, 11, 15),
                date(2024, 12, 15),
            ]
        );
    }

    #[test]
    fn some_years_have_thirteen() {
        let moons = full_moons_in_year(2026);
        assert_eq!(moons.len(), 13);
        assert!(moons.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn blue_moon_month_has_two() {
        assert_eq!(
            full_moons_in_month(2026, 5),
            vec![date(2026, 5, 1), date(2026, 5, 31)]
        );
    }

    #[test]
    fn prev_full_moon_looks_backward() {
        assert_eq!(prev_full_moon(instant(2026, 6, 2)), Some(date(2026, 5, 31)));
        assert_eq!(next_full_moon(instant(2026, 6, 2)), Some(date(2026, 6, 29)));
    }

    #[test]
    fn request_parsing() {
        assert_eq!(FullMoonRequest::parse("next").unwrap(), FullMoonRequest::Next);
        assert_eq!(FullMoonRequest::parse("prev").unwrap(), FullMoonRequest::Prev);
        assert_eq!(FullMoonRequest::parse("last").unwrap(), FullMoonRequest::Prev);
        assert_eq!(
            FullMoonRequest::parse("2026").unwrap(),
            FullMoonRequest::Year(2026)
        );
        assert_eq!(
            FullMoonRequest::parse("2026.05").unwrap(),
            FullMoonRequest::Month(2026, 5)
        );
        assert!(matches!(
            FullMoonRequest::parse("foo"),
            Err(WhenError::UnknownFullMoonArg(_))
        ));
    }
}
