// This file is part of the when utility.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.
//! Resolution of user-supplied zone tokens into concrete zones.
//!
//! A token may be an IANA identifier, a catalog abbreviation, a glob
//! pattern, or a place name for the gazetteer. Strategies are applied in
//! that order and all matches are accumulated, de-duplicated by display
//! name. A single token may legitimately fan out into several zones.

use chrono::{DateTime, FixedOffset, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::{OffsetName, Tz, TZ_VARIANTS};
use glob::{MatchOptions, Pattern};

use crate::errors::{WhenError, WhenResult};
use crate::gazetteer::{parse_search, City, Gazetteer};
use crate::zones::{Candidate, ZoneCatalog, ZoneRef};

/// The zone-rule object a resolved zone owns. All offset math is delegated
/// to chrono / chrono-tz; this type never computes DST transitions itself.
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneRule {
    Iana(Tz),
    Fixed { offset: FixedOffset, label: String },
}

impl ZoneRule {
    fn from_ref(zone: ZoneRef, label: &str) -> Option<Self> {
        match zone {
            ZoneRef::Id(id) => id.parse::<Tz>().ok().map(ZoneRule::Iana),
            ZoneRef::Offset(seconds) => FixedOffset::east_opt(seconds).map(|offset| {
                ZoneRule::Fixed {
                    offset,
                    label: label.to_string(),
                }
            }),
        }
    }

    /// The current instant, expressed in this zone.
    pub fn now(&self) -> DateTime<FixedOffset> {
        match self {
            ZoneRule::Iana(tz) => Utc::now().with_timezone(tz).fixed_offset(),
            ZoneRule::Fixed { offset, .. } => Utc::now().with_timezone(offset),
        }
    }

    /// Anchor wall-clock fields in this zone without reinterpreting them.
    /// Ambiguous local times take the earlier offset; times skipped by a
    /// forward transition are nudged past the gap.
    pub fn attach(&self, wall: NaiveDateTime) -> DateTime<FixedOffset> {
        match self {
            ZoneRule::Iana(tz) => match tz.from_local_datetime(&wall) {
                LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.fixed_offset(),
                LocalResult::None => tz
                    .from_local_datetime(&(wall + TimeDelta::hours(1)))
                    .earliest()
                    .map(|dt| dt.fixed_offset())
                    .unwrap_or_else(|| tz.from_utc_datetime(&wall).fixed_offset()),
            },
            ZoneRule::Fixed { offset, .. } => match offset.from_local_datetime(&wall) {
                LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
                LocalResult::None => offset.from_utc_datetime(&wall),
            },
        }
    }

    /// Project an instant onto this zone, preserving the absolute time.
    pub fn project(&self, instant: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        match self {
            ZoneRule::Iana(tz) => instant.with_timezone(tz).fixed_offset(),
            ZoneRule::Fixed { offset, .. } => instant.with_timezone(offset),
        }
    }

    /// The zone's abbreviation at a concrete instant. Time-dependent for
    /// IANA zones (EST vs EDT), so it is recomputed on every call.
    pub fn abbreviation(&self, instant: DateTime<FixedOffset>) -> String {
        match self {
            ZoneRule::Iana(tz) => {
                let offset = tz.offset_from_utc_datetime(&instant.naive_utc());
                match offset.abbreviation() {
                    Some(abbr) => abbr.to_string(),
                    None => offset.fix().to_string(),
                }
            }
            ZoneRule::Fixed { label, .. } => label.clone(),
        }
    }

    pub fn iana_id(&self) -> Option<&str> {
        match self {
            ZoneRule::Iana(tz) => Some(tz.name()),
            ZoneRule::Fixed { .. } => None,
        }
    }
}

/// A zone token after resolution: the rule object, an optional display
/// label, and the city that produced it (for gazetteer matches).
#[derive(Debug, Clone)]
pub struct ResolvedZone {
    pub rule: ZoneRule,
    pub name: Option<String>,
    pub city: Option<City>,
}

impl ResolvedZone {
    pub fn iana(tz: Tz) -> Self {
        Self {
            rule: ZoneRule::Iana(tz),
            name: None,
            city: None,
        }
    }

    pub fn utc() -> Self {
        Self::iana(chrono_tz::UTC)
    }

    /// Display name at an instant: explicit alias label, else the city's
    /// zone identifier, else the runtime abbreviation.
    pub fn display_name(&self, instant: DateTime<FixedOffset>) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        if let Some(city) = &self.city {
            return city.tz.clone();
        }
        self.rule.abbreviation(instant)
    }

    /// The `%Z` rendering: live abbreviation, widened with the IANA
    /// identifier when one is known and distinct.
    pub fn annotation(&self, instant: DateTime<FixedOffset>) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        let abbr = self.rule.abbreviation(instant);
        match self.rule.iana_id() {
            Some(id) if id != abbr => format!("{abbr}, {id}"),
            _ => abbr,
        }
    }

    /// Instant-independent identity used for grouping and de-duplication.
    pub fn identity(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        if let Some(city) = &self.city {
            return city.display();
        }
        match &self.rule {
            ZoneRule::Iana(tz) => tz.name().to_string(),
            ZoneRule::Fixed { label, .. } => label.clone(),
        }
    }
}

/// Discover the zone this process runs in: `$TZ` when it names an IANA
/// zone, else the platform database, else UTC.
pub fn local_zone() -> ResolvedZone {
    std::env::var("TZ")
        .ok()
        .filter(|tz| !tz.is_empty())
        .or_else(|| iana_time_zone::get_timezone().ok())
        .and_then(|name| name.parse::<Tz>().ok())
        .map(ResolvedZone::iana)
        .unwrap_or_else(ResolvedZone::utc)
}

fn resolved_from(candidate: &Candidate) -> Option<ResolvedZone> {
    ZoneRule::from_ref(candidate.zone, &candidate.label).map(|rule| ResolvedZone {
        rule,
        name: Some(candidate.label.clone()),
        city: None,
    })
}

pub struct ZoneResolver {
    catalog: ZoneCatalog,
    gazetteer: Box<dyn Gazetteer>,
    local: ResolvedZone,
}

impl ZoneResolver {
    pub fn new(catalog: ZoneCatalog, gazetteer: Box<dyn Gazetteer>, local: ResolvedZone) -> Self {
        Self {
            catalog,
            gazetteer,
            local,
        }
    }

    pub fn local(&self) -> &ResolvedZone {
        &self.local
    }

    /// Resolve a list of tokens into an ordered, de-duplicated zone list.
    /// No tokens means the local zone. Tokens that match nothing contribute
    /// nothing; the converter decides whether that is fatal.
    pub fn resolve(&self, tokens: &[String]) -> WhenResult<Vec<ResolvedZone>> {
        if tokens.is_empty() {
            return Ok(vec![self.local.clone()]);
        }

        let mut seen: Vec<String> = Vec::new();
        let mut zones: Vec<ResolvedZone> = Vec::new();
        let mut push = |zone: ResolvedZone, seen: &mut Vec<String>| {
            // city entries are always kept; named entries are keyed by
            // display identity across every strategy
            if zone.city.is_none() {
                let key = zone.identity();
                if seen.contains(&key) {
                    return;
                }
                seen.push(key);
            }
            zones.push(zone);
        };

        for token in tokens {
            let mut matched = false;

            for candidate in self.catalog.get(token) {
                if let Some(zone) = resolved_from(&candidate) {
                    matched = true;
                    push(zone, &mut seen);
                }
            }

            for zone in self.glob_matches(token) {
                matched = true;
                push(zone, &mut seen);
            }

            match self.city_matches(token) {
                Ok(cities) => {
                    for zone in cities {
                        matched = true;
                        push(zone, &mut seen);
                    }
                }
                // a token that already resolved to a zone does not require
                // the store to be present
                Err(WhenError::StoreUnavailable) if matched => {}
                Err(err) => return Err(err),
            }
        }

        Ok(zones)
    }

    /// Case-insensitive glob over catalog keys and the IANA identifier set.
    /// A literal token is an exact (case-insensitive) match of itself.
    fn glob_matches(&self, token: &str) -> Vec<ResolvedZone> {
        let Ok(pattern) = Pattern::new(token) else {
            return Vec::new();
        };
        let options = MatchOptions {
            case_sensitive: false,
            ..MatchOptions::new()
        };

        let mut out = Vec::new();
        for key in self.catalog.keys() {
            if pattern.matches_with(key, options) {
                for candidate in self.catalog.get(key) {
                    if let Some(zone) = resolved_from(&candidate) {
                        out.push(zone);
                    }
                }
            }
        }
        for tz in TZ_VARIANTS {
            if pattern.matches_with(tz.name(), options) {
                out.push(ResolvedZone {
                    rule: ZoneRule::Iana(tz),
                    name: Some(tz.name().to_string()),
                    city: None,
                });
            }
        }
        out
    }

    /// Treat the token as a place name, optionally `name, country[, sub]`.
    fn city_matches(&self, token: &str) -> WhenResult<Vec<ResolvedZone>> {
        let (name, co, sub) = parse_search(token)?;
        let cities = self.gazetteer.search(&name, co.as_deref(), sub.as_deref())?;
        Ok(cities
            .into_iter()
            .filter_map(|city| {
                city.tz.parse::<Tz>().ok().map(|tz| ResolvedZone {
                    rule: ZoneRule::Iana(tz),
                    name: None,
                    city: Some(city),
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gazetteer::tests::sample_index;
    use crate::gazetteer::CityIndex;

    fn resolver() -> (tempfile::NamedTempFile, ZoneResolver) {
        let (file, index) = sample_index();
        let resolver = ZoneResolver::new(
            ZoneCatalog::default(),
            Box::new(index),
            ResolvedZone::utc(),
        );
        (file, resolver)
    }

    fn noon_utc() -> DateTime<FixedOffset> {
        chrono::NaiveDate::from_ymd_opt(2023, 1, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_utc()
            .fixed_offset()
    }

    #[test]
    fn iana_identifier_resolves_to_exactly_one_zone() {
        let (_f, resolver) = resolver();
        let zones = resolver.resolve(&["America/New_York".to_string()]).unwrap();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].rule.iana_id(), Some("America/New_York"));
    }

    #[test]
    fn ambiguous_abbreviation_fans_out_with_distinct_names() {
        let (_f, resolver) = resolver();
        let zones = resolver.resolve(&["CST".to_string()]).unwrap();
        assert_eq!(zones.len(), 4);
        let mut names: Vec<String> = zones.iter().map(|z| z.identity()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn glob_pattern_matches_many_zones() {
        let (_f, resolver) = resolver();
        let zones = resolver.resolve(&["US/*".to_string()]).unwrap();
        assert!(zones.len() > 5);
        assert!(zones.iter().all(|z| z.identity().starts_with("US/")));
    }

    #[test]
    fn place_name_resolves_through_gazetteer() {
        let (_f, resolver) = resolver();
        let zones = resolver.resolve(&["Seoul".to_string()]).unwrap();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].rule.iana_id(), Some("Asia/Seoul"));
        assert!(zones[0].city.is_some());
        assert!(zones[0].name.is_none());
    }

    #[test]
    fn place_name_with_country_narrows() {
        let (_f, resolver) = resolver();
        let zones = resolver.resolve(&["Paris, FR".to_string()]).unwrap();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].rule.iana_id(), Some("Europe/Paris"));
    }

    #[test]
    fn unknown_token_resolves_to_nothing() {
        let (_f, resolver) = resolver();
        assert!(resolver
            .resolve(&["Nonexistent/Place".to_string()])
            .unwrap()
            .is_empty());
    }

    #[test]
    fn too_many_commas_is_a_parse_error() {
        let (_f, resolver) = resolver();
        assert!(matches!(
            resolver.resolve(&["a,b,c,d".to_string()]),
            Err(WhenError::InvalidSearch(_))
        ));
    }

    #[test]
    fn zone_token_does_not_require_the_store() {
        let missing = CityIndex::new("/not/a/real/store.json");
        let resolver = ZoneResolver::new(
            ZoneCatalog::default(),
            Box::new(missing),
            ResolvedZone::utc(),
        );
        let zones = resolver.resolve(&["Asia/Seoul".to_string()]).unwrap();
        assert_eq!(zones.len(), 1);
        // but a pure place-name token still surfaces the store condition
        assert!(matches!(
            resolver.resolve(&["Atlantis".to_string()]),
            Err(WhenError::StoreUnavailable)
        ));
    }

    #[test]
    fn no_tokens_yields_the_local_zone() {
        let (_f, resolver) = resolver();
        let zones = resolver.resolve(&[]).unwrap();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].rule.iana_id(), Some("UTC"));
    }

    #[test]
    fn abbreviation_is_recomputed_per_instant() {
        let ny = ResolvedZone::iana(chrono_tz::America::New_York);
        let winter = noon_utc();
        let summer = chrono::NaiveDate::from_ymd_opt(2023, 7, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_utc()
            .fixed_offset();
        assert_eq!(ny.rule.abbreviation(winter), "EST");
        assert_eq!(ny.rule.abbreviation(summer), "EDT");
    }

    #[test]
    fn fixed_offset_round_trip() {
        let (_f, resolver) = resolver();
        let zones = resolver.resolve(&["UTC+8:30".to_string()]).unwrap();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].identity(), "UTC+8:30");
        let instant = noon_utc();
        let projected = zones[0].rule.project(instant);
        assert_eq!(projected.offset().local_minus_utc(), 8 * 3600 + 30 * 60);
        assert_eq!(projected, instant);
    }

    #[test]
    fn annotation_includes_iana_id_for_city_matches() {
        let (_f, resolver) = resolver();
        let zones = resolver.resolve(&["Seoul".to_string()]).unwrap();
        assert_eq!(zones[0].annotation(noon_utc()), "KST, Asia/Seoul");
    }
}
