// This file is part of the when utility.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.
//! The conversion engine: anchor a (possibly empty) timestamp in zero or
//! more source zones and project it onto zero or more target zones.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta};

use crate::config::Settings;
use crate::errors::{WhenError, WhenResult};
use crate::gazetteer::{CityIndex, Gazetteer};
use crate::parse;
use crate::resolver::{local_zone, ResolvedZone, ZoneResolver};
use crate::zones::ZoneCatalog;

/// One conversion result. A projected result keeps the root it was derived
/// from as a shared immutable value, so grouped rendering can show
/// "source → target" without re-deriving anything. The chain is acyclic by
/// construction.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub instant: DateTime<FixedOffset>,
    pub zone: ResolvedZone,
    pub source: Option<Box<Conversion>>,
}

impl Conversion {
    /// Root result: the current instant in `zone`.
    fn now(zone: ResolvedZone) -> Self {
        Self {
            instant: zone.rule.now(),
            zone,
            source: None,
        }
    }

    /// Root result: wall-clock fields anchored in `zone`.
    fn anchored(wall: NaiveDateTime, zone: ResolvedZone) -> Self {
        Self {
            instant: zone.rule.attach(wall),
            zone,
            source: None,
        }
    }

    /// Derived result: the same instant expressed in `target`.
    pub fn project(&self, target: &ResolvedZone) -> Self {
        Self {
            instant: target.rule.project(self.instant),
            zone: target.clone(),
            source: Some(Box::new(self.clone())),
        }
    }

    pub fn is_root(&self) -> bool {
        self.source.is_none()
    }

    fn json_value(&self) -> serde_json::Value {
        let mut value = serde_json::json!({
            "iso": self.instant.format("%Y-%m-%dT%H:%M:%S%z").to_string(),
            "zone": self.zone.display_name(self.instant),
            "offset": self.instant.offset().to_string(),
        });
        if let Some(city) = &self.zone.city {
            value["city"] = city.as_json();
        }
        if let Some(source) = &self.source {
            value["source"] = source.json_value();
        }
        value
    }
}

pub struct When {
    pub settings: Settings,
    resolver: ZoneResolver,
}

impl When {
    /// Engine with the default catalog, the on-disk gazetteer, and the
    /// discovered local zone.
    pub fn new(settings: Settings) -> Self {
        let gazetteer = CityIndex::new(CityIndex::default_path());
        Self::with_parts(settings, ZoneCatalog::default(), Box::new(gazetteer), local_zone())
    }

    /// Fully parameterized constructor, the seam tests use to substitute
    /// catalogs, stores, and the local zone.
    pub fn with_parts(
        settings: Settings,
        catalog: ZoneCatalog,
        gazetteer: Box<dyn Gazetteer>,
        local: ResolvedZone,
    ) -> Self {
        Self {
            settings,
            resolver: ZoneResolver::new(catalog, gazetteer, local),
        }
    }

    pub fn resolver(&self) -> &ZoneResolver {
        &self.resolver
    }

    /// Convert `text` from `sources` to `targets`.
    ///
    /// * empty `text`: "now" in each source zone (or the local zone)
    /// * sources that resolve to nothing are fatal; targets that resolve to
    ///   nothing silently degrade to root-only output
    /// * given sources and a timestamp but no targets, the local zone
    ///   becomes the single target
    pub fn convert(
        &self,
        text: &str,
        sources: &[String],
        targets: &[String],
        offset: Option<TimeDelta>,
    ) -> WhenResult<Vec<Conversion>> {
        let source_zones = if sources.is_empty() {
            None
        } else {
            let zones = self.resolver.resolve(sources)?;
            if zones.is_empty() {
                return Err(WhenError::UnknownSource(sources.to_vec()));
            }
            Some(zones)
        };

        let text = text.trim();
        let target_zones = if !targets.is_empty() {
            let zones = self.resolver.resolve(targets)?;
            (!zones.is_empty()).then_some(zones)
        } else if source_zones.is_some() && !text.is_empty() {
            Some(vec![self.resolver.local().clone()])
        } else {
            None
        };

        let anchors = source_zones.unwrap_or_else(|| vec![self.resolver.local().clone()]);
        let roots: Vec<Conversion> = if text.is_empty() {
            anchors.into_iter().map(Conversion::now).collect()
        } else {
            let mut wall = parse::parse_input(text)?;
            if let Some(delta) = offset {
                wall += delta;
            }
            anchors
                .into_iter()
                .map(|zone| Conversion::anchored(wall, zone))
                .collect()
        };

        Ok(match target_zones {
            Some(targets) => roots
                .iter()
                .flat_map(|root| targets.iter().map(|tz| root.project(tz)))
                .collect(),
            None => roots,
        })
    }

    /// Re-key results by target identity. Roots that were never projected
    /// land in the `None` bucket, original order preserved throughout.
    pub fn grouped(results: Vec<Conversion>) -> Vec<(Option<String>, Vec<Conversion>)> {
        let mut order: Vec<Option<String>> = Vec::new();
        let mut buckets: Vec<Vec<Conversion>> = Vec::new();
        for result in results {
            let key = (!result.is_root()).then(|| result.zone.identity());
            match order.iter().position(|k| *k == key) {
                Some(i) => buckets[i].push(result),
                None => {
                    order.push(key);
                    buckets.push(vec![result]);
                }
            }
        }
        order.into_iter().zip(buckets).collect()
    }

    /// Serialize results in the documented interchange shape.
    pub fn as_json(&self, results: &[Conversion]) -> String {
        let values: Vec<serde_json::Value> = results.iter().map(Conversion::json_value).collect();
        serde_json::to_string_pretty(&values).unwrap_or_else(|_| "[]".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gazetteer::tests::sample_index;
    use crate::resolver::ZoneRule;
    use chrono::{Datelike, Offset, Timelike};

    fn engine() -> (tempfile::NamedTempFile, When) {
        let (file, index) = sample_index();
        let when = When::with_parts(
            Settings::default(),
            ZoneCatalog::default(),
            Box::new(index),
            ResolvedZone::utc(),
        );
        (file, when)
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn iana_source_to_iana_target() {
        let (_f, when) = engine();
        let results = when
            .convert(
                "Jan 10, 2023 4:30am",
                &strings(&["America/New_York"]),
                &strings(&["Asia/Seoul"]),
                None,
            )
            .unwrap();
        assert_eq!(results.len(), 1);
        let r = &results[0];
        assert_eq!(
            r.instant.naive_local(),
            chrono::NaiveDate::from_ymd_opt(2023, 1, 10)
                .unwrap()
                .and_hms_opt(18, 30, 0)
                .unwrap()
        );
        assert_eq!(r.instant.offset().fix().local_minus_utc(), 9 * 3600);
        let source = r.source.as_deref().unwrap();
        assert!(source.is_root());
        assert_eq!(source.instant.hour(), 4);
    }

    #[test]
    fn abbreviation_source_to_abbreviation_target() {
        let (_f, when) = engine();
        let results = when
            .convert("Jan 10, 2023 4:30am", &strings(&["EST"]), &strings(&["KST"]), None)
            .unwrap();
        // EST fans out to 2 catalog zones + the raw EST zone; KST to 2.
        assert_eq!(results.len(), 6);
        let first = &results[0];
        assert_eq!(first.zone.identity(), "Korea Standard Time");
        assert_eq!(first.instant.hour(), 18);
        assert_eq!(first.instant.minute(), 30);
    }

    #[test]
    fn city_source_to_city_target() {
        let (_f, when) = engine();
        let results = when
            .convert(
                "Jan 10, 2023 4:30am",
                &strings(&["New York City"]),
                &strings(&["Seoul"]),
                None,
            )
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].instant.hour(), 18);
        assert_eq!(results[0].zone.city.as_ref().unwrap().co, "KR");
    }

    #[test]
    fn unknown_source_is_fatal_and_named() {
        let (_f, when) = engine();
        let err = when
            .convert("", &strings(&["Nonexistent/Place"]), &[], None)
            .unwrap_err();
        match err {
            WhenError::UnknownSource(tokens) => assert_eq!(tokens, vec!["Nonexistent/Place"]),
            other => panic!("expected UnknownSource, got {other:?}"),
        }
    }

    #[test]
    fn unknown_target_degrades_to_roots() {
        let (_f, when) = engine();
        let results = when
            .convert(
                "Jan 10, 2023 4:30am",
                &strings(&["Asia/Seoul"]),
                &strings(&["Nonexistent/Place"]),
                None,
            )
            .unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].is_root());
    }

    #[test]
    fn empty_conversion_is_local_now() {
        let (_f, when) = engine();
        let results = when.convert("", &[], &[], None).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].is_root());
        assert_eq!(results[0].zone.rule.iana_id(), Some("UTC"));
    }

    #[test]
    fn sources_with_timestamp_default_target_to_local() {
        let (_f, when) = engine();
        let results = when
            .convert("Jan 10, 2023 4:30am", &strings(&["Asia/Seoul"]), &[], None)
            .unwrap();
        assert_eq!(results.len(), 1);
        let r = &results[0];
        assert!(!r.is_root());
        // local (UTC) rendering of 4:30 KST
        assert_eq!(r.zone.rule.iana_id(), Some("UTC"));
        assert_eq!(r.instant.naive_local().hour(), 19);
        assert_eq!(r.source.as_deref().unwrap().instant.day(), 10);
    }

    #[test]
    fn round_trip_offset_matches_target_rules() {
        let (_f, when) = engine();
        let results = when
            .convert(
                "Jul 10, 2023 12:00",
                &strings(&["UTC"]),
                &strings(&["America/New_York"]),
                None,
            )
            .unwrap();
        // EDT in July
        assert_eq!(results[0].instant.offset().fix().local_minus_utc(), -4 * 3600);
    }

    #[test]
    fn offset_shifts_the_parsed_timestamp() {
        let (_f, when) = engine();
        let results = when
            .convert(
                "Jan 10, 2023 4:30am",
                &strings(&["Asia/Seoul"]),
                &strings(&["Asia/Seoul"]),
                Some(TimeDelta::days(1)),
            )
            .unwrap();
        assert_eq!(results[0].instant.day(), 11);
    }

    #[test]
    fn grouped_keys_by_target_and_keeps_roots_apart() {
        let (_f, when) = engine();
        let results = when
            .convert(
                "Jan 10, 2023 4:30am",
                &strings(&["America/New_York", "Asia/Seoul"]),
                &strings(&["Europe/Paris", "Australia/Sydney"]),
                None,
            )
            .unwrap();
        assert_eq!(results.len(), 4);
        let grouped = When::grouped(results);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].0.as_deref(), Some("Europe/Paris"));
        assert_eq!(grouped[0].1.len(), 2);
        assert_eq!(grouped[1].0.as_deref(), Some("Australia/Sydney"));

        let roots = when.convert("", &[], &[], None).unwrap();
        let grouped = When::grouped(roots);
        assert_eq!(grouped.len(), 1);
        assert!(grouped[0].0.is_none());
    }

    #[test]
    fn json_shape_nests_city_and_source() {
        let (_f, when) = engine();
        let results = when
            .convert(
                "Jan 19, 2024 22:00",
                &strings(&["Lahaina"]),
                &strings(&["Seoul"]),
                None,
            )
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&when.as_json(&results)).unwrap();
        let entry = &parsed[0];
        assert_eq!(entry["iso"], "2024-01-20T17:00:00+0900");
        assert_eq!(entry["offset"], "+09:00");
        assert_eq!(entry["city"]["country"], "KR");
        assert_eq!(entry["source"]["city"]["name"], "Lāhaina");
        assert_eq!(entry["source"]["offset"], "-10:00");
        assert!(entry["source"]["source"].is_null());
    }

    #[test]
    fn fixed_offset_zone_anchors_wall_clock() {
        let zone = ResolvedZone {
            rule: ZoneRule::Fixed {
                offset: chrono::FixedOffset::east_opt(8 * 3600 + 30 * 60).unwrap(),
                label: "UTC+8:30".to_string(),
            },
            name: None,
            city: None,
        };
        let wall = chrono::NaiveDate::from_ymd_opt(2023, 1, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let anchored = Conversion::anchored(wall, zone);
        assert_eq!(anchored.instant.naive_local(), wall);
        assert_eq!(
            anchored.instant.offset().fix().local_minus_utc(),
            8 * 3600 + 30 * 60
        );
    }
}
