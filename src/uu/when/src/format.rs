// This file is part of the when utility.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.
//! Template-driven rendering of conversion results.
//!
//! Two named presets (`iso`, `rfc2822`) bypass template interpretation.
//! Everything else is a strftime-style template where a handful of extended
//! directives are substituted before the rest is handed to chrono:
//!
//! * `%Z` — the zone's abbreviation at the rendered instant
//! * `%K` — the zone's long display name
//! * `%C` — the city, or nothing
//! * `%O` — lunar phase (emoji and name) for the rendered date
//! * `%!i %!n %!a %!s %!c %!z %!N` — single city attributes

use chrono::format::{Item, StrftimeItems};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::config::Settings;
use crate::convert::Conversion;
use crate::errors::{WhenError, WhenResult};
use crate::lunar;

lazy_static! {
    static ref CITY_FIELD_RE: Regex = Regex::new(r"%!([inasczN])").unwrap();
}

pub struct Formatter<'a> {
    settings: &'a Settings,
    spec: String,
}

impl<'a> Formatter<'a> {
    /// `spec` may be a preset name, a template, or `None` for the
    /// configured default template.
    pub fn new(settings: &'a Settings, spec: Option<&str>) -> Self {
        let spec = spec
            .map(str::to_string)
            .unwrap_or_else(|| settings.config.formats.default.clone());
        Self { settings, spec }
    }

    pub fn format(&self, result: &Conversion) -> WhenResult<String> {
        match self.spec.as_str() {
            "iso" => Ok(self.iso(result)),
            "rfc2822" => Ok(self.rfc2822(result)),
            _ => self.template(result),
        }
    }

    /// ` (City, ...)` when a city is attached, else ` (zone)`.
    fn extras(&self, result: &Conversion) -> String {
        match &result.zone.city {
            Some(city) => format!(" ({city})"),
            None => format!(" ({})", result.zone.annotation(result.instant)),
        }
    }

    fn iso(&self, result: &Conversion) -> String {
        format!(
            "{}{}",
            result.instant.format("%Y-%m-%dT%H:%M:%S%z"),
            self.extras(result)
        )
    }

    /// RFC 2822-style, with weekday and month names drawn from the
    /// configured calendar tables rather than chrono's locale.
    fn rfc2822(&self, result: &Conversion) -> String {
        use chrono::{Datelike, Timelike};

        let dt = result.instant;
        let calendar = &self.settings.config.calendar;
        let weekday = calendar
            .days
            .get(dt.weekday().num_days_from_monday() as usize)
            .cloned()
            .unwrap_or_default();
        let month = calendar
            .months
            .get(dt.month0() as usize)
            .cloned()
            .unwrap_or_default();

        format!(
            "{weekday}, {:02} {month} {:04} {:02}:{:02}:{:02} {}{}",
            dt.day(),
            dt.year(),
            dt.hour(),
            dt.minute(),
            dt.second(),
            dt.format("%z"),
            self.extras(result)
        )
    }

    fn template(&self, result: &Conversion) -> WhenResult<String> {
        let instant = result.instant;
        let mut template = self.spec.clone();

        if template.contains("%C") {
            let city = result
                .zone
                .city
                .as_ref()
                .map(|c| c.to_string())
                .unwrap_or_default();
            template = template.replace("%C", &city);
        }
        if template.contains("%Z") {
            template = template.replace("%Z", &result.zone.annotation(instant));
        }
        if template.contains("%K") {
            template = template.replace("%K", &result.zone.display_name(instant));
        }
        if template.contains("%O") {
            let phase = lunar::phase_on(instant.date_naive());
            template = template.replace("%O", &self.settings.lunar_description(phase.index));
        }
        if template.contains("%!") {
            template = CITY_FIELD_RE
                .replace_all(&template, |caps: &Captures| {
                    let spec = caps[1].chars().next().unwrap_or('?');
                    result
                        .zone
                        .city
                        .as_ref()
                        .and_then(|city| city.field(spec))
                        .unwrap_or_default()
                })
                .into_owned();
        }

        // validate the remaining directives before rendering; chrono's
        // DelayedFormat panics on Item::Error
        let items: Vec<Item> = StrftimeItems::new(&template).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            return Err(WhenError::InvalidFormat(self.spec.clone()));
        }
        Ok(instant
            .format_with_items(items.iter())
            .to_string()
            .trim()
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::When;
    use crate::gazetteer::tests::sample_index;
    use crate::resolver::ResolvedZone;
    use crate::zones::ZoneCatalog;

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

    fn seoul_result(when: &When) -> Conversion {
        when.convert(
            "Jan 10, 2023 4:30am",
            &["New York City".to_string()],
            &["Seoul".to_string()],
            None,
        )
        .unwrap()
        .remove(0)
    }

    #[test]
    fn iso_preset() {
        let (_f, when) = engine();
        let result = seoul_result(&when);
        let formatter = Formatter::new(&when.settings, Some("iso"));
        let rendered = formatter.format(&result).unwrap();
        assert!(rendered.starts_with("2023-01-10T18:30:00+0900"), "{rendered}");
        assert!(rendered.contains("Seoul"));
    }

    #[test]
    fn iso_preset_is_idempotent() {
        let (_f, when) = engine();
        let result = seoul_result(&when);
        let formatter = Formatter::new(&when.settings, Some("iso"));
        assert_eq!(
            formatter.format(&result).unwrap(),
            formatter.format(&result).unwrap()
        );
    }

    #[test]
    fn rfc2822_preset() {
        let (_f, when) = engine();
        let result = seoul_result(&when);
        let formatter = Formatter::new(&when.settings, Some("rfc2822"));
        let rendered = formatter.format(&result).unwrap();
        assert!(
            rendered.starts_with("Tue, 10 Jan 2023 18:30:00 +0900"),
            "{rendered}"
        );
    }

    #[test]
    fn default_template_renders_zone_city_and_moon() {
        let (_f, when) = engine();
        let result = seoul_result(&when);
        let formatter = Formatter::new(&when.settings, None);
        let rendered = formatter.format(&result).unwrap();
        assert!(rendered.starts_with("2023-01-10 18:30:00+0900"), "{rendered}");
        assert!(rendered.contains("(KST, Asia/Seoul)"), "{rendered}");
        assert!(rendered.contains("010d02w"), "{rendered}");
        assert!(rendered.contains("(Seoul, KR"), "{rendered}");
        assert!(rendered.contains("🌕 Full Moon"), "{rendered}");
    }

    #[test]
    fn city_field_directives() {
        let (_f, when) = engine();
        let result = when
            .convert(
                "July 29, 2024 10am",
                &["Lahaina".to_string()],
                &["Lahaina".to_string()],
                None,
            )
            .unwrap()
            .remove(0);

        let cases = [
            ("%!z", "Pacific/Honolulu"),
            ("%!c", "US"),
            ("%!s", "Hawaii"),
            ("%!n", "Lāhaina"),
            ("%!a", "Lahaina"),
            ("%!N", "Lāhaina (Lahaina)"),
            ("%!i", "5850027"),
        ];
        for (spec, expected) in cases {
            let formatter = Formatter::new(&when.settings, Some(spec));
            assert_eq!(formatter.format(&result).unwrap(), expected, "{spec}");
        }
    }

    #[test]
    fn standard_directives_pass_through() {
        let (_f, when) = engine();
        let result = when
            .convert(
                "July 29, 2024 10am",
                &["Lahaina".to_string()],
                &["Lahaina".to_string()],
                None,
            )
            .unwrap()
            .remove(0);

        let cases = [
            ("%D", "07/29/24"),
            ("%F", "2024-07-29"),
            ("%G", "2024"),
            ("%R", "10:00"),
            ("%T", "10:00:00"),
            ("%u", "1"),
            ("%V", "31"),
        ];
        for (spec, expected) in cases {
            let formatter = Formatter::new(&when.settings, Some(spec));
            assert_eq!(formatter.format(&result).unwrap(), expected, "{spec}");
        }
    }

    #[test]
    fn absent_city_renders_empty_not_stray() {
        let (_f, when) = engine();
        let result = when
            .convert("Jan 10, 2023 4:30am", &[], &["Asia/Seoul".to_string()], None)
            .unwrap()
            .remove(0);
        let formatter = Formatter::new(&when.settings, Some("%C"));
        assert_eq!(formatter.format(&result).unwrap(), "");

        let formatter = Formatter::new(&when.settings, Some("%Y %C"));
        assert_eq!(formatter.format(&result).unwrap(), "2023");
    }

    #[test]
    fn invalid_directive_is_rejected() {
        let (_f, when) = engine();
        let result = seoul_result(&when);
        let formatter = Formatter::new(&when.settings, Some("%Y %Q %d"));
        assert!(matches!(
            formatter.format(&result),
            Err(WhenError::InvalidFormat(_))
        ));
    }
}
