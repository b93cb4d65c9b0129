// This file is part of the when utility.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.
//! Configuration document: compiled-in defaults merged shallowly with
//! `.whenrc.toml` files found in the user's home directory and the current
//! directory (current directory wins).

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Compiled-in defaults. Every key a `Settings` consumer reads is present
/// here, so user files only ever override.
const DEFAULT_CONFIG: &str = r#"
[calendar]
months = [
    "Jan",
    "Feb",
    "Mar",
    "Apr",
    "May",
    "Jun",
    "Jul",
    "Aug",
    "Sep",
    "Oct",
    "Nov",
    "Dec",
]
days = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]

[holidays.US]
# Relative to Easter
"Easter" = "Easter +0"
"Ash Wednesday" = "Easter -46"
"Mardi Gras" = "Easter -47"
"Palm Sunday" = "Easter -7"
"Good Friday" = "Easter -2"

# Floating holidays
"Memorial Day" = "Last Mon in May"
"MLK Day" = "3rd Mon in Jan"
"Presidents' Day" = "3rd Mon in Feb"
"Mother's Day" = "2nd Sun in May"
"Father's Day" = "3rd Sun in Jun"
"Labor" = "1st Mon in Sep"
"Columbus Day" = "2nd Mon in Oct"
"Thanksgiving" = "4th Thr in Nov"

# Fixed holidays
"New Year's Day" = "Jan 1"
"Valentine's Day" = "Feb 14"
"St. Patrick's Day" = "Mar 17"
"Juneteenth" = "Jun 19"
"Independence Day" = "Jul 4"
"Halloween" = "Oct 31"
"Veterans Day" = "Nov 11"
"Christmas" = "Dec 25"

[lunar]
phases = [
    "New Moon",
    "Waxing Crescent",
    "First Quarter",
    "Waxing Gibbous",
    "Full Moon",
    "Waning Gibbous",
    "Last Quarter",
    "Waning Crescent",
]
emojis = ["🌑", "🌒", "🌓", "🌔", "🌕", "🌖", "🌗", "🌘"]
format = "%a, %b %d %Y"

[formats]
default = "%Y-%m-%d %H:%M:%S%z (%Z) %jd%Ww (%C) [%O]"
"#;

pub const RC_FILE_NAME: &str = ".whenrc.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// Twelve ordered month abbreviations.
    pub months: Vec<String>,
    /// Seven ordered weekday abbreviations, Monday first.
    pub days: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LunarConfig {
    /// Eight phase names, index-aligned with `emojis`.
    pub phases: Vec<String>,
    pub emojis: Vec<String>,
    /// Date format used when printing lunar-annotated dates.
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormatsConfig {
    /// Template used when no `-f` option is given.
    pub default: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub calendar: CalendarConfig,
    /// country code -> ordered (title -> rule expression) table
    pub holidays: toml::Table,
    pub lunar: LunarConfig,
    pub formats: FormatsConfig,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub config: Config,
    /// The merged raw document, kept for `--config` output.
    merged: toml::Table,
    /// Files that contributed to the merge, in application order.
    pub read_from: Vec<PathBuf>,
}

impl Settings {
    /// Load defaults, then merge `~/.whenrc.toml` and `./.whenrc.toml`.
    pub fn load() -> Self {
        let mut dirs = Vec::new();
        if let Some(home) = std::env::var_os("HOME") {
            dirs.push(PathBuf::from(home));
        }
        if let Ok(cwd) = std::env::current_dir() {
            dirs.push(cwd);
        }
        Self::from_dirs(&dirs, RC_FILE_NAME)
    }

    /// Merge the defaults with `<dir>/<name>` for each directory that has
    /// one. Later directories win. Top-level tables replace wholesale, the
    /// same shallow merge the rc format documents.
    pub fn from_dirs(dirs: &[PathBuf], name: &str) -> Self {
        let mut merged: toml::Table =
            toml::from_str(DEFAULT_CONFIG).expect("compiled-in defaults must parse");
        let mut read_from = Vec::new();

        for dir in dirs {
            let path = dir.join(name);
            if let Some(table) = read_rc(&path) {
                for (key, value) in table {
                    merged.insert(key, value);
                }
                read_from.push(path);
            }
        }

        let config = toml::Value::Table(merged.clone())
            .try_into()
            .unwrap_or_else(|_| {
                show_warning!("malformed configuration, falling back to defaults");
                toml::from_str::<toml::Table>(DEFAULT_CONFIG)
                    .ok()
                    .and_then(|t| toml::Value::Table(t).try_into().ok())
                    .expect("compiled-in defaults must deserialize")
            });

        Self {
            config,
            merged,
            read_from,
        }
    }

    /// Ordered (title, rule expression) pairs for a country code, or empty.
    pub fn holiday_rules(&self, country: &str) -> Vec<(String, String)> {
        match self.config.holidays.get(country) {
            Some(toml::Value::Table(rules)) => rules
                .iter()
                .filter_map(|(title, expr)| {
                    expr.as_str().map(|e| (title.clone(), e.to_string()))
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// "<emoji> <name>" for a phase index 0..=7.
    pub fn lunar_description(&self, index: usize) -> String {
        let lunar = &self.config.lunar;
        match (lunar.emojis.get(index), lunar.phases.get(index)) {
            (Some(emoji), Some(name)) => format!("{emoji} {name}"),
            _ => String::new(),
        }
    }

    /// The effective document rendered back out as TOML.
    pub fn dump(&self) -> String {
        let header = if self.read_from.is_empty() {
            String::new()
        } else {
            let files: Vec<String> = self
                .read_from
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            format!("# Read from {}\n", files.join(", "))
        };
        format!(
            "{header}{}",
            toml::to_string_pretty(&self.merged).unwrap_or_default()
        )
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_dirs(&[], RC_FILE_NAME)
    }
}

fn read_rc(path: &Path) -> Option<toml::Table> {
    let text = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&text) {
        Ok(table) => Some(table),
        Err(err) => {
            show_warning!("ignoring {}: {}", path.display(), err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_parse_and_deserialize() {
        let settings = Settings::default();
        assert_eq!(settings.config.calendar.months.len(), 12);
        assert_eq!(settings.config.calendar.days.len(), 7);
        assert_eq!(settings.config.lunar.phases.len(), 8);
        assert_eq!(settings.config.lunar.emojis.len(), 8);
        assert!(settings.read_from.is_empty());
    }

    #[test]
    fn holiday_rules_preserve_country_tables() {
        let settings = Settings::default();
        let rules = settings.holiday_rules("US");
        assert!(rules.iter().any(|(t, e)| t == "MLK Day" && e == "3rd Mon in Jan"));
        assert!(settings.holiday_rules("ZZ").is_empty());
    }

    #[test]
    fn lunar_description_is_index_aligned() {
        let settings = Settings::default();
        assert_eq!(settings.lunar_description(4), "🌕 Full Moon");
        assert_eq!(settings.lunar_description(0), "🌑 New Moon");
        assert_eq!(settings.lunar_description(9), "");
    }

    #[test]
    fn rc_file_overrides_defaults_shallowly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(RC_FILE_NAME);
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "[formats]\ndefault = \"%Y\"").unwrap();

        let settings = Settings::from_dirs(&[dir.path().to_path_buf()], RC_FILE_NAME);
        assert_eq!(settings.config.formats.default, "%Y");
        // untouched tables keep their defaults
        assert_eq!(settings.config.calendar.months[0], "Jan");
        assert_eq!(settings.read_from, vec![path]);
    }

    #[test]
    fn later_directory_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::write(first.path().join(RC_FILE_NAME), "[formats]\ndefault = \"a\"").unwrap();
        std::fs::write(second.path().join(RC_FILE_NAME), "[formats]\ndefault = \"b\"").unwrap();

        let settings = Settings::from_dirs(
            &[first.path().to_path_buf(), second.path().to_path_buf()],
            RC_FILE_NAME,
        );
        assert_eq!(settings.config.formats.default, "b");
        assert_eq!(settings.read_from.len(), 2);
    }

    #[test]
    fn dump_round_trips_toml() {
        let settings = Settings::default();
        let dumped = settings.dump();
        let reparsed: toml::Table = toml::from_str(&dumped).unwrap();
        assert!(reparsed.contains_key("calendar"));
        assert!(reparsed.contains_key("holidays"));
    }
}
