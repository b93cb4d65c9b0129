// This file is part of the when utility.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! `when` answers "what time is it over there" questions: it resolves
//! time-zone abbreviations, IANA identifiers, glob patterns, and city names
//! into concrete zones, converts timestamps between any number of them, and
//! renders the results through a directive-based template. It also knows two
//! calendar tricks that need real date arithmetic: holiday rules and lunar
//! phases.

#[macro_use]
extern crate uucore;

use chrono::{Datelike, Local, Utc};
use uucore::error::UResult;

pub mod app;
pub mod config;
pub mod convert;
pub mod errors;
pub mod format;
pub mod gazetteer;
pub mod holidays;
pub mod lunar;
pub mod offsets;
pub mod parse;
pub mod resolver;
pub mod zones;

use app::{options, uu_app};
use chrono_tz::TZ_VARIANTS;
use config::Settings;
use convert::When;
use format::Formatter;
use gazetteer::{parse_search, CityIndex, Gazetteer};
use zones::ZoneCatalog;

#[uucore::main]
pub fn uumain(args: impl uucore::Args) -> UResult<()> {
    let matches = uu_app().get_matches_from(args);
    let settings = Settings::load();

    if matches.get_flag(options::CONFIG) {
        print!("{}", settings.dump());
        return Ok(());
    }

    if let Some(token) = matches.get_one::<String>(options::TZ_ALIAS) {
        print_catalog_candidates(token);
        return Ok(());
    }

    let store = CityIndex::new(CityIndex::default_path());
    if matches.get_flag(options::DB_PATH) {
        println!("{}", store.path().display());
        return Ok(());
    }

    let words: Vec<String> = matches
        .get_many::<String>(options::TIMESTAMP)
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let text = words.join(" ");

    if matches.get_flag(options::DB_SEARCH) {
        return print_city_search(&store, &text, false);
    }
    if matches.get_flag(options::DB_XSEARCH) {
        return print_city_search(&store, &text, true);
    }
    if let Some(id) = matches.get_one::<i64>(options::DB_ALIAS) {
        store.add_alias(&text, *id)?;
        return Ok(());
    }
    if matches.get_flag(options::DB_ALIASES) {
        for (alias, city) in store.aliases()? {
            let detail = city.map_or_else(|| "?".to_string(), |c| c.display());
            println!("{alias}: {detail}");
        }
        return Ok(());
    }

    if let Some(country) = matches.get_one::<String>(options::HOLIDAYS) {
        let year = words
            .first()
            .and_then(|w| w.parse().ok())
            .unwrap_or_else(|| Local::now().year());
        print_holidays(&settings, country, year);
        return Ok(());
    }

    if let Some(arg) = matches.get_one::<String>(options::FULLMOON) {
        let request = lunar::FullMoonRequest::parse(arg)?;
        for date in request.dates(Utc::now()) {
            println!("{}", date.format("%Y-%m-%d"));
        }
        return Ok(());
    }

    let sources: Vec<String> = matches
        .get_many::<String>(options::SOURCE)
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let targets: Vec<String> = if matches.get_flag(options::ALL) {
        TZ_VARIANTS.iter().map(|tz| tz.name().to_string()).collect()
    } else {
        matches
            .get_many::<String>(options::TARGET)
            .map(|values| values.cloned().collect())
            .unwrap_or_default()
    };
    let offset = matches
        .get_one::<String>(options::OFFSET)
        .map(|value| offsets::parse_offset(value))
        .transpose()?;

    let when = When::new(settings);
    let results = when.convert(&text, &sources, &targets, offset)?;

    if matches.get_flag(options::JSON) {
        println!("{}", when.as_json(&results));
        return Ok(());
    }

    let formatter = Formatter::new(
        &when.settings,
        matches.get_one::<String>(options::FORMAT).map(String::as_str),
    );
    if matches.get_flag(options::GROUP) {
        for (target, group) in When::grouped(results) {
            match target {
                Some(name) => {
                    println!("{name}");
                    for result in group {
                        println!("  {}", formatter.format(&result)?);
                    }
                }
                None => {
                    for result in group {
                        println!("{}", formatter.format(&result)?);
                    }
                }
            }
        }
    } else {
        for result in results {
            println!("{}", formatter.format(&result)?);
        }
    }

    Ok(())
}

fn print_catalog_candidates(token: &str) {
    let catalog = ZoneCatalog::default();
    for candidate in catalog.get(token) {
        match candidate.zone {
            zones::ZoneRef::Id(id) => println!("{}: {}", candidate.label, id),
            zones::ZoneRef::Offset(seconds) => {
                println!("{}: UTC offset {seconds}s", candidate.label);
            }
        }
    }
}

fn print_city_search(store: &CityIndex, query: &str, exact: bool) -> UResult<()> {
    let (name, co, sub) = parse_search(query)?;
    let cities = if exact {
        store.exact_search(&name, co.as_deref(), sub.as_deref())?
    } else {
        store.search(&name, co.as_deref(), sub.as_deref())?
    };
    for city in cities {
        println!("{:>7} {city}", city.id);
    }
    Ok(())
}

fn print_holidays(settings: &Settings, country: &str, year: i32) {
    let found = holidays::holidays_for(settings, country, year);
    if found.is_empty() {
        show_warning!("no holiday rules configured for {country}");
        return;
    }

    let width = 2 + found
        .iter()
        .map(|h| h.title.chars().count())
        .max()
        .unwrap_or(0);
    let today = Local::now().date_naive();

    for holiday in &found {
        let phase = lunar::phase_on(holiday.date);
        let delta = holiday.date.signed_duration_since(today);
        let delta_text = if delta.num_days() == 0 {
            "today".to_string()
        } else if delta.num_days() > 0 {
            format!("in {}", offsets::format_timedelta(delta, true))
        } else {
            format!("{} ago", offsets::format_timedelta(delta.abs(), true))
        };
        println!(
            "{:.<width$}{} ({delta_text}) [{}]",
            holiday.title,
            format_date(holiday.date, &settings.config.lunar.format),
            settings.lunar_description(phase.index),
        );
    }
}

/// Render a date through a user-configurable template without letting a bad
/// directive reach chrono's panicking `Display` path.
fn format_date(date: chrono::NaiveDate, template: &str) -> String {
    use chrono::format::{Item, StrftimeItems};
    use std::fmt::Write;

    let items: Vec<Item> = StrftimeItems::new(template).collect();
    if !items.iter().any(|item| matches!(item, Item::Error)) {
        let mut out = String::new();
        if write!(out, "{}", date.format_with_items(items.iter())).is_ok() {
            return out;
        }
    }
    date.format("%F").to_string()
}
