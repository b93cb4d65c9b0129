// This file is part of the when utility.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use clap::{crate_version, Arg, ArgAction, Command};
use uucore::format_usage;

const ABOUT: &str = "convert times between time zones, cities, and calendars";
const USAGE: &str = "{} [OPTION]... [TIMESTAMP]...";

const AFTER_HELP: &str = "\
Examples:

  # Show the time in a given source city or time zone
  when --source 'New York City'
  when --source America/New_York

  # Show the specified time at a given source in local time
  when --source 'Paris,FR' 21:35

  # Show the specified time at a given source in the target's time
  when --target Bangkok --source Seattle

  # Holidays and full moons
  when --holidays US 2025
  when --fullmoon 2026.05";

pub mod options {
    pub const TIMESTAMP: &str = "timestamp";
    pub const SOURCE: &str = "source";
    pub const TARGET: &str = "target";
    pub const FORMAT: &str = "format";
    pub const GROUP: &str = "group";
    pub const JSON: &str = "json";
    pub const ALL: &str = "all";
    pub const OFFSET: &str = "offset";
    pub const HOLIDAYS: &str = "holidays";
    pub const FULLMOON: &str = "fullmoon";
    pub const TZ_ALIAS: &str = "tz-alias";
    pub const CONFIG: &str = "config";
    pub const DB_PATH: &str = "db-path";
    pub const DB_SEARCH: &str = "db-search";
    pub const DB_XSEARCH: &str = "db-xsearch";
    pub const DB_ALIAS: &str = "db-alias";
    pub const DB_ALIASES: &str = "db-aliases";
}

pub fn uu_app() -> Command {
    Command::new(uucore::util_name())
        .version(crate_version!())
        .about(ABOUT)
        .override_usage(format_usage(USAGE))
        .after_help(AFTER_HELP)
        .infer_long_args(true)
        .arg(
            Arg::new(options::SOURCE)
                .short('s')
                .long(options::SOURCE)
                .value_name("ZONE")
                .action(ArgAction::Append)
                .help("zone, abbreviation, or city to read the timestamp in (repeatable); defaults to local time"),
        )
        .arg(
            Arg::new(options::TARGET)
                .short('t')
                .long(options::TARGET)
                .value_name("ZONE")
                .action(ArgAction::Append)
                .help("zone, abbreviation, glob pattern, or city to convert to (repeatable); defaults to local time"),
        )
        .arg(
            Arg::new(options::FORMAT)
                .short('f')
                .long(options::FORMAT)
                .value_name("TEMPLATE")
                .help("output template, or a preset name: 'iso', 'rfc2822'; %Z is the zone \
                       abbreviation, %K the zone long name, %C the city, %O the lunar phase"),
        )
        .arg(
            Arg::new(options::GROUP)
                .short('g')
                .long(options::GROUP)
                .action(ArgAction::SetTrue)
                .help("group output by target zone"),
        )
        .arg(
            Arg::new(options::JSON)
                .short('j')
                .long(options::JSON)
                .action(ArgAction::SetTrue)
                .help("emit results as JSON"),
        )
        .arg(
            Arg::new(options::ALL)
                .long(options::ALL)
                .action(ArgAction::SetTrue)
                .help("show times in all time zones"),
        )
        .arg(
            Arg::new(options::OFFSET)
                .short('o')
                .long(options::OFFSET)
                .value_name("DELTA")
                .help("shift the timestamp by a delta such as '1d2h' or '~30m'"),
        )
        .arg(
            Arg::new(options::HOLIDAYS)
                .long(options::HOLIDAYS)
                .value_name("CO")
                .help("show holidays for the given country code; the timestamp selects the year"),
        )
        .arg(
            Arg::new(options::FULLMOON)
                .long(options::FULLMOON)
                .value_name("ARG")
                .help("show full moon dates for 'next', 'prev', a year, or YEAR.MONTH"),
        )
        .arg(
            Arg::new(options::TZ_ALIAS)
                .long(options::TZ_ALIAS)
                .value_name("NAME")
                .help("show the catalog candidates for a zone alias or abbreviation"),
        )
        .arg(
            Arg::new(options::CONFIG)
                .long(options::CONFIG)
                .action(ArgAction::SetTrue)
                .help("print the effective configuration"),
        )
        .arg(
            Arg::new(options::DB_PATH)
                .long(options::DB_PATH)
                .action(ArgAction::SetTrue)
                .help("print the gazetteer store location"),
        )
        .arg(
            Arg::new(options::DB_SEARCH)
                .long(options::DB_SEARCH)
                .action(ArgAction::SetTrue)
                .help("search the gazetteer for the given city"),
        )
        .arg(
            Arg::new(options::DB_XSEARCH)
                .long(options::DB_XSEARCH)
                .action(ArgAction::SetTrue)
                .help("exact-search the gazetteer for the given city"),
        )
        .arg(
            Arg::new(options::DB_ALIAS)
                .long(options::DB_ALIAS)
                .value_name("ID")
                .value_parser(clap::value_parser!(i64))
                .help("register the timestamp words as aliases for a city id"),
        )
        .arg(
            Arg::new(options::DB_ALIASES)
                .long(options::DB_ALIASES)
                .action(ArgAction::SetTrue)
                .help("list registered city aliases"),
        )
        .arg(
            Arg::new(options::TIMESTAMP)
                .action(ArgAction::Append)
                .value_name("TIMESTAMP")
                .help("timestamp to parse; defaults to the current time"),
        )
}
