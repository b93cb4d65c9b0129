// This file is part of the when utility.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.
//! Static catalog of zone abbreviations and symbolic names.
//!
//! Abbreviations are ambiguous by nature: "CST" is Central, Caucasus, China,
//! and Cuba Standard Time. The catalog therefore maps every key to a list of
//! candidates and lookups return all of them, tagged with their display
//! names, letting the caller disambiguate.
//
// spell-checker:ignore (zones) ACDT ACST ACWST AEDT AEST AKDT AKST ALMT AMST
// spell-checker:ignore ANAT AQTT AZOST AZOT BIOT BNT BRST BTT CAST CBST CCST
// spell-checker:ignore CHADT CHAST CHOST CHOT CHST CHUT CIST CKT CLST COST
// spell-checker:ignore CPST CVST CWST CXT DAVT DDUT EASST EEDT EEST EGST EGT
// spell-checker:ignore ESAST FEDT FJT FKST FNT GALT GAMT GILT GYT HAEC HDT
// spell-checker:ignore HKT HMT HOVST HOVT IDLW IRDT IRKT IRST JDT KALT KGT
// spell-checker:ignore KOST KRAT LHST LHDT LINT MAGT MART MAWT MEDT MEST MHT
// spell-checker:ignore MIST MMT MPST MSK MUT MVT MYT NAEST NAST NCAST NCT NDT
// spell-checker:ignore NFT NOVT NPT NUT NZDT NZST OMST ORAT PETT PGT PHOT
// spell-checker:ignore PHST PMDT PMST PONT PSST PWT PYST PYT RDT ROTT SAKT
// spell-checker:ignore SAMT SAST SBT SCT SDT SEST SGT SLST SPST SRET SRT SWST
// spell-checker:ignore SYOT TAHT TDT TFT THA TJT TKT TLT TMT TOT TRT TST TVT
// spell-checker:ignore UEDT ULAST ULAT UYST UYT UZT VET VLAT VOLT VOST VST
// spell-checker:ignore VUT WAKT WAST WCAST WEDT WEST WGST WGT WIB WITA WPST
// spell-checker:ignore YAKT YEKT YST Choibalsan Srednekolymsk Yekaterinburg

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

/// A catalog entry's zone half: either an IANA identifier or a fixed UTC
/// offset in seconds east.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneRef {
    Id(&'static str),
    Offset(i32),
}

use ZoneRef::{Id, Offset};

/// One resolved catalog candidate: a zone plus its display label.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub zone: ZoneRef,
    pub label: String,
}

type Entries = &'static [(ZoneRef, &'static str)];

static ALIASES: &[(&str, Entries)] = &[
    ("ACDT", &[(Id("Australia/Adelaide"), "Australian Central Daylight Time")]),
    ("ACST", &[(Id("Australia/Adelaide"), "Australian Central Standard Time")]),
    ("ACT", &[(Offset(28800), "ASEAN Common Time"), (Offset(-18000), "Acre Time")]),
    ("ACWST", &[(Offset(31500), "Australian Central Western Standard Time")]),
    ("ADT", &[
        (Id("Atlantic/Bermuda"), "Atlantic Daylight Time"),
        (Id("Asia/Baku"), "Azerbaijan Standard Time"),
        (Id("Atlantic/Azores"), "Azores Standard Time"),
    ]),
    ("AEDT", &[(Id("Australia/Sydney"), "Australian Eastern Daylight Time")]),
    ("AEST", &[(Id("Australia/Sydney"), "Australian Eastern Standard Time")]),
    ("AET", &[(Offset(36000), "Australian Eastern Time")]),
    ("AFT", &[(Offset(16200), "Afghanistan Time")]),
    ("AKDT", &[(Id("US/Alaska"), "Alaskan Daylight Time")]),
    ("AKST", &[(Id("US/Alaska"), "Alaskan Standard Time")]),
    ("ALMT", &[(Offset(21600), "Alma-Ata Time")]),
    ("AMST", &[(Offset(-10800), "Amazon Summer Time")]),
    ("AMT", &[(Offset(-14400), "Amazon Time"), (Offset(14400), "Armenia Time")]),
    ("ANAT", &[(Offset(43200), "Anadyr Time")]),
    ("AQTT", &[(Offset(18000), "Aqtobe Time")]),
    ("ART", &[(Offset(-10800), "Argentina Time")]),
    ("AST", &[
        (Id("Atlantic/Bermuda"), "Atlantic Standard Time"),
        (Id("Asia/Kabul"), "Afghanistan Standard Time"),
        (Id("Asia/Riyadh"), "Arabia Standard Time"),
        (Id("America/Buenos_Aires"), "Argentina Standard Time"),
    ]),
    ("AWST", &[(Id("Australia/West"), "Australian Western Standard Time")]),
    ("AZOST", &[(Offset(0), "Azores Summer Time")]),
    ("AZOT", &[(Offset(-3600), "Azores Standard Time")]),
    ("AZT", &[(Offset(14400), "Azerbaijan Time")]),
    ("BIOT", &[(Offset(21600), "British Indian Ocean Time")]),
    ("BIT", &[(Offset(-43200), "Baker Island Time")]),
    ("BNT", &[(Offset(28800), "Brunei Time")]),
    ("BOT", &[(Offset(-14400), "Bolivia Time")]),
    ("BRST", &[(Offset(-7200), "Brasília Summer Time")]),
    ("BRT", &[(Offset(-10800), "Brasília Time")]),
    ("BST", &[
        (Id("GB"), "British Summer Time"),
        (Id("America/Bahia"), "Bahia Standard Time"),
        (Id("Asia/Dhaka"), "Bangladesh Standard Time"),
        (Offset(39600), "Bougainville Standard Time"),
    ]),
    ("BTT", &[(Offset(21600), "Bhutan Time")]),
    ("CAST", &[
        (Id("America/Costa_Rica"), "Central America Standard Time"),
        (Id("Asia/Almaty"), "Central Asia Standard Time"),
        (Id("Australia/Adelaide"), "Central Australia Standard Time"),
    ]),
    ("CAT", &[(Id("Africa/Windhoek"), "Central Africa Time"), (Offset(7200), "Central Africa Time")]),
    ("CBST", &[(Id("America/Campo_Grande"), "Central Brazilian Standard Time")]),
    ("CCST", &[(Id("America/Regina"), "Canada Central Standard Time")]),
    ("CCT", &[(Offset(23400), "Cocos Islands Time")]),
    ("CDT", &[(Id("US/Central"), "Central Daylight Time"), (Offset(-14400), "Cuba Daylight Time")]),
    ("CEDT", &[(Id("CET"), "Central Europe Standard Time")]),
    ("CEST", &[(Id("CET"), "Central Europe Standard Time")]),
    ("CET", &[(Offset(3600), "Central European Time")]),
    ("CHADT", &[(Offset(49500), "Chatham Daylight Time")]),
    ("CHAST", &[(Offset(45900), "Chatham Standard Time")]),
    ("CHOST", &[(Offset(32400), "Choibalsan Summer Time")]),
    ("CHOT", &[(Offset(28800), "Choibalsan Standard Time")]),
    ("CHST", &[(Id("Pacific/Guam"), "Chamorro Time Zone")]),
    ("CHUT", &[(Offset(36000), "Chuuk Time")]),
    ("CIST", &[(Offset(-28800), "Clipperton Island Standard Time")]),
    ("CKT", &[(Offset(-36000), "Cook Island Time")]),
    ("CLST", &[(Offset(-10800), "Chile Summer Time")]),
    ("CLT", &[(Offset(-14400), "Chile Standard Time")]),
    ("COST", &[(Offset(-14400), "Colombia Summer Time")]),
    ("COT", &[(Offset(-18000), "Colombia Time")]),
    ("CPST", &[(Id("Pacific/Guadalcanal"), "Central Pacific Standard Time")]),
    ("CST", &[
        (Id("US/Central"), "Central Standard Time"),
        (Id("Asia/Yerevan"), "Caucasus Standard Time"),
        (Id("Asia/Shanghai"), "China Standard Time"),
        (Id("Cuba"), "Cuba Standard Time"),
    ]),
    ("CT", &[(Id("US/Central"), "Central Standard Time")]),
    ("Central", &[(Id("US/Central"), "Central Standard Time")]),
    ("CVST", &[(Id("Atlantic/Cape_Verde"), "Cape Verde Standard Time")]),
    ("CVT", &[(Offset(-3600), "Cape Verde Time")]),
    ("CWST", &[(Offset(31500), "Central Western Standard Time (Australia) unofficial")]),
    ("CXT", &[(Offset(25200), "Christmas Island Time")]),
    ("DAVT", &[(Offset(25200), "Davis Time")]),
    ("DDUT", &[(Offset(36000), "Dumont d'Urville Time")]),
    ("DFT", &[(Offset(3600), "AIX-specific equivalent of Central European Time")]),
    ("DST", &[(Id("Etc/GMT+12"), "Dateline Standard Time")]),
    ("EASST", &[(Offset(-18000), "Easter Island Summer Time")]),
    ("EAST", &[
        (Id("Australia/Brisbane"), "E. Australia Standard Time"),
        (Id("Africa/Addis_Ababa"), "East Africa Standard Time"),
        (Offset(-21600), "Easter Island Standard Time"),
    ]),
    ("EAT", &[(Id("Africa/Addis_Ababa"), "East Africa Time")]),
    ("ECT", &[(Offset(-14400), "Eastern Caribbean Time"), (Offset(-18000), "Ecuador Time")]),
    ("EDT", &[(Id("US/Eastern"), "Eastern Daylight Time")]),
    ("EEDT", &[(Id("EET"), "Eastern Europe Summer Time")]),
    ("EEST", &[(Id("EET"), "Eastern European Summer Time")]),
    ("EET", &[(Offset(7200), "Eastern European Time")]),
    ("EGST", &[(Offset(0), "Eastern Greenland Summer Time")]),
    ("EGT", &[(Offset(-3600), "Eastern Greenland Time")]),
    ("ESAST", &[(Id("America/Sao_Paulo"), "Eastern South America Standard Time")]),
    ("EST", &[
        (Id("US/Eastern"), "Eastern Standard Time"),
        (Id("Africa/Cairo"), "Egypt Standard Time"),
    ]),
    ("ET", &[(Id("US/Eastern"), "Eastern Standard Time")]),
    ("Eastern", &[(Id("US/Eastern"), "Eastern Standard Time")]),
    ("FDT", &[(Id("Europe/Helsinki"), "FLE Standard Time")]),
    ("FET", &[(Offset(10800), "Further-eastern European Time")]),
    ("FJT", &[(Offset(43200), "Fiji Time")]),
    ("FKST", &[(Offset(-10800), "Falkland Islands Summer Time")]),
    ("FKT", &[(Offset(-14400), "Falkland Islands Time")]),
    ("FNT", &[(Offset(-7200), "Fernando de Noronha Time")]),
    ("FST", &[(Id("Pacific/Fiji"), "Fiji Standard Time")]),
    ("GALT", &[(Offset(-21600), "Galápagos Time")]),
    ("GAMT", &[(Offset(-32400), "Gambier Islands Time")]),
    ("GDT", &[
        (Id("Europe/Lisbon"), "GMT Standard Time"),
        (Id("Europe/Athens"), "GTB Standard Time"),
        (Id("America/Godthab"), "Greenland Standard Time"),
    ]),
    ("GET", &[(Id("Asia/Tbilisi"), "Georgian Standard Time")]),
    ("GFT", &[(Offset(-10800), "French Guiana Time")]),
    ("GILT", &[(Offset(43200), "Gilbert Island Time")]),
    ("GIT", &[(Offset(-32400), "Gambier Island Time")]),
    ("GMT", &[(Offset(0), "Greenwich Mean Time")]),
    ("GST", &[
        (Id("Atlantic/Reykjavik"), "Greenwich Standard Time"),
        (Offset(14400), "Gulf Standard Time"),
        (Offset(-7200), "South Georgia and the South Sandwich Islands Time"),
    ]),
    ("GYT", &[(Offset(-14400), "Guyana Time")]),
    ("HAEC", &[(Offset(7200), "Heure Avancée d'Europe Centrale")]),
    ("HDT", &[(Id("US/Aleutian"), "Hawaiian–Aleutian Daylight Time")]),
    ("HKT", &[(Id("Hongkong"), "Hong Kong Time"), (Offset(28800), "Hong Kong Time")]),
    ("HMT", &[(Offset(18000), "Heard and McDonald Islands Time")]),
    ("HOVST", &[(Offset(28800), "Hovd Summer Time")]),
    ("HOVT", &[(Offset(25200), "Hovd Time")]),
    ("HST", &[(Id("US/Hawaii"), "Hawaiian Standard Time")]),
    ("ICT", &[(Offset(25200), "Indochina Time")]),
    ("IDLW", &[(Offset(-43200), "International Day Line West time zone")]),
    ("IDT", &[
        (Id("Israel"), "Israel Daylight Time"),
        (Id("Asia/Tehran"), "Iran Standard Time"),
    ]),
    ("IOT", &[(Offset(10800), "Indian Ocean Time")]),
    ("IRDT", &[(Offset(16200), "Iran Daylight Time")]),
    ("IRKT", &[(Offset(28800), "Irkutsk Time")]),
    ("IRST", &[(Offset(12600), "Iran Standard Time")]),
    ("IST", &[
        (Id("Europe/Dublin"), "Irish Standard Time"),
        (Id("Asia/Calcutta"), "India Standard Time"),
        (Id("Israel"), "Israel Standard Time"),
    ]),
    ("JDT", &[(Id("Asia/Jerusalem"), "Israel Standard Time")]),
    ("JST", &[
        (Id("Asia/Tokyo"), "Japan Standard Time"),
        (Id("Asia/Amman"), "Jordan Standard Time"),
    ]),
    ("KALT", &[(Offset(7200), "Kaliningrad Time")]),
    ("KDT", &[(Id("Asia/Kamchatka"), "Kamchatka Standard Time")]),
    ("KGT", &[(Offset(21600), "Kyrgyzstan Time")]),
    ("KOST", &[(Offset(39600), "Kosrae Time")]),
    ("KRAT", &[(Offset(25200), "Krasnoyarsk Time")]),
    ("KST", &[
        (Id("Asia/Seoul"), "Korea Standard Time"),
        (Id("Europe/Kaliningrad"), "Kaliningrad Standard Time"),
    ]),
    ("LHST", &[(Offset(37800), "Lord Howe Standard Time")]),
    ("LHDT", &[(Offset(39600), "Lord Howe Summer Time")]),
    ("LINT", &[(Offset(50400), "Line Islands Time")]),
    ("LST", &[(Id("Africa/Tripoli"), "Libya Standard Time")]),
    ("MAGT", &[(Offset(43200), "Magadan Time")]),
    ("MART", &[(Offset(-34200), "Marquesas Islands Time")]),
    ("MAWT", &[(Offset(18000), "Mawson Station Time")]),
    ("MDT", &[
        (Id("US/Mountain"), "Mountain Daylight Time"),
        (Id("Africa/Casablanca"), "Morocco Standard Time"),
    ]),
    ("MEDT", &[(Id("Asia/Beirut"), "Middle East Standard Time")]),
    ("MEST", &[(Id("MET"), "Middle European Summer Time")]),
    ("MET", &[(Id("MET"), "Middle European Time"), (Offset(3600), "Middle European Time")]),
    ("MHT", &[(Offset(43200), "Marshall Islands Time")]),
    ("MIST", &[(Offset(39600), "Macquarie Island Station Time")]),
    ("MIT", &[(Offset(-34200), "Marquesas Islands Time")]),
    ("MMT", &[(Offset(23400), "Myanmar Standard Time")]),
    ("MPST", &[(Id("Asia/Singapore"), "Singapore Standard Time")]),
    ("MSK", &[(Id("Europe/Moscow"), "Moscow Standard Time")]),
    ("MST", &[
        (Id("US/Mountain"), "Mountain Standard Time"),
        (Offset(28800), "Malaysia Standard Time"),
        (Id("Asia/Magadan"), "Magadan Standard Time"),
        (Id("Indian/Mauritius"), "Mauritius Standard Time"),
        (Id("America/Montevideo"), "Montevideo Standard Time"),
        (Id("Asia/Rangoon"), "Myanmar Standard Time"),
    ]),
    ("MT", &[(Id("US/Mountain"), "Mountain Standard Time")]),
    ("Mountain", &[(Id("US/Mountain"), "Mountain Standard Time")]),
    ("MUT", &[(Offset(14400), "Mauritius Time")]),
    ("MVT", &[(Offset(18000), "Maldives Time")]),
    ("MYT", &[(Offset(28800), "Malaysia Time")]),
    ("NAEST", &[(Id("Asia/Irkutsk"), "North Asia East Standard Time")]),
    ("NAST", &[(Id("Asia/Krasnoyarsk"), "North Asia Standard Time")]),
    ("NCAST", &[(Id("Asia/Novosibirsk"), "North Central Asia Standard Time")]),
    ("NCT", &[(Offset(39600), "New Caledonia Time")]),
    ("NDT", &[(Id("Canada/Newfoundland"), "Newfoundland Daylight Time")]),
    ("NFT", &[(Offset(39600), "Norfolk Island Time")]),
    ("NOVT", &[(Offset(25200), "Novosibirsk Time")]),
    ("NPT", &[(Offset(20700), "Nepal Time")]),
    ("NST", &[
        (Id("Canada/Newfoundland"), "Newfoundland Standard Time"),
        (Id("Africa/Windhoek"), "Namibia Standard Time"),
        (Id("Asia/Kathmandu"), "Nepal Standard Time"),
    ]),
    ("NT", &[(Offset(-12600), "Newfoundland Time")]),
    ("NUT", &[(Offset(-39600), "Niue Time")]),
    ("NZDT", &[(Id("NZ"), "New Zealand Daylight Time")]),
    ("NZST", &[(Id("NZ"), "New Zealand Standard Time")]),
    ("OMST", &[(Offset(21600), "Omsk Time")]),
    ("ORAT", &[(Offset(18000), "Oral Time")]),
    ("PDT", &[(Id("US/Pacific"), "Pacific Daylight Time")]),
    ("PET", &[(Offset(-18000), "Peru Time")]),
    ("PETT", &[(Offset(43200), "Kamchatka Time")]),
    ("PGT", &[(Offset(36000), "Papua New Guinea Time")]),
    ("PHOT", &[(Offset(46800), "Phoenix Island Time")]),
    ("PHST", &[(Offset(28800), "Philippine Standard Time")]),
    ("PHT", &[(Offset(28800), "Philippine Time")]),
    ("PKT", &[(Id("Asia/Karachi"), "Pakistan Standard Time")]),
    ("PMDT", &[(Offset(-7200), "Saint Pierre and Miquelon Daylight Time")]),
    ("PMST", &[(Offset(-10800), "Saint Pierre and Miquelon Standard Time")]),
    ("PONT", &[(Offset(39600), "Pohnpei Standard Time")]),
    ("PSST", &[(Id("America/Santiago"), "Pacific SA Standard Time")]),
    ("PST", &[(Id("US/Pacific"), "Pacific Standard Time")]),
    ("PT", &[(Id("US/Pacific"), "Pacific Standard Time")]),
    ("Pacific", &[(Id("US/Pacific"), "Pacific Standard Time")]),
    ("PWT", &[(Offset(32400), "Palau Time")]),
    ("PYST", &[(Offset(-10800), "Paraguay Summer Time")]),
    ("PYT", &[(Id("America/Asuncion"), "Paraguay Standard Time")]),
    ("RDT", &[(Id("Europe/Brussels"), "Romance Standard Time")]),
    ("RET", &[(Offset(14400), "Réunion Time")]),
    ("ROTT", &[(Offset(-10800), "Rothera Research Station Time")]),
    ("SAKT", &[(Offset(39600), "Sakhalin Island Time")]),
    ("SAMT", &[(Id("Europe/Samara"), "Samara Time")]),
    ("SAST", &[
        (Id("Africa/Johannesburg"), "South Africa Standard Time"),
        (Id("Asia/Jakarta"), "SE Asia Standard Time"),
    ]),
    ("SBT", &[(Offset(39600), "Solomon Islands Time")]),
    ("SCT", &[(Offset(14400), "Seychelles Time")]),
    ("SDT", &[(Offset(-36000), "Samoa Daylight Time"), (Id("Asia/Damascus"), "Syria Standard Time")]),
    ("SEST", &[(Id("America/Cayenne"), "SA Eastern Standard Time")]),
    ("SGT", &[(Offset(28800), "Singapore Time")]),
    ("SLST", &[(Id("Asia/Colombo"), "Sri Lanka Standard Time")]),
    ("SPST", &[(Id("America/Bogota"), "South America Pacific Standard Time")]),
    ("SRET", &[(Offset(39600), "Srednekolymsk Time")]),
    ("SRT", &[(Offset(-10800), "Suriname Time")]),
    ("SST", &[(Id("US/Samoa"), "Samoa Standard Time"), (Offset(28800), "Singapore Standard Time")]),
    ("SWST", &[(Id("America/Anguilla"), "SA Western Standard Time")]),
    ("SYOT", &[(Offset(10800), "Showa Station Time")]),
    ("TAHT", &[(Offset(-36000), "Tahiti Time")]),
    ("TDT", &[(Id("Europe/Istanbul"), "Turkey Standard Time")]),
    ("TFT", &[(Offset(18000), "French Southern and Antarctic Time")]),
    ("THA", &[(Offset(25200), "Thailand Standard Time")]),
    ("TJT", &[(Offset(18000), "Tajikistan Time")]),
    ("TKT", &[(Offset(46800), "Tokelau Time")]),
    ("TLT", &[(Offset(32400), "Timor Leste Time")]),
    ("TMT", &[(Offset(18000), "Turkmenistan Time")]),
    ("TOT", &[(Offset(46800), "Tonga Time")]),
    ("TRT", &[(Offset(10800), "Turkey Time")]),
    ("TST", &[
        (Id("Asia/Taipei"), "Taipei Standard Time"),
        (Id("Australia/Hobart"), "Tasmania Standard Time"),
        (Id("Pacific/Tongatapu"), "Tonga Standard Time"),
    ]),
    ("TVT", &[(Offset(43200), "Tuvalu Time")]),
    ("UEDT", &[(Id("America/Indianapolis"), "US Eastern Standard Time")]),
    ("ULAST", &[(Offset(32400), "Ulaanbaatar Summer Time")]),
    ("ULAT", &[(Offset(28800), "Ulaanbaatar Standard Time")]),
    ("UST", &[(Id("Asia/Ulaanbaatar"), "Ulaanbaatar Standard Time")]),
    ("UYST", &[(Offset(-7200), "Uruguay Summer Time")]),
    ("UYT", &[(Offset(-10800), "Uruguay Standard Time")]),
    ("UZT", &[(Offset(18000), "Uzbekistan Time")]),
    ("VET", &[(Offset(-14400), "Venezuelan Standard Time")]),
    ("VLAT", &[(Offset(36000), "Vladivostok Time")]),
    ("VOLT", &[(Offset(10800), "Volgograd Time")]),
    ("VOST", &[(Offset(21600), "Vostok Station Time")]),
    ("VST", &[
        (Id("America/Caracas"), "Venezuela Standard Time"),
        (Id("Asia/Vladivostok"), "Vladivostok Standard Time"),
    ]),
    ("VUT", &[(Offset(39600), "Vanuatu Time")]),
    ("WAKT", &[(Offset(43200), "Wake Island Time")]),
    ("WAST", &[
        (Id("Australia/Perth"), "W. Australia Standard Time"),
        (Offset(7200), "West Africa Summer Time"),
        (Id("Asia/Tashkent"), "West Asia Standard Time"),
    ]),
    ("WAT", &[(Id("Africa/Kinshasa"), "West Africa Time")]),
    ("WCAST", &[(Id("Africa/Kinshasa"), "West Central Africa Standard Time")]),
    ("WEDT", &[(Id("WET"), "Western Europe Summer Time")]),
    ("WEST", &[(Id("WET"), "Western European Summer Time")]),
    ("WET", &[(Id("WET"), "Western European Time")]),
    ("WGST", &[(Offset(-7200), "West Greenland Summer Time")]),
    ("WGT", &[(Offset(-10800), "West Greenland Time")]),
    ("WIB", &[(Id("Asia/Jakarta"), "Western Indonesia Time")]),
    ("WIT", &[(Id("Asia/Jayapura"), "Eastern Indonesia Time")]),
    ("WITA", &[(Id("Asia/Makassar"), "Central Indonesia Time")]),
    ("WPST", &[(Id("Pacific/Guam"), "West Pacific Standard Time")]),
    ("WST", &[(Offset(28800), "Western Standard Time")]),
    ("YAKT", &[(Offset(32400), "Yakutsk Time")]),
    ("YEKT", &[(Id("Asia/Yekaterinburg"), "Yekaterinburg Time")]),
    ("YST", &[(Id("Asia/Yakutsk"), "Yakutsk Standard Time")]),
];

lazy_static! {
    static ref UTC_OFFSET_RE: Regex =
        Regex::new(r"^(?i)UTC([+±-])(\d\d?)(?::(\d\d))?$").unwrap();
}

/// Immutable lookup table constructed once and passed to the resolver, so
/// tests can substitute an alternate catalog.
pub struct ZoneCatalog {
    entries: HashMap<String, Entries>,
    keys: Vec<&'static str>,
}

impl ZoneCatalog {
    pub fn new(aliases: &'static [(&'static str, Entries)]) -> Self {
        let mut entries = HashMap::with_capacity(aliases.len());
        let mut keys = Vec::with_capacity(aliases.len());
        for (key, candidates) in aliases {
            entries.insert(key.to_lowercase(), *candidates);
            keys.push(*key);
        }
        Self { entries, keys }
    }

    /// Keys in their original casing, table order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.keys.iter().copied()
    }

    /// All candidates for a token, case-insensitively. A `UTC±H[:MM]` token
    /// not present in the table fabricates a fixed-offset candidate labeled
    /// with the canonical uppercase spelling.
    pub fn get(&self, token: &str) -> Vec<Candidate> {
        if let Some(candidates) = self.entries.get(&token.to_lowercase()) {
            return candidates
                .iter()
                .map(|(zone, label)| Candidate {
                    zone: *zone,
                    label: (*label).to_string(),
                })
                .collect();
        }

        if let Some(caps) = UTC_OFFSET_RE.captures(token) {
            let hours: i32 = caps[2].parse().unwrap_or(0);
            let minutes: i32 = caps.get(3).map_or(0, |m| m.as_str().parse().unwrap_or(0));
            let sign = if &caps[1] == "-" { -1 } else { 1 };
            let seconds = sign * (hours * 3600 + minutes * 60);
            if let Some(zone) = (-86400..=86400).contains(&seconds).then_some(Offset(seconds)) {
                return vec![Candidate {
                    zone,
                    label: token.to_uppercase(),
                }];
            }
        }

        Vec::new()
    }
}

impl Default for ZoneCatalog {
    fn default() -> Self {
        Self::new(ALIASES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguous_abbreviation_keeps_every_candidate() {
        let catalog = ZoneCatalog::default();
        let cst = catalog.get("CST");
        assert_eq!(cst.len(), 4);
        let labels: Vec<&str> = cst.iter().map(|c| c.label.as_str()).collect();
        assert!(labels.contains(&"Central Standard Time"));
        assert!(labels.contains(&"China Standard Time"));
        assert!(labels.contains(&"Caucasus Standard Time"));
        assert!(labels.contains(&"Cuba Standard Time"));
    }

    #[test]
    fn symbolic_name_resolves_case_insensitively() {
        let catalog = ZoneCatalog::default();
        let eastern = catalog.get("eastern");
        assert_eq!(eastern.len(), 1);
        assert_eq!(eastern[0].label, "Eastern Standard Time");
        assert_eq!(eastern[0].zone, ZoneRef::Id("US/Eastern"));
    }

    #[test]
    fn utc_offset_token_fabricates_fixed_candidate() {
        let catalog = ZoneCatalog::default();
        for token in ["UTC+8:30", "utc+8:30"] {
            let got = catalog.get(token);
            assert_eq!(got.len(), 1, "{token}");
            assert_eq!(got[0].label, "UTC+8:30");
            assert_eq!(got[0].zone, ZoneRef::Offset(8 * 3600 + 30 * 60));
        }
        let west = catalog.get("UTC-5");
        assert_eq!(west[0].zone, ZoneRef::Offset(-5 * 3600));
    }

    #[test]
    fn unknown_token_yields_nothing() {
        let catalog = ZoneCatalog::default();
        assert!(catalog.get("XYZZY").is_empty());
        assert!(catalog.get("UTC+99").is_empty());
    }
}
