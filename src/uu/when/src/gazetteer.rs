// This file is part of the when utility.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.
//! City lookup backed by an external gazetteer store.
//!
//! The conversion engine only consumes the narrow [`Gazetteer`] contract;
//! how rows got into the store is not its concern. [`CityIndex`] is the
//! shipped implementation: a single JSON document on disk, opened for the
//! duration of one query and released again. Connections are never pooled.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{WhenError, WhenResult};

/// One gazetteer row. Read-only to the conversion engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    pub name: String,
    pub ascii: String,
    /// Subdivision code or name (e.g. "Hawaii", "11").
    pub sub: String,
    /// Two-letter country code.
    pub co: String,
    /// IANA zone identifier for the city.
    pub tz: String,
}

lazy_static! {
    static ref SUB_NUMBER_RE: Regex = Regex::new(r"\d").unwrap();
}

impl City {
    /// Human-readable display: `Name (Ascii), Subdivision, CO, Zone` with
    /// the ascii form collapsed when identical and numeric subdivision
    /// codes hidden.
    pub fn display(&self) -> String {
        let mut bits = vec![self.display_name(), self.co.clone(), self.tz.clone()];
        if !SUB_NUMBER_RE.is_match(&self.sub) && self.sub != self.name {
            bits.insert(1, self.sub.clone());
        }
        bits.join(", ")
    }

    /// `Name` or `Name (Ascii)` when the two differ.
    pub fn display_name(&self) -> String {
        if self.name == self.ascii {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.ascii)
        }
    }

    /// Single-character attribute extraction used by the `%!x` format
    /// directives.
    pub fn field(&self, spec: char) -> Option<String> {
        match spec {
            'i' => Some(self.id.to_string()),
            'n' => Some(self.name.clone()),
            'a' => Some(self.ascii.clone()),
            's' => Some(self.sub.clone()),
            'c' => Some(self.co.clone()),
            'z' => Some(self.tz.clone()),
            'N' => Some(self.display_name()),
            _ => None,
        }
    }

    pub fn as_json(&self) -> serde_json::Value {
        let mut value = serde_json::json!({
            "name": self.name,
            "ascii": self.ascii,
            "country": self.co,
            "tz": self.tz,
        });
        if !SUB_NUMBER_RE.is_match(&self.sub) {
            value["subnational"] = serde_json::Value::String(self.sub.clone());
        }
        value
    }
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Split a free-text city query on commas into at most
/// (name, country, subdivision).
pub fn parse_search(value: &str) -> WhenResult<(String, Option<String>, Option<String>)> {
    let bits: Vec<&str> = value.split(',').map(str::trim).collect();
    match bits.as_slice() {
        [name] => Ok((name.to_string(), None, None)),
        [name, co] => Ok((name.to_string(), Some(co.to_string()), None)),
        [name, co, sub] => Ok((
            name.to_string(),
            Some(co.to_string()),
            Some(sub.to_string()),
        )),
        _ => Err(WhenError::InvalidSearch(value.to_string())),
    }
}

/// The narrow search contract the conversion engine consumes.
pub trait Gazetteer {
    /// Substring match on name/ascii plus alias-table match; country and
    /// subdivision filters are equality, case-insensitive.
    fn search(&self, name: &str, co: Option<&str>, sub: Option<&str>) -> WhenResult<Vec<City>>;

    /// Equality match only.
    fn exact_search(
        &self,
        name: &str,
        co: Option<&str>,
        sub: Option<&str>,
    ) -> WhenResult<Vec<City>>;
}

/// Store document: the city table plus the alias table (alias -> city id).
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDoc {
    cities: Vec<City>,
    #[serde(default)]
    aliases: BTreeMap<String, i64>,
}

/// File-backed gazetteer. Every query loads the document fresh and drops it
/// when done; a missing file is a distinct, user-actionable condition.
pub struct CityIndex {
    path: PathBuf,
}

impl CityIndex {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$WHEN_DB`, else `~/.when/cities.json`.
    pub fn default_path() -> PathBuf {
        if let Some(path) = std::env::var_os("WHEN_DB") {
            return PathBuf::from(path);
        }
        let home = std::env::var_os("HOME").map_or_else(|| PathBuf::from("."), PathBuf::from);
        home.join(".when").join("cities.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> WhenResult<StoreDoc> {
        if !self.path.exists() {
            return Err(WhenError::StoreUnavailable);
        }
        let text = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&text).map_err(|e| WhenError::Store(e.to_string()))
    }

    fn store(&self, doc: &StoreDoc) -> WhenResult<()> {
        let text = serde_json::to_string_pretty(doc).map_err(|e| WhenError::Store(e.to_string()))?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }

    /// Register `alias` (comma-separated for several at once) for a city id.
    pub fn add_alias(&self, aliases: &str, id: i64) -> WhenResult<()> {
        let mut doc = self.load()?;
        for alias in aliases.split(',').map(str::trim).filter(|a| !a.is_empty()) {
            doc.aliases.insert(alias.to_lowercase(), id);
        }
        self.store(&doc)
    }

    /// All (alias, city) pairs for listing.
    pub fn aliases(&self) -> WhenResult<Vec<(String, Option<City>)>> {
        let doc = self.load()?;
        Ok(doc
            .aliases
            .iter()
            .map(|(alias, id)| {
                let city = doc.cities.iter().find(|c| c.id == *id).cloned();
                (alias.clone(), city)
            })
            .collect())
    }

    fn filtered(
        doc: &StoreDoc,
        name: &str,
        co: Option<&str>,
        sub: Option<&str>,
        exact: bool,
    ) -> Vec<City> {
        let needle = name.to_lowercase();
        let co = co.map(str::to_uppercase);
        let sub = sub.map(str::to_uppercase);

        let mut out: Vec<City> = Vec::new();
        // alias table first, the way a dedicated alias always outranks a
        // substring hit
        if let Some(id) = doc.aliases.get(&needle) {
            out.extend(doc.cities.iter().filter(|c| c.id == *id).cloned());
        }

        for city in &doc.cities {
            let named = if exact {
                city.id.to_string() == name
                    || city.name.to_lowercase() == needle
                    || city.ascii.to_lowercase() == needle
            } else {
                city.id.to_string() == name
                    || city.name.to_lowercase().contains(&needle)
                    || city.ascii.to_lowercase().contains(&needle)
            };
            let co_ok = co.as_ref().map_or(true, |c| city.co.to_uppercase() == *c);
            let sub_ok = sub.as_ref().map_or(true, |s| city.sub.to_uppercase() == *s);
            if named && co_ok && sub_ok && !out.iter().any(|c| c.id == city.id) {
                out.push(city.clone());
            }
        }
        out
    }
}

impl Gazetteer for CityIndex {
    fn search(&self, name: &str, co: Option<&str>, sub: Option<&str>) -> WhenResult<Vec<City>> {
        let doc = self.load()?;
        Ok(Self::filtered(&doc, name, co, sub, false))
    }

    fn exact_search(
        &self,
        name: &str,
        co: Option<&str>,
        sub: Option<&str>,
    ) -> WhenResult<Vec<City>> {
        let doc = self.load()?;
        Ok(Self::filtered(&doc, name, co, sub, true))
    }
}
