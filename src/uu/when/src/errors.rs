// This file is part of the when utility.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.
//! Errors raised while resolving zones, parsing timestamps, and querying
//! the city gazetteer.

use thiserror::Error;
use uucore::error::UError;

/// Shown when the gazetteer store has not been seeded yet. Distinct from a
/// plain I/O failure so the caller can suggest the fix instead of printing
/// an errno.
pub const STORE_MISSING_HELP: &str = "\
the city database is not available

City names can only be resolved once a gazetteer store has been placed at
the location reported by 'when --db-path' (or pointed to by WHEN_DB).";

pub type WhenResult<T> = Result<T, WhenError>;

#[derive(Debug, Error)]
pub enum WhenError {
    /// One or more source tokens resolved to no zone at all. Fatal to the
    /// whole conversion; the offending tokens are named.
    #[error("could not find sources: {}", .0.join(", "))]
    UnknownSource(Vec<String>),

    /// The timestamp text could not be interpreted as a date/time.
    #[error("invalid date '{0}'")]
    ParseError(String),

    /// A format template contained a directive the renderer rejects.
    #[error("invalid format string '{0}'")]
    InvalidFormat(String),

    /// A city search expression split into more than name, country,
    /// subdivision.
    #[error("invalid city search expression: {0}")]
    InvalidSearch(String),

    /// A timedelta offset had recognizable syntax but no usable value.
    #[error("invalid offset: {0}")]
    InvalidOffset(String),

    /// A timedelta offset that is not offset syntax at all.
    #[error("unrecognized offset value: {0}")]
    UnrecognizedOffset(String),

    /// Unknown keyword passed to the full moon listing.
    #[error("unknown full moon argument: {0}")]
    UnknownFullMoonArg(String),

    /// The gazetteer backing store does not exist.
    #[error("{}", STORE_MISSING_HELP)]
    StoreUnavailable,

    /// The gazetteer backing store exists but cannot be read.
    #[error("gazetteer store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl UError for WhenError {
    fn code(&self) -> i32 {
        1
    }
}
