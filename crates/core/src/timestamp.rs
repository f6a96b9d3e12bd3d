// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed-width, lexicographically sortable UTC timestamps
//!
//! A request is identified by the instant it was made. The textual form
//! (`YYYY-MM-DD HH:MM:SS.ffffffZ`) sorts the same way the instants do, so
//! queues can be ordered by comparing strings read back from storage.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6fZ";
const PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.fZ";

#[derive(Debug, Error)]
#[error("invalid timestamp {value:?}: {source}")]
pub struct TimestampError {
    value: String,
    source: chrono::ParseError,
}

/// A request or grant timestamp
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self(instant.format(FORMAT).to_string())
    }

    /// Wrap a raw value read back from storage without validating it.
    ///
    /// Timestamps are compared for equality and order only, so a value that
    /// does not parse is still usable as an identifier.
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse back into an instant
    pub fn to_datetime(&self) -> Result<DateTime<Utc>, TimestampError> {
        NaiveDateTime::parse_from_str(&self.0, PARSE_FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(|source| TimestampError {
                value: self.0.clone(),
                source,
            })
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[path = "timestamp_tests.rs"]
mod tests;
