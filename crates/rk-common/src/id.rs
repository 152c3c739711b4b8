//! Row and run identity types.
//!
//! A row is uniquely identified by its [`RowKey`] within one output-table
//! session. A [`RunId`] names one streaming run for log correlation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique, ordered identifier of a row within one output-table session.
///
/// Displayed with the host's row-key prefix: `RowKey(7)` prints as `Row7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowKey(pub u64);

impl RowKey {
    /// Prefix used by the textual form of a key.
    pub const PREFIX: &'static str = "Row";

    /// Returns the numeric value of this key.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

impl From<u64> for RowKey {
    fn from(key: u64) -> Self {
        RowKey(key)
    }
}

/// Tags the log events of one streaming run.
///
/// UTC start time plus eight hex digits of a v4 UUID, e.g.
/// `run-20260115T143022Z-9f2c41ab`. Never parsed back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    pub fn new() -> Self {
        Self::at(chrono::Utc::now(), uuid::Uuid::new_v4())
    }

    fn at(started: chrono::DateTime<chrono::Utc>, nonce: uuid::Uuid) -> Self {
        let nonce = nonce.simple().to_string();
        RunId(format!(
            "run-{}-{}",
            started.format("%Y%m%dT%H%M%SZ"),
            &nonce[..8]
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
