//! Canonical in-memory representation of a single time-series observation.
//!
//! This struct is the standard output of all [`DataSourceAdapter`](crate::providers::DataSourceAdapter)
//! implementations, regardless of which upstream statistics API produced it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single daily (or lower-frequency) observation for one series.
///
/// Adapters guarantee that `value` is finite: upstream missing-value markers
/// and unparseable rows are dropped before an `Observation` is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Calendar date of the observation.
    pub date: NaiveDate,

    /// Observed numeric value.
    pub value: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}
