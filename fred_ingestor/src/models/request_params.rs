use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Universal parameters for requesting observations from a statistics API.
///
/// This struct is vendor-agnostic and is the standard input for all
/// [`DataSourceAdapter`](crate::providers::DataSourceAdapter) implementations.
/// The window bounds are inclusive on both sides; leaving either side unset
/// asks the provider for its full available history in that direction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObservationsRequest {
    /// Upstream series identifier (e.g., "SP500", "DGS10").
    pub series_id: String,

    /// Start of the requested window (inclusive), if bounded.
    pub start: Option<NaiveDate>,

    /// End of the requested window (inclusive), if bounded.
    pub end: Option<NaiveDate>,
}

impl ObservationsRequest {
    /// Request the provider's entire available history for a series.
    pub fn full_history(series_id: impl Into<String>) -> Self {
        Self {
            series_id: series_id.into(),
            start: None,
            end: None,
        }
    }

    /// Request a bounded (or half-bounded) window for a series.
    pub fn windowed(
        series_id: impl Into<String>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Self {
        Self {
            series_id: series_id.into(),
            start,
            end,
        }
    }
}
