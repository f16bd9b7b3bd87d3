//! Series and metadata storage contracts.
//!
//! Portable trait surface; the file-backed implementations live in
//! [`csv`] (one CSV per series) and [`metadata`] (a single JSON document).

pub mod csv;
pub mod metadata;

use chrono::NaiveDate;
use fred_ingestor::models::observation::Observation;
use indexmap::IndexMap;

pub use metadata::{MetadataPatch, SeriesMetadata};

/// How a write interacts with data already stored for the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// The new observation set entirely supersedes any stored data.
    Replace,
    /// Existing and new observations are merged by date; on a date collision
    /// the new value wins.
    Append,
}

/// Errors raised by the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted series file could not be parsed. Corrupt storage is
    /// fatal, never silently skipped.
    #[error("Malformed series data in {path}: {reason}")]
    Malformed {
        /// Path of the offending file.
        path: String,
        /// What failed to parse.
        reason: String,
    },

    /// The metadata document could not be decoded or encoded.
    #[error("Malformed metadata document: {0}")]
    Metadata(#[from] serde_json::Error),

    /// A write was rejected before persistence because an observation
    /// carried a non-finite value.
    #[error("Non-finite value for series {series_id} at {date}")]
    NonFiniteValue {
        /// The series the write targeted.
        series_id: String,
        /// Date of the offending observation.
        date: NaiveDate,
    },
}

/// Result type used throughout the storage layer.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistent storage for named, date-ordered observation series.
pub trait SeriesStore {
    /// Reads stored observations, optionally bounded by an inclusive date
    /// window. A missing series yields an empty vector, not an error. The
    /// result is always sorted ascending by date.
    fn read(
        &self,
        series_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> StoreResult<Vec<Observation>>;

    /// Writes observations under the given mode and returns the number of
    /// rows persisted. Writing an empty set is a no-op returning 0 in both
    /// modes; it never destroys previously stored data.
    fn write(
        &self,
        series_id: &str,
        observations: &[Observation],
        mode: WriteMode,
    ) -> StoreResult<usize>;

    /// Whether any data is stored under this series id.
    fn exists(&self, series_id: &str) -> bool;

    /// Inclusive date bounds of the stored data, or `(None, None)` when the
    /// series is absent or empty.
    fn date_range(&self, series_id: &str) -> StoreResult<(Option<NaiveDate>, Option<NaiveDate>)>;
}

/// Persistent storage for per-series bookkeeping metadata.
///
/// The store performs no validation; keeping metadata consistent with the
/// stored series is the synchronization service's responsibility.
pub trait MetadataStore {
    /// Returns metadata for a series, or `None` when none was ever recorded.
    fn get(&self, series_id: &str) -> StoreResult<Option<SeriesMetadata>>;

    /// Applies a field-level merge: unset patch fields retain their prior
    /// values, and an unknown series id gets an empty record first.
    fn update(&self, series_id: &str, patch: MetadataPatch) -> StoreResult<()>;

    /// Returns the whole metadata document, keyed by series id.
    fn get_all(&self) -> StoreResult<IndexMap<String, SeriesMetadata>>;
}
