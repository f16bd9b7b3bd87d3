//! JSON-backed [`MetadataStore`]: a single `metadata.json` document mapping
//! series id to its bookkeeping record.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::store::{MetadataStore, StoreResult};

/// Per-series bookkeeping record.
///
/// `data_start_date`/`data_end_date` are the inclusive bounds of the stored
/// observations and `record_count` their number; the synchronization service
/// re-derives all three from actually stored data after every successful
/// write, so they never drift from the series file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesMetadata {
    /// Date the series was last refreshed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDate>,
    /// First stored observation date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_start_date: Option<NaiveDate>,
    /// Last stored observation date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_end_date: Option<NaiveDate>,
    /// Number of stored observations.
    #[serde(default)]
    pub record_count: u64,
}

/// Field-level update for a [`SeriesMetadata`] record; unset fields keep
/// their prior values.
#[derive(Debug, Clone, Default)]
pub struct MetadataPatch {
    /// New refresh date, if any.
    pub last_updated: Option<NaiveDate>,
    /// New first-observation date, if any.
    pub data_start_date: Option<NaiveDate>,
    /// New last-observation date, if any.
    pub data_end_date: Option<NaiveDate>,
    /// New record count, if any.
    pub record_count: Option<u64>,
}

impl MetadataPatch {
    /// Builds the patch the sync service applies after a successful write:
    /// every field derived from the stored series, refresh date set to today.
    pub fn derived(start: NaiveDate, end: NaiveDate, count: u64, today: NaiveDate) -> Self {
        Self {
            last_updated: Some(today),
            data_start_date: Some(start),
            data_end_date: Some(end),
            record_count: Some(count),
        }
    }

    fn apply(self, record: &mut SeriesMetadata) {
        if let Some(last_updated) = self.last_updated {
            record.last_updated = Some(last_updated);
        }
        if let Some(start) = self.data_start_date {
            record.data_start_date = Some(start);
        }
        if let Some(end) = self.data_end_date {
            record.data_end_date = Some(end);
        }
        if let Some(count) = self.record_count {
            record.record_count = count;
        }
    }
}

/// Single-document JSON implementation of [`MetadataStore`].
pub struct JsonMetadataStore {
    path: PathBuf,
}

impl JsonMetadataStore {
    /// Opens a metadata store backed by the given JSON file; the parent
    /// directory is created if needed.
    pub fn new(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    fn load(&self) -> StoreResult<IndexMap<String, SeriesMetadata>> {
        if !self.path.exists() {
            return Ok(IndexMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, document: &IndexMap<String, SeriesMetadata>) -> StoreResult<()> {
        let body = serde_json::to_string_pretty(document)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl MetadataStore for JsonMetadataStore {
    fn get(&self, series_id: &str) -> StoreResult<Option<SeriesMetadata>> {
        Ok(self.load()?.get(series_id).cloned())
    }

    fn update(&self, series_id: &str, patch: MetadataPatch) -> StoreResult<()> {
        let mut document = self.load()?;
        let record = document.entry(series_id.to_string()).or_default();
        patch.apply(record);
        self.save(&document)
    }

    fn get_all(&self) -> StoreResult<IndexMap<String, SeriesMetadata>> {
        self.load()
    }
}
