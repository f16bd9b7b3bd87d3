#![allow(dead_code)]

use chrono::NaiveDate;
use fred_ingestor::models::observation::Observation;
use tempfile::TempDir;

use series_sync::store::csv::CsvSeriesStore;
use series_sync::store::metadata::JsonMetadataStore;

pub struct TestData {
    // Keep alive for the life of the test.
    _dir: TempDir,
    pub data_dir: std::path::PathBuf,
}

pub fn setup_stores() -> (TestData, CsvSeriesStore, JsonMetadataStore) {
    let dir = TempDir::new().expect("tempdir");
    let data_dir = dir.path().to_path_buf();

    let series_store = CsvSeriesStore::new(&data_dir).expect("series store");
    let metadata_store = JsonMetadataStore::new(data_dir.join("metadata.json")).expect("meta store");

    (
        TestData {
            _dir: dir,
            data_dir,
        },
        series_store,
        metadata_store,
    )
}

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub fn obs(y: i32, m: u32, day: u32, value: f64) -> Observation {
    Observation::new(d(y, m, day), value)
}
