mod common;

use common::{d, setup_stores};
use series_sync::store::{MetadataPatch, MetadataStore};

#[test]
fn get_missing_series_is_none() {
    let (_data, _store, meta) = setup_stores();
    assert_eq!(meta.get("nope").unwrap(), None);
}

#[test]
fn update_creates_record_and_merges_fields() {
    let (_data, _store, meta) = setup_stores();

    meta.update(
        "sp500",
        MetadataPatch {
            data_start_date: Some(d(2020, 1, 1)),
            data_end_date: Some(d(2025, 1, 10)),
            record_count: Some(1250),
            ..Default::default()
        },
    )
    .unwrap();

    // Partial patch: only the refresh date moves; the rest stays put.
    meta.update(
        "sp500",
        MetadataPatch {
            last_updated: Some(d(2025, 1, 11)),
            ..Default::default()
        },
    )
    .unwrap();

    let record = meta.get("sp500").unwrap().unwrap();
    assert_eq!(record.last_updated, Some(d(2025, 1, 11)));
    assert_eq!(record.data_start_date, Some(d(2020, 1, 1)));
    assert_eq!(record.data_end_date, Some(d(2025, 1, 10)));
    assert_eq!(record.record_count, 1250);
}

#[test]
fn get_all_returns_every_record() {
    let (_data, _store, meta) = setup_stores();

    meta.update(
        "a",
        MetadataPatch {
            record_count: Some(1),
            ..Default::default()
        },
    )
    .unwrap();
    meta.update(
        "b",
        MetadataPatch {
            record_count: Some(2),
            ..Default::default()
        },
    )
    .unwrap();

    let document = meta.get_all().unwrap();
    assert_eq!(document.len(), 2);
    assert_eq!(document["a"].record_count, 1);
    assert_eq!(document["b"].record_count, 2);
}

#[test]
fn document_survives_reopen() {
    let (data, _store, meta) = setup_stores();

    meta.update(
        "a",
        MetadataPatch {
            record_count: Some(7),
            data_end_date: Some(d(2025, 2, 1)),
            ..Default::default()
        },
    )
    .unwrap();
    drop(meta);

    let reopened =
        series_sync::store::metadata::JsonMetadataStore::new(data.data_dir.join("metadata.json"))
            .unwrap();
    let record = reopened.get("a").unwrap().unwrap();
    assert_eq!(record.record_count, 7);
    assert_eq!(record.data_end_date, Some(d(2025, 2, 1)));
}
