//! Pure chart-preparation transforms: date-range windowing and base-100
//! normalization. No I/O, no stored state.

use chrono::{Duration, Utc};
use fred_ingestor::models::observation::Observation;
use indexmap::IndexMap;

/// Default normalization base.
pub const DEFAULT_BASE: f64 = 100.0;

fn range_days(range_key: &str) -> Option<i64> {
    match range_key {
        "6m" => Some(180),
        "1y" => Some(365),
        "3y" => Some(365 * 3),
        "5y" => Some(365 * 5),
        _ => None,
    }
}

/// Keeps observations on or after `today - N days` for the given range key.
///
/// `"all"` and unrecognized keys return the series unchanged.
pub fn filter_by_range(observations: &[Observation], range_key: &str) -> Vec<Observation> {
    let Some(days) = range_days(range_key) else {
        return observations.to_vec();
    };

    let cutoff = Utc::now().date_naive() - Duration::days(days);
    observations
        .iter()
        .filter(|obs| obs.date >= cutoff)
        .copied()
        .collect()
}

/// Rescales a series so its first value equals `base`.
///
/// A first value of exactly zero yields a constant series of `base` (the
/// documented special case, not an error).
pub fn normalize_to_scale(observations: &[Observation], base: f64) -> Vec<Observation> {
    let Some(first) = observations.first() else {
        return vec![];
    };

    if first.value == 0.0 {
        return observations
            .iter()
            .map(|obs| Observation::new(obs.date, base))
            .collect();
    }

    let first_value = first.value;
    observations
        .iter()
        .map(|obs| Observation::new(obs.date, (obs.value / first_value) * base))
        .collect()
}

/// Applies the display pipeline per series: range filter, then optional
/// base-100 normalization. Empty input series pass through unchanged and
/// map order is preserved.
pub fn prepare_chart_data(
    data: &IndexMap<String, Vec<Observation>>,
    range_key: &str,
    normalize: bool,
) -> IndexMap<String, Vec<Observation>> {
    let mut result = IndexMap::with_capacity(data.len());

    for (series_id, observations) in data {
        if observations.is_empty() {
            result.insert(series_id.clone(), vec![]);
            continue;
        }

        let mut prepared = filter_by_range(observations, range_key);
        if normalize && !prepared.is_empty() {
            prepared = normalize_to_scale(&prepared, DEFAULT_BASE);
        }
        result.insert(series_id.clone(), prepared);
    }

    result
}
