//! CSV-backed [`SeriesStore`]: one `<series_id>.csv` file per series with a
//! `date,value` header, kept sorted ascending on disk.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use fred_ingestor::models::observation::Observation;

use crate::store::{SeriesStore, StoreError, StoreResult, WriteMode};

const HEADER: &str = "date,value";

/// File-per-series CSV implementation of [`SeriesStore`].
pub struct CsvSeriesStore {
    data_dir: PathBuf,
}

impl CsvSeriesStore {
    /// Opens (and creates, if needed) a store rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    fn file_path(&self, series_id: &str) -> PathBuf {
        self.data_dir.join(format!("{series_id}.csv"))
    }

    fn parse_file(path: &Path) -> StoreResult<Vec<Observation>> {
        let malformed = |reason: String| StoreError::Malformed {
            path: path.display().to_string(),
            reason,
        };

        let content = fs::read_to_string(path)?;
        let mut lines = content.lines();
        match lines.next() {
            Some(HEADER) => {}
            Some(other) => return Err(malformed(format!("unexpected header: {other:?}"))),
            None => return Ok(vec![]),
        }

        let mut observations = Vec::new();
        for (idx, line) in lines.enumerate() {
            if line.is_empty() {
                continue;
            }
            let (date, value) = line
                .split_once(',')
                .ok_or_else(|| malformed(format!("line {}: missing value field", idx + 2)))?;
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|e| malformed(format!("line {}: bad date: {e}", idx + 2)))?;
            let value = value
                .parse::<f64>()
                .map_err(|e| malformed(format!("line {}: bad value: {e}", idx + 2)))?;
            observations.push(Observation::new(date, value));
        }

        observations.sort_by_key(|obs| obs.date);
        Ok(observations)
    }

    /// Writes the merged rows through a temp file so a failed write never
    /// leaves a half-written series behind.
    fn persist(&self, series_id: &str, rows: &BTreeMap<NaiveDate, f64>) -> StoreResult<()> {
        let mut body = String::with_capacity(rows.len() * 24 + HEADER.len() + 1);
        body.push_str(HEADER);
        body.push('\n');
        for (date, value) in rows {
            body.push_str(&format!("{},{value}\n", date.format("%Y-%m-%d")));
        }

        let target = self.file_path(series_id);
        let tmp = self.data_dir.join(format!("{series_id}.csv.tmp"));
        fs::write(&tmp, body)?;
        fs::rename(&tmp, &target)?;
        Ok(())
    }
}

impl SeriesStore for CsvSeriesStore {
    fn read(
        &self,
        series_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> StoreResult<Vec<Observation>> {
        let path = self.file_path(series_id);
        if !path.exists() {
            return Ok(vec![]);
        }

        let mut observations = Self::parse_file(&path)?;
        if let Some(start) = start {
            observations.retain(|obs| obs.date >= start);
        }
        if let Some(end) = end {
            observations.retain(|obs| obs.date <= end);
        }
        Ok(observations)
    }

    fn write(
        &self,
        series_id: &str,
        observations: &[Observation],
        mode: WriteMode,
    ) -> StoreResult<usize> {
        // Empty input is a no-op in both modes so a caller can never
        // accidentally erase a series by replacing it with nothing.
        if observations.is_empty() {
            return Ok(0);
        }

        for obs in observations {
            if !obs.value.is_finite() {
                return Err(StoreError::NonFiniteValue {
                    series_id: series_id.to_string(),
                    date: obs.date,
                });
            }
        }

        let mut rows = BTreeMap::new();
        if mode == WriteMode::Append && self.exists(series_id) {
            for obs in self.read(series_id, None, None)? {
                rows.insert(obs.date, obs.value);
            }
        }
        // Insertion order makes the new value win on a date collision.
        for obs in observations {
            rows.insert(obs.date, obs.value);
        }

        self.persist(series_id, &rows)?;
        Ok(rows.len())
    }

    fn exists(&self, series_id: &str) -> bool {
        self.file_path(series_id).exists()
    }

    fn date_range(&self, series_id: &str) -> StoreResult<(Option<NaiveDate>, Option<NaiveDate>)> {
        if !self.exists(series_id) {
            return Ok((None, None));
        }
        let observations = self.read(series_id, None, None)?;
        Ok((
            observations.first().map(|obs| obs.date),
            observations.last().map(|obs| obs.date),
        ))
    }
}
