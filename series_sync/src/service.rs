//! Data synchronization service.
//!
//! Orchestrates the source adapter, series store, and metadata store to
//! answer "get me this series" (cache-or-fetch) and "refresh this series"
//! (full or incremental), keeping metadata derived from actually stored
//! data after every successful write.

use chrono::{Duration, NaiveDate, Utc};
use fred_ingestor::models::{observation::Observation, request_params::ObservationsRequest};
use fred_ingestor::providers::{DataSourceAdapter, errors::ProviderError};
use indexmap::IndexMap;

use crate::config::SeriesCatalog;
use crate::store::{MetadataPatch, MetadataStore, SeriesStore, StoreError, WriteMode};

/// How a refresh interacts with already-stored history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMode {
    /// Fetch the entire available history and replace stored data.
    Full,
    /// Fetch only observations newer than the last stored date and append.
    Incremental,
}

/// Errors raised by synchronization operations.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The upstream fetch failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The local store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Outcome of refreshing a single series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The series was processed; `rows` new observations were fetched
    /// (0 is a valid "no new data" success, distinct from a failure).
    Updated {
        /// Observations fetched in this refresh.
        rows: usize,
    },
    /// Processing this series failed; siblings are unaffected.
    Failed {
        /// Rendered error.
        reason: String,
    },
}

/// Per-series outcomes of one batch refresh.
#[derive(Debug, Default)]
pub struct RefreshReport {
    /// Outcome per series id, in request order.
    pub outcomes: IndexMap<String, RefreshOutcome>,
}

impl RefreshReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome for one series.
    pub fn record(&mut self, series_id: impl Into<String>, outcome: RefreshOutcome) {
        self.outcomes.insert(series_id.into(), outcome);
    }

    /// Number of series processed.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of series refreshed without error.
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .values()
            .filter(|o| matches!(o, RefreshOutcome::Updated { .. }))
            .count()
    }

    /// Number of series that failed.
    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    /// Total observations fetched across successful series.
    pub fn rows_fetched(&self) -> usize {
        self.outcomes
            .values()
            .filter_map(|o| match o {
                RefreshOutcome::Updated { rows } => Some(*rows),
                RefreshOutcome::Failed { .. } => None,
            })
            .sum()
    }
}

/// Synchronization service over a series store, a metadata store, and a
/// source adapter.
pub struct DataService<S, M, A> {
    series_store: S,
    metadata_store: M,
    adapter: A,
    catalog: SeriesCatalog,
}

impl<S, M, A> DataService<S, M, A>
where
    S: SeriesStore,
    M: MetadataStore,
    A: DataSourceAdapter,
{
    /// Wires the service together. The catalog is read-only from here on.
    pub fn new(series_store: S, metadata_store: M, adapter: A, catalog: SeriesCatalog) -> Self {
        Self {
            series_store,
            metadata_store,
            adapter,
            catalog,
        }
    }

    /// All configured series ids, in catalog order.
    pub fn configured_series_ids(&self) -> Vec<String> {
        self.catalog.series_ids()
    }

    /// Returns observations for each requested series, reading from the
    /// local store when the series exists there and otherwise fetching from
    /// upstream and persisting the result.
    ///
    /// Existence, not range coverage, gates the cache decision: a series
    /// cached for one window is served from the store even when the request
    /// asks for dates outside the cached range. `refresh_data` is the path
    /// that extends stored coverage.
    pub async fn get_series(
        &self,
        series_ids: &[String],
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<IndexMap<String, Vec<Observation>>, SyncError> {
        let mut result = IndexMap::with_capacity(series_ids.len());

        for series_id in series_ids {
            let observations = if self.series_store.exists(series_id) {
                tracing::debug!(%series_id, "cache hit, reading from store");
                self.series_store.read(series_id, start, end)?
            } else {
                let upstream_id = self.catalog.upstream_id(series_id);
                tracing::debug!(%series_id, %upstream_id, "cache miss, fetching upstream");
                let fetched = self
                    .adapter
                    .fetch(ObservationsRequest::windowed(upstream_id, start, end))
                    .await?;

                if !fetched.is_empty() {
                    self.series_store
                        .write(series_id, &fetched, WriteMode::Replace)?;
                    self.record_metadata(series_id, &fetched)?;
                    tracing::info!(%series_id, rows = fetched.len(), "fetched and cached");
                }
                fetched
            };
            result.insert(series_id.clone(), observations);
        }

        Ok(result)
    }

    /// Refreshes each series from upstream. Series are processed
    /// independently and sequentially; one failure never aborts the batch.
    pub async fn refresh_data(&self, series_ids: &[String], mode: RefreshMode) -> RefreshReport {
        let mut report = RefreshReport::new();

        for series_id in series_ids {
            match self.refresh_one(series_id, mode).await {
                Ok(rows) => {
                    tracing::info!(%series_id, rows, ?mode, "series refreshed");
                    report.record(series_id, RefreshOutcome::Updated { rows });
                }
                Err(e) => {
                    tracing::warn!(%series_id, error = %e, "series refresh failed");
                    report.record(
                        series_id,
                        RefreshOutcome::Failed {
                            reason: e.to_string(),
                        },
                    );
                }
            }
        }

        report
    }

    async fn refresh_one(&self, series_id: &str, mode: RefreshMode) -> Result<usize, SyncError> {
        let upstream_id = self.catalog.upstream_id(series_id);

        match mode {
            RefreshMode::Full => {
                let fetched = self
                    .adapter
                    .fetch(ObservationsRequest::full_history(upstream_id))
                    .await?;
                if fetched.is_empty() {
                    return Ok(0);
                }

                let rows = self
                    .series_store
                    .write(series_id, &fetched, WriteMode::Replace)?;
                self.record_metadata(series_id, &fetched)?;
                Ok(rows)
            }
            RefreshMode::Incremental => {
                // Resume one day after the last stored date; upstream is
                // assumed never to revise an already-observed date.
                let start = self
                    .metadata_store
                    .get(series_id)?
                    .and_then(|meta| meta.data_end_date)
                    .map(|end| end + Duration::days(1));

                let fetched = self
                    .adapter
                    .fetch(ObservationsRequest::windowed(upstream_id, start, None))
                    .await?;
                if fetched.is_empty() {
                    return Ok(0);
                }

                self.series_store
                    .write(series_id, &fetched, WriteMode::Append)?;
                // Metadata must reflect cumulative storage, not the delta.
                let merged = self.series_store.read(series_id, None, None)?;
                self.record_metadata(series_id, &merged)?;
                Ok(fetched.len())
            }
        }
    }

    /// Derives metadata from a just-written observation set. Only called
    /// after a successful store write, with a non-empty set.
    fn record_metadata(&self, series_id: &str, observations: &[Observation]) -> Result<(), SyncError> {
        let dates = observations.iter().map(|obs| obs.date);
        let (Some(start), Some(end)) = (dates.clone().min(), dates.max()) else {
            return Ok(());
        };

        self.metadata_store.update(
            series_id,
            MetadataPatch::derived(
                start,
                end,
                observations.len() as u64,
                Utc::now().date_naive(),
            ),
        )?;
        Ok(())
    }
}
