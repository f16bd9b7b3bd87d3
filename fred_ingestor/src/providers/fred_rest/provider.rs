use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use crate::models::{
    observation::Observation, request_params::ObservationsRequest,
    series_descriptor::SeriesDescriptor,
};
use crate::providers::fred_rest::{
    params::{observation_params, series_params},
    response::{ObservationsResponse, SeriesResponse},
};
use crate::providers::{
    DataSourceAdapter,
    errors::{ProviderError, ProviderInitError},
};

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

const BASE_URL: &str = "https://api.stlouisfed.org/fred";

/// Requests are blocking from the caller's perspective; keep them bounded.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Sentinel FRED uses for a missing observation.
const MISSING_VALUE: &str = ".";

#[derive(Debug)]
pub struct FredProvider {
    client: Client,
    api_key: SecretString,
    rate_limiter: SharedRateLimiter,
    base_url: String,
}

impl FredProvider {
    /// Creates a new FRED provider with an explicit API key.
    pub fn new(api_key: SecretString) -> Result<Self, ProviderInitError> {
        Self::with_base_url(api_key, BASE_URL)
    }

    /// Creates a provider reading its key from the `FRED_API_KEY`
    /// environment variable.
    pub fn from_env() -> Result<Self, ProviderInitError> {
        let key = std::env::var("FRED_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ProviderInitError::MissingEnvVar("FRED_API_KEY".to_string()))?;
        Self::new(SecretString::new(key.into()))
    }

    /// Creates a provider against a non-default endpoint. Used by tests to
    /// point at a local mock server.
    pub fn with_base_url(
        api_key: SecretString,
        base_url: impl Into<String>,
    ) -> Result<Self, ProviderInitError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        // FRED's documented per-key limit.
        let quota = Quota::per_minute(nonzero!(120u32));

        Ok(Self {
            client,
            api_key,
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
            base_url: base_url.into(),
        })
    }

    /// Parses one wire row into an observation, or `None` when the row is a
    /// missing-value marker or fails date/numeric parsing.
    fn parse_row(date: &str, value: &str) -> Option<Observation> {
        if value == MISSING_VALUE || value.is_empty() {
            return None;
        }
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
        let value = value.parse::<f64>().ok().filter(|v| v.is_finite())?;
        Some(Observation::new(date, value))
    }
}

#[async_trait]
impl DataSourceAdapter for FredProvider {
    async fn fetch(&self, request: ObservationsRequest) -> Result<Vec<Observation>, ProviderError> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}/series/observations", self.base_url);
        let query = observation_params(&request, self.api_key.expose_secret());

        let response = self.client.get(&url).query(&query).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            return Err(ProviderError::Api(format!("FRED returned {status}: {body}")));
        }

        let decoded = response
            .json::<ObservationsResponse>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        let total = decoded.observations.len();
        let mut observations: Vec<Observation> = decoded
            .observations
            .iter()
            .filter_map(|obs| Self::parse_row(&obs.date, &obs.value))
            .collect();
        observations.sort_by_key(|obs| obs.date);

        let dropped = total - observations.len();
        if dropped > 0 {
            tracing::debug!(
                series_id = %request.series_id,
                dropped,
                "dropped missing or unparseable observation rows"
            );
        }

        Ok(observations)
    }

    async fn fetch_descriptor(&self, series_id: &str) -> Result<SeriesDescriptor, ProviderError> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}/series", self.base_url);
        let query = series_params(series_id, self.api_key.expose_secret());

        let response = self.client.get(&url).query(&query).send().await?;
        if !response.status().is_success() {
            return Err(ProviderError::Api(format!(
                "FRED returned {}",
                response.status()
            )));
        }

        let decoded = response
            .json::<SeriesResponse>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        let info = decoded
            .seriess
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Api(format!("series {series_id} not found")))?;

        Ok(SeriesDescriptor {
            id: info.id,
            title: info.title,
            frequency: info.frequency_short,
            units: info.units_short,
            seasonal_adjustment: info.seasonal_adjustment_short,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sentinel_rows_are_dropped() {
        assert!(FredProvider::parse_row("2025-01-02", ".").is_none());
        assert!(FredProvider::parse_row("2025-01-02", "").is_none());
    }

    #[test]
    fn unparseable_rows_are_dropped() {
        assert!(FredProvider::parse_row("not-a-date", "1.0").is_none());
        assert!(FredProvider::parse_row("2025-01-02", "n/a").is_none());
        assert!(FredProvider::parse_row("2025-01-02", "NaN").is_none());
        assert!(FredProvider::parse_row("2025-01-02", "inf").is_none());
    }

    #[test]
    fn valid_rows_parse() {
        let obs = FredProvider::parse_row("2025-01-02", "5891.04").unwrap();
        assert_eq!(obs.date, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
        assert_eq!(obs.value, 5891.04);
    }
}
