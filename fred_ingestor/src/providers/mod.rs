//! Provider abstraction for external statistics APIs.
//!
//! This module defines the [`DataSourceAdapter`] trait, a unified interface
//! for fetching ordered time-series observations from any upstream source
//! (e.g., FRED). Each concrete provider handles vendor-specific request
//! construction, response decoding, and row-level cleaning, and always
//! returns observations sorted ascending by date with missing-value markers
//! already dropped.
//!
//! The trait is designed for async usage and supports dynamic dispatch
//! (`dyn DataSourceAdapter`) for runtime selection of providers.

pub mod errors;
pub mod fred_rest;

use async_trait::async_trait;

use crate::models::{
    observation::Observation, request_params::ObservationsRequest,
    series_descriptor::SeriesDescriptor,
};
use crate::providers::errors::ProviderError;

#[async_trait]
pub trait DataSourceAdapter: Send + Sync {
    /// Fetch observations for one series over an optional inclusive window.
    ///
    /// An empty result is not an error; transport failures and non-2xx
    /// responses are.
    async fn fetch(&self, request: ObservationsRequest) -> Result<Vec<Observation>, ProviderError>;

    /// Fetch the informational descriptor for a series.
    async fn fetch_descriptor(&self, series_id: &str) -> Result<SeriesDescriptor, ProviderError>;
}
