//! FRED (Federal Reserve Economic Data) REST implementation of
//! [`DataSourceAdapter`](crate::providers::DataSourceAdapter).
//!
//! FRED is maintained by the Federal Reserve Bank of St. Louis and serves
//! hundreds of thousands of economic time series. A free API key is required
//! (<https://fred.stlouisfed.org/docs/api/api_key.html>); the documented rate
//! limit is 120 requests per minute.

pub mod params;
pub mod provider;
pub mod response;

pub use provider::FredProvider;
