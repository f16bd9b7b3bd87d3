//! Client library for pulling economic time series from the FRED REST API.
//!
//! The crate exposes a vendor-agnostic [`providers::DataSourceAdapter`] trait
//! together with the FRED implementation in [`providers::fred_rest`], and the
//! canonical observation models shared by downstream sync code.

pub mod models;
pub mod providers;
