//! Local cache, synchronization, and chart-preparation layer for macro
//! economic time series.
//!
//! The crate reconciles file-backed series data against an upstream
//! statistics API (via `fred_ingestor`), keeps per-series bookkeeping
//! metadata consistent with what is actually stored, and exposes pure
//! transforms for range windowing and base-100 normalization.

#![deny(missing_docs)]

pub mod config;
pub mod service;
pub mod store;
pub mod transform;
