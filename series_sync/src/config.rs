//! Series catalog configuration: parsing and lookup.
//!
//! The catalog is a TOML file describing the dashboard's series set:
//!
//! ```toml
//! [[series]]
//! id = "sp500"
//! fred_series_id = "SP500"
//! name = "S&P 500"
//! color = "#1f77b4"
//! ```
//!
//! It is loaded once at startup and never mutated by the sync layer.
//! `fred_series_id` defaults to `id` when absent, so a local id that matches
//! the upstream id needs no mapping entry.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Configuration for one series.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesCfg {
    /// Local series identifier (storage key).
    pub id: String,
    /// Upstream FRED series id; defaults to `id` when absent.
    pub fred_series_id: Option<String>,
    /// Display name.
    pub name: String,
    /// Display color (hex).
    pub color: String,
}

/// Errors raised while loading the series catalog. All are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The catalog file could not be read.
    #[error("Failed to read series catalog: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file could not be parsed.
    #[error("Failed to parse series catalog: {0}")]
    Parse(#[from] toml::de::Error),

    /// The same series id appeared more than once.
    #[error("Duplicate series id in catalog: {0}")]
    DuplicateId(String),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    series: Vec<SeriesCfg>,
}

/// Ordered, read-only set of configured series.
#[derive(Debug, Clone)]
pub struct SeriesCatalog {
    entries: IndexMap<String, SeriesCfg>,
}

impl SeriesCatalog {
    /// Parses a catalog from TOML text.
    pub fn load_str(content: &str) -> Result<Self, ConfigError> {
        let raw: CatalogFile = toml::from_str(content)?;
        let mut entries = IndexMap::with_capacity(raw.series.len());
        for cfg in raw.series {
            if entries.insert(cfg.id.clone(), cfg.clone()).is_some() {
                return Err(ConfigError::DuplicateId(cfg.id));
            }
        }
        Ok(Self { entries })
    }

    /// Reads and parses a catalog file.
    pub fn load_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_str(&std::fs::read_to_string(path)?)
    }

    /// Looks up one series configuration.
    pub fn get(&self, series_id: &str) -> Option<&SeriesCfg> {
        self.entries.get(series_id)
    }

    /// Resolves the upstream identifier for a local series id. Unconfigured
    /// ids map to themselves.
    pub fn upstream_id<'a>(&'a self, series_id: &'a str) -> &'a str {
        self.entries
            .get(series_id)
            .and_then(|cfg| cfg.fred_series_id.as_deref())
            .unwrap_or(series_id)
    }

    /// All configured series ids, in catalog order.
    pub fn series_ids(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Iterates configurations in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &SeriesCfg> {
        self.entries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"
[[series]]
id = "sp500"
fred_series_id = "SP500"
name = "S&P 500"
color = "#1f77b4"

[[series]]
id = "DGS10"
name = "10-Year Treasury Yield"
color = "#ff7f0e"
"##;

    #[test]
    fn parses_and_preserves_order() {
        let catalog = SeriesCatalog::load_str(SAMPLE).unwrap();
        assert_eq!(catalog.series_ids(), vec!["sp500", "DGS10"]);
        assert_eq!(catalog.get("sp500").unwrap().name, "S&P 500");
    }

    #[test]
    fn upstream_id_defaults_to_local_id() {
        let catalog = SeriesCatalog::load_str(SAMPLE).unwrap();
        assert_eq!(catalog.upstream_id("sp500"), "SP500");
        assert_eq!(catalog.upstream_id("DGS10"), "DGS10");
        assert_eq!(catalog.upstream_id("unknown"), "unknown");
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let duplicated = format!("{SAMPLE}\n[[series]]\nid = \"sp500\"\nname = \"x\"\ncolor = \"#000\"\n");
        assert!(matches!(
            SeriesCatalog::load_str(&duplicated),
            Err(ConfigError::DuplicateId(id)) if id == "sp500"
        ));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let bad = "[[series]]\nid = \"a\"\nname = \"A\"\ncolor = \"#000\"\nfrequency = \"D\"\n";
        assert!(matches!(
            SeriesCatalog::load_str(bad),
            Err(ConfigError::Parse(_))
        ));
    }
}
