use serde::{Deserialize, Serialize};

/// Informational metadata about an upstream series.
///
/// Purely descriptive; nothing in the sync pipeline keys off these fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesDescriptor {
    /// Upstream series identifier.
    pub id: String,
    /// Human-readable title (e.g., "S&P 500").
    pub title: String,
    /// Short frequency code (e.g., "D", "M", "Q").
    pub frequency: String,
    /// Short units label (e.g., "Index", "%").
    pub units: String,
    /// Short seasonal adjustment code (e.g., "NSA", "SA").
    pub seasonal_adjustment: String,
}
