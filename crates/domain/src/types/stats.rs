//! Marketplace statistics types

use serde::{Deserialize, Serialize};

/// Aggregate counters shown on the landing view
///
/// Returned by `GET /stats`. Missing counters default to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketplaceStats {
    /// Total number of published modules
    #[serde(default)]
    pub modules: u64,

    /// Number of distinct developers with at least one module
    #[serde(default)]
    pub developers: u64,

    /// All-time download count across modules
    #[serde(default)]
    pub downloads: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_counters_default_to_zero() {
        let stats: MarketplaceStats = serde_json::from_str(r#"{"modules":3}"#).unwrap();
        assert_eq!(stats.modules, 3);
        assert_eq!(stats.developers, 0);
        assert_eq!(stats.downloads, 0);
    }
}
