//! Marketplace statistics endpoint

use std::sync::Arc;

use modbay_domain::MarketplaceStats;

use super::client::ApiClient;
use super::errors::ApiError;

/// `GET /stats` surface
pub struct StatsApi {
    client: Arc<ApiClient>,
}

impl StatsApi {
    /// Create the surface over the given client
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Aggregate marketplace counters for the landing view
    ///
    /// # Errors
    /// Returns error on transport failure
    pub async fn overview(&self) -> Result<MarketplaceStats, ApiError> {
        self.client.get("/stats").await
    }
}
