//! Marketplace statistics command

use modbay_domain::{MarketplaceStats, Result};

use crate::context::AppContext;

/// Aggregate counters for the landing view
///
/// # Errors
/// Returns error on transport failure
pub async fn marketplace_stats(ctx: &AppContext) -> Result<MarketplaceStats> {
    ctx.stats.overview().await.map_err(Into::into)
}
