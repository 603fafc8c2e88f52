//! Browsing and module management commands

use modbay_core::ModuleQuery;
use modbay_domain::{Module, ModulePage, Result};

use crate::context::AppContext;

/// A module plus what the viewer may do with it
#[derive(Debug, Clone)]
pub struct ModuleDetail {
    pub module: Module,
    /// Whether the logged-in user owns the module (enables sync/delete)
    pub viewer_is_author: bool,
}

/// Browse the marketplace with paging, filtering, and search
///
/// # Errors
/// Returns error on transport failure
pub async fn browse(ctx: &AppContext, query: ModuleQuery) -> Result<ModulePage> {
    ctx.modules.list(&query).await.map_err(Into::into)
}

/// Popular modules for the landing view
///
/// # Errors
/// Returns error on transport failure
pub async fn featured(ctx: &AppContext) -> Result<Vec<Module>> {
    let page = ctx.modules.list(&ModuleQuery::featured()).await?;
    Ok(page.modules)
}

/// Full module detail plus viewer capabilities
///
/// # Errors
/// Returns not-found error for an unknown slug
pub async fn module_detail(ctx: &AppContext, slug: &str) -> Result<ModuleDetail> {
    let module = ctx.modules.get(slug).await?;
    let viewer_is_author = match ctx.session.user().await {
        Some(user) => module.is_owned_by(&user.id),
        None => false,
    };
    Ok(ModuleDetail { module, viewer_is_author })
}

/// Modules owned by the logged-in user
///
/// # Errors
/// Returns auth error when not logged in
pub async fn my_modules(ctx: &AppContext) -> Result<Vec<Module>> {
    ctx.modules.mine().await.map_err(Into::into)
}

/// Pull the latest module state from its GitHub repository
///
/// # Errors
/// Returns error if the sync fails server-side
pub async fn sync_module(ctx: &AppContext, slug: &str) -> Result<String> {
    ctx.modules.sync(slug).await.map_err(Into::into)
}

/// Delete an owned module
///
/// # Errors
/// Returns error if the caller does not own the module
pub async fn delete_module(ctx: &AppContext, slug: &str) -> Result<()> {
    ctx.modules.delete(slug).await.map_err(Into::into)
}
