//! Account commands

use modbay_core::validation;
use modbay_domain::{Result, User};
use tracing::{debug, info};

use super::invalid;
use crate::context::AppContext;

/// Log in with email and password, establishing the session on success
///
/// # Errors
/// Returns invalid-input error for blank fields, auth error for bad
/// credentials
pub async fn login(ctx: &AppContext, email: &str, password: &str) -> Result<User> {
    validation::require("email", email).map_err(invalid)?;
    validation::require("password", password).map_err(invalid)?;

    let success = ctx.auth.login(email.trim(), password).await?;
    ctx.session.establish(success.access_token, success.user.clone()).await?;
    info!(username = %success.user.username, "logged in");
    Ok(success.user)
}

/// Create an account and establish the session on success
///
/// # Errors
/// Returns invalid-input error when validation fails locally
pub async fn register(
    ctx: &AppContext,
    username: &str,
    email: &str,
    password: &str,
    confirmation: &str,
) -> Result<User> {
    validation::validate_username(username).map_err(invalid)?;
    validation::require("email", email).map_err(invalid)?;
    validation::validate_new_password(password, confirmation).map_err(invalid)?;

    let success = ctx.auth.register(username.trim(), email.trim(), password).await?;
    ctx.session.establish(success.access_token, success.user.clone()).await?;
    info!(username = %success.user.username, "account created");
    Ok(success.user)
}

/// Log out: best-effort server call, then local clear
///
/// The server call invalidates the refresh cookie; its failure never blocks
/// the local logout.
///
/// # Errors
/// Returns error only if the persisted session cannot be removed
pub async fn logout(ctx: &AppContext) -> Result<()> {
    if let Err(err) = ctx.auth.logout().await {
        debug!(error = %err, "server-side logout failed");
    }
    ctx.session.clear().await
}

/// Restore a persisted session on startup and validate it against the server
///
/// An invalid or expired session (after any refresh) is cleared and reported
/// as `None` rather than an error.
///
/// # Errors
/// Returns error if the session store cannot be read or written
pub async fn restore_session(ctx: &AppContext) -> Result<Option<User>> {
    if !ctx.session.initialize().await? {
        return Ok(None);
    }

    match ctx.auth.me().await {
        Ok(user) => {
            ctx.session.replace_user(user.clone()).await?;
            Ok(Some(user))
        }
        Err(err) => {
            debug!(error = %err, "persisted session is no longer valid");
            ctx.session.clear().await?;
            Ok(None)
        }
    }
}

/// Change the username of the logged-in user
///
/// # Errors
/// Returns invalid-input error for a blank or oversized username
pub async fn update_profile(ctx: &AppContext, username: &str) -> Result<User> {
    validation::validate_username(username).map_err(invalid)?;

    let user = ctx.auth.update_profile(username.trim()).await?;
    ctx.session.replace_user(user.clone()).await?;
    Ok(user)
}

/// Change the password, validating the confirmation locally first
///
/// # Errors
/// Returns invalid-input error when the new password fails local rules
pub async fn change_password(
    ctx: &AppContext,
    current_password: &str,
    new_password: &str,
    confirmation: &str,
) -> Result<()> {
    validation::require("current password", current_password).map_err(invalid)?;
    validation::validate_new_password(new_password, confirmation).map_err(invalid)?;

    ctx.auth.change_password(current_password, new_password).await?;
    Ok(())
}

/// Delete the account, then clear the local session
///
/// # Errors
/// Returns error if the server refuses the deletion
pub async fn delete_account(ctx: &AppContext) -> Result<()> {
    ctx.auth.delete_account().await?;
    info!("account deleted");
    ctx.session.clear().await
}
