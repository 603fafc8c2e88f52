//! Module registration and webhook verification commands

use modbay_core::{validation, VerificationHandle};
use modbay_domain::{Module, Result, WebhookSetup};
use tracing::info;

use super::invalid;
use crate::context::AppContext;

/// Webhook parameters plus the poll watching for their verification
#[derive(Debug)]
pub struct WebhookRegistration {
    /// Values to show the user, exactly as the server sent them
    pub setup: WebhookSetup,
    /// Poll handle; the owning page must stop it on teardown
    pub handle: VerificationHandle,
}

/// Result of a module registration
#[derive(Debug)]
pub struct RegistrationOutcome {
    pub module: Module,
    /// Present when the server asks the user to configure the webhook
    pub webhook: Option<WebhookRegistration>,
}

/// Register a module from its GitHub repository
///
/// When the response carries webhook parameters, a verification poll starts
/// immediately (cancelling any previous one) and its handle is returned with
/// the setup values untouched.
///
/// # Errors
/// Returns invalid-input error for a malformed GitHub URL
pub async fn register_module(
    ctx: &AppContext,
    github_url: &str,
    documentation: &str,
) -> Result<RegistrationOutcome> {
    validation::validate_github_url(github_url).map_err(invalid)?;

    let response = ctx.modules.register(github_url.trim(), documentation).await?;
    info!(slug = %response.module.slug, "module registered");

    let webhook = match response.webhook_setup {
        Some(setup) => {
            let handle = ctx.verifier.start(&response.module.slug).await;
            Some(WebhookRegistration { setup, handle })
        }
        None => None,
    };

    Ok(RegistrationOutcome { module: response.module, webhook })
}

/// Explicitly stop the active verification poll (page teardown, reset)
pub async fn cancel_verification(ctx: &AppContext) {
    ctx.verifier.stop().await;
}

/// Whether a verification poll is currently running
#[must_use]
pub fn verification_active(ctx: &AppContext) -> bool {
    ctx.verifier.is_active()
}
