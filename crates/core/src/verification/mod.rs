//! Webhook verification poller
//!
//! After a module is registered the user configures the GitHub webhook by
//! hand, so verification completes out-of-band. This service polls the
//! status flag on a fixed interval until it flips, the attempt budget runs
//! out, or the poll is cancelled.
//!
//! State machine:
//! - Idle -> Polling (attempt 0) on `start`
//! - Polling -> Verified when a check reports true (terminal)
//! - Polling -> TimedOut when the attempt budget is exhausted (terminal,
//!   informational: the webhook can still be configured later)
//! - Polling -> Cancelled on `stop` or when a new poll starts
//!
//! Transient check failures are swallowed; they consume an attempt but are
//! never terminal on their own. At most one poll is active at a time.

pub mod ports;

use std::sync::Arc;

use modbay_domain::VerificationConfig;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use self::ports::WebhookStatusSource;

/// Observable state of a verification poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationStatus {
    /// A check is scheduled or in flight; `attempt` counts issued checks
    Polling { attempt: u32 },
    /// The server confirmed the webhook; no further checks are issued
    Verified,
    /// Attempt budget exhausted without confirmation
    TimedOut,
    /// The poll was stopped before reaching a terminal state
    Cancelled,
}

impl VerificationStatus {
    /// Whether the poll has finished (no more checks will run)
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Polling { .. })
    }
}

/// Handle to a running verification poll
///
/// The page or router owning the flow must call [`VerificationHandle::stop`]
/// on teardown; an un-stopped poll keeps its timer alive until it reaches a
/// terminal state.
#[derive(Debug, Clone)]
pub struct VerificationHandle {
    slug: String,
    status: watch::Receiver<VerificationStatus>,
    cancel: CancellationToken,
}

impl VerificationHandle {
    /// Slug of the module being verified
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Latest observed status
    #[must_use]
    pub fn status(&self) -> VerificationStatus {
        self.status.borrow().clone()
    }

    /// Wait until the poll reaches a terminal state and return it
    pub async fn wait(&mut self) -> VerificationStatus {
        loop {
            let current = self.status.borrow_and_update().clone();
            if current.is_terminal() {
                return current;
            }
            if self.status.changed().await.is_err() {
                // Poller task gone; report whatever it last published.
                return self.status.borrow().clone();
            }
        }
    }

    /// Cancel the poll
    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

struct ActivePoll {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// Runs at most one webhook verification poll at a time
pub struct WebhookVerifier {
    source: Arc<dyn WebhookStatusSource>,
    config: VerificationConfig,
    active: parking_lot::Mutex<Option<ActivePoll>>,
}

impl WebhookVerifier {
    /// Create a verifier that checks through the given source
    #[must_use]
    pub fn new(source: Arc<dyn WebhookStatusSource>, config: VerificationConfig) -> Self {
        Self { source, config, active: parking_lot::Mutex::new(None) }
    }

    /// Start polling for the given slug, cancelling any poll in progress
    pub async fn start(&self, slug: &str) -> VerificationHandle {
        self.stop().await;

        let (tx, rx) = watch::channel(VerificationStatus::Polling { attempt: 0 });
        let cancel = CancellationToken::new();
        let task = tokio::spawn(poll_loop(
            Arc::clone(&self.source),
            slug.to_string(),
            self.config.clone(),
            tx,
            cancel.clone(),
        ));

        *self.active.lock() = Some(ActivePoll { cancel: cancel.clone(), task });
        info!(slug, "webhook verification poll started");

        VerificationHandle { slug: slug.to_string(), status: rx, cancel }
    }

    /// Cancel the active poll, if any, and wait for its task to finish
    pub async fn stop(&self) {
        let previous = self.active.lock().take();
        if let Some(poll) = previous {
            poll.cancel.cancel();
            let _ = poll.task.await;
        }
    }

    /// Whether a poll is currently running
    pub fn is_active(&self) -> bool {
        self.active.lock().as_ref().is_some_and(|poll| !poll.task.is_finished())
    }
}

impl Drop for WebhookVerifier {
    fn drop(&mut self) {
        if let Some(poll) = self.active.lock().take() {
            poll.cancel.cancel();
            poll.task.abort();
        }
    }
}

async fn poll_loop(
    source: Arc<dyn WebhookStatusSource>,
    slug: String,
    config: VerificationConfig,
    tx: watch::Sender<VerificationStatus>,
    cancel: CancellationToken,
) {
    let period = Duration::from_millis(config.interval_ms);
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut attempt: u32 = 0;
    loop {
        tokio::select! {
            () = cancel.cancelled() => {
                debug!(%slug, attempt, "webhook verification poll cancelled");
                let _ = tx.send(VerificationStatus::Cancelled);
                return;
            }
            _ = ticker.tick() => {}
        }

        attempt += 1;
        let _ = tx.send(VerificationStatus::Polling { attempt });

        match source.verified(&slug).await {
            Ok(true) => {
                info!(%slug, attempt, "webhook verified");
                let _ = tx.send(VerificationStatus::Verified);
                return;
            }
            Ok(false) => {}
            Err(err) => {
                // Transient; the next tick retries.
                debug!(%slug, attempt, error = %err, "webhook status check failed");
            }
        }

        if attempt >= config.max_attempts {
            info!(%slug, attempt, "webhook verification timed out");
            let _ = tx.send(VerificationStatus::TimedOut);
            return;
        }
    }
}
