//! Periodic cleanup of the revocation ledger.
//!
//! An entry whose token has passed its own expiry can never match a usable
//! token again, so it is deleted. Runs on a fixed interval using
//! `tokio::time::interval`.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::state::Sessions;

/// Run the purge loop every `every` until `cancel` is triggered.
///
/// Failures are logged and retried on the next tick.
pub async fn run(sessions: Arc<Sessions>, every: Duration, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = every.as_secs(),
        "Revocation purge job started"
    );

    let mut interval = tokio::time::interval(every);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Revocation purge job stopping");
                break;
            }
            _ = interval.tick() => {
                match sessions.purge_expired_revocations().await {
                    Ok(deleted) if deleted > 0 => {
                        tracing::info!(deleted, "Revocation purge: removed expired entries");
                    }
                    Ok(_) => {
                        tracing::debug!("Revocation purge: nothing to remove");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Revocation purge: cleanup failed");
                    }
                }
            }
        }
    }
}
