//! Notifier trait and best-effort delivery

use std::time::Duration;

use async_trait::async_trait;

/// Trait for sending operator notifications
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Get the notifier type name (e.g. "telegram")
    fn type_name(&self) -> &str;

    /// Send a notification
    async fn notify(&self, message: &str) -> crate::Result<()>;
}

/// Send `message` without letting delivery problems reach the caller.
///
/// The call is bounded by `timeout`. Failures are logged and dropped; nothing is
/// retried. Returns whether the message was accepted.
pub async fn deliver(notifier: &dyn Notifier, message: &str, timeout: Duration) -> bool {
    tracing::debug!("Dispatching to '{}': {}", notifier.type_name(), message);

    match tokio::time::timeout(timeout, notifier.notify(message)).await {
        Ok(Ok(())) => {
            tracing::info!("Notification sent via '{}': {}", notifier.type_name(), message);
            true
        }
        Ok(Err(e)) => {
            tracing::warn!("Notification via '{}' failed: {}", notifier.type_name(), e);
            false
        }
        Err(_) => {
            tracing::warn!(
                "Notification via '{}' timed out after {:?}",
                notifier.type_name(),
                timeout
            );
            false
        }
    }
}
