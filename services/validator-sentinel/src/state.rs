//! Alerting state carried between polls

use std::time::Duration;

use crate::status::HealthResult;

/// Prefix for repeated alerts about an unchanged unhealthy state
pub const REMINDER_PREFIX: &str = "Reminder: ";

/// Number of consecutive failed polls between escalation log lines
const FAILURE_LOG_EVERY: u32 = 5;

/// What the monitoring loop remembers between cycles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorState {
    pub previous_status_message: Option<String>,
    pub last_reminder_ms: u64,
    pub consecutive_failures: u32,
}

impl MonitorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a poll result and return the notification it warrants, if any.
    ///
    /// A changed message is always announced. An unchanged unhealthy message is
    /// re-announced with a reminder prefix once `reminder_interval` has passed
    /// since the last announcement.
    pub fn decide(
        &mut self,
        result: &HealthResult,
        now_ms: u64,
        reminder_interval: Duration,
    ) -> Option<String> {
        self.track_failures(result);

        if self.previous_status_message.as_deref() != Some(result.message.as_str()) {
            self.previous_status_message = Some(result.message.clone());
            self.last_reminder_ms = now_ms;
            return Some(result.message.clone());
        }

        let elapsed_ms = now_ms.saturating_sub(self.last_reminder_ms);
        if !result.healthy && u128::from(elapsed_ms) >= reminder_interval.as_millis() {
            self.last_reminder_ms = now_ms;
            return Some(format!("{}{}", REMINDER_PREFIX, result.message));
        }

        None
    }

    fn track_failures(&mut self, result: &HealthResult) {
        if result.healthy {
            if self.consecutive_failures > 0 {
                tracing::info!(
                    "Validator recovered after {} failed polls",
                    self.consecutive_failures
                );
            }
            self.consecutive_failures = 0;
            return;
        }

        self.consecutive_failures += 1;
        if self.consecutive_failures % FAILURE_LOG_EVERY == 0 {
            tracing::warn!(
                "Validator has been unhealthy for {} consecutive polls",
                self.consecutive_failures
            );
        }
    }
}
