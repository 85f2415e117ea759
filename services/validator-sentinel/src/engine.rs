//! Engine: polls the status endpoint, classifies, alerts and sleeps

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::io::{Clock, HttpClient};
use crate::notifier::{deliver, Notifier};
use crate::state::MonitorState;
use crate::status::classify;

/// Message sent once before the first poll
pub const STARTUP_MESSAGE: &str = "Validator monitoring started";

/// The engine owns the injected capabilities and drives the monitoring loop
#[derive(Clone)]
pub struct Engine {
    http: Arc<dyn HttpClient>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    link: Arc<str>,
    normal_sleep: Duration,
    fail_sleep: Duration,
    reminder_interval: Duration,
    notify_timeout: Duration,
    cancel: CancellationToken,
}

impl Engine {
    pub fn new(
        config: &Config,
        http: Arc<dyn HttpClient>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            http,
            notifier,
            clock,
            link: Arc::from(config.link.as_str()),
            normal_sleep: config.normal_sleep(),
            fail_sleep: config.fail_sleep(),
            reminder_interval: config.reminder_interval(),
            notify_timeout: config.notify_timeout(),
            cancel,
        }
    }

    /// Send the unconditional startup notification
    pub async fn announce_start(&self) -> bool {
        deliver(self.notifier.as_ref(), STARTUP_MESSAGE, self.notify_timeout).await
    }

    /// Poll until the cancellation token is triggered.
    pub async fn run(&self) {
        let mut state = MonitorState::new();

        loop {
            let pause = self.step(&mut state).await;
            tracing::debug!("Sleeping {:?} before next poll", pause);

            tokio::select! {
                _ = self.clock.sleep(pause) => {}
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Monitoring loop cancelled");
                    break;
                }
            }
        }
    }

    /// Run one cycle on its own task so a panic cannot take the loop down.
    ///
    /// On success `state` is replaced with the cycle's result; after a panic it
    /// is left as it was and the failure backoff applies.
    pub async fn step(&self, state: &mut MonitorState) -> Duration {
        let engine = self.clone();
        let mut next = state.clone();

        let cycle = tokio::spawn(async move {
            let pause = engine.run_cycle(&mut next).await;
            (next, pause)
        });

        match cycle.await {
            Ok((next, pause)) => {
                *state = next;
                pause
            }
            Err(e) => {
                tracing::error!("Monitoring cycle aborted: {}", e);
                self.fail_sleep
            }
        }
    }

    /// Poll, classify, decide and notify once. Returns how long to sleep.
    pub async fn run_cycle(&self, state: &mut MonitorState) -> Duration {
        let now_ms = self.clock.now_ms();

        let fetched = self.http.get(&self.link).await;
        let result = classify(&fetched);

        if result.healthy {
            tracing::info!("Poll result: {}", result.message);
        } else {
            tracing::warn!("Poll result: {}", result.message);
        }

        if let Some(message) = state.decide(&result, now_ms, self.reminder_interval) {
            deliver(self.notifier.as_ref(), &message, self.notify_timeout).await;
        }

        if result.healthy {
            self.normal_sleep
        } else {
            self.fail_sleep
        }
    }
}
