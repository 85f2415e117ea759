//! Validator sentinel - validator health monitoring and notification service
//!
//! Polls a validator status API, classifies the reported state, and sends
//! de-duplicated Telegram alerts on changes and periodic reminders while the
//! validator stays unhealthy.

pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod notifier;
pub mod state;
pub mod status;
pub mod telegram;

pub use config::{load_config, Config, Overrides};
pub use error::{Result, SentinelError};

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::engine::Engine;
use crate::io::{redact_query, ReqwestHttpClient, SystemClock};
use crate::notifier::Notifier;
use crate::telegram::TelegramNotifier;

/// Run the sentinel with the given configuration until Ctrl-C
pub async fn run(config: Config) -> Result<()> {
    config.validate()?;

    let fetch_http: Arc<dyn io::HttpClient> =
        Arc::new(ReqwestHttpClient::with_timeout(config.fetch_timeout())?);
    let notify_http: Arc<dyn io::HttpClient> =
        Arc::new(ReqwestHttpClient::with_timeout(config.notify_timeout())?);
    let cancel = CancellationToken::new();

    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(
        &config.telegram_api_url,
        &config.bot_token,
        &config.chat_id,
        notify_http,
    ));

    let engine = Engine::new(
        &config,
        fetch_http,
        notifier,
        Arc::new(SystemClock::new()),
        cancel.clone(),
    );

    // Setup shutdown handler
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Shutdown signal received"),
            Err(e) => {
                tracing::error!("Failed to listen for ctrl-c: {}", e);
                return;
            }
        }
        cancel_for_signal.cancel();
    });

    tracing::info!("Monitoring {}", redact_query(&config.link));
    engine.announce_start().await;

    // Run the engine (blocks until cancelled)
    engine.run().await;

    tracing::info!("Validator sentinel stopped");
    Ok(())
}
