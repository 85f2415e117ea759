//! BDD step definitions for notification feature

use std::sync::Arc;
use std::time::Duration;

use cucumber::{given, then, when};

use validator_sentinel::io::HttpClient;
use validator_sentinel::notifier::{deliver, Notifier};
use validator_sentinel::telegram::TelegramNotifier;

use crate::world::SentinelWorld;

#[given(expr = "the Telegram API answers with status {int}")]
fn telegram_answers(world: &mut SentinelWorld, status: u16) {
    *world.endpoint.query_status.lock().unwrap() = Some(status);
}

#[when(expr = "bot {string} sends {string} to chat {string}")]
async fn bot_sends(world: &mut SentinelWorld, token: String, message: String, chat_id: String) {
    let notifier = TelegramNotifier::new(
        &world.config.telegram_api_url,
        &token,
        &chat_id,
        Arc::clone(&world.endpoint) as Arc<dyn HttpClient>,
    );
    let notifier: &dyn Notifier = &notifier;
    world.delivered = Some(deliver(notifier, &message, Duration::from_secs(10)).await);
}

#[then(expr = "the Telegram API should have been called at {string}")]
fn telegram_called_at(world: &mut SentinelWorld, expected: String) {
    let queries = world.endpoint.queries.lock().unwrap();
    let (url, _) = queries.last().expect("Telegram API was not called");
    assert_eq!(url, &expected);
}

#[then(expr = "the request should carry {string} = {string}")]
fn request_carries(world: &mut SentinelWorld, key: String, value: String) {
    let queries = world.endpoint.queries.lock().unwrap();
    let (_, params) = queries.last().expect("Telegram API was not called");
    assert!(
        params.contains(&(key.clone(), value.clone())),
        "Expected {}={} in {:?}",
        key,
        value,
        params
    );
}

#[then("the delivery should succeed")]
fn delivery_succeeds(world: &mut SentinelWorld) {
    assert_eq!(world.delivered, Some(true));
}

#[then("the delivery should fail quietly")]
fn delivery_fails(world: &mut SentinelWorld) {
    assert_eq!(world.delivered, Some(false));
}
