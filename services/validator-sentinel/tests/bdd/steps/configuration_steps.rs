//! BDD step definitions for configuration feature

use std::time::Duration;

use cucumber::{given, then, when};

use validator_sentinel::{Config, Overrides};

use crate::world::SentinelWorld;

#[given("an empty configuration")]
fn empty_configuration(world: &mut SentinelWorld) {
    world.config = Config::default();
}

#[given(expr = "a configuration with bot token {string}, chat {string} and link {string}")]
fn configuration_with(world: &mut SentinelWorld, token: String, chat: String, link: String) {
    world.config = Config::default().with_overrides(Overrides {
        bot_token: Some(token),
        chat_id: Some(chat),
        link: Some(link),
        ..Overrides::default()
    });
}

#[given(expr = "the fail sleep is overridden to {int} seconds")]
fn fail_sleep_overridden(world: &mut SentinelWorld, seconds: u64) {
    world.config = world.config.clone().with_overrides(Overrides {
        fail_sleep_seconds: Some(seconds),
        ..Overrides::default()
    });
}

#[when("the configuration is validated")]
fn configuration_validated(world: &mut SentinelWorld) {
    world.validation = Some(world.config.validate());
}

#[then("validation should succeed")]
fn validation_succeeds(world: &mut SentinelWorld) {
    match world.validation.as_ref().expect("not validated") {
        Ok(()) => {}
        Err(e) => panic!("Expected valid configuration, got: {}", e),
    }
}

#[then(expr = "validation should fail mentioning {string}")]
fn validation_fails_mentioning(world: &mut SentinelWorld, expected: String) {
    match world.validation.as_ref().expect("not validated") {
        Ok(()) => panic!("Expected validation to fail"),
        Err(e) => assert!(
            e.to_string().contains(&expected),
            "Expected '{}' in '{}'",
            expected,
            e
        ),
    }
}

#[then(expr = "the {word} interval should be {int} seconds")]
fn interval_should_be(world: &mut SentinelWorld, which: String, seconds: u64) {
    let actual = match which.as_str() {
        "normal" => world.config.normal_sleep(),
        "fail" => world.config.fail_sleep(),
        "reminder" => world.config.reminder_interval(),
        "fetch" => world.config.fetch_timeout(),
        "notify" => world.config.notify_timeout(),
        other => panic!("Unknown interval: {}", other),
    };
    assert_eq!(actual, Duration::from_secs(seconds));
}
