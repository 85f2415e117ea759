//! Configuration types for the validator sentinel

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub chat_id: String,
    #[serde(default)]
    pub link: String,
    #[serde(default = "default_normal_sleep")]
    pub normal_sleep_seconds: u64,
    #[serde(default = "default_fail_sleep")]
    pub fail_sleep_seconds: u64,
    #[serde(default = "default_hourly_reminder")]
    pub hourly_reminder_seconds: u64,
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_seconds: u64,
    #[serde(default = "default_notify_timeout")]
    pub notify_timeout_seconds: u64,
    #[serde(default = "default_telegram_api_url")]
    pub telegram_api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            link: String::new(),
            normal_sleep_seconds: default_normal_sleep(),
            fail_sleep_seconds: default_fail_sleep(),
            hourly_reminder_seconds: default_hourly_reminder(),
            fetch_timeout_seconds: default_fetch_timeout(),
            notify_timeout_seconds: default_notify_timeout(),
            telegram_api_url: default_telegram_api_url(),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = if self.bot_token.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("Config")
            .field("bot_token", &token)
            .field("chat_id", &self.chat_id)
            .field("link", &crate::io::redact_query(&self.link))
            .field("normal_sleep_seconds", &self.normal_sleep_seconds)
            .field("fail_sleep_seconds", &self.fail_sleep_seconds)
            .field("hourly_reminder_seconds", &self.hourly_reminder_seconds)
            .field("fetch_timeout_seconds", &self.fetch_timeout_seconds)
            .field("notify_timeout_seconds", &self.notify_timeout_seconds)
            .field("telegram_api_url", &self.telegram_api_url)
            .finish()
    }
}

/// Values taken from the environment or command line; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    pub link: Option<String>,
    pub normal_sleep_seconds: Option<u64>,
    pub fail_sleep_seconds: Option<u64>,
    pub hourly_reminder_seconds: Option<u64>,
    pub fetch_timeout_seconds: Option<u64>,
    pub notify_timeout_seconds: Option<u64>,
    pub telegram_api_url: Option<String>,
}

impl Config {
    /// Apply overrides on top of this configuration
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(v) = overrides.bot_token {
            self.bot_token = v;
        }
        if let Some(v) = overrides.chat_id {
            self.chat_id = v;
        }
        if let Some(v) = overrides.link {
            self.link = v;
        }
        if let Some(v) = overrides.normal_sleep_seconds {
            self.normal_sleep_seconds = v;
        }
        if let Some(v) = overrides.fail_sleep_seconds {
            self.fail_sleep_seconds = v;
        }
        if let Some(v) = overrides.hourly_reminder_seconds {
            self.hourly_reminder_seconds = v;
        }
        if let Some(v) = overrides.fetch_timeout_seconds {
            self.fetch_timeout_seconds = v;
        }
        if let Some(v) = overrides.notify_timeout_seconds {
            self.notify_timeout_seconds = v;
        }
        if let Some(v) = overrides.telegram_api_url {
            self.telegram_api_url = v;
        }
        self
    }

    /// Check that every required setting is present and every interval is usable
    pub fn validate(&self) -> crate::Result<()> {
        let mut problems = Vec::new();

        let missing: Vec<&str> = [
            ("BOT_TOKEN", &self.bot_token),
            ("CHAT_ID", &self.chat_id),
            ("LINK", &self.link),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();
        if !missing.is_empty() {
            problems.push(format!("missing required setting(s): {}", missing.join(", ")));
        }

        for (name, value) in [
            ("NORMAL_SLEEP", self.normal_sleep_seconds),
            ("FAIL_SLEEP", self.fail_sleep_seconds),
            ("FETCH_TIMEOUT", self.fetch_timeout_seconds),
            ("NOTIFY_TIMEOUT", self.notify_timeout_seconds),
        ] {
            if value == 0 {
                problems.push(format!("{} must be greater than zero", name));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(crate::SentinelError::Config(problems.join("; ")))
        }
    }

    pub fn normal_sleep(&self) -> Duration {
        Duration::from_secs(self.normal_sleep_seconds)
    }

    pub fn fail_sleep(&self) -> Duration {
        Duration::from_secs(self.fail_sleep_seconds)
    }

    pub fn reminder_interval(&self) -> Duration {
        Duration::from_secs(self.hourly_reminder_seconds)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }

    pub fn notify_timeout(&self) -> Duration {
        Duration::from_secs(self.notify_timeout_seconds)
    }
}

fn default_normal_sleep() -> u64 {
    600
}

fn default_fail_sleep() -> u64 {
    3600
}

fn default_hourly_reminder() -> u64 {
    3600
}

fn default_fetch_timeout() -> u64 {
    30
}

fn default_notify_timeout() -> u64 {
    10
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::SentinelError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
