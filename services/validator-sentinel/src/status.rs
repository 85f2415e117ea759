//! Classification of validator status API responses

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::io::HttpResponse;
use crate::SentinelError;

/// Message reported while the validator is `active_online`
pub const HEALTHY_MESSAGE: &str = "Validator is healthy and online";

/// Longest slice of API-supplied text echoed into a message
const MAX_ECHO_CHARS: usize = 256;

/// Outcome of classifying one poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthResult {
    pub healthy: bool,
    pub message: String,
}

impl HealthResult {
    fn healthy(message: impl Into<String>) -> Self {
        Self {
            healthy: true,
            message: message.into(),
        }
    }

    fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            healthy: false,
            message: message.into(),
        }
    }
}

/// On-chain state of the validator as reported by the status API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatorState {
    ActiveOnline,
    ActiveOffline,
    Slashed,
    ExitedSlashed,
    Exited,
    Pending,
    Unknown(String),
}

impl ValidatorState {
    pub fn parse(status: &str) -> Self {
        match status {
            "active_online" => ValidatorState::ActiveOnline,
            "active_offline" => ValidatorState::ActiveOffline,
            "slashed" => ValidatorState::Slashed,
            "exited_slashed" => ValidatorState::ExitedSlashed,
            "exited" => ValidatorState::Exited,
            "pending" => ValidatorState::Pending,
            other => ValidatorState::Unknown(other.to_string()),
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, ValidatorState::ActiveOnline)
    }

    /// Human-readable reason for a known state; `None` for unrecognised ones
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            ValidatorState::ActiveOnline => Some(HEALTHY_MESSAGE),
            ValidatorState::ActiveOffline => Some("Validator is active but offline"),
            ValidatorState::Slashed => Some("Validator has been slashed"),
            ValidatorState::ExitedSlashed => Some("Validator has exited after being slashed"),
            ValidatorState::Exited => Some("Validator has exited"),
            ValidatorState::Pending => Some("Validator is pending activation"),
            ValidatorState::Unknown(_) => None,
        }
    }

    pub fn to_health(&self) -> HealthResult {
        match (self, self.reason()) {
            (ValidatorState::ActiveOnline, _) => HealthResult::healthy(HEALTHY_MESSAGE),
            (_, Some(reason)) => HealthResult::unhealthy(format!("Validator issue: {}", reason)),
            (_, None) => HealthResult::unhealthy(format!(
                "Unknown validator status: {}",
                truncate(&self.to_string())
            )),
        }
    }
}

impl fmt::Display for ValidatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidatorState::ActiveOnline => write!(f, "active_online"),
            ValidatorState::ActiveOffline => write!(f, "active_offline"),
            ValidatorState::Slashed => write!(f, "slashed"),
            ValidatorState::ExitedSlashed => write!(f, "exited_slashed"),
            ValidatorState::Exited => write!(f, "exited"),
            ValidatorState::Pending => write!(f, "pending"),
            ValidatorState::Unknown(status) => write!(f, "{}", status),
        }
    }
}

/// Top-level API envelope. `data` stays untyped until the envelope status is checked.
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    status: Option<Value>,
    data: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ValidatorEntry {
    status: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ValidatorData {
    Many(Vec<Value>),
    One(ValidatorEntry),
}

/// Classify the outcome of a fetch against the status endpoint.
///
/// Checks run in order and the first failing layer wins: transport, HTTP
/// status, envelope, then the validator's own state.
pub fn classify(fetched: &crate::Result<HttpResponse>) -> HealthResult {
    let response = match fetched {
        Ok(response) => response,
        Err(SentinelError::Http(cause)) => {
            return HealthResult::unhealthy(format!("Network error: {}", cause))
        }
        Err(other) => return HealthResult::unhealthy(format!("Network error: {}", other)),
    };

    if response.status != 200 {
        return HealthResult::unhealthy(format!(
            "HTTP error {}: {}",
            response.status,
            truncate(response.body.trim())
        ));
    }

    match extract_state(&response.body) {
        Ok(state) => state.to_health(),
        Err(result) => result,
    }
}

fn extract_state(body: &str) -> std::result::Result<ValidatorState, HealthResult> {
    let envelope: ApiEnvelope = serde_json::from_str(body)
        .map_err(|e| malformed(format!("invalid JSON body ({})", e)))?;

    match envelope.status {
        Some(Value::String(status)) if status == "OK" => {}
        Some(Value::String(status)) => {
            return Err(HealthResult::unhealthy(format!(
                "API error: {}",
                truncate(&status)
            )))
        }
        Some(other) => {
            return Err(HealthResult::unhealthy(format!(
                "API error: {}",
                truncate(&other.to_string())
            )))
        }
        None => return Err(malformed("missing top-level status")),
    }

    let data = envelope.data.ok_or_else(|| malformed("missing data"))?;
    let data: ValidatorData = serde_json::from_value(data)
        .map_err(|_| malformed("data is not a validator object or list of validator objects"))?;

    // Only the first list entry matters; later entries may be any shape.
    let status = match data {
        ValidatorData::Many(entries) => {
            let first = entries
                .into_iter()
                .next()
                .ok_or_else(|| malformed("data list is empty"))?;
            serde_json::from_value::<ValidatorEntry>(first)
                .map_err(|_| malformed("first data entry is not a validator object"))?
                .status
        }
        ValidatorData::One(entry) => entry.status,
    };

    Ok(ValidatorState::parse(&status))
}

fn malformed(detail: impl fmt::Display) -> HealthResult {
    HealthResult::unhealthy(format!("Malformed response: {}", detail))
}

fn truncate(text: &str) -> String {
    match text.char_indices().nth(MAX_ECHO_CHARS) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}
