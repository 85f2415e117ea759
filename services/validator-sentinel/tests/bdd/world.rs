//! BDD test world for validator sentinel

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use cucumber::World;
use validator_sentinel::io::{Clock, HttpClient, HttpResponse};
use validator_sentinel::notifier::Notifier;
use validator_sentinel::state::MonitorState;
use validator_sentinel::status::HealthResult;
use validator_sentinel::{Config, SentinelError};

/// Status endpoint stand-in. Answers every GET with the current canned response.
#[derive(Debug, Default)]
pub struct FakeEndpoint {
    response: Mutex<Option<validator_sentinel::Result<HttpResponse>>>,
    panics: Mutex<bool>,
    pub queries: Mutex<Vec<(String, Vec<(String, String)>)>>,
    pub query_status: Mutex<Option<u16>>,
}

impl FakeEndpoint {
    pub fn respond_with(&self, response: validator_sentinel::Result<HttpResponse>) {
        *self.response.lock().unwrap() = Some(response);
    }

    pub fn reports_validator(&self, status: &str) {
        self.respond_with(Ok(validator_body(status)));
    }

    pub fn start_panicking(&self) {
        *self.panics.lock().unwrap() = true;
    }
}

pub fn validator_body(status: &str) -> HttpResponse {
    HttpResponse {
        status: 200,
        body: format!(r#"{{"status":"OK","data":[{{"status":"{}"}}]}}"#, status),
    }
}

#[async_trait::async_trait]
impl HttpClient for FakeEndpoint {
    async fn get(&self, _url: &str) -> validator_sentinel::Result<HttpResponse> {
        if *self.panics.lock().unwrap() {
            panic!("endpoint fake asked to misbehave");
        }
        match self.response.lock().unwrap().as_ref() {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(SentinelError::Http(cause))) => Err(SentinelError::Http(cause.clone())),
            Some(Err(other)) => Err(SentinelError::Http(other.to_string())),
            None => panic!("no response configured"),
        }
    }

    async fn get_query(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> validator_sentinel::Result<HttpResponse> {
        self.queries.lock().unwrap().push((
            url.to_string(),
            params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ));
        let status = self.query_status.lock().unwrap().unwrap_or(200);
        Ok(HttpResponse {
            status,
            body: r#"{"ok":true}"#.to_string(),
        })
    }
}

/// A notifier that records every message it is asked to send
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub messages: Mutex<Vec<String>>,
    pub fail: Mutex<bool>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    fn type_name(&self) -> &str {
        "recording"
    }

    async fn notify(&self, message: &str) -> validator_sentinel::Result<()> {
        self.messages.lock().unwrap().push(message.to_string());
        if *self.fail.lock().unwrap() {
            Err(SentinelError::Notifier("test failure".to_string()))
        } else {
            Ok(())
        }
    }
}

/// Clock that only moves when a step says so
#[derive(Debug)]
pub struct ManualClock {
    now_ms: AtomicU64,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self {
            now_ms: AtomicU64::new(1_700_000_000_000),
        }
    }
}

impl ManualClock {
    pub fn advance(&self, duration: Duration) {
        self.now_ms
            .fetch_add(duration.as_millis() as u64, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }

    async fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

#[derive(Debug, Default, World)]
pub struct SentinelWorld {
    // Classification testing
    pub response: Option<validator_sentinel::Result<HttpResponse>>,
    pub health: Vec<HealthResult>,

    // Alerting testing
    pub config: Config,
    pub endpoint: Arc<FakeEndpoint>,
    pub notifier: Arc<RecordingNotifier>,
    pub clock: Arc<ManualClock>,
    pub monitor_state: MonitorState,
    pub last_pause: Option<Duration>,

    // Notification testing
    pub delivered: Option<bool>,

    // Configuration testing
    pub validation: Option<validator_sentinel::Result<()>>,
}
