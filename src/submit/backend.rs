//! Delivery to the downstream execution backend.

use std::sync::Mutex;

use tracing::{info, warn};

use super::ExecutionPayload;
use crate::config::BACKEND_TIMEOUT_SECS;

/// What happened to a delivery attempt.
///
/// `Rejected` carries the backend's own verdict so the API can
/// propagate the status upstream; `Unreachable` is a transport-level
/// failure with no backend verdict at all.
#[derive(Debug, Clone)]
pub enum DeliveryOutcome {
    Delivered(serde_json::Value),
    Rejected { status: u16, body: String },
    Unreachable { cause: String },
}

/// Execution backend abstraction (allows mocking for tests).
pub trait ExecutionBackend {
    fn deliver(&self, payload: &ExecutionPayload) -> DeliveryOutcome;
}

/// HTTP delivery with a hard timeout.
pub struct HttpExecutionBackend {
    ingest_url: String,
    client: reqwest::blocking::Client,
}

impl HttpExecutionBackend {
    pub fn new(ingest_url: &str) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(BACKEND_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            ingest_url: ingest_url.to_string(),
            client,
        }
    }
}

impl ExecutionBackend for HttpExecutionBackend {
    fn deliver(&self, payload: &ExecutionPayload) -> DeliveryOutcome {
        let response = match self.client.post(&self.ingest_url).json(payload).send() {
            Ok(r) => r,
            Err(e) => {
                let cause = if e.is_timeout() {
                    format!("request timed out after {BACKEND_TIMEOUT_SECS}s")
                } else {
                    e.to_string()
                };
                warn!(url = %self.ingest_url, cause = %cause, "execution backend unreachable");
                return DeliveryOutcome::Unreachable { cause };
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(status = status.as_u16(), "execution backend rejected payload");
            return DeliveryOutcome::Rejected {
                status: status.as_u16(),
                body,
            };
        }

        // Non-JSON success bodies are kept verbatim as a string.
        let text = response.text().unwrap_or_default();
        let body = serde_json::from_str(&text)
            .unwrap_or_else(|_| serde_json::Value::String(text));
        info!(
            policy_id = %payload.policy_id,
            rules = payload.rules.len(),
            "policy delivered to execution backend"
        );
        DeliveryOutcome::Delivered(body)
    }
}

/// Mock backend for testing — returns a configured outcome and records
/// the payloads it receives.
pub struct MockExecutionBackend {
    outcome: DeliveryOutcome,
    pub deliveries: Mutex<Vec<ExecutionPayload>>,
}

impl MockExecutionBackend {
    pub fn new(outcome: DeliveryOutcome) -> Self {
        Self {
            outcome,
            deliveries: Mutex::new(Vec::new()),
        }
    }

    pub fn delivered() -> Self {
        Self::new(DeliveryOutcome::Delivered(
            serde_json::json!({"accepted": true}),
        ))
    }
}

impl ExecutionBackend for MockExecutionBackend {
    fn deliver(&self, payload: &ExecutionPayload) -> DeliveryOutcome {
        if let Ok(mut deliveries) = self.deliveries.lock() {
            deliveries.push(payload.clone());
        }
        self.outcome.clone()
    }
}
