//! HTTP implementation of the relay boundary.
//!
//! One endpoint accepts every completion as a JSON `POST`; the relay behind
//! it picks the vendor from `vendorTag` and does the vendor-specific shaping.

mod types;

use std::sync::Arc;
use std::time::Duration;

use arena_llm::{Relay, RelayError, RelayRequest, RelayResponse};

use crate::types::ErrorPayload;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/llm";

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Configuration for [`HttpRelay`].
#[derive(Debug, Clone)]
pub struct HttpRelayConfig {
    pub endpoint: String,
    /// Applied when a request carries no timeout of its own.
    pub timeout: Option<Duration>,
}

impl Default for HttpRelayConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            timeout: None,
        }
    }
}

/// Relay client over HTTP. Cheap to clone.
#[derive(Clone)]
pub struct HttpRelay {
    state: Arc<RelayState>,
}

impl HttpRelay {
    pub fn new(config: HttpRelayConfig) -> Self {
        Self {
            state: Arc::new(RelayState {
                client: reqwest::Client::new(),
                config,
            }),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.state.config.endpoint
    }
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

struct RelayState {
    client: reqwest::Client,
    config: HttpRelayConfig,
}

#[async_trait::async_trait]
impl Relay for HttpRelay {
    async fn relay(&self, request: RelayRequest) -> Result<RelayResponse, RelayError> {
        let state = &self.state;
        let mut req = state.client.post(&state.config.endpoint);
        for (k, v) in &request.headers {
            req = req.header(k, v);
        }
        if let Some(timeout) = request.timeout.or(state.config.timeout) {
            req = req.timeout(timeout);
        }

        tracing::debug!(
            endpoint = %state.config.endpoint,
            vendor = %request.vendor_tag,
            model = %request.model_id,
            "sending relay request"
        );

        let resp = req
            .json(&request)
            .send()
            .await
            .map_err(|e| RelayError::Http(Box::new(e)))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| RelayError::Http(Box::new(e)))?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), model = %request.model_id, "relay rejected request");
            return Err(status_error(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| RelayError::Decode(e.to_string()))
    }
}

/// Build a status error, preferring the relay's structured payload and
/// falling back to the raw body.
fn status_error(status: u16, body: &str) -> RelayError {
    match serde_json::from_str::<ErrorPayload>(body) {
        Ok(payload) => RelayError::Status {
            status,
            message: payload.error_message,
            details: payload.details,
        },
        Err(_) => RelayError::Status {
            status,
            message: body.trim().to_string(),
            details: None,
        },
    }
}
