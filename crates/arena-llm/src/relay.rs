//! The boundary to the HTTP relay that actually talks to vendors.
//!
//! The core treats the relay as an opaque, fallible async function; how a
//! given vendor's wire format looks is the relay's business.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// What a backend hands to the relay for one completion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    pub vendor_tag: String,
    pub model_id: String,
    pub prompt_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stop: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub route_through_aggregator: bool,
    /// Sent as HTTP headers rather than in the body.
    #[serde(skip)]
    pub headers: HashMap<String, String>,
    /// Transport-level timeout hint.
    #[serde(skip)]
    pub timeout: Option<Duration>,
}

/// Raw completion payload returned by the relay.
///
/// Any cost the relay reports is not modelled; adapters derive
/// cost from the token counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayResponse {
    pub text: String,
    #[serde(default)]
    pub input_token_count: u32,
    #[serde(default)]
    pub output_token_count: u32,
    #[serde(default)]
    pub vendor_metadata: HashMap<String, serde_json::Value>,
}

/// Errors surfaced by a relay implementation.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("http error: {0}")]
    Http(Box<dyn std::error::Error + Send + Sync>),

    /// The relay answered with a non-success status.
    #[error("relay returned {status}: {message}")]
    Status {
        status: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// The relay answered successfully but the payload was unusable.
    #[error("malformed relay response: {0}")]
    Decode(String),

    #[error("{0}")]
    Other(String),
}

/// An asynchronous, fallible completion transport.
#[async_trait::async_trait]
pub trait Relay: Send + Sync {
    async fn relay(&self, request: RelayRequest) -> Result<RelayResponse, RelayError>;
}
