//! Relay wire types that are not part of the shared contract.
//!
//! The success payload is [`arena_llm::RelayResponse`]; only the error shape
//! lives here.

use serde::Deserialize;

/// Body the relay sends with a non-success status.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub error_message: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}
