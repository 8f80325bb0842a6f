use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The outcome of one successful completion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResult {
    /// Generated text.
    pub content: String,
    /// Echo of the model the request was sent to.
    pub model_id: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
    /// Round trip through the adapter, in milliseconds.
    pub duration_ms: u64,
    /// USD, computed from the reported token counts.
    pub cost: f64,
    /// Provider-specific metadata passed through from the relay.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl CompletionResult {
    pub fn total_tokens(&self) -> u64 {
        u64::from(self.input_tokens) + u64::from(self.output_tokens)
    }
}
