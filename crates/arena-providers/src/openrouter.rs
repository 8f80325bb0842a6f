//! Models reached through the OpenRouter aggregator.
//!
//! Ids carry the upstream vendor prefix (`openai/gpt-4o`), so they never
//! collide with the same model served by a direct adapter.

use std::sync::Arc;

use arena_llm::{ModelDescriptor, ProviderAdapter, Relay};
use arena_registry::Registry;

use crate::vendor::VendorBackend;

pub const PROVIDER_ID: &str = "openrouter";
pub const PROVIDER_NAME: &str = "OpenRouter";

/// Register the OpenRouter adapter.
pub fn register(registry: &mut Registry, relay: Arc<dyn Relay>) {
    registry.register(PROVIDER_ID, ProviderAdapter::new(backend(relay)));
}

pub fn backend(relay: Arc<dyn Relay>) -> VendorBackend {
    VendorBackend::new(PROVIDER_ID, PROVIDER_NAME, relay, models())
        .via_aggregator()
        .with_credential_env(&["OPENROUTER_API_KEY"])
}

pub fn models() -> Vec<ModelDescriptor> {
    vec![
        model("openai/gpt-4o", "GPT-4o (OpenRouter)", 128_000, 0.0025, 0.01)
            .with_vision(Some(10))
            .with_function_calling(),
        model("anthropic/claude-3.5-sonnet", "Claude 3.5 Sonnet (OpenRouter)", 200_000, 0.003, 0.015)
            .with_vision(Some(20))
            .with_function_calling(),
        model("meta-llama/llama-3.1-405b-instruct", "Llama 3.1 405B", 131_072, 0.0008, 0.0008),
        model("meta-llama/llama-3.1-70b-instruct", "Llama 3.1 70B", 131_072, 0.00012, 0.0003),
        model("qwen/qwen-2.5-72b-instruct", "Qwen 2.5 72B", 131_072, 0.00013, 0.0004),
        model("deepseek/deepseek-chat", "DeepSeek V3", 64_000, 0.00014, 0.00028).with_function_calling(),
    ]
}

fn model(id: &str, name: &str, context: u32, input: f64, output: f64) -> ModelDescriptor {
    ModelDescriptor::new(id, name, PROVIDER_ID, context, input, output)
}
