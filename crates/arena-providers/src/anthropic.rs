//! Anthropic Claude models, called directly.

use std::sync::Arc;

use arena_llm::{ModelDescriptor, ProviderAdapter, Relay};
use arena_registry::Registry;

use crate::vendor::VendorBackend;

pub const PROVIDER_ID: &str = "anthropic";
pub const PROVIDER_NAME: &str = "Anthropic";

/// Register the Anthropic adapter.
pub fn register(registry: &mut Registry, relay: Arc<dyn Relay>) {
    registry.register(PROVIDER_ID, ProviderAdapter::new(backend(relay)));
}

pub fn backend(relay: Arc<dyn Relay>) -> VendorBackend {
    VendorBackend::new(PROVIDER_ID, PROVIDER_NAME, relay, models())
        .with_credential_env(&["ANTHROPIC_API_KEY"])
}

pub fn models() -> Vec<ModelDescriptor> {
    vec![
        claude("claude-3-5-sonnet-20241022", "Claude 3.5 Sonnet", 0.003, 0.015),
        claude("claude-3-5-haiku-20241022", "Claude 3.5 Haiku", 0.0008, 0.004),
        claude("claude-3-opus-20240229", "Claude 3 Opus", 0.015, 0.075),
        claude("claude-3-haiku-20240307", "Claude 3 Haiku", 0.00025, 0.00125),
    ]
}

fn claude(id: &str, name: &str, input: f64, output: f64) -> ModelDescriptor {
    ModelDescriptor::new(id, name, PROVIDER_ID, 200_000, input, output)
        .with_vision(Some(20))
        .with_function_calling()
}
