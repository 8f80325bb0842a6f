//! OpenAI models, called directly.

use std::sync::Arc;

use arena_llm::{ModelDescriptor, ProviderAdapter, Relay};
use arena_registry::Registry;

use crate::vendor::VendorBackend;

pub const PROVIDER_ID: &str = "openai";
pub const PROVIDER_NAME: &str = "OpenAI";

/// Register the OpenAI adapter.
pub fn register(registry: &mut Registry, relay: Arc<dyn Relay>) {
    registry.register(PROVIDER_ID, ProviderAdapter::new(backend(relay)));
}

pub fn backend(relay: Arc<dyn Relay>) -> VendorBackend {
    VendorBackend::new(PROVIDER_ID, PROVIDER_NAME, relay, models())
        .with_credential_env(&["OPENAI_API_KEY"])
}

pub fn models() -> Vec<ModelDescriptor> {
    vec![
        model("gpt-4o", "GPT-4o", 128_000, 0.0025, 0.01)
            .with_vision(Some(10))
            .with_function_calling(),
        model("gpt-4o-mini", "GPT-4o mini", 128_000, 0.00015, 0.0006)
            .with_vision(Some(10))
            .with_function_calling(),
        model("gpt-4-turbo", "GPT-4 Turbo", 128_000, 0.01, 0.03)
            .with_vision(Some(10))
            .with_function_calling(),
        model("gpt-3.5-turbo", "GPT-3.5 Turbo", 16_385, 0.0005, 0.0015).with_function_calling(),
        // o1-mini accepts neither a system role nor streamed output.
        model("o1-mini", "o1-mini", 128_000, 0.003, 0.012)
            .without_system_prompt()
            .without_streaming(),
        model("o3-mini", "o3-mini", 200_000, 0.0011, 0.0044).with_function_calling(),
    ]
}

fn model(id: &str, name: &str, context: u32, input: f64, output: f64) -> ModelDescriptor {
    ModelDescriptor::new(id, name, PROVIDER_ID, context, input, output)
}
