//! Locally hosted models through Ollama. No credential, no per-token price.

use std::sync::Arc;

use arena_llm::{ModelDescriptor, ProviderAdapter, Relay};
use arena_registry::Registry;

use crate::vendor::VendorBackend;

pub const PROVIDER_ID: &str = "ollama";
pub const PROVIDER_NAME: &str = "Ollama";

/// Register the Ollama adapter.
pub fn register(registry: &mut Registry, relay: Arc<dyn Relay>) {
    registry.register(PROVIDER_ID, ProviderAdapter::new(backend(relay)));
}

pub fn backend(relay: Arc<dyn Relay>) -> VendorBackend {
    VendorBackend::new(PROVIDER_ID, PROVIDER_NAME, relay, models()).keyless()
}

pub fn models() -> Vec<ModelDescriptor> {
    vec![
        local("llama3.2", "Llama 3.2 (local)", 131_072),
        local("mistral", "Mistral 7B (local)", 32_768),
        local("qwen2.5-coder", "Qwen 2.5 Coder (local)", 32_768),
        local("llava", "LLaVA (local)", 4_096).with_vision(Some(1)),
    ]
}

fn local(id: &str, name: &str, context: u32) -> ModelDescriptor {
    ModelDescriptor::new(id, name, PROVIDER_ID, context, 0.0, 0.0)
}
