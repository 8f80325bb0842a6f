//! Mistral models, called directly.

use std::sync::Arc;

use arena_llm::{ModelDescriptor, ProviderAdapter, Relay};
use arena_registry::Registry;

use crate::vendor::VendorBackend;

pub const PROVIDER_ID: &str = "mistral";
pub const PROVIDER_NAME: &str = "Mistral AI";

/// Register the Mistral adapter.
pub fn register(registry: &mut Registry, relay: Arc<dyn Relay>) {
    registry.register(PROVIDER_ID, ProviderAdapter::new(backend(relay)));
}

pub fn backend(relay: Arc<dyn Relay>) -> VendorBackend {
    VendorBackend::new(PROVIDER_ID, PROVIDER_NAME, relay, models())
        .with_credential_env(&["MISTRAL_API_KEY"])
}

pub fn models() -> Vec<ModelDescriptor> {
    vec![
        model("mistral-large-latest", "Mistral Large", 128_000, 0.002, 0.006).with_function_calling(),
        model("mistral-small-latest", "Mistral Small", 32_000, 0.0002, 0.0006).with_function_calling(),
        model("pixtral-12b-2409", "Pixtral 12B", 128_000, 0.00015, 0.00015).with_vision(Some(8)),
        model("open-mistral-nemo", "Mistral NeMo", 128_000, 0.00015, 0.00015),
    ]
}

fn model(id: &str, name: &str, context: u32, input: f64, output: f64) -> ModelDescriptor {
    ModelDescriptor::new(id, name, PROVIDER_ID, context, input, output)
}
