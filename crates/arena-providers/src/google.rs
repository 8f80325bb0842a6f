//! Google Gemini models, called directly.

use std::sync::Arc;

use arena_llm::{ModelDescriptor, ProviderAdapter, Relay};
use arena_registry::Registry;

use crate::vendor::VendorBackend;

pub const PROVIDER_ID: &str = "google";
pub const PROVIDER_NAME: &str = "Google";

/// Register the Google Gemini adapter.
pub fn register(registry: &mut Registry, relay: Arc<dyn Relay>) {
    registry.register(PROVIDER_ID, ProviderAdapter::new(backend(relay)));
}

pub fn backend(relay: Arc<dyn Relay>) -> VendorBackend {
    VendorBackend::new(PROVIDER_ID, PROVIDER_NAME, relay, models())
        .with_credential_env(&["GEMINI_API_KEY", "GOOGLE_API_KEY"])
}

pub fn models() -> Vec<ModelDescriptor> {
    vec![
        gemini("gemini-2.0-flash", "Gemini 2.0 Flash", 1_048_576, 0.0001, 0.0004),
        gemini("gemini-1.5-pro", "Gemini 1.5 Pro", 2_097_152, 0.00125, 0.005),
        gemini("gemini-1.5-flash", "Gemini 1.5 Flash", 1_048_576, 0.000075, 0.0003),
    ]
}

fn gemini(id: &str, name: &str, context: u32, input: f64, output: f64) -> ModelDescriptor {
    ModelDescriptor::new(id, name, PROVIDER_ID, context, input, output)
        .with_vision(Some(16))
        .with_function_calling()
}
