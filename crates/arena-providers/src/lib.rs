//! # arena-providers
//!
//! Built-in provider adapters. Each vendor module owns a static model
//! catalog and a `register` function; all of them forward completions to a
//! shared [`Relay`].

pub mod anthropic;
pub mod google;
pub mod mistral;
pub mod ollama;
pub mod openai;
pub mod openrouter;
pub mod vendor;

use std::sync::Arc;

use arena_llm::Relay;
use arena_registry::Registry;

pub use vendor::VendorBackend;

/// Register every built-in provider, direct vendors first, then the
/// aggregator, then local runtimes.
pub fn register_all(registry: &mut Registry, relay: Arc<dyn Relay>) {
    openai::register(registry, Arc::clone(&relay));
    anthropic::register(registry, Arc::clone(&relay));
    google::register(registry, Arc::clone(&relay));
    mistral::register(registry, Arc::clone(&relay));
    openrouter::register(registry, Arc::clone(&relay));
    ollama::register(registry, relay);
}
