#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use arena_compare::Comparator;
use arena_llm::{
    ModelDescriptor, ProviderAdapter, ProviderConfig, Relay, RelayError, RelayRequest,
    RelayResponse,
};
use arena_providers::VendorBackend;
use arena_registry::Registry;
use parking_lot::Mutex;

/// What the relay does for one model id.
#[derive(Clone)]
pub enum Script {
    Reply {
        text: String,
        input: u32,
        output: u32,
        delay: Duration,
    },
    Fail(String),
}

pub fn reply(text: &str, input: u32, output: u32) -> Script {
    Script::Reply {
        text: text.into(),
        input,
        output,
        delay: Duration::ZERO,
    }
}

pub fn slow_reply(text: &str, delay: Duration) -> Script {
    Script::Reply {
        text: text.into(),
        input: 5,
        output: 5,
        delay,
    }
}

/// A relay that answers from a script and records every request.
#[derive(Default)]
pub struct ScriptedRelay {
    scripts: Mutex<HashMap<String, Script>>,
    seen: Mutex<Vec<RelayRequest>>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl ScriptedRelay {
    pub fn script(&self, model_id: &str, script: Script) {
        self.scripts.lock().insert(model_id.into(), script);
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().len()
    }

    pub fn calls_for(&self, model_id: &str) -> usize {
        self.seen.lock().iter().filter(|r| r.model_id == model_id).count()
    }

    pub fn prompts_for(&self, model_id: &str) -> Vec<String> {
        self.seen
            .lock()
            .iter()
            .filter(|r| r.model_id == model_id)
            .map(|r| r.prompt_text.clone())
            .collect()
    }

    pub fn vendors_for(&self, model_id: &str) -> Vec<String> {
        self.seen
            .lock()
            .iter()
            .filter(|r| r.model_id == model_id)
            .map(|r| r.vendor_tag.clone())
            .collect()
    }

    /// Highest number of requests that were in the relay at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Relay for ScriptedRelay {
    async fn relay(&self, request: RelayRequest) -> Result<RelayResponse, RelayError> {
        let script = self.scripts.lock().get(&request.model_id).cloned();
        self.seen.lock().push(request.clone());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let result = match script {
            Some(Script::Reply {
                text,
                input,
                output,
                delay,
            }) => {
                tokio::time::sleep(delay).await;
                Ok(RelayResponse {
                    text,
                    input_token_count: input,
                    output_token_count: output,
                    ..Default::default()
                })
            }
            Some(Script::Fail(message)) => Err(RelayError::Other(message)),
            None => Err(RelayError::Other(format!("no script for {}", request.model_id))),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// Two configured providers:
///
/// - `alpha`: `m1` (0.001/0.002), `m2` (0.003/0.004), `slow`, `shared`
/// - `beta`: `b1` (0.01/0.03), `judge`, `shared`
///
/// plus an unconfigured `gamma` serving `locked`.
pub fn registry(relay: Arc<ScriptedRelay>) -> Registry {
    let mut registry = Registry::new();

    let alpha = VendorBackend::new(
        "alpha",
        "Alpha",
        relay.clone(),
        vec![
            ModelDescriptor::new("m1", "Model One", "alpha", 8_000, 0.001, 0.002),
            ModelDescriptor::new("m2", "Model Two", "alpha", 8_000, 0.003, 0.004),
            ModelDescriptor::new("slow", "Slow", "alpha", 8_000, 0.001, 0.001),
            ModelDescriptor::new("shared", "Shared (alpha)", "alpha", 8_000, 0.0, 0.0),
        ],
    );
    let beta = VendorBackend::new(
        "beta",
        "Beta",
        relay.clone(),
        vec![
            ModelDescriptor::new("b1", "Beta One", "beta", 32_000, 0.01, 0.03),
            ModelDescriptor::new("judge", "Judge", "beta", 32_000, 0.0, 0.0),
            ModelDescriptor::new("shared", "Shared (beta)", "beta", 8_000, 0.0, 0.0),
        ],
    );
    let gamma = VendorBackend::new(
        "gamma",
        "Gamma",
        relay,
        vec![ModelDescriptor::new("locked", "Locked", "gamma", 8_000, 0.0, 0.0)],
    );

    registry.register("alpha", ProviderAdapter::new(alpha));
    registry.register("beta", ProviderAdapter::new(beta));
    registry.register("gamma", ProviderAdapter::new(gamma));

    let configs = HashMap::from([
        ("alpha".to_string(), ProviderConfig::with_api_key("alpha-key")),
        ("beta".to_string(), ProviderConfig::with_api_key("beta-key")),
    ]);
    registry
        .configure_many(configs)
        .expect("test providers configure");
    registry
}

pub fn comparator(relay: Arc<ScriptedRelay>) -> Comparator {
    Comparator::new(Arc::new(registry(relay)))
}

pub fn ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}
