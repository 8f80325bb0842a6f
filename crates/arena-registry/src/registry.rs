//! The core registry: maps provider names to adapters and answers
//! cross-provider model queries.

use std::collections::HashMap;
use std::sync::Arc;

use arena_llm::{Error, ModelCapabilities, ModelDescriptor, ProviderAdapter, ProviderConfig};
use serde::Serialize;

/// A model resolved to the adapter that serves it.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedModel<'a> {
    /// Name the adapter was registered under.
    pub provider: &'a str,
    pub adapter: &'a Arc<ProviderAdapter>,
    pub model: &'a ModelDescriptor,
}

/// Result of [`Registry::cheapest`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheapestModels {
    pub cheapest_input: ModelDescriptor,
    pub cheapest_output: ModelDescriptor,
    /// Lowest `input + output` price per 1000 tokens.
    pub best_combined: ModelDescriptor,
}

/// A registered adapter, kept in registration order.
struct ProviderEntry {
    name: String,
    adapter: Arc<ProviderAdapter>,
}

/// Central directory of provider adapters.
///
/// The registry is an ordinary value: build one, register adapters, then
/// share it (usually behind an `Arc`) with whatever dispatches requests.
///
/// Every cross-provider query walks adapters in registration order and each
/// adapter's catalog in catalog order. If two adapters ever expose the same
/// model id, [`find_model`](Self::find_model) resolves to the one registered
/// first.
///
/// # Example
///
/// ```ignore
/// use arena_registry::Registry;
///
/// let mut registry = Registry::new();
/// arena_providers::register_all(&mut registry, relay);
///
/// let resolved = registry.find_model("gpt-4o").expect("known model");
/// let cost = resolved.adapter.estimate_cost("gpt-4o", 1200, 300)?;
/// ```
#[derive(Default)]
pub struct Registry {
    providers: Vec<ProviderEntry>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    /// Register an adapter under `name`.
    ///
    /// Re-registering a name replaces the previous adapter but keeps its
    /// position in the registration order.
    pub fn register(&mut self, name: impl Into<String>, adapter: impl Into<Arc<ProviderAdapter>>) {
        let name = name.into();
        let adapter = adapter.into();
        tracing::debug!(
            provider = %name,
            models = adapter.list_models().len(),
            "registering provider"
        );

        if let Some(entry) = self.providers.iter_mut().find(|e| e.name == name) {
            entry.adapter = adapter;
        } else {
            self.providers.push(ProviderEntry { name, adapter });
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<ProviderAdapter>> {
        self.providers
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.adapter)
    }

    pub fn has_provider(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All adapters, in registration order.
    pub fn adapters(&self) -> impl Iterator<Item = &Arc<ProviderAdapter>> {
        self.providers.iter().map(|e| &e.adapter)
    }

    /// Registered names, in registration order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|e| e.name.as_str()).collect()
    }

    // -----------------------------------------------------------------------
    // Model queries
    // -----------------------------------------------------------------------

    /// Every model of every adapter. No de-duplication.
    pub fn all_models(&self) -> Vec<&ModelDescriptor> {
        self.providers
            .iter()
            .flat_map(|e| e.adapter.list_models())
            .collect()
    }

    /// Models served by adapters that are ready to take calls.
    pub fn configured_models(&self) -> Vec<&ModelDescriptor> {
        self.providers
            .iter()
            .filter(|e| e.adapter.is_configured())
            .flat_map(|e| e.adapter.list_models())
            .collect()
    }

    pub fn models_by_provider(&self, name: &str) -> Vec<&ModelDescriptor> {
        self.get(name)
            .map(|adapter| adapter.list_models().iter().collect())
            .unwrap_or_default()
    }

    /// Resolve a model id to its adapter. First registered match wins.
    pub fn find_model(&self, model_id: &str) -> Option<ResolvedModel<'_>> {
        self.providers.iter().find_map(|e| {
            e.adapter.get_model(model_id).map(|model| ResolvedModel {
                provider: &e.name,
                adapter: &e.adapter,
                model,
            })
        })
    }

    pub fn filter_by_capability(
        &self,
        predicate: impl Fn(&ModelCapabilities) -> bool,
    ) -> Vec<&ModelDescriptor> {
        self.all_models()
            .into_iter()
            .filter(|m| predicate(&m.capabilities))
            .collect()
    }

    /// Models whose input and output prices (per 1000 tokens) are both at or
    /// below the given ceilings.
    pub fn filter_by_price_ceiling(
        &self,
        max_input_per_1k: f64,
        max_output_per_1k: f64,
    ) -> Vec<&ModelDescriptor> {
        self.all_models()
            .into_iter()
            .filter(|m| {
                m.input_price_per_1k <= max_input_per_1k
                    && m.output_price_per_1k <= max_output_per_1k
            })
            .collect()
    }

    /// Cheapest models by input, output and combined price.
    ///
    /// Ties go to the model encountered first. `None` when no models are
    /// registered.
    pub fn cheapest(&self) -> Option<CheapestModels> {
        let models = self.all_models();
        let first = *models.first()?;
        let (mut input, mut output, mut combined) = (first, first, first);

        for &model in &models[1..] {
            if model.input_price_per_1k < input.input_price_per_1k {
                input = model;
            }
            if model.output_price_per_1k < output.output_price_per_1k {
                output = model;
            }
            if model.combined_price_per_1k() < combined.combined_price_per_1k() {
                combined = model;
            }
        }

        Some(CheapestModels {
            cheapest_input: input.clone(),
            cheapest_output: output.clone(),
            best_combined: combined.clone(),
        })
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    /// Configure several adapters at once.
    ///
    /// Each adapter is configured independently: a failure for one name never
    /// prevents the others from being applied. Names that are not registered
    /// count as failures. When anything failed, every failure is returned
    /// together in [`Error::ConfigureMany`].
    pub fn configure_many(&self, mut configs: HashMap<String, ProviderConfig>) -> Result<(), Error> {
        let mut failures = Vec::new();

        for entry in &self.providers {
            let Some(config) = configs.remove(&entry.name) else {
                continue;
            };
            match entry.adapter.configure(config) {
                Ok(()) => tracing::info!(provider = %entry.name, "provider configured"),
                Err(err) => {
                    tracing::warn!(provider = %entry.name, error = %err, "provider configuration failed");
                    failures.push(err);
                }
            }
        }

        let mut unknown: Vec<String> = configs.into_keys().collect();
        unknown.sort();
        for name in unknown {
            tracing::warn!(provider = %name, "configuration for unknown provider");
            failures.push(Error::ProviderNotFound(name));
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::ConfigureMany(failures))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_llm::{
        CompletionRequest, ErrorKind, ProviderBackend, RelayError, RelayResponse,
    };

    struct Catalog {
        name: &'static str,
        requires_key: bool,
        models: Vec<ModelDescriptor>,
    }

    #[async_trait::async_trait]
    impl ProviderBackend for Catalog {
        fn name(&self) -> &str {
            self.name
        }

        fn requires_credential(&self) -> bool {
            self.requires_key
        }

        fn models(&self) -> &[ModelDescriptor] {
            &self.models
        }

        async fn send(
            &self,
            _model: &ModelDescriptor,
            _request: &CompletionRequest,
            _config: &ProviderConfig,
        ) -> Result<RelayResponse, RelayError> {
            Err(RelayError::Other("not used".into()))
        }
    }

    fn model(id: &str, provider: &str, input: f64, output: f64) -> ModelDescriptor {
        ModelDescriptor::new(id, id.to_uppercase(), provider, 8_192, input, output)
    }

    fn adapter(name: &'static str, requires_key: bool, models: Vec<ModelDescriptor>) -> ProviderAdapter {
        ProviderAdapter::new(Catalog {
            name,
            requires_key,
            models,
        })
    }

    fn sample() -> Registry {
        let mut registry = Registry::new();
        registry.register(
            "alpha",
            adapter(
                "alpha",
                true,
                vec![
                    model("a1", "alpha", 0.003, 0.015),
                    model("a2", "alpha", 0.0005, 0.0015).with_vision(Some(2)),
                ],
            ),
        );
        registry.register(
            "beta",
            adapter(
                "beta",
                false,
                vec![
                    model("b1", "beta", 0.0005, 0.002).with_function_calling(),
                    model("b2", "beta", 0.01, 0.001),
                ],
            ),
        );
        registry
    }

    fn ids(models: Vec<&ModelDescriptor>) -> Vec<&str> {
        models.into_iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn all_models_follow_registration_then_catalog_order() {
        let registry = sample();
        assert_eq!(ids(registry.all_models()), ["a1", "a2", "b1", "b2"]);
        assert_eq!(registry.provider_names(), ["alpha", "beta"]);
    }

    #[test]
    fn reregistering_keeps_position() {
        let mut registry = sample();
        registry.register("alpha", adapter("alpha", true, vec![model("a9", "alpha", 1.0, 1.0)]));
        assert_eq!(ids(registry.all_models()), ["a9", "b1", "b2"]);
    }

    #[test]
    fn find_model_prefers_first_registered() {
        let mut registry = sample();
        registry.register(
            "gamma",
            adapter("gamma", false, vec![model("a1", "gamma", 0.0, 0.0)]),
        );

        for _ in 0..5 {
            let resolved = registry.find_model("a1").unwrap();
            assert_eq!(resolved.provider, "alpha");
            assert_eq!(resolved.model.provider_name, "alpha");
        }
        assert!(registry.find_model("zzz").is_none());
    }

    #[test]
    fn filters() {
        let registry = sample();
        assert_eq!(
            ids(registry.filter_by_capability(|c| c.supports_vision)),
            ["a2"]
        );
        assert_eq!(
            ids(registry.filter_by_capability(|c| c.supports_function_calling)),
            ["b1"]
        );
        assert_eq!(
            ids(registry.filter_by_price_ceiling(0.0005, 0.002)),
            ["a2", "b1"]
        );
        assert_eq!(ids(registry.models_by_provider("beta")), ["b1", "b2"]);
        assert!(registry.models_by_provider("nope").is_empty());
    }

    #[test]
    fn cheapest_breaks_ties_by_catalog_order() {
        let registry = sample();
        let cheapest = registry.cheapest().unwrap();
        // a2 and b1 share the lowest input price; a2 comes first.
        assert_eq!(cheapest.cheapest_input.id, "a2");
        assert_eq!(cheapest.cheapest_output.id, "b2");
        assert_eq!(cheapest.best_combined.id, "a2");

        assert!(Registry::new().cheapest().is_none());
    }

    #[test]
    fn configure_many_attempts_every_adapter() {
        let registry = sample();
        let mut configs = HashMap::new();
        configs.insert("alpha".to_string(), ProviderConfig::default());
        configs.insert("beta".to_string(), ProviderConfig::default());
        configs.insert("ghost".to_string(), ProviderConfig::with_api_key("k"));

        let err = registry.configure_many(configs).unwrap_err();
        let Error::ConfigureMany(failures) = err else {
            panic!("expected aggregate error");
        };
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].kind(), ErrorKind::Configuration);
        assert_eq!(failures[1].kind(), ErrorKind::ProviderNotFound);

        // beta does not need a key and was still applied.
        assert!(registry.get("beta").unwrap().is_configured());
        assert!(!registry.get("alpha").unwrap().is_configured());
    }

    #[test]
    fn configuring_twice_is_idempotent() {
        let registry = sample();
        for _ in 0..2 {
            let mut configs = HashMap::new();
            configs.insert("alpha".to_string(), ProviderConfig::with_api_key("k"));
            registry.configure_many(configs).unwrap();
        }
        assert!(registry.get("alpha").unwrap().is_configured());
        assert_eq!(registry.all_models().len(), 4);
        assert_eq!(ids(registry.configured_models()), ["a1", "a2", "b1", "b2"]);
    }

    #[test]
    fn configured_models_skip_unconfigured_adapters() {
        let registry = sample();
        assert_eq!(ids(registry.configured_models()), ["b1", "b2"]);
    }
}
