use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use crate::cost;
use crate::error::Error;
use crate::model::ModelDescriptor;
use crate::relay::{RelayError, RelayResponse};
use crate::request::CompletionRequest;
use crate::response::CompletionResult;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Per-adapter runtime configuration.
#[derive(Clone, Default, PartialEq)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    /// Overrides the vendor's default endpoint.
    pub base_url: Option<String>,
    /// Per-call deadline enforced by the adapter.
    pub timeout: Option<Duration>,
    /// Extra headers forwarded with every call.
    pub headers: HashMap<String, String>,
}

impl ProviderConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    /// Whether a non-blank credential is present.
    pub fn has_credential(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Adapter handle
// ---------------------------------------------------------------------------

/// A concrete, type-erased provider adapter.
///
/// Wraps a [`ProviderBackend`] and owns the single live [`ProviderConfig`] for
/// it. The handle enforces the uniform completion contract (configuration
/// check, catalog lookup, timing, cost) so backends only translate requests.
pub struct ProviderAdapter {
    inner: Box<dyn ProviderBackend>,
    config: RwLock<ProviderConfig>,
}

impl ProviderAdapter {
    /// Wrap any backend implementation into an adapter with an empty config.
    pub fn new(backend: impl ProviderBackend + 'static) -> Self {
        Self {
            inner: Box::new(backend),
            config: RwLock::new(ProviderConfig::default()),
        }
    }

    /// The provider name (e.g. `"openai"`, `"openrouter"`).
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn display_name(&self) -> &str {
        self.inner.display_name()
    }

    pub fn requires_credential(&self) -> bool {
        self.inner.requires_credential()
    }

    /// Candidate environment variables holding this provider's credential.
    pub fn credential_env(&self) -> &[String] {
        self.inner.credential_env()
    }

    /// Replace the configuration. Fails if a credential is required and
    /// missing; the previous configuration is kept in that case.
    pub fn configure(&self, config: ProviderConfig) -> Result<(), Error> {
        if self.inner.requires_credential() && !config.has_credential() {
            return Err(Error::Configuration {
                provider: self.name().to_string(),
                message: "an api key is required".into(),
            });
        }
        *self.config.write() = config;
        tracing::debug!(provider = self.name(), "provider configured");
        Ok(())
    }

    /// Drop the configuration, returning the adapter to its initial state.
    pub fn reset(&self) {
        *self.config.write() = ProviderConfig::default();
        tracing::debug!(provider = self.name(), "provider configuration reset");
    }

    pub fn is_configured(&self) -> bool {
        !self.inner.requires_credential() || self.config.read().has_credential()
    }

    /// Snapshot of the current configuration.
    pub fn config(&self) -> ProviderConfig {
        self.config.read().clone()
    }

    pub fn list_models(&self) -> &[ModelDescriptor] {
        self.inner.models()
    }

    pub fn get_model(&self, model_id: &str) -> Option<&ModelDescriptor> {
        self.inner.models().iter().find(|m| m.id == model_id)
    }

    pub fn estimate_cost(
        &self,
        model_id: &str,
        input_tokens: u32,
        output_tokens: u32,
    ) -> Result<f64, Error> {
        let model = self
            .get_model(model_id)
            .ok_or_else(|| Error::ModelNotFound(model_id.to_string()))?;
        Ok(cost::estimate(model, input_tokens, output_tokens))
    }

    /// Run one completion against `model_id`.
    ///
    /// Relay failures (including the configured deadline elapsing) come back
    /// as [`Error::ProviderApi`].
    pub async fn complete(
        &self,
        model_id: &str,
        request: &CompletionRequest,
    ) -> Result<CompletionResult, Error> {
        if !self.is_configured() {
            return Err(Error::NotConfigured {
                provider: self.name().to_string(),
            });
        }
        let model = self
            .get_model(model_id)
            .ok_or_else(|| Error::ModelNotFound(model_id.to_string()))?;
        request.validate()?;

        // Snapshot so no lock is held across the await.
        let config = self.config();
        let started = Instant::now();
        let call = self.inner.send(model, request, &config);
        let response = match config.timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(response) => response,
                Err(_) => Err(RelayError::Other(format!(
                    "timed out after {}ms",
                    limit.as_millis()
                ))),
            },
            None => call.await,
        };
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let response = response.map_err(|err| {
            tracing::warn!(provider = self.name(), model = model_id, error = %err, "completion failed");
            Error::ProviderApi {
                vendor: self.name().to_string(),
                message: err.to_string(),
            }
        })?;

        let cost = cost::estimate(
            model,
            response.input_token_count,
            response.output_token_count,
        );
        tracing::debug!(
            provider = self.name(),
            model = model_id,
            duration_ms,
            input_tokens = response.input_token_count,
            output_tokens = response.output_token_count,
            "completion finished"
        );

        let mut metadata = response.vendor_metadata;
        if request.stream {
            metadata.insert("stream_requested".into(), serde_json::Value::Bool(true));
        }

        Ok(CompletionResult {
            content: response.text,
            model_id: model.id.clone(),
            input_tokens: response.input_token_count,
            output_tokens: response.output_token_count,
            duration_ms,
            cost,
            metadata,
        })
    }
}

impl fmt::Debug for ProviderAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderAdapter")
            .field("name", &self.name())
            .field("models", &format!("{} models", self.list_models().len()))
            .field("configured", &self.is_configured())
            .finish()
    }
}

/// Trait that provider crates implement.
///
/// A backend is only asked to `send` once the adapter has confirmed it is
/// configured and that `model` belongs to its catalog.
#[async_trait::async_trait]
pub trait ProviderBackend: Send + Sync {
    fn name(&self) -> &str;

    fn display_name(&self) -> &str {
        self.name()
    }

    fn requires_credential(&self) -> bool {
        true
    }

    fn credential_env(&self) -> &[String] {
        &[]
    }

    /// The static model catalog. Never empty for a registered backend.
    fn models(&self) -> &[ModelDescriptor];

    async fn send(
        &self,
        model: &ModelDescriptor,
        request: &CompletionRequest,
        config: &ProviderConfig,
    ) -> Result<RelayResponse, RelayError>;
}
