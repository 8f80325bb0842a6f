//! A provider backend that forwards every call to the relay.

use std::sync::Arc;

use arena_llm::{
    CompletionRequest, ModelDescriptor, ProviderBackend, ProviderConfig, Relay, RelayError,
    RelayRequest, RelayResponse,
};

/// Backend for one vendor family: a static catalog plus the tag the relay
/// uses to pick the vendor's wire format.
pub struct VendorBackend {
    name: String,
    display_name: String,
    vendor_tag: String,
    aggregator: bool,
    requires_credential: bool,
    credential_env: Vec<String>,
    models: Vec<ModelDescriptor>,
    relay: Arc<dyn Relay>,
}

impl VendorBackend {
    /// A direct, credentialed vendor whose relay tag equals its name.
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        relay: Arc<dyn Relay>,
        models: Vec<ModelDescriptor>,
    ) -> Self {
        let name = name.into();
        Self {
            vendor_tag: name.clone(),
            name,
            display_name: display_name.into(),
            aggregator: false,
            requires_credential: true,
            credential_env: Vec::new(),
            models,
            relay,
        }
    }

    pub fn with_vendor_tag(mut self, tag: impl Into<String>) -> Self {
        self.vendor_tag = tag.into();
        self
    }

    /// Route calls through an aggregator instead of the vendor directly.
    pub fn via_aggregator(mut self) -> Self {
        self.aggregator = true;
        self
    }

    /// No credential needed (local runtimes).
    pub fn keyless(mut self) -> Self {
        self.requires_credential = false;
        self
    }

    pub fn with_credential_env(mut self, vars: &[&str]) -> Self {
        self.credential_env = vars.iter().map(|v| v.to_string()).collect();
        self
    }

    fn relay_request(
        &self,
        model: &ModelDescriptor,
        request: &CompletionRequest,
        config: &ProviderConfig,
    ) -> RelayRequest {
        // Models without a system role get no system text rather than a
        // vendor-side rejection.
        let system_text = if model.capabilities.supports_system_prompt {
            request.system.clone()
        } else {
            None
        };

        RelayRequest {
            vendor_tag: self.vendor_tag.clone(),
            model_id: model.id.clone(),
            prompt_text: request.prompt.clone(),
            system_text,
            temperature: request.temperature,
            max_output_tokens: request.max_tokens,
            top_p: request.top_p,
            stop: request.stop.clone(),
            credential: config.api_key.clone(),
            base_url: config.base_url.clone(),
            route_through_aggregator: self.aggregator,
            headers: config.headers.clone(),
            timeout: config.timeout,
        }
    }
}

#[async_trait::async_trait]
impl ProviderBackend for VendorBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn requires_credential(&self) -> bool {
        self.requires_credential
    }

    fn credential_env(&self) -> &[String] {
        &self.credential_env
    }

    fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    async fn send(
        &self,
        model: &ModelDescriptor,
        request: &CompletionRequest,
        config: &ProviderConfig,
    ) -> Result<RelayResponse, RelayError> {
        let body = self.relay_request(model, request, config);
        tracing::trace!(vendor = %self.vendor_tag, model = %model.id, "relaying completion");
        self.relay.relay(body).await
    }
}
