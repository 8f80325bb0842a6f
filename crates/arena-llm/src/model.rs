use serde::{Deserialize, Serialize};

/// Static metadata for a single model exposed by a provider.
///
/// Descriptors are built once from the provider catalogs and never mutated.
/// Prices are USD per 1000 tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Globally unique model identifier (e.g. `"gpt-4o"`, `"openai/gpt-4o"`).
    pub id: String,
    pub display_name: String,
    /// Name of the provider adapter that owns this model.
    pub provider_name: String,
    pub context_window_tokens: u32,
    pub input_price_per_1k: f64,
    pub output_price_per_1k: f64,
    pub supports_streaming: bool,
    pub capabilities: ModelCapabilities,
}

/// What a model accepts beyond plain text prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCapabilities {
    pub supports_vision: bool,
    pub supports_function_calling: bool,
    pub supports_system_prompt: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_image_inputs: Option<u32>,
}

impl Default for ModelCapabilities {
    fn default() -> Self {
        Self {
            supports_vision: false,
            supports_function_calling: false,
            supports_system_prompt: true,
            max_image_inputs: None,
        }
    }
}

impl ModelDescriptor {
    /// Text-only, streaming-capable model with a system prompt.
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        provider_name: impl Into<String>,
        context_window_tokens: u32,
        input_price_per_1k: f64,
        output_price_per_1k: f64,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            provider_name: provider_name.into(),
            context_window_tokens,
            input_price_per_1k,
            output_price_per_1k,
            supports_streaming: true,
            capabilities: ModelCapabilities::default(),
        }
    }

    /// Accepts image inputs, optionally capped at `max_images` per request.
    pub fn with_vision(mut self, max_images: Option<u32>) -> Self {
        self.capabilities.supports_vision = true;
        self.capabilities.max_image_inputs = max_images;
        self
    }

    pub fn with_function_calling(mut self) -> Self {
        self.capabilities.supports_function_calling = true;
        self
    }

    pub fn without_system_prompt(mut self) -> Self {
        self.capabilities.supports_system_prompt = false;
        self
    }

    pub fn without_streaming(mut self) -> Self {
        self.supports_streaming = false;
        self
    }

    /// Combined input + output price per 1000 tokens.
    pub fn combined_price_per_1k(&self) -> f64 {
        self.input_price_per_1k + self.output_price_per_1k
    }
}
