use serde::{Deserialize, Serialize};

use crate::error::Error;

// ---------------------------------------------------------------------------
// Top-level request
// ---------------------------------------------------------------------------

/// A single completion request. Owned by the caller; adapters only borrow it
/// for the duration of a call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stop: Vec<String>,
    #[serde(default)]
    pub stream: bool,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    /// Check the prompt and decoding parameters.
    ///
    /// The prompt must be non-empty after trimming, `temperature` in `[0, 2]`,
    /// `top_p` in `(0, 1]` and `max_tokens` positive.
    pub fn validate(&self) -> Result<(), Error> {
        if self.prompt.trim().is_empty() {
            return Err(Error::Validation("prompt must not be empty".into()));
        }
        if let Some(t) = self.temperature
            && !(0.0..=2.0).contains(&t)
        {
            return Err(Error::Validation(format!(
                "temperature must be within [0, 2], got {t}"
            )));
        }
        if let Some(p) = self.top_p
            && !(p > 0.0 && p <= 1.0)
        {
            return Err(Error::Validation(format!(
                "top_p must be within (0, 1], got {p}"
            )));
        }
        if self.max_tokens == Some(0) {
            return Err(Error::Validation("max_tokens must be positive".into()));
        }
        Ok(())
    }

    /// Same decoding parameters, different prompt.
    pub fn with_prompt(&self, prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..self.clone()
        }
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Incremental builder for [`CompletionRequest`].
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    inner: CompletionRequest,
}

/// Convenience entry point: `arena_llm::request("Explain recursion")`.
pub fn request(prompt: impl Into<String>) -> RequestBuilder {
    RequestBuilder {
        inner: CompletionRequest::new(prompt),
    }
}

impl RequestBuilder {
    pub fn system(&mut self, text: impl Into<String>) -> &mut Self {
        self.inner.system = Some(text.into());
        self
    }

    pub fn temperature(&mut self, t: f32) -> &mut Self {
        self.inner.temperature = Some(t);
        self
    }

    pub fn top_p(&mut self, p: f32) -> &mut Self {
        self.inner.top_p = Some(p);
        self
    }

    pub fn max_tokens(&mut self, n: u32) -> &mut Self {
        self.inner.max_tokens = Some(n);
        self
    }

    pub fn stop(&mut self, sequences: Vec<String>) -> &mut Self {
        self.inner.stop = sequences;
        self
    }

    pub fn stream(&mut self, enabled: bool) -> &mut Self {
        self.inner.stream = enabled;
        self
    }

    pub fn build(self) -> CompletionRequest {
        self.into()
    }
}

impl From<RequestBuilder> for CompletionRequest {
    fn from(b: RequestBuilder) -> Self {
        b.inner
    }
}
