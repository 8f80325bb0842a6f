use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors produced by adapters, the registry and the dispatchers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed caller input (blank prompt, empty model list, bad ranges).
    #[error("invalid request: {0}")]
    Validation(String),

    /// The adapter requires a credential and has none.
    #[error("provider '{provider}' is not configured")]
    NotConfigured { provider: String },

    #[error("model not found: {0}")]
    ModelNotFound(String),

    #[error("provider not found: {0}")]
    ProviderNotFound(String),

    /// The relay failed or returned something unusable.
    #[error("{vendor} api error: {message}")]
    ProviderApi { vendor: String, message: String },

    #[error("unsupported evaluation: {0}")]
    UnsupportedEvaluation(String),

    #[error("no response available from model '{0}'")]
    AwaitingResponse(String),

    #[error("cannot configure provider '{provider}': {message}")]
    Configuration { provider: String, message: String },

    /// Every failure collected by a batch configuration call.
    #[error("failed to configure {} provider(s): {}", .0.len(), join_errors(.0))]
    ConfigureMany(Vec<Error>),

    #[error("{0}")]
    Internal(String),
}

impl Error {
    /// The serializable kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::NotConfigured { .. } => ErrorKind::NotConfigured,
            Error::ModelNotFound(_) => ErrorKind::ModelNotFound,
            Error::ProviderNotFound(_) => ErrorKind::ProviderNotFound,
            Error::ProviderApi { .. } => ErrorKind::ProviderApi,
            Error::UnsupportedEvaluation(_) => ErrorKind::UnsupportedEvaluation,
            Error::AwaitingResponse(_) => ErrorKind::AwaitingResponse,
            Error::Configuration { .. } | Error::ConfigureMany(_) => ErrorKind::Configuration,
            Error::Internal(_) => ErrorKind::Internal,
        }
    }
}

fn join_errors(errors: &[Error]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error categories, detached from their payload so they can travel inside
/// dispatch outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotConfigured,
    ModelNotFound,
    ProviderNotFound,
    ProviderApi,
    UnsupportedEvaluation,
    AwaitingResponse,
    Configuration,
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotConfigured => "not_configured",
            ErrorKind::ModelNotFound => "model_not_found",
            ErrorKind::ProviderNotFound => "provider_not_found",
            ErrorKind::ProviderApi => "provider_api",
            ErrorKind::UnsupportedEvaluation => "unsupported_evaluation",
            ErrorKind::AwaitingResponse => "awaiting_response",
            ErrorKind::Configuration => "configuration",
            ErrorKind::Internal => "internal",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configure_many_lists_every_failure() {
        let err = Error::ConfigureMany(vec![
            Error::Configuration {
                provider: "openai".into(),
                message: "missing api key".into(),
            },
            Error::ProviderNotFound("nope".into()),
        ]);
        let text = err.to_string();
        assert!(text.starts_with("failed to configure 2 provider(s)"));
        assert!(text.contains("openai"));
        assert!(text.contains("nope"));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::ModelNotFound).unwrap();
        assert_eq!(json, "\"model_not_found\"");
        assert_eq!(ErrorKind::ProviderApi.to_string(), "provider_api");
    }
}
