//! # arena-llm
//!
//! The provider-agnostic completion contract shared by every arena crate:
//! model metadata, requests and results, the adapter handle wrapping a
//! vendor backend, the relay boundary and the cost estimator.

pub mod cost;
pub mod error;
pub mod model;
pub mod provider;
pub mod relay;
pub mod request;
pub mod response;

pub use error::{Error, ErrorKind};
pub use model::{ModelCapabilities, ModelDescriptor};
pub use provider::{ProviderAdapter, ProviderBackend, ProviderConfig};
pub use relay::{Relay, RelayError, RelayRequest, RelayResponse};
pub use request::{CompletionRequest, RequestBuilder, request};
pub use response::CompletionResult;
