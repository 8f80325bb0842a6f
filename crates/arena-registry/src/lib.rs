//! # arena-registry
//!
//! A directory of provider adapters.
//!
//! This crate lets you:
//!
//! - **Register named adapters** ([`arena_llm::ProviderAdapter`]) in a fixed
//!   order.
//! - **Query models across providers**: resolve an id to its adapter, filter
//!   by capability or price, find the cheapest options.
//! - **Configure many providers at once**, collecting every failure instead
//!   of stopping at the first.

pub mod registry;

pub use registry::{CheapestModels, Registry, ResolvedModel};
