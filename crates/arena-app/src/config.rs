//! `arena.toml`: relay endpoint, dispatch limits and per-provider settings.
//!
//! ```toml
//! [relay]
//! url = "http://localhost:3000/api/llm"
//! timeout_secs = 60
//!
//! [dispatch]
//! concurrency = 4
//!
//! [providers.openai]
//! api_key = "${OPENAI_API_KEY}"
//! timeout_secs = 30
//!
//! [providers.openrouter.headers]
//! X-Title = "arena"
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::time::Duration;

use arena_llm::ProviderConfig;
use arena_registry::Registry;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub relay: RelayConfig,
    pub dispatch: DispatchConfig,
    pub providers: BTreeMap<String, ProviderSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Relay endpoint. Supports `${ENV_VAR}` expansion.
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Max completions in flight per comparison. Unset or `0` is unbounded.
    pub concurrency: Option<usize>,
}

/// One `[providers.<name>]` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSection {
    /// Supports `${ENV_VAR}` expansion.
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub headers: BTreeMap<String, String>,
}

impl Config {
    /// Parse TOML, then expand `${VAR}` references in string values.
    pub fn from_toml(input: &str) -> std::result::Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(input)?;
        config.expand(&|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        Self::from_toml(&content).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn relay_timeout(&self) -> Option<Duration> {
        self.relay.timeout_secs.map(Duration::from_secs)
    }

    /// Build the configuration for every provider that can be configured.
    ///
    /// A key in the file wins; otherwise the first non-blank environment
    /// variable the adapter names. Adapters that need a key and have none are
    /// left out, so they stay unconfigured. Sections for providers the
    /// registry does not know are passed through so that
    /// [`Registry::configure_many`] reports them.
    pub fn provider_configs(&self, registry: &Registry) -> HashMap<String, ProviderConfig> {
        self.provider_configs_with(registry, |name| std::env::var(name).ok())
    }

    fn provider_configs_with(
        &self,
        registry: &Registry,
        env: impl Fn(&str) -> Option<String>,
    ) -> HashMap<String, ProviderConfig> {
        let mut configs = HashMap::new();

        for name in registry.provider_names() {
            let Some(adapter) = registry.get(name) else {
                continue;
            };
            let mut config = self
                .providers
                .get(name)
                .map(ProviderSection::to_provider_config)
                .unwrap_or_default();

            if !config.has_credential() {
                config.api_key = adapter
                    .credential_env()
                    .iter()
                    .filter_map(|var| env(var.as_str()))
                    .find(|value| !value.trim().is_empty());
            }

            if adapter.requires_credential() && !config.has_credential() {
                tracing::debug!(provider = name, "no credential found");
                continue;
            }
            configs.insert(name.to_string(), config);
        }

        for (name, section) in &self.providers {
            if !registry.has_provider(name) {
                configs.insert(name.clone(), section.to_provider_config());
            }
        }

        configs
    }

    fn expand(&mut self, env: &dyn Fn(&str) -> Option<String>) {
        expand_opt(&mut self.relay.url, env);
        for section in self.providers.values_mut() {
            expand_opt(&mut section.api_key, env);
            expand_opt(&mut section.base_url, env);
            for value in section.headers.values_mut() {
                *value = expand_env_vars(value, env);
            }
        }
    }
}

impl ProviderSection {
    fn to_provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            api_key: self.api_key.clone().filter(|k| !k.trim().is_empty()),
            base_url: self.base_url.clone().filter(|u| !u.trim().is_empty()),
            timeout: self.timeout_secs.map(Duration::from_secs),
            headers: self
                .headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

fn expand_opt(value: &mut Option<String>, env: &dyn Fn(&str) -> Option<String>) {
    if let Some(v) = value {
        *v = expand_env_vars(v, env);
    }
}

/// Expand `${VAR}` patterns. Unknown variables become empty strings.
fn expand_env_vars(input: &str, env: &dyn Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && chars.peek() == Some(&'{') {
            chars.next();
            let mut var_name = String::new();
            for c in chars.by_ref() {
                if c == '}' {
                    break;
                }
                var_name.push(c);
            }
            if let Some(val) = env(&var_name) {
                result.push_str(&val);
            }
        } else {
            result.push(ch);
        }
    }

    result
}
