//! Inference service configuration
//!
//! The base address and credential come from the environment (or an
//! optional config file), never from code.

use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Prefix for environment variables (`WILDLIFE_BACKEND_URL`, `WILDLIFE_API_KEY`, ...)
pub const ENV_PREFIX: &str = "WILDLIFE";

/// Raw service configuration as loaded from file and environment
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceConfig {
    /// Base address; endpoint paths are appended to it
    #[serde(default)]
    pub backend_url: Option<String>,

    /// Credential sent in the `X-API-Key` header
    #[serde(default)]
    pub api_key: Option<String>,

    /// Whole-request timeout. Unset means no local timeout.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

/// Configuration checked and ready for the client
#[derive(Clone)]
pub struct ResolvedConfig {
    pub base_url: Url,
    pub api_key: String,
    pub request_timeout: Option<Duration>,
}

impl std::fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl ServiceConfig {
    /// Load from an optional file, then the process environment
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::from_sources(file, None)
    }

    /// Load from an optional file, then `env` (or the process environment
    /// when `env` is `None`). Later sources win.
    pub fn from_sources(
        file: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let mut environment = config::Environment::with_prefix(ENV_PREFIX);
        if env.is_some() {
            environment = environment.source(env);
        }

        let config = builder.add_source(environment).build()?;
        Ok(config.try_deserialize()?)
    }

    /// Apply explicit overrides (command-line flags)
    pub fn with_overrides(mut self, backend_url: Option<String>, api_key: Option<String>) -> Self {
        if backend_url.is_some() {
            self.backend_url = backend_url;
        }
        if api_key.is_some() {
            self.api_key = api_key;
        }
        self
    }

    /// Check required values and normalize the base address
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        let raw_url = self
            .backend_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("backend_url"))?;
        let api_key = self
            .api_key
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("api_key"))?;

        Ok(ResolvedConfig {
            base_url: normalize_base_url(raw_url)?,
            api_key: api_key.to_string(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        })
    }
}

/// Parse the base address, treating it as a directory so endpoint paths
/// are appended rather than replacing its last segment.
pub fn normalize_base_url(raw: &str) -> Result<Url, ConfigError> {
    let mut text = raw.to_string();
    if !text.ends_with('/') {
        text.push('/');
    }
    Url::parse(&text).map_err(|source| ConfigError::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}
