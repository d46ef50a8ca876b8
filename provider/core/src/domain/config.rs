// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Provider Configuration
//
// Read-only settings handed to the adapter at construction:
// - API key and endpoint for the vendor
// - Preferred chat model and embedding model
// - Embedding batch size limit
// - Optional transport timeout
//
// Sources, lowest precedence first: defaults, YAML, environment.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";

/// Keeps each embedding POST within a reasonable payload size
pub const DEFAULT_EMBEDDING_CHUNK_LIMIT: usize = 1_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Vendor API key
    #[serde(default)]
    pub api_key: String,

    /// Base URL of the vendor API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Preferred chat model; validated per call, not here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_model: Option<String>,

    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Maximum number of texts per embedding request
    #[serde(default = "default_embedding_chunk_limit")]
    pub embedding_chunk_limit: usize,

    /// Transport timeout for every vendor call. Absent means wait forever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_embedding_model() -> String {
    DEFAULT_EMBEDDING_MODEL.to_string()
}

fn default_embedding_chunk_limit() -> usize {
    DEFAULT_EMBEDDING_CHUNK_LIMIT
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_endpoint(),
            chat_model: None,
            embedding_model: default_embedding_model(),
            embedding_chunk_limit: default_embedding_chunk_limit(),
            request_timeout_secs: None,
        }
    }
}

impl ProviderConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = Some(model.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_embedding_chunk_limit(mut self, limit: usize) -> Self {
        self.embedding_chunk_limit = limit;
        self
    }

    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML string
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Defaults overlaid with process environment
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Same as [`apply_env_overrides`](Self::apply_env_overrides) with an
    /// explicit lookup, so callers can layer their own settings source.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("OPEN_AI_KEY") {
            self.api_key = key;
        }

        if let Some(endpoint) = lookup("OPEN_AI_ENDPOINT") {
            tracing::info!("Environment override: OPEN_AI_ENDPOINT={}", endpoint);
            self.endpoint = endpoint;
        }

        if let Some(model) = lookup("OPEN_MODEL_PREF").filter(|m| !m.is_empty()) {
            tracing::info!("Environment override: OPEN_MODEL_PREF={}", model);
            self.chat_model = Some(model);
        }

        if let Some(model) = lookup("OPEN_EMBEDDING_MODEL_PREF").filter(|m| !m.is_empty()) {
            tracing::info!("Environment override: OPEN_EMBEDDING_MODEL_PREF={}", model);
            self.embedding_model = model;
        }

        if let Some(val) = lookup("OPEN_AI_TIMEOUT_SECS") {
            match val.trim().parse::<u64>() {
                Ok(secs) => self.request_timeout_secs = Some(secs),
                Err(_) => tracing::warn!(
                    "Invalid value for OPEN_AI_TIMEOUT_SECS: '{}'. Expected seconds. Ignoring.",
                    val
                ),
            }
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_key.is_empty() {
            anyhow::bail!("api_key cannot be empty");
        }

        if self.endpoint.is_empty() {
            anyhow::bail!("endpoint cannot be empty");
        }

        if self.embedding_model.is_empty() {
            anyhow::bail!("embedding_model cannot be empty");
        }

        if self.embedding_chunk_limit == 0 {
            anyhow::bail!("embedding_chunk_limit must be at least 1");
        }

        if self.request_timeout_secs == Some(0) {
            anyhow::bail!("request_timeout_secs must be positive when set");
        }

        Ok(())
    }
}
