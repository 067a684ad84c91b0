//! Configuration Management Module
//!
//! This module handles loading and managing configuration for the bridge ledger
//! client. Configuration covers the indexing service endpoint, paging defaults,
//! request timeouts and how strictly responses are validated.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::{PageSize, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::schema::UnknownFields;

/// Environment variable that overrides the default config location.
pub const CONFIG_PATH_ENV: &str = "BRIDGE_LEDGER_CONFIG_PATH";

/// Config location used when neither a path nor the env var is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/ledger.toml";

// ============================================================================
// CONFIGURATION STRUCTURES
// ============================================================================

/// Main configuration structure containing all client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Indexing service connection settings
    pub api: ApiConfig,
    /// Response validation settings
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Connection settings for the bridge indexing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the indexing service (e.g., "http://127.0.0.1:8080")
    pub base_url: String,
    /// Default number of deposits per listing page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Timeout for a single request in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Whether keys outside the response schema are rejected or ignored
    #[serde(default)]
    pub unknown_fields: UnknownFields,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

// ============================================================================
// CONFIGURATION LOADING AND MANAGEMENT
// ============================================================================

impl Config {
    /// Validates the configuration.
    ///
    /// Checks:
    /// - The base URL parses as an absolute URL that can carry a path
    /// - The page size lies within `1..=MAX_PAGE_SIZE`
    /// - The request timeout is non-zero
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Configuration is valid
    /// * `Err(anyhow::Error)` - Validation failed with error message
    pub fn validate(&self) -> anyhow::Result<()> {
        let url = url::Url::parse(&self.api.base_url).map_err(|e| {
            anyhow::anyhow!(
                "Configuration error: api.base_url '{}' is not a valid URL: {}",
                self.api.base_url,
                e
            )
        })?;
        if url.cannot_be_a_base() {
            anyhow::bail!(
                "Configuration error: api.base_url '{}' cannot be used as a base URL",
                self.api.base_url
            );
        }

        if PageSize::new(self.api.page_size).is_none() {
            anyhow::bail!(
                "Configuration error: api.page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE,
                self.api.page_size
            );
        }

        if self.api.request_timeout_ms == 0 {
            anyhow::bail!("Configuration error: api.request_timeout_ms must be greater than zero");
        }

        Ok(())
    }

    /// Resolves the config file location.
    ///
    /// Priority: explicit path > `BRIDGE_LEDGER_CONFIG_PATH` > `config/ledger.toml`.
    pub fn resolve_path(path: Option<&str>) -> String {
        path.map(|p| p.to_string())
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
    }

    /// Loads and validates configuration from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Optional explicit path; see [`Config::resolve_path`]
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated configuration
    /// * `Err(anyhow::Error)` - File missing, unparsable, or invalid
    pub fn load_from_path(path: Option<&str>) -> anyhow::Result<Self> {
        let config_path = Self::resolve_path(path);

        if std::path::Path::new(&config_path).exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Err(anyhow::anyhow!(
                "Configuration file '{}' not found. Please copy the template:\n\
                cp config/ledger.template.toml config/ledger.toml\n\
                Then edit config/ledger.toml with your actual values.",
                config_path
            ))
        }
    }

    /// Loads configuration from the default location (or the env var override).
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from_path(None)
    }

    /// Default listing page size as a bounded value.
    ///
    /// Falls back to [`DEFAULT_PAGE_SIZE`] for an unvalidated out-of-range value.
    pub fn page_size(&self) -> PageSize {
        PageSize::new(self.api.page_size).unwrap_or_default()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.api.request_timeout_ms)
    }
}

impl Default for Config {
    /// Local development configuration.
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://127.0.0.1:8080".to_string(),
                page_size: DEFAULT_PAGE_SIZE,
                request_timeout_ms: default_request_timeout_ms(),
            },
            validation: ValidationConfig::default(),
        }
    }
}
