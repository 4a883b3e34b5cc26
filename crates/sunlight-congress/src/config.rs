use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Client configuration loaded from multiple sources.
///
/// Configuration is loaded in priority order (lowest to highest):
/// 1. Struct defaults
/// 2. sunlight.yaml file (if exists)
/// 3. `SUNLIGHT_KEY` environment variable (API key only)
/// 4. Environment variables with `SUNLIGHT_` prefix (always wins)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Base URL every endpoint path is resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent as `apikey` on every request. Empty keys are passed
    /// through; the service rejects them.
    #[serde(default)]
    pub api_key: String,

    /// Minimum score (0 to 1) for fuzzy name search results.
    #[serde(default = "default_search_threshold")]
    pub search_threshold: f64,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://services.sunlightlabs.com/api/".to_string()
}

// These functions cannot be const because serde uses function pointers for defaults
#[allow(clippy::missing_const_for_fn)]
fn default_search_threshold() -> f64 {
    0.8
}

#[allow(clippy::missing_const_for_fn)]
fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            search_threshold: default_search_threshold(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("sunlight.yaml")
    }

    /// Load configuration with a custom YAML file path.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_from(yaml_path: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path))
            .merge(Env::raw().only(&["SUNLIGHT_KEY"]).map(|_| "api_key".into()))
            .merge(Env::prefixed("SUNLIGHT_"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Override the API key explicitly.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Override the base URL, e.g. to point at a stub server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parsed base URL, always ending in `/` so endpoint paths append to it.
    ///
    /// # Errors
    /// Returns an error if `base_url` is not a valid absolute URL.
    pub fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        let raw = if self.base_url.ends_with('/') {
            self.base_url.clone()
        } else {
            format!("{}/", self.base_url)
        };
        Url::parse(&raw).map_err(|e| {
            ConfigError::Validation(format!("base_url '{}' is not a valid URL: {e}", self.base_url))
        })
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "base_url '{}' must start with http:// or https://",
                self.base_url
            )));
        }
        self.parsed_base_url()?;

        if !(0.0..=1.0).contains(&self.search_threshold) {
            return Err(ConfigError::Validation(format!(
                "search_threshold must be between 0 and 1, got: {}",
                self.search_threshold
            )));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation("timeout_secs cannot be 0".into()));
        }

        Ok(())
    }
}
