//! Settings structures for BraveSearch-RS configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Main settings structure loaded from settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    pub api: ApiSettings,
    pub rate_limit: RateLimitSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Merge overrides from an arbitrary variable lookup
    pub fn merge_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("BRAVE_API_KEY") {
            self.api.api_key = Some(val);
        }
        if let Some(val) = lookup("BRAVESEARCH_BASE_URL") {
            self.api.base_url = val;
        }
        if let Some(val) = lookup("BRAVESEARCH_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("BRAVESEARCH_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = lookup("BRAVESEARCH_RATE_PER_SECOND") {
            if let Ok(limit) = val.parse() {
                self.rate_limit.per_second = limit;
            }
        }
        if let Some(val) = lookup("BRAVESEARCH_RATE_PER_PERIOD") {
            if let Ok(limit) = val.parse() {
                self.rate_limit.per_period = limit;
            }
        }
    }

    /// Check the settings are usable for serving requests
    pub fn validate(&self) -> Result<()> {
        match self.api.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {}
            _ => bail!("BRAVE_API_KEY environment variable is required"),
        }
        if let Err(e) = Url::parse(&self.api.base_url) {
            bail!("Invalid api.base_url '{}': {}", self.api.base_url, e);
        }
        if self.rate_limit.per_second == 0 || self.rate_limit.per_period == 0 {
            bail!("rate_limit.per_second and rate_limit.per_period must be positive");
        }
        Ok(())
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8765,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Pool max size
    pub pool_maxsize: usize,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 10.0,
            pool_maxsize: 10,
        }
    }
}

/// Brave Search API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Scheme and host the endpoint paths are resolved against
    pub base_url: String,
    /// Subscription token sent with every request
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Language used for location discovery
    pub search_lang: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.search.brave.com".to_string(),
            api_key: None,
            search_lang: "en".to_string(),
        }
    }
}

/// Quota settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitSettings {
    /// Calls allowed within one second
    pub per_second: u64,
    /// Calls allowed for the life of the process
    pub per_period: u64,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            per_second: 1,
            per_period: 15000,
        }
    }
}
