use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

use crate::providers::{exchange_host, exchangerate_api, fawaz};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderEndpointConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub exchangerate_api: Option<ProviderEndpointConfig>,
    pub exchange_host: Option<ProviderEndpointConfig>,
    pub fawaz: Option<ProviderEndpointConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            exchangerate_api: Some(ProviderEndpointConfig {
                base_url: exchangerate_api::DEFAULT_BASE_URL.to_string(),
            }),
            exchange_host: Some(ProviderEndpointConfig {
                base_url: exchange_host::DEFAULT_BASE_URL.to_string(),
            }),
            fawaz: Some(ProviderEndpointConfig {
                base_url: fawaz::DEFAULT_BASE_URL.to_string(),
            }),
        }
    }
}

fn default_base() -> String {
    "USD".to_string()
}

fn default_target() -> String {
    "INR".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_rate_ttl_secs() -> u64 {
    300
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Default currency amounts are converted from.
    #[serde(default = "default_base")]
    pub base: String,
    /// Default currency amounts are converted to.
    #[serde(default = "default_target")]
    pub target: String,
    /// Per-request HTTP timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// How long a fetched rate sheet stays fresh in the process cache.
    #[serde(default = "default_rate_ttl_secs")]
    pub rate_ttl_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            providers: ProvidersConfig::default(),
            base: default_base(),
            target: default_target(),
            timeout_secs: default_timeout_secs(),
            rate_ttl_secs: default_rate_ttl_secs(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "kurs")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
providers:
  exchangerate_api:
    base_url: "http://example.com/era"
  exchange_host:
    base_url: "http://example.com/host"
  fawaz:
    base_url: "http://example.com/fawaz"
base: "EUR"
target: "GBP"
timeout_secs: 5
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(
            config.providers.exchangerate_api.unwrap().base_url,
            "http://example.com/era"
        );
        assert_eq!(
            config.providers.exchange_host.unwrap().base_url,
            "http://example.com/host"
        );
        assert_eq!(
            config.providers.fawaz.unwrap().base_url,
            "http://example.com/fawaz"
        );
        assert_eq!(config.base, "EUR");
        assert_eq!(config.target, "GBP");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.rate_ttl_secs, 300);
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("base: \"JPY\"").unwrap();
        assert_eq!(config.base, "JPY");
        assert_eq!(config.target, "INR");
        assert_eq!(config.timeout_secs, 10);
        assert!(config.providers.exchangerate_api.is_some());
        assert!(config.providers.fawaz.is_some());
    }
}
