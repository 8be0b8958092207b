//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::seed::DEFAULT_CATALOG_VERSION;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Plain,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the durable slot
    pub data_dir: PathBuf,

    /// Fixed, versioned key of the durable slot
    pub store_key: String,

    /// Products at or below this quantity count as low stock
    pub low_stock_threshold: u32,

    /// Log output format
    pub log_format: LogFormat,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup("DATA_DIR")
            .unwrap_or_else(|| "./data".to_string())
            .into();

        let store_key = lookup("STORE_KEY").unwrap_or_else(|| DEFAULT_CATALOG_VERSION.to_string());
        if store_key.trim().is_empty() || store_key.contains(['/', '\\']) {
            return Err(ConfigError::InvalidValue("STORE_KEY"));
        }

        let low_stock_threshold = lookup("LOW_STOCK_THRESHOLD")
            .unwrap_or_else(|| "5".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("LOW_STOCK_THRESHOLD"))?;

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("plain") => LogFormat::Plain,
            Some("json") => LogFormat::Json,
            Some(_) => return Err(ConfigError::InvalidValue("LOG_FORMAT")),
        };

        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        Ok(Self {
            data_dir,
            store_key,
            low_stock_threshold,
            log_format,
            environment,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.store_key, "wings_cafe_db_v1");
        assert_eq!(config.low_stock_threshold, 5);
        assert_eq!(config.log_format, LogFormat::Plain);
        assert!(!config.is_production());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("DATA_DIR", "/var/lib/pos"),
            ("STORE_KEY", "shop_v2"),
            ("LOW_STOCK_THRESHOLD", "3"),
            ("LOG_FORMAT", "json"),
            ("ENVIRONMENT", "production"),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/pos"));
        assert_eq!(config.store_key, "shop_v2");
        assert_eq!(config.low_stock_threshold, 3);
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.is_production());
    }

    #[test]
    fn test_invalid_threshold() {
        let result = Config::from_lookup(lookup(&[("LOW_STOCK_THRESHOLD", "-1")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue("LOW_STOCK_THRESHOLD"))));
    }

    #[test]
    fn test_invalid_store_key() {
        let result = Config::from_lookup(lookup(&[("STORE_KEY", "../escape")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue("STORE_KEY"))));
    }
}
