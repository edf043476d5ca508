use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Config compiled into the bundle. The browser has no filesystem or env.
const EMBEDDED_CONFIG: &str = include_str!("../../arbitrage-bets.toml");

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedConfig {
    /// Endpoint returning `{ source_id: [opportunity, ...], ... }`.
    #[serde(default = "default_feed_url")]
    pub url: String,
    /// Seconds between refreshes.
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_feed_url() -> String {
    "https://api.arbitrage-bets.nl/get_data".to_string()
}
fn default_refresh_interval_secs() -> u64 {
    600
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            refresh_interval_secs: default_refresh_interval_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl FeedConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

impl LoggingConfig {
    /// Configured level, INFO when the string is not a tracing level.
    pub fn tracing_level(&self) -> tracing::Level {
        tracing::Level::from_str(self.level.trim()).unwrap_or(tracing::Level::INFO)
    }
}

impl Config {
    /// Parse and validate a TOML document. Missing sections take defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// The config bundled at build time.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_toml_str(EMBEDDED_CONFIG)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feed.url.trim().is_empty() {
            return Err(ConfigError::Invalid("feed.url must not be empty".into()));
        }
        if self.feed.refresh_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "feed.refresh_interval_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.feed.url, "https://api.arbitrage-bets.nl/get_data");
        assert_eq!(config.feed.refresh_interval(), Duration::from_secs(600));
        assert_eq!(config.logging.tracing_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_partial_overrides() {
        let config = Config::from_toml_str(
            r#"
            [feed]
            refresh_interval_secs = 30

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.feed.url, default_feed_url());
        assert_eq!(config.feed.refresh_interval_secs, 30);
        assert_eq!(config.logging.tracing_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_rejects_zero_interval_and_empty_url() {
        let err = Config::from_toml_str("[feed]\nrefresh_interval_secs = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = Config::from_toml_str("[feed]\nurl = \"  \"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = Config::from_toml_str("[feed\nurl = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_unknown_level_falls_back_to_info() {
        let logging = LoggingConfig {
            level: "chatty".to_string(),
        };
        assert_eq!(logging.tracing_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_embedded_config_is_valid() {
        Config::embedded().unwrap();
    }
}
