//! Configuration module - environment variable parsing

use std::env;
use std::path::PathBuf;

use crate::util::time::{RoundTiming, SHUFFLE_INTERVAL_MS, THINK_TOTAL_MS};

/// Log output format
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,

    /// Opponent deliberation pacing
    pub timing: RoundTiming,

    /// Path of the key/value preference file
    pub prefs_path: PathBuf,
    /// Fixed seed for the opponent RNG (entropy when absent)
    pub seed: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(_) => return Err(ConfigError::InvalidLogFormat),
        };

        let shuffle_ms = parse_u64(&lookup, "RPS_SHUFFLE_INTERVAL_MS")?.unwrap_or(SHUFFLE_INTERVAL_MS);
        let think_ms = parse_u64(&lookup, "RPS_THINK_TOTAL_MS")?.unwrap_or(THINK_TOTAL_MS);

        if shuffle_ms == 0 {
            return Err(ConfigError::ZeroDuration("RPS_SHUFFLE_INTERVAL_MS"));
        }
        if think_ms == 0 {
            return Err(ConfigError::ZeroDuration("RPS_THINK_TOTAL_MS"));
        }
        if shuffle_ms >= think_ms {
            return Err(ConfigError::ShuffleTooSlow);
        }

        Ok(Self {
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "warn".to_string()),
            log_format,
            timing: RoundTiming::from_millis(shuffle_ms, think_ms),
            prefs_path: lookup("RPS_PREFS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".rps-prefs.json")),
            seed: parse_u64(&lookup, "RPS_SEED")?,
        })
    }
}

fn parse_u64<F>(lookup: &F, key: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| raw.trim().parse().map_err(|_| ConfigError::InvalidNumber(key)))
        .transpose()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid numeric value for environment variable: {0}")]
    InvalidNumber(&'static str),

    #[error("Duration must be greater than zero: {0}")]
    ZeroDuration(&'static str),

    #[error("RPS_SHUFFLE_INTERVAL_MS must be shorter than RPS_THINK_TOTAL_MS")]
    ShuffleTooSlow,

    #[error("LOG_FORMAT must be \"text\" or \"json\"")]
    InvalidLogFormat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.timing, RoundTiming::default());
        assert_eq!(config.prefs_path, PathBuf::from(".rps-prefs.json"));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_from(&[
            ("LOG_LEVEL", "debug"),
            ("LOG_FORMAT", "json"),
            ("RPS_SHUFFLE_INTERVAL_MS", "250"),
            ("RPS_THINK_TOTAL_MS", "1000"),
            ("RPS_PREFS_PATH", "/tmp/prefs.json"),
            ("RPS_SEED", "42"),
        ])
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.timing.shuffle_interval, Duration::from_millis(250));
        assert_eq!(config.timing.think_total, Duration::from_millis(1000));
        assert_eq!(config.prefs_path, PathBuf::from("/tmp/prefs.json"));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            config_from(&[("RPS_SEED", "lots")]),
            Err(ConfigError::InvalidNumber("RPS_SEED"))
        ));
        assert!(matches!(
            config_from(&[("RPS_THINK_TOTAL_MS", "0")]),
            Err(ConfigError::ZeroDuration("RPS_THINK_TOTAL_MS"))
        ));
        assert!(matches!(
            config_from(&[("RPS_SHUFFLE_INTERVAL_MS", "3000")]),
            Err(ConfigError::ShuffleTooSlow)
        ));
        assert!(matches!(
            config_from(&[("LOG_FORMAT", "yaml")]),
            Err(ConfigError::InvalidLogFormat)
        ));
    }
}
