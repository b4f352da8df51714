//! Runtime configuration.
//!
//! Settings come from the environment so the binary can run without a
//! config file.  `AUDIT_LOG_LEVEL` sets the default filter (`RUST_LOG`
//! still wins when present) and `AUDIT_LOG_FORMAT` picks `text` or
//! `json` output.

use serde::{Deserialize, Serialize};

pub const ENV_LOG_LEVEL: &str = "AUDIT_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "AUDIT_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Unknown values fall back to text.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            level: lookup(ENV_LOG_LEVEL)
                .filter(|level| !level.trim().is_empty())
                .unwrap_or(defaults.level),
            format: lookup(ENV_LOG_FORMAT)
                .map(|format| LogFormat::parse(&format))
                .unwrap_or(defaults.format),
        }
    }
}
