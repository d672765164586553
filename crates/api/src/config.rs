//! Service configuration, read from environment variables with defaults.

use std::path::PathBuf;

use thiserror::Error;

use segcast_forecast::ExecutionMode;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a boolean (true/false/1/0), got {value:?}")]
    InvalidBool { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub listen_addr: String,
    /// Directory enumerated for `forecaster_<SEGMENT>.json` artifacts.
    pub models_dir: PathBuf,
    /// Optional hierarchy JSON; the built-in hierarchy is used when unset.
    pub hierarchy_file: Option<PathBuf>,
    pub execution_mode: ExecutionMode,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            models_dir: PathBuf::from("models"),
            hierarchy_file: None,
            execution_mode: ExecutionMode::Sequential,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, test maps).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let parallel = match lookup("PARALLEL_SEGMENTS") {
            Some(v) => parse_bool("PARALLEL_SEGMENTS", &v)?,
            None => false,
        };

        Ok(Self {
            listen_addr: lookup("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            models_dir: lookup("MODELS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.models_dir),
            hierarchy_file: lookup("HIERARCHY_FILE")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            execution_mode: if parallel {
                ExecutionMode::Parallel
            } else {
                ExecutionMode::Sequential
            },
        })
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: value.to_string(),
        }),
    }
}
