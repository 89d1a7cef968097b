// Configuration errors

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration key not found: {0}")]
    Missing(String),

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),

    #[error("unsupported configuration file: {0}")]
    UnsupportedFormat(String),

    #[error("invalid {format} configuration: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    #[error("invalid setting `{key}`: {reason}")]
    InvalidSetting { key: String, reason: String },

    #[error("cannot convert configuration value: {0}")]
    Convert(#[from] serde_json::Error),

    #[error("environment variable {0} is unset or not unicode")]
    Env(String),
}

impl ConfigError {
    pub(crate) fn invalid(key: impl Into<String>, reason: impl ToString) -> Self {
        ConfigError::InvalidSetting {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
