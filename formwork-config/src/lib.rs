// Configuration management for Formwork

pub mod env;
pub mod error;
pub mod loader;
pub mod settings;

pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use settings::{Validate, ValidationSettings};

use formwork_log::debug;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Prefix used for Formwork environment variables
pub const ENV_PREFIX: &str = "FORMWORK";

/// Key/value configuration store
///
/// Values from later loads overwrite earlier ones, so load the most
/// general source first.
#[derive(Clone, Default)]
pub struct ConfigManager {
    config: Arc<RwLock<HashMap<String, serde_json::Value>>>,
    env_prefix: Option<String>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with environment variable prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            config: Arc::default(),
            env_prefix: Some(prefix.into()),
        }
    }

    /// Load configuration from environment variables
    pub fn load_env(&self) -> Result<()> {
        let loader = EnvLoader::new(self.env_prefix.clone());
        self.extend_strings(loader.load()?);
        Ok(())
    }

    /// Load variables from a `.env` file into the process, then [`load_env`].
    ///
    /// Without a path a missing `.env` is not an error.
    ///
    /// [`load_env`]: ConfigManager::load_env
    pub fn load_dotenv(&self, path: Option<&Path>) -> Result<()> {
        match path {
            Some(path) => {
                dotenvy::from_path(path)?;
            }
            None => {
                if let Err(e) = dotenvy::dotenv() {
                    debug!("no .env file loaded: {}", e);
                }
            }
        }
        self.load_env()
    }

    /// Load configuration from a file; the format follows the extension
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = ConfigLoader::auto(path)?.load_file(path)?;
        self.extend_value(data)?;
        debug!("loaded configuration from {:?}", path);
        Ok(())
    }

    /// Load configuration from a string in the given format
    pub fn load_str(&self, content: &str, format: FileFormat) -> Result<()> {
        let data = ConfigLoader::new(format).parse(content)?;
        self.extend_value(data)
    }

    fn extend_value(&self, data: serde_json::Value) -> Result<()> {
        match data {
            serde_json::Value::Object(map) => {
                self.config.write().extend(map);
                Ok(())
            }
            other => Err(ConfigError::Parse {
                format: "top-level",
                message: format!("expected a table, got {}", other),
            }),
        }
    }

    fn extend_strings(&self, values: HashMap<String, String>) {
        let mut config = self.config.write();
        for (key, value) in values {
            config.insert(key, serde_json::Value::String(value));
        }
    }

    /// Set a configuration value
    pub fn set<T: serde::Serialize>(&self, key: &str, value: T) -> Result<()> {
        let json_value = serde_json::to_value(value)?;

        self.config.write().insert(key.to_string(), json_value);
        Ok(())
    }

    /// Get a configuration value
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let config = self.config.read();
        let value = config
            .get(key)
            .ok_or_else(|| ConfigError::Missing(key.to_string()))?;

        Ok(serde_json::from_value(value.clone())?)
    }

    /// Get a configuration value with default
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Check if a key exists
    pub fn has(&self, key: &str) -> bool {
        self.config.read().contains_key(key)
    }

    /// All configuration keys
    pub fn keys(&self) -> Vec<String> {
        self.config.read().keys().cloned().collect()
    }

    /// Copy every value of `other` into this manager
    pub fn merge(&self, other: &ConfigManager) {
        let other_config = other.config.read().clone();
        self.config.write().extend(other_config);
    }

    /// Deserialize the whole store into `T` and validate it
    pub fn load_validated<T: DeserializeOwned + Validate>(&self) -> Result<T> {
        let json_value = serde_json::Value::Object(
            self.config
                .read()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        );

        let validated: T = serde_json::from_value(json_value)?;

        validated.validate()?;
        Ok(validated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let manager = ConfigManager::new();
        manager.set("default_locale", "es").unwrap();

        let value: String = manager.get("default_locale").unwrap();
        assert_eq!(value, "es");
    }

    #[test]
    fn test_get_or_default() {
        let manager = ConfigManager::new();
        let value: String = manager.get_or("missing_key", "en".to_string());
        assert_eq!(value, "en");
    }

    #[test]
    fn test_missing_key() {
        let manager = ConfigManager::new();
        assert!(matches!(
            manager.get::<String>("nope"),
            Err(ConfigError::Missing(_))
        ));
        assert!(!manager.has("nope"));
    }

    #[test]
    fn test_later_loads_overwrite() {
        let manager = ConfigManager::new();
        manager
            .load_str(r#"{"default_locale": "en", "response_mode": "json"}"#, FileFormat::Json)
            .unwrap();
        manager
            .load_str("default_locale = \"es\"", FileFormat::Toml)
            .unwrap();

        assert_eq!(manager.get::<String>("default_locale").unwrap(), "es");
        assert_eq!(manager.get::<String>("response_mode").unwrap(), "json");
    }

    #[test]
    fn test_non_table_is_rejected() {
        let manager = ConfigManager::new();
        assert!(manager.load_str("[1, 2]", FileFormat::Json).is_err());
    }

    #[test]
    fn test_merge() {
        let a = ConfigManager::new();
        let b = ConfigManager::new();
        a.set("default_locale", "en").unwrap();
        b.set("default_locale", "es").unwrap();
        b.set("response_mode", "rendered").unwrap();

        a.merge(&b);
        assert_eq!(a.get::<String>("default_locale").unwrap(), "es");
        assert!(a.has("response_mode"));
        assert_eq!(a.keys().len(), 2);
    }
}
