// Environment variable loading

use crate::{ConfigError, Result};
use std::collections::HashMap;
use std::env;

/// Environment variable loader
///
/// With a prefix, only `PREFIX_*` variables are read and the prefix is
/// stripped: `FORMWORK_DEFAULT_LOCALE` becomes `default_locale`.
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Load all matching environment variables
    pub fn load(&self) -> Result<HashMap<String, String>> {
        Ok(self.filter(env::vars()))
    }

    /// Apply the prefix rules to an arbitrary set of variables
    pub fn filter(&self, vars: impl IntoIterator<Item = (String, String)>) -> HashMap<String, String> {
        let mut config = HashMap::new();

        for (key, value) in vars {
            match self.prefix {
                Some(ref prefix) => {
                    if let Some(rest) = key.strip_prefix(prefix.as_str()) {
                        let trimmed = rest.trim_start_matches('_');
                        if !trimmed.is_empty() {
                            config.insert(trimmed.to_lowercase(), value);
                        }
                    }
                }
                None => {
                    config.insert(key.to_lowercase(), value);
                }
            }
        }

        config
    }

    /// Load a specific environment variable
    pub fn load_var(&self, key: &str) -> Result<String> {
        let full_key = match self.prefix {
            Some(ref prefix) => format!("{}_{}", prefix, key.to_uppercase()),
            None => key.to_uppercase(),
        };

        env::var(&full_key).map_err(|_| ConfigError::Env(full_key))
    }

    /// Load with default value
    pub fn load_var_or(&self, key: &str, default: &str) -> String {
        self.load_var(key).unwrap_or_else(|_| default.to_string())
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_prefix_is_stripped_and_lowercased() {
        let loader = EnvLoader::new(Some("FORMWORK".to_string()));
        let config = loader.filter(vars(&[
            ("FORMWORK_DEFAULT_LOCALE", "es"),
            ("FORMWORK_RESPONSE_MODE", "rendered"),
            ("HOME", "/root"),
            ("FORMWORK", "bare"),
        ]));

        assert_eq!(config.get("default_locale").map(String::as_str), Some("es"));
        assert_eq!(config.get("response_mode").map(String::as_str), Some("rendered"));
        assert_eq!(config.len(), 2);
    }

    #[test]
    fn test_no_prefix_keeps_everything() {
        let loader = EnvLoader::default();
        let config = loader.filter(vars(&[("PATH", "/bin"), ("LANG", "C")]));
        assert_eq!(config.get("path").map(String::as_str), Some("/bin"));
        assert_eq!(config.len(), 2);
    }

    #[test]
    fn test_load_var_or_default() {
        let loader = EnvLoader::new(Some("FORMWORK_TEST".to_string()));
        assert_eq!(loader.load_var_or("NONEXISTENT_12345", "fallback"), "fallback");
        assert!(loader.load_var("NONEXISTENT_12345").is_err());
    }
}
