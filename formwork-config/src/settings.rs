// Typed validation settings

use crate::{ConfigError, ConfigManager, ENV_PREFIX, Result};
use formwork_core::ResponseMode;
use formwork_i18n::Locale;
use serde::{Deserialize, Deserializer, Serialize};

/// Trait for validating configuration
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Process-wide defaults for the validation engine
///
/// Read from `FORMWORK_DEFAULT_LOCALE`, `FORMWORK_RESPONSE_MODE` and
/// `FORMWORK_SUPPORTED_LOCALES` (comma separated), or from the same keys
/// without prefix in a JSON/TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSettings {
    #[serde(default = "default_locale")]
    pub default_locale: String,

    #[serde(default)]
    pub response_mode: ResponseMode,

    #[serde(
        default = "default_supported_locales",
        deserialize_with = "string_or_list"
    )]
    pub supported_locales: Vec<String>,
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_supported_locales() -> Vec<String> {
    vec!["en".to_string(), "es".to_string()]
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrList {
    String(String),
    List(Vec<String>),
}

fn string_or_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match StringOrList::deserialize(deserializer)? {
        StringOrList::String(s) => s.split(',').map(str::to_string).collect(),
        StringOrList::List(list) => list,
    };

    Ok(items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            response_mode: ResponseMode::default(),
            supported_locales: default_supported_locales(),
        }
    }
}

impl ValidationSettings {
    /// Deserialize and validate from a populated manager
    pub fn from_manager(manager: &ConfigManager) -> Result<Self> {
        manager.load_validated()
    }

    /// Read from `FORMWORK_*` environment variables
    pub fn from_env() -> Result<Self> {
        let manager = ConfigManager::with_prefix(ENV_PREFIX);
        manager.load_env()?;
        Self::from_manager(&manager)
    }

    /// The parsed default locale
    pub fn locale(&self) -> Result<Locale> {
        Locale::parse(&self.default_locale)
            .map_err(|e| ConfigError::invalid("default_locale", e))
    }

    /// Resolve a requested locale, falling back to the default when the
    /// tag is malformed or its language is not supported.
    pub fn resolve_locale(&self, requested: Option<&str>) -> Result<Locale> {
        let requested = requested.and_then(|tag| Locale::parse(tag).ok());
        match requested {
            Some(locale) if self.supports(&locale) => Ok(locale),
            _ => self.locale(),
        }
    }

    /// Whether the locale's language is listed in `supported_locales`
    pub fn supports(&self, locale: &Locale) -> bool {
        self.supported_locales
            .iter()
            .filter_map(|tag| Locale::parse(tag).ok())
            .any(|supported| supported.language == locale.language)
    }
}

impl Validate for ValidationSettings {
    fn validate(&self) -> Result<()> {
        self.locale()?;

        for tag in &self.supported_locales {
            Locale::parse(tag).map_err(|e| ConfigError::invalid("supported_locales", e))?;
        }

        Ok(())
    }
}
