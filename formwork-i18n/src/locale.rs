//! Locale parsing
//!
//! Only the language subtag selects a message table; a region is kept for
//! display but never changes which templates are used.

use crate::{I18nError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Three-letter codes accepted for the bundled languages.
const ALIASES: &[(&str, &str)] = &[("eng", "en"), ("esp", "es"), ("spa", "es")];

/// A language code with an optional region.
///
/// # Examples
///
/// ```
/// use formwork_i18n::Locale;
///
/// let es = Locale::parse("es_MX").unwrap();
/// assert_eq!(es.language, "es");
/// assert_eq!(es.tag(), "es-MX");
///
/// // Three-letter codes resolve to the bundled languages
/// assert_eq!(Locale::parse("ENG").unwrap(), Locale::en());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locale {
    /// Lower-case language code (ISO 639-1 where one exists)
    pub language: String,
    /// Upper-case region code, if any
    pub region: Option<String>,
}

impl Locale {
    /// Create a locale from an already normalized language code.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into().to_lowercase(),
            region: None,
        }
    }

    /// Parse a tag such as `en`, `es-MX`, `pt_BR` or `eng`.
    ///
    /// The language subtag must be two or three ASCII letters. Later
    /// subtags are scanned for a two-letter region; scripts and variants
    /// are dropped.
    pub fn parse(tag: &str) -> Result<Self> {
        let mut parts = tag.trim().split(['-', '_']);

        let language = parts
            .next()
            .map(str::to_ascii_lowercase)
            .filter(|l| (2..=3).contains(&l.len()) && l.chars().all(|c| c.is_ascii_alphabetic()))
            .ok_or_else(|| I18nError::InvalidLocale(tag.to_string()))?;

        let language = ALIASES
            .iter()
            .find(|(alias, _)| *alias == language)
            .map(|(_, canonical)| canonical.to_string())
            .unwrap_or(language);

        let region = parts
            .find(|p| p.len() == 2 && p.chars().all(|c| c.is_ascii_alphabetic()))
            .map(str::to_ascii_uppercase);

        Ok(Self { language, region })
    }

    /// Full tag, e.g. `es-MX`.
    pub fn tag(&self) -> String {
        match &self.region {
            Some(region) => format!("{}-{}", self.language, region),
            None => self.language.clone(),
        }
    }

    /// English
    pub fn en() -> Self {
        Self::new("en")
    }

    /// Spanish
    pub fn es() -> Self {
        Self::new("es")
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::en()
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}
