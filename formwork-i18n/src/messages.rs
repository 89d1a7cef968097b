//! Message catalogs
//!
//! A [`Catalog`] is built once (usually at startup) and then only read. It
//! is `Send + Sync` and meant to be shared behind an `Arc`.

use crate::{ENGLISH, I18nError, Locale, Result, SPANISH};
use formwork_log::{debug, warn};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

static BUNDLED: Lazy<Arc<Catalog>> = Lazy::new(|| Arc::new(Catalog::bundled()));

/// Templates for a single language, keyed by rule key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBundle {
    messages: HashMap<String, String>,
}

impl MessageBundle {
    /// Create a new empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a bundle from `(key, template)` pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = &'a (&'a str, &'a str)>) -> Self {
        let mut bundle = Self::new();
        for (key, template) in pairs {
            bundle.add(*key, *template);
        }
        bundle
    }

    /// Load from a JSON object of strings.
    ///
    /// Nested objects are flattened with `.` separators; non-string leaves
    /// are skipped.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: serde_json::Value = serde_json::from_str(json)?;
        let serde_json::Value::Object(map) = data else {
            return Err(I18nError::MalformedBundle(
                "message file must contain a JSON object".to_string(),
            ));
        };

        let mut bundle = Self::new();
        bundle.flatten_into("", map);
        Ok(bundle)
    }

    fn flatten_into(&mut self, prefix: &str, map: serde_json::Map<String, serde_json::Value>) {
        for (key, value) in map {
            let key = if prefix.is_empty() {
                key
            } else {
                format!("{}.{}", prefix, key)
            };

            match value {
                serde_json::Value::String(s) => {
                    self.messages.insert(key, s);
                }
                serde_json::Value::Object(nested) => self.flatten_into(&key, nested),
                _ => debug!("skipping non-string message {}", key),
            }
        }
    }

    /// Add or replace a template.
    pub fn add(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.messages.insert(key.into(), template.into());
    }

    /// Overlay `other` on top of this bundle, key by key.
    pub fn merge(&mut self, other: MessageBundle) {
        self.messages.extend(other.messages);
    }

    /// Get a template.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    /// Check if the bundle has a template.
    pub fn has(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    /// All keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.messages.keys()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Read-only table of locale → rule key → template.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    bundles: HashMap<String, MessageBundle>,
}

impl Catalog {
    /// A catalog with no bundles; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The English and Spanish tables shipped with the crate.
    pub fn bundled() -> Self {
        CatalogBuilder::new().with_bundled().build()
    }

    /// Process-wide shared instance of [`Catalog::bundled`].
    pub fn shared() -> Arc<Catalog> {
        Arc::clone(&BUNDLED)
    }

    /// Start building a catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Look up the template for `key` in the locale's language.
    ///
    /// There is no cross-language fallback: a missing language or key
    /// yields `None`.
    pub fn template(&self, locale: &Locale, key: &str) -> Option<&str> {
        self.bundles.get(&locale.language)?.get(key)
    }

    /// Bundle for a language, if present.
    pub fn bundle(&self, locale: &Locale) -> Option<&MessageBundle> {
        self.bundles.get(&locale.language)
    }

    /// Whether any templates exist for the locale's language.
    pub fn supports(&self, locale: &Locale) -> bool {
        self.bundles.contains_key(&locale.language)
    }

    /// Languages with a bundle, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut langs: Vec<&str> = self.bundles.keys().map(String::as_str).collect();
        langs.sort_unstable();
        langs
    }
}

/// Builder for [`Catalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    bundles: HashMap<String, MessageBundle>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the bundled English and Spanish tables.
    pub fn with_bundled(self) -> Self {
        self.bundle(&Locale::en(), MessageBundle::from_pairs(ENGLISH))
            .bundle(&Locale::es(), MessageBundle::from_pairs(SPANISH))
    }

    /// Add a bundle, overlaying any templates already present for the language.
    pub fn bundle(mut self, locale: &Locale, bundle: MessageBundle) -> Self {
        self.bundles
            .entry(locale.language.clone())
            .or_default()
            .merge(bundle);
        self
    }

    /// Add or replace a single template.
    pub fn message(
        mut self,
        locale: &Locale,
        key: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.bundles
            .entry(locale.language.clone())
            .or_default()
            .add(key, template);
        self
    }

    /// Load one `<locale>.json` file.
    pub fn load_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| I18nError::MalformedBundle(format!("invalid file name: {:?}", path)))?;

        let locale = Locale::parse(stem)?;
        let bundle = MessageBundle::from_json(&fs::read_to_string(path)?)?;
        debug!("loaded {} messages for {} from {:?}", bundle.len(), locale, path);

        Ok(self.bundle(&locale, bundle))
    }

    /// Load every `<locale>.json` file in a directory.
    ///
    /// Files whose name is not a locale tag are skipped with a warning.
    pub fn load_from_dir(mut self, dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(I18nError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("directory not found: {:?}", dir),
            )));
        }

        let mut paths: Vec<_> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        for path in paths {
            let is_locale = path
                .file_stem()
                .and_then(|s| s.to_str())
                .is_some_and(|stem| Locale::parse(stem).is_ok());

            if !is_locale {
                warn!("skipping {:?}: file name is not a locale tag", path);
                continue;
            }

            self = self.load_file(&path)?;
        }

        Ok(self)
    }

    /// Freeze into an immutable catalog.
    pub fn build(self) -> Catalog {
        Catalog {
            bundles: self.bundles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_lookup() {
        let catalog = Catalog::bundled();
        assert_eq!(
            catalog.template(&Locale::en(), "required"),
            Some("Field ':field' is required")
        );
        assert_eq!(
            catalog.template(&Locale::es(), "required"),
            Some("El campo ':field' es obligatorio")
        );
        assert_eq!(catalog.languages(), vec!["en", "es"]);
    }

    #[test]
    fn test_region_uses_language_table() {
        let catalog = Catalog::bundled();
        let es_ar = Locale::parse("es-AR").unwrap();
        assert!(catalog.supports(&es_ar));
        assert!(catalog.template(&es_ar, "email").is_some());
    }

    #[test]
    fn test_missing_locale_or_key() {
        let catalog = Catalog::bundled();
        assert_eq!(catalog.template(&Locale::new("fr"), "required"), None);
        assert_eq!(catalog.template(&Locale::en(), "unknown_rule"), None);
        assert_eq!(Catalog::empty().template(&Locale::en(), "required"), None);
    }

    #[test]
    fn test_builder_overlays_messages() {
        let catalog = Catalog::builder()
            .with_bundled()
            .message(&Locale::en(), "required", "Please fill in :field")
            .message(&Locale::new("fr"), "required", "Le champ :field est obligatoire")
            .build();

        assert_eq!(catalog.template(&Locale::en(), "required"), Some("Please fill in :field"));
        // Other English templates survive the overlay
        assert!(catalog.template(&Locale::en(), "email").is_some());
        assert!(catalog.supports(&Locale::new("fr")));
    }

    #[test]
    fn test_bundle_from_json() {
        let bundle = MessageBundle::from_json(
            r#"{"required": "Obligatorio", "nested": {"email": "Correo"}, "count": 3}"#,
        )
        .unwrap();

        assert_eq!(bundle.get("required"), Some("Obligatorio"));
        assert_eq!(bundle.get("nested.email"), Some("Correo"));
        assert!(!bundle.has("count"));
        assert_eq!(bundle.len(), 2);
    }

    #[test]
    fn test_bundle_from_json_rejects_non_objects() {
        assert!(matches!(
            MessageBundle::from_json("[]"),
            Err(I18nError::MalformedBundle(_))
        ));
        assert!(matches!(
            MessageBundle::from_json("{"),
            Err(I18nError::Json(_))
        ));
    }

    #[test]
    fn test_shared_catalog_is_reused() {
        let a = Catalog::shared();
        let b = Catalog::shared();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
