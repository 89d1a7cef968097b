//! Localized Validation Messages for Formwork
//!
//! - **Locales**: language codes with region stripping and three-letter aliases
//! - **Catalogs**: immutable locale → rule key → template tables
//! - **Formatting**: literal `:placeholder` substitution
//!
//! # Quick Start
//!
//! ```rust
//! use formwork_i18n::{Catalog, Locale, format_template};
//!
//! let catalog = Catalog::bundled();
//! let es = Locale::parse("es-MX").unwrap();
//!
//! let template = catalog.template(&es, "min_length").unwrap();
//! let msg = format_template(template, &[(":field", "password"), (":min_length", "6")]);
//! assert_eq!(msg, "El campo 'password' debe tener al menos 6 caracteres");
//! ```

mod bundled;
mod error;
mod format;
mod locale;
mod messages;

pub use bundled::{ENGLISH, SPANISH};
pub use error::I18nError;
pub use format::format_template;
pub use locale::Locale;
pub use messages::{Catalog, CatalogBuilder, MessageBundle};

/// Result type for i18n operations
pub type Result<T> = std::result::Result<T, I18nError>;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{Catalog, CatalogBuilder, I18nError, Locale, MessageBundle, format_template};
}
