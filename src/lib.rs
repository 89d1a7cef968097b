// Formwork - declarative input validation
//
// Field rules are declared once per entity; raw request input is checked
// against every rule and either becomes a typed entity or a localized
// failure ready to send back as JSON or HTML.

// Re-export the validation engine
pub use formwork_validation::*;

// Re-export member crates
pub use formwork_core;
pub use formwork_i18n;
pub use formwork_log;

#[cfg(feature = "config")]
pub use formwork_config;

pub use formwork_core::{Error, HttpRequest, HttpResponse, RawInput, ResponseMode};
pub use formwork_i18n::{Catalog, CatalogBuilder, Locale, MessageBundle};

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Catalog, Entity, FieldDescriptor, FormatKind, HttpRequest, HttpResponse, Locale,
        RawInput, ResponseMode, RuleKey, Schema, ValidatedValues, ValidationErrors,
        ValidationFailure, Validator,
    };

    #[cfg(feature = "config")]
    pub use crate::{PipeError, ValidationPipe};
    #[cfg(feature = "config")]
    pub use formwork_config::ValidationSettings;
}
