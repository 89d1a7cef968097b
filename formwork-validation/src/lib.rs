//! Declarative validation for Formwork
//!
//! Fields are declared once in a [`Schema`] of [`FieldDescriptor`]s. The
//! [`Validator`] runs every applicable rule on every field, collects all
//! violations, and either hands back the checked values or a
//! [`ValidationFailure`] carrying localized messages and a ready-to-send
//! JSON or HTML payload.
//!
//! # Examples
//!
//! ## Validating an entity
//!
//! ```
//! use formwork_core::{RawInput, ResponseMode};
//! use formwork_i18n::Locale;
//! use formwork_validation::prelude::*;
//! use once_cell::sync::Lazy;
//! use serde_json::json;
//!
//! #[derive(Debug)]
//! struct Payment {
//!     card: String,
//!     amount: f64,
//! }
//!
//! static PAYMENT: Lazy<Schema> = Lazy::new(|| {
//!     Schema::new("Payment")
//!         .field("card", FieldDescriptor::new().format(FormatKind::CreditCard))
//!         .field("amount", FieldDescriptor::new().min(1).max(10_000))
//! });
//!
//! impl Entity for Payment {
//!     fn schema() -> &'static Schema {
//!         &PAYMENT
//!     }
//!
//!     fn from_validated(mut values: ValidatedValues) -> Self {
//!         Self {
//!             card: values.take_string("card").unwrap_or_default(),
//!             amount: values.get_f64("amount").unwrap_or_default(),
//!         }
//!     }
//! }
//!
//! let validator = Validator::default();
//!
//! let raw: RawInput = json!({"card": "4539 1488 0343 6467", "amount": "25.50"})
//!     .as_object()
//!     .cloned()
//!     .unwrap();
//! let payment: Payment = validator.validate(&raw, &Locale::en(), ResponseMode::Json).unwrap();
//! assert_eq!(payment.amount, 25.5);
//!
//! let raw: RawInput = json!({"card": "4539148803436468", "amount": 0})
//!     .as_object()
//!     .cloned()
//!     .unwrap();
//! let failure = validator
//!     .validate::<Payment>(&raw, &Locale::es(), ResponseMode::Json)
//!     .unwrap_err();
//! assert_eq!(
//!     failure.summary(),
//!     "El campo 'card' debe ser un número de tarjeta de crédito válido , \
//!      El campo 'amount' debe ser como mínimo 1 ."
//! );
//! ```
//!
//! ## Format checks on their own
//!
//! ```
//! use formwork_validation::formats;
//!
//! assert!(formats::is_uuid("550e8400-e29b-41d4-a716-446655440000"));
//! assert!(!formats::is_credit_card("4539148803436468"));
//! ```

mod descriptor;
mod engine;
mod errors;
mod failure;
pub mod formats;
#[cfg(feature = "pipe")]
mod pipe;
mod schema;

pub use descriptor::*;
pub use engine::*;
pub use errors::*;
pub use failure::*;
#[cfg(feature = "pipe")]
pub use pipe::*;
pub use schema::*;

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        Entity, FieldDescriptor, FormatKind, RuleKey, Schema, ValidatedValues, ValidationErrors,
        ValidationFailure, Validator,
    };

    #[cfg(feature = "pipe")]
    pub use crate::{PipeError, ValidationPipe};
}
