// Validation engine

use crate::formats::{check_format, numeric_value};
use crate::{
    Entity, FieldDescriptor, FieldRuleViolation, FormatKind, RuleKey, Schema, ValidatedValues,
    ValidationErrors, ValidationFailure,
};
use formwork_core::{RawInput, ResponseMode};
use formwork_i18n::{Catalog, Locale, format_template};
use formwork_log::{debug, trace, warn};
use serde_json::Value;
use std::sync::Arc;

/// Runs field descriptors against raw input.
///
/// Holds only a shared, read-only catalog, so one validator can serve any
/// number of threads.
///
/// ```
/// use formwork_core::{RawInput, ResponseMode};
/// use formwork_i18n::Locale;
/// use formwork_validation::{FieldDescriptor, FormatKind, Schema, Validator};
/// use serde_json::json;
///
/// let schema = Schema::new("Login")
///     .field("email", FieldDescriptor::new().format(FormatKind::Email))
///     .field("password", FieldDescriptor::new().min_length(6));
///
/// let raw: RawInput = json!({"email": "not-an-email", "password": "abc"})
///     .as_object()
///     .cloned()
///     .unwrap();
///
/// let failure = Validator::default()
///     .validate_schema(&schema, &raw, &Locale::en(), ResponseMode::Json)
///     .unwrap_err();
///
/// assert_eq!(failure.errors().field_count(), 2);
/// assert_eq!(
///     failure.errors().messages("password"),
///     vec!["Field 'password' must be at least 6 characters long"]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    catalog: Arc<Catalog>,
}

impl Default for Validator {
    /// A validator over the bundled English and Spanish messages.
    fn default() -> Self {
        Self::new(Catalog::shared())
    }
}

impl Validator {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Validate raw input and build the entity.
    ///
    /// The entity is only constructed when every rule passed.
    pub fn validate<E: Entity>(
        &self,
        raw: &RawInput,
        locale: &Locale,
        mode: ResponseMode,
    ) -> Result<E, ValidationFailure> {
        self.validate_schema(E::schema(), raw, locale, mode)
            .map(E::from_validated)
    }

    /// Validate raw input against a schema, returning the checked values.
    pub fn validate_schema(
        &self,
        schema: &Schema,
        raw: &RawInput,
        locale: &Locale,
        mode: ResponseMode,
    ) -> Result<ValidatedValues, ValidationFailure> {
        self.check(schema, raw, locale)
            .map_err(|errors| ValidationFailure::new(errors, locale.clone(), mode))
    }

    /// Run every rule and return either the staged values or the error set.
    pub fn check(
        &self,
        schema: &Schema,
        raw: &RawInput,
        locale: &Locale,
    ) -> Result<ValidatedValues, ValidationErrors> {
        debug!(
            "validating {} ({} fields, locale {})",
            schema.name(),
            schema.len(),
            locale
        );

        for key in raw.keys().filter(|key| !schema.contains(key)) {
            trace!("ignoring undeclared input {:?} for {}", key, schema.name());
        }

        let mut errors = ValidationErrors::new();
        let mut staged = ValidatedValues::new();

        for (name, descriptor) in schema.fields() {
            let value = resolve_value(raw, name, descriptor);

            if is_empty(&value) {
                if descriptor.is_required() {
                    errors.add(self.violation(name, descriptor, RuleKey::Required, locale));
                    continue;
                }
                staged.insert(name, value);
                continue;
            }

            for rule in self.failed_rules(name, descriptor, &value) {
                errors.add(self.violation(name, descriptor, rule, locale));
            }

            staged.insert(name, value);
        }

        if errors.is_empty() {
            debug!("{} passed validation", schema.name());
            Ok(staged)
        } else {
            debug!(
                "{} failed validation: {} violations on {} fields",
                schema.name(),
                errors.len(),
                errors.field_count()
            );
            Err(errors)
        }
    }

    /// Rules a present value fails, in evaluation order.
    fn failed_rules(&self, name: &str, descriptor: &FieldDescriptor, value: &Value) -> Vec<RuleKey> {
        let mut failed = Vec::new();

        if let Value::String(s) = value {
            let len = s.chars().count();
            if descriptor.exact_length_bound().is_some_and(|n| len != n) {
                failed.push(RuleKey::Length);
            }
            if descriptor.min_length_bound().is_some_and(|n| len < n) {
                failed.push(RuleKey::MinLength);
            }
            if descriptor.max_length_bound().is_some_and(|n| len > n) {
                failed.push(RuleKey::MaxLength);
            }
        }

        if let Some(number) = numeric_value(value) {
            if descriptor.min_bound().is_some_and(|min| number < min) {
                failed.push(RuleKey::Min);
            }
            if descriptor.max_bound().is_some_and(|max| number > max) {
                failed.push(RuleKey::Max);
            }
        }

        if let Some(kind) = descriptor.format_kind()
            && let Some(false) = self.run_format(name, descriptor, kind, value)
        {
            failed.push(kind.rule_key());
        }

        failed
    }

    /// `None` when the check was skipped.
    fn run_format(
        &self,
        name: &str,
        descriptor: &FieldDescriptor,
        kind: FormatKind,
        value: &Value,
    ) -> Option<bool> {
        let pattern = match (kind, descriptor.pattern_ref()) {
            (FormatKind::Regex, Some(pattern)) => match pattern.regex() {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!(
                        "field {:?}: pattern {:?} does not compile, skipping regex rule: {}",
                        name,
                        pattern.source(),
                        e
                    );
                    return None;
                }
            },
            (FormatKind::Regex, None) => {
                warn!("field {:?}: regex format declared without a pattern, skipping", name);
                return None;
            }
            _ => None,
        };

        check_format(kind, value, pattern)
    }

    fn violation(
        &self,
        name: &str,
        descriptor: &FieldDescriptor,
        rule: RuleKey,
        locale: &Locale,
    ) -> FieldRuleViolation {
        FieldRuleViolation::new(name, rule, self.message(name, descriptor, rule, locale))
    }

    /// Resolve and fill the template for a failed rule.
    ///
    /// Field override first, then the catalog, then the bare rule key.
    pub fn message(
        &self,
        name: &str,
        descriptor: &FieldDescriptor,
        rule: RuleKey,
        locale: &Locale,
    ) -> String {
        let template = descriptor
            .message_for(rule)
            .or_else(|| self.catalog.template(locale, rule.as_str()))
            .unwrap_or(rule.as_str());

        let bound = descriptor.bound_text(rule);
        let mut vars = vec![(":field", name)];
        if let (Some(token), Some(bound)) = (rule.placeholder(), bound.as_deref()) {
            vars.push((token, bound));
        }

        format_template(template, &vars)
    }
}

/// Raw entry for the field, or the descriptor's default when the entry is
/// missing or null.
fn resolve_value(raw: &RawInput, name: &str, descriptor: &FieldDescriptor) -> Value {
    match raw.get(name) {
        Some(value) if !value.is_null() => value.clone(),
        _ => descriptor.fallback_value().cloned().unwrap_or(Value::Null),
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
