// Schemas and validated values

use crate::FieldDescriptor;
use indexmap::IndexMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Ordered set of field descriptors for one entity.
///
/// Declaring a field twice replaces the first descriptor but keeps the
/// field's original position.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    name: String,
    fields: IndexMap<String, FieldDescriptor>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Declare a field
    pub fn field(mut self, name: impl Into<String>, descriptor: FieldDescriptor) -> Self {
        self.fields.insert(name.into(), descriptor);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, field: &str) -> Option<&FieldDescriptor> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A type the validator can build from checked input.
///
/// ```
/// use formwork_validation::{Entity, FieldDescriptor, FormatKind, Schema, ValidatedValues};
/// use once_cell::sync::Lazy;
///
/// struct Signup {
///     email: String,
///     age: Option<i64>,
/// }
///
/// static SIGNUP: Lazy<Schema> = Lazy::new(|| {
///     Schema::new("Signup")
///         .field("email", FieldDescriptor::new().format(FormatKind::Email))
///         .field("age", FieldDescriptor::optional().format(FormatKind::Integer).min(18))
/// });
///
/// impl Entity for Signup {
///     fn schema() -> &'static Schema {
///         &SIGNUP
///     }
///
///     fn from_validated(mut values: ValidatedValues) -> Self {
///         Self {
///             email: values.take_string("email").unwrap_or_default(),
///             age: values.get_i64("age"),
///         }
///     }
/// }
/// ```
pub trait Entity: Sized {
    /// Field declarations, built once
    fn schema() -> &'static Schema;

    /// Build the entity from values that passed every rule.
    fn from_validated(values: ValidatedValues) -> Self;
}

/// Values that passed validation, keyed by field in declaration order.
///
/// Values keep the type they arrived with; the getters narrow them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedValues {
    values: IndexMap<String, Value>,
}

impl ValidatedValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.values.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// String value of a field, if it is a string
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field)?.as_str()
    }

    /// Integer value of a field: an integral number or an integer string
    pub fn get_i64(&self, field: &str) -> Option<i64> {
        match self.get(field)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Float value of a field: any number or numeric string
    pub fn get_f64(&self, field: &str) -> Option<f64> {
        crate::formats::numeric_value(self.get(field)?)
    }

    /// Boolean value of a field.
    ///
    /// `true`, `1` and `yes` (any case) read as true; `false`, `0` and `no`
    /// as false.
    pub fn get_bool(&self, field: &str) -> Option<bool> {
        match self.get(field)? {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => match n.as_u64() {
                Some(1) => Some(true),
                Some(0) => Some(false),
                _ => None,
            },
            Value::String(s) => match s.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Some(true),
                "false" | "0" | "no" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Remove a value
    pub fn take(&mut self, field: &str) -> Option<Value> {
        self.values.shift_remove(field)
    }

    /// Remove a value as a string; numbers and booleans are rendered.
    /// Empty and null values yield `None`.
    pub fn take_string(&mut self, field: &str) -> Option<String> {
        match self.take(field)? {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Deserialize the whole set into `T`
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.to_json())
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_inner(self) -> IndexMap<String, Value> {
        self.values
    }
}
