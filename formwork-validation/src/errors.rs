// Validation errors

use crate::RuleKey;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;

/// One failed rule on one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRuleViolation {
    /// Field name that failed validation
    pub field: String,

    /// Rule that failed
    pub rule: RuleKey,

    /// Localized message
    pub message: String,
}

impl FieldRuleViolation {
    pub fn new(field: impl Into<String>, rule: RuleKey, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldRuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Violations grouped by field.
///
/// Fields appear in the order their first violation was recorded, which
/// is declaration order when filled by the validator. Serializes as
/// `{"field": ["message", ...]}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    fields: IndexMap<String, Vec<FieldRuleViolation>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation
    pub fn add(&mut self, violation: FieldRuleViolation) {
        self.fields
            .entry(violation.field.clone())
            .or_default()
            .push(violation);
    }

    /// True when nothing failed
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Total number of violations
    pub fn len(&self) -> usize {
        self.fields.values().map(Vec::len).sum()
    }

    /// Number of fields with at least one violation
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Field names, in order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Violations for a field
    pub fn get(&self, field: &str) -> Option<&[FieldRuleViolation]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Messages for a field, in rule order
    pub fn messages(&self, field: &str) -> Vec<&str> {
        self.get(field)
            .map(|v| v.iter().map(|e| e.message.as_str()).collect())
            .unwrap_or_default()
    }

    /// Rule keys for a field, in rule order
    pub fn rule_keys(&self, field: &str) -> Vec<RuleKey> {
        self.get(field)
            .map(|v| v.iter().map(|e| e.rule).collect())
            .unwrap_or_default()
    }

    /// Iterate `(field, violations)` groups
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FieldRuleViolation])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Field → messages map
    pub fn to_message_map(&self) -> IndexMap<String, Vec<String>> {
        self.fields
            .iter()
            .map(|(field, v)| (field.clone(), v.iter().map(|e| e.message.clone()).collect()))
            .collect()
    }

    /// Convert to JSON representation
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

struct Messages<'a>(&'a [FieldRuleViolation]);

impl Serialize for Messages<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for violation in self.0 {
            seq.serialize_element(&violation.message)?;
        }
        seq.end()
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, violations) in &self.fields {
            map.serialize_entry(field, &Messages(violations))?;
        }
        map.end()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for violation in self.fields.values().flatten() {
            writeln!(f, "{}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl FromIterator<FieldRuleViolation> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = FieldRuleViolation>>(iter: I) -> Self {
        let mut errors = Self::new();
        for violation in iter {
            errors.add(violation);
        }
        errors
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldRuleViolation;
    type IntoIter = std::iter::Flatten<indexmap::map::Values<'a, String, Vec<FieldRuleViolation>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.values().flatten()
    }
}
