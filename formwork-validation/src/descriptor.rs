// Field descriptors

use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Named formats a field can be checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    Email,
    Ip,
    Url,
    Uuid,
    Number,
    Integer,
    Float,
    Boolean,
    Date,
    Datetime,
    Alpha,
    Alphanumeric,
    Numeric,
    Phone,
    CreditCard,
    Domain,
    MacAddress,
    Json,
    Base64,
    Regex,
}

impl FormatKind {
    /// Every format, in dispatch-table order.
    pub const ALL: [FormatKind; 20] = [
        FormatKind::Email,
        FormatKind::Ip,
        FormatKind::Url,
        FormatKind::Uuid,
        FormatKind::Number,
        FormatKind::Integer,
        FormatKind::Float,
        FormatKind::Boolean,
        FormatKind::Date,
        FormatKind::Datetime,
        FormatKind::Alpha,
        FormatKind::Alphanumeric,
        FormatKind::Numeric,
        FormatKind::Phone,
        FormatKind::CreditCard,
        FormatKind::Domain,
        FormatKind::MacAddress,
        FormatKind::Json,
        FormatKind::Base64,
        FormatKind::Regex,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormatKind::Email => "email",
            FormatKind::Ip => "ip",
            FormatKind::Url => "url",
            FormatKind::Uuid => "uuid",
            FormatKind::Number => "number",
            FormatKind::Integer => "integer",
            FormatKind::Float => "float",
            FormatKind::Boolean => "boolean",
            FormatKind::Date => "date",
            FormatKind::Datetime => "datetime",
            FormatKind::Alpha => "alpha",
            FormatKind::Alphanumeric => "alphanumeric",
            FormatKind::Numeric => "numeric",
            FormatKind::Phone => "phone",
            FormatKind::CreditCard => "credit_card",
            FormatKind::Domain => "domain",
            FormatKind::MacAddress => "mac_address",
            FormatKind::Json => "json",
            FormatKind::Base64 => "base64",
            FormatKind::Regex => "regex",
        }
    }

    /// Rule key a failed check is recorded under.
    pub fn rule_key(&self) -> RuleKey {
        RuleKey::Format(*self)
    }
}

impl FromStr for FormatKind {
    type Err = UnknownRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormatKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownRule(s.to_string()))
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a rule, shared by message lookup and error keying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKey {
    Required,
    /// Exact length
    Length,
    MinLength,
    MaxLength,
    Min,
    Max,
    Format(FormatKind),
}

impl RuleKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKey::Required => "required",
            RuleKey::Length => "length",
            RuleKey::MinLength => "min_length",
            RuleKey::MaxLength => "max_length",
            RuleKey::Min => "min",
            RuleKey::Max => "max",
            RuleKey::Format(kind) => kind.as_str(),
        }
    }

    /// Placeholder carrying the rule's bound, if the rule has one.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            RuleKey::Length => Some(":length"),
            RuleKey::MinLength => Some(":min_length"),
            RuleKey::MaxLength => Some(":max_length"),
            RuleKey::Min => Some(":min"),
            RuleKey::Max => Some(":max"),
            RuleKey::Required | RuleKey::Format(_) => None,
        }
    }
}

impl FromStr for RuleKey {
    type Err = UnknownRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "required" => Ok(RuleKey::Required),
            "length" => Ok(RuleKey::Length),
            "min_length" => Ok(RuleKey::MinLength),
            "max_length" => Ok(RuleKey::MaxLength),
            "min" => Ok(RuleKey::Min),
            "max" => Ok(RuleKey::Max),
            other => other.parse().map(RuleKey::Format),
        }
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for RuleKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Returned when parsing an unknown rule or format name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rule: {0}")]
pub struct UnknownRule(pub String);

/// A custom pattern, compiled when the descriptor is built.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    compiled: Result<Regex, regex::Error>,
}

impl Pattern {
    /// Compile `source`, accepting plain or delimited (`/^a+$/i`) syntax.
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let compiled = Regex::new(&translate_delimited(&source));
        Self { source, compiled }
    }

    /// The pattern as declared.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The compiled regex, or why it failed to compile.
    pub fn regex(&self) -> Result<&Regex, &regex::Error> {
        self.compiled.as_ref()
    }
}

const DELIMITERS: &[char] = &['/', '#', '~', '!', '@', '%'];

/// Turn `/body/flags` into `(?flags)body`.
///
/// Anything that is not a well-formed delimited pattern is returned as-is.
fn translate_delimited(source: &str) -> String {
    let Some(delim) = source.chars().next().filter(|c| DELIMITERS.contains(c)) else {
        return source.to_string();
    };

    let Some(end) = source.rfind(delim).filter(|&end| end > 0) else {
        return source.to_string();
    };

    let body = &source[1..end];
    let flags = &source[end + 1..];
    if !flags.chars().all(|c| "imsxu".contains(c)) {
        return source.to_string();
    }

    // Unicode is always on
    let inline: String = flags.chars().filter(|&c| c != 'u').collect();
    if inline.is_empty() {
        body.to_string()
    } else {
        format!("(?{}){}", inline, body)
    }
}

/// Validation constraints for one field.
///
/// Built once with the builder methods, then only read.
///
/// ```
/// use formwork_validation::{FieldDescriptor, FormatKind, RuleKey};
///
/// let password = FieldDescriptor::new()
///     .min_length(6)
///     .max_length(64)
///     .message(RuleKey::MinLength, "Use at least :min_length characters");
///
/// let website = FieldDescriptor::optional().format(FormatKind::Url);
/// assert!(!website.is_required());
/// assert_eq!(password.min_length_bound(), Some(6));
/// ```
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    required: bool,
    default: Option<Value>,
    min: Option<f64>,
    max: Option<f64>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    exact_length: Option<usize>,
    format: Option<FormatKind>,
    pattern: Option<Pattern>,
    messages: HashMap<RuleKey, String>,
}

impl Default for FieldDescriptor {
    fn default() -> Self {
        Self {
            required: true,
            default: None,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
            exact_length: None,
            format: None,
            pattern: None,
            messages: HashMap::new(),
        }
    }
}

impl FieldDescriptor {
    /// A required field with no other constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// A field that may be absent or empty.
    pub fn optional() -> Self {
        Self::new().required(false)
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Value used when the input has no entry (or a null) for the field.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Inclusive lower bound for numeric values
    pub fn min(mut self, min: impl Into<f64>) -> Self {
        self.min = Some(min.into());
        self
    }

    /// Inclusive upper bound for numeric values
    pub fn max(mut self, max: impl Into<f64>) -> Self {
        self.max = Some(max.into());
        self
    }

    pub fn min_length(mut self, len: usize) -> Self {
        self.min_length = Some(len);
        self
    }

    pub fn max_length(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }

    pub fn exact_length(mut self, len: usize) -> Self {
        self.exact_length = Some(len);
        self
    }

    pub fn format(mut self, format: FormatKind) -> Self {
        self.format = Some(format);
        self
    }

    /// Pattern for the `regex` format.
    ///
    /// A pattern that does not compile is kept; the rule is then skipped
    /// at validation time with a warning.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(Pattern::new(pattern));
        self
    }

    /// Like [`pattern`](Self::pattern), but rejects patterns that do not compile.
    pub fn try_pattern(self, pattern: impl Into<String>) -> Result<Self, regex::Error> {
        let descriptor = self.pattern(pattern);
        if let Some(Err(e)) = descriptor.pattern.as_ref().map(Pattern::regex) {
            return Err(e.clone());
        }
        Ok(descriptor)
    }

    /// Shorthand for `format(FormatKind::Regex).pattern(pattern)`.
    pub fn matches(self, pattern: impl Into<String>) -> Self {
        self.format(FormatKind::Regex).pattern(pattern)
    }

    /// Override the message template for one rule.
    pub fn message(mut self, rule: RuleKey, template: impl Into<String>) -> Self {
        self.messages.insert(rule, template.into());
        self
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Value used when the input has none.
    pub fn fallback_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn min_bound(&self) -> Option<f64> {
        self.min
    }

    pub fn max_bound(&self) -> Option<f64> {
        self.max
    }

    pub fn min_length_bound(&self) -> Option<usize> {
        self.min_length
    }

    pub fn max_length_bound(&self) -> Option<usize> {
        self.max_length
    }

    pub fn exact_length_bound(&self) -> Option<usize> {
        self.exact_length
    }

    pub fn format_kind(&self) -> Option<FormatKind> {
        self.format
    }

    pub fn pattern_ref(&self) -> Option<&Pattern> {
        self.pattern.as_ref()
    }

    /// Field-level template for a rule, if overridden.
    pub fn message_for(&self, rule: RuleKey) -> Option<&str> {
        self.messages.get(&rule).map(String::as_str)
    }

    /// The bound a rule is checked against, rendered for `:placeholder` substitution.
    pub fn bound_text(&self, rule: RuleKey) -> Option<String> {
        match rule {
            RuleKey::Length => self.exact_length.map(|n| n.to_string()),
            RuleKey::MinLength => self.min_length.map(|n| n.to_string()),
            RuleKey::MaxLength => self.max_length.map(|n| n.to_string()),
            RuleKey::Min => self.min.map(|n| n.to_string()),
            RuleKey::Max => self.max.map(|n| n.to_string()),
            RuleKey::Required | RuleKey::Format(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let d = FieldDescriptor::new();
        assert!(d.is_required());
        assert!(d.fallback_value().is_none());
        assert!(d.format_kind().is_none());
        assert!(!FieldDescriptor::optional().is_required());
    }

    #[test]
    fn test_rule_key_names() {
        assert_eq!(RuleKey::MinLength.as_str(), "min_length");
        assert_eq!(RuleKey::Length.as_str(), "length");
        assert_eq!(FormatKind::CreditCard.rule_key().as_str(), "credit_card");
        assert_eq!("mac_address".parse::<RuleKey>().unwrap(), RuleKey::Format(FormatKind::MacAddress));
        assert_eq!("max".parse::<RuleKey>().unwrap(), RuleKey::Max);
        assert!("format".parse::<RuleKey>().is_err());
    }

    #[test]
    fn test_every_format_parses_back() {
        for kind in FormatKind::ALL {
            assert_eq!(kind.as_str().parse::<FormatKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_bound_text_drops_trailing_zero() {
        let d = FieldDescriptor::new().min(18).max(99.5).min_length(2);
        assert_eq!(d.bound_text(RuleKey::Min).as_deref(), Some("18"));
        assert_eq!(d.bound_text(RuleKey::Max).as_deref(), Some("99.5"));
        assert_eq!(d.bound_text(RuleKey::MinLength).as_deref(), Some("2"));
        assert_eq!(d.bound_text(RuleKey::Required), None);
    }

    #[test]
    fn test_message_override() {
        let d = FieldDescriptor::new().message(RuleKey::Required, "Need :field");
        assert_eq!(d.message_for(RuleKey::Required), Some("Need :field"));
        assert_eq!(d.message_for(RuleKey::Min), None);
    }

    #[test]
    fn test_plain_pattern() {
        let p = Pattern::new("^[a-z]+$");
        let re = p.regex().unwrap();
        assert!(re.is_match("abc"));
        assert!(!re.is_match("ABC"));
    }

    #[test]
    fn test_delimited_pattern_flags() {
        let p = Pattern::new("/^[a-z]+$/i");
        assert_eq!(p.source(), "/^[a-z]+$/i");
        assert!(p.regex().unwrap().is_match("ABC"));

        let p = Pattern::new("#^\\d{3}$#u");
        assert!(p.regex().unwrap().is_match("123"));
    }

    #[test]
    fn test_unknown_flags_keep_pattern_verbatim() {
        assert_eq!(translate_delimited("/a/z"), "/a/z");
        assert_eq!(translate_delimited("/"), "/");
        assert_eq!(translate_delimited("^a/b$"), "^a/b$");
        assert_eq!(translate_delimited("/a/ms"), "(?ms)a");
    }

    #[test]
    fn test_invalid_pattern() {
        let d = FieldDescriptor::new().matches("([a-z");
        assert!(d.pattern_ref().unwrap().regex().is_err());
        assert!(FieldDescriptor::new().try_pattern("([a-z").is_err());
        assert!(FieldDescriptor::new().try_pattern("^ok$").is_ok());
    }
}
