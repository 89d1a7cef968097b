// Format validators
//
// Every check is a pure function over the value's text. None of them
// touch the network.

use crate::FormatKind;
use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::borrow::Cow;
use std::net::IpAddr;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$").unwrap()
});

static UUID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .unwrap()
});

static NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ \t\n\r\x0B\x0C]*[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?[ \t\n\r\x0B\x0C]*$").unwrap()
});

static INTEGER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?(?:0|[1-9][0-9]*)$").unwrap());

static FLOAT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$").unwrap()
});

static ALPHA_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]+$").unwrap());

static ALPHANUMERIC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());

static NUMERIC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9\s\-\(\)]{10,}$").unwrap());

static DOMAIN_LABEL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?$").unwrap()
});

static MAC_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:[0-9a-fA-F]{2}(?::[0-9a-fA-F]{2}){5}|[0-9a-fA-F]{2}(?:-[0-9a-fA-F]{2}){5}|[0-9a-fA-F]{4}(?:\.[0-9a-fA-F]{4}){2})$",
    )
    .unwrap()
});

static DATETIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}$").unwrap()
});

/// Standard alphabet, padding optional.
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

const RELATIVE_DATES: &[&str] = &["now", "today", "tomorrow", "yesterday"];

const BOOLEAN_WORDS: &[&str] = &["true", "false", "1", "0", "yes", "no"];

/// Text form of a scalar value. Arrays and objects have none.
pub fn value_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Numeric reading of a value: a JSON number or a numeric string.
pub fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if is_number(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Check `value` against a format.
///
/// `pattern` is only consulted for [`FormatKind::Regex`]; `None` is
/// returned when that format has no usable pattern and the check cannot run.
pub fn check_format(kind: FormatKind, value: &Value, pattern: Option<&Regex>) -> Option<bool> {
    let passed = match kind {
        FormatKind::Boolean => is_boolean(value),
        FormatKind::Json => match value {
            Value::String(s) => is_json(s),
            other => !other.is_null(),
        },
        FormatKind::Integer => match value {
            Value::Number(n) => n.is_i64(),
            other => value_text(other).is_some_and(|s| is_integer(&s)),
        },
        FormatKind::Float => match value {
            Value::Number(_) => true,
            other => value_text(other).is_some_and(|s| is_float(&s)),
        },
        FormatKind::Regex => {
            let re = pattern?;
            value_text(value).is_some_and(|s| re.is_match(&s))
        }
        other => value_text(value).is_some_and(|s| check_text(other, &s)),
    };
    Some(passed)
}

fn check_text(kind: FormatKind, s: &str) -> bool {
    match kind {
        FormatKind::Email => is_email(s),
        FormatKind::Ip => is_ip(s),
        FormatKind::Url => is_url(s),
        FormatKind::Uuid => is_uuid(s),
        FormatKind::Number => is_number(s),
        FormatKind::Integer => is_integer(s),
        FormatKind::Float => is_float(s),
        FormatKind::Boolean => is_boolean_word(s),
        FormatKind::Date => is_date(s),
        FormatKind::Datetime => is_datetime(s),
        FormatKind::Alpha => ALPHA_REGEX.is_match(s),
        FormatKind::Alphanumeric => ALPHANUMERIC_REGEX.is_match(s),
        FormatKind::Numeric => NUMERIC_REGEX.is_match(s),
        FormatKind::Phone => PHONE_REGEX.is_match(s),
        FormatKind::CreditCard => is_credit_card(s),
        FormatKind::Domain => is_domain(s),
        FormatKind::MacAddress => is_mac_address(s),
        FormatKind::Json => is_json(s),
        FormatKind::Base64 => is_base64(s),
        FormatKind::Regex => false,
    }
}

pub fn is_email(s: &str) -> bool {
    match s.rsplit_once('@') {
        Some((local, domain)) => {
            local.len() <= 64 && domain.len() <= 253 && EMAIL_REGEX.is_match(s)
        }
        None => false,
    }
}

/// IPv4 or IPv6
pub fn is_ip(s: &str) -> bool {
    s.parse::<IpAddr>().is_ok()
}

/// An absolute URL with a host, or a `mailto:`, `news:` or `file:` URL.
pub fn is_url(s: &str) -> bool {
    if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }
    match url::Url::parse(s) {
        Ok(url) => url.has_host() || matches!(url.scheme(), "mailto" | "news" | "file"),
        Err(_) => false,
    }
}

/// RFC 4122 textual form, versions 1 to 5.
pub fn is_uuid(s: &str) -> bool {
    UUID_REGEX.is_match(s)
}

/// Decimal or exponent notation, optionally signed and padded with whitespace.
pub fn is_number(s: &str) -> bool {
    NUMBER_REGEX.is_match(s)
}

/// A whole number that fits in an `i64`. No leading zeros.
pub fn is_integer(s: &str) -> bool {
    let s = s.trim();
    INTEGER_REGEX.is_match(s) && s.parse::<i64>().is_ok()
}

pub fn is_float(s: &str) -> bool {
    let s = s.trim();
    FLOAT_REGEX.is_match(s) && s.parse::<f64>().is_ok_and(f64::is_finite)
}

fn is_boolean(value: &Value) -> bool {
    match value {
        Value::Bool(_) => true,
        Value::Number(n) => n.as_u64().is_some_and(|n| n <= 1),
        Value::String(s) => is_boolean_word(s),
        _ => false,
    }
}

/// One of `true false 1 0 yes no`, ignoring case.
pub fn is_boolean_word(s: &str) -> bool {
    BOOLEAN_WORDS.iter().any(|w| w.eq_ignore_ascii_case(s))
}

/// Anything that reads as a calendar date.
pub fn is_date(s: &str) -> bool {
    let s = s.trim();
    if RELATIVE_DATES.iter().any(|w| w.eq_ignore_ascii_case(s)) {
        return true;
    }

    DATE_FORMATS
        .iter()
        .any(|f| NaiveDate::parse_from_str(s, f).is_ok())
        || DATETIME_FORMATS
            .iter()
            .any(|f| NaiveDateTime::parse_from_str(s, f).is_ok())
        || DateTime::parse_from_rfc3339(s).is_ok()
        || DateTime::parse_from_rfc2822(s).is_ok()
}

/// Exactly `YYYY-MM-DD HH:MM:SS`.
pub fn is_datetime(s: &str) -> bool {
    DATETIME_REGEX.is_match(s) && NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").is_ok()
}

/// Luhn checksum over the digits of `s`.
pub fn is_credit_card(s: &str) -> bool {
    let digits: Vec<u32> = s.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.is_empty() {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

/// A hostname: dot-separated labels of letters, digits and inner hyphens.
pub fn is_domain(s: &str) -> bool {
    let s = s.strip_suffix('.').unwrap_or(s);
    !s.is_empty() && s.len() <= 253 && s.split('.').all(|label| DOMAIN_LABEL_REGEX.is_match(label))
}

/// `aa:bb:cc:dd:ee:ff`, `aa-bb-cc-dd-ee-ff` or `aabb.ccdd.eeff`.
pub fn is_mac_address(s: &str) -> bool {
    MAC_REGEX.is_match(s)
}

/// JSON text that decodes to something other than `null`.
pub fn is_json(s: &str) -> bool {
    serde_json::from_str::<Value>(s).is_ok_and(|v| !v.is_null())
}

/// Standard-alphabet Base64; padding may be omitted.
pub fn is_base64(s: &str) -> bool {
    BASE64.decode(s).is_ok()
}
