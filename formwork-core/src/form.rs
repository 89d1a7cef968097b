//! Raw input collection
//!
//! Merges the query string and the request body into the flat
//! name → value mapping the validator consumes.

use crate::{Error, HttpRequest};
use formwork_log::{debug, trace};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Untyped field values keyed by field name
pub type RawInput = Map<String, Value>;

/// Parse URL-encoded form data into a HashMap
pub fn parse_form_map(body: &[u8]) -> Result<HashMap<String, String>, Error> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
        .map_err(|e| Error::BadRequest(format!("Failed to parse form data: {}", e)))?;

    Ok(pairs.into_iter().collect())
}

/// Parse a JSON body that must be an object
pub fn parse_json_object(body: &[u8]) -> Result<RawInput, Error> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(Error::BadRequest(format!(
            "JSON body must be an object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(Error::Deserialization(format!("Invalid JSON: {}", e))),
    }
}

impl HttpRequest {
    /// Collect every input value of the request.
    ///
    /// Query parameters first, then a URL-encoded form body, then a JSON
    /// object body; later sources overwrite earlier ones on equal keys.
    /// A non-empty body of any other media type, or with no content type,
    /// is [`Error::UnsupportedMediaType`].
    pub fn input(&self) -> Result<RawInput, Error> {
        let mut input = RawInput::new();

        for (key, value) in &self.query_params {
            input.insert(key.clone(), Value::String(value.clone()));
        }

        if self.body.is_empty() {
            return Ok(input);
        }

        match self.content_type().as_deref() {
            Some("application/x-www-form-urlencoded") => {
                for (key, value) in parse_form_map(&self.body)? {
                    input.insert(key, Value::String(value));
                }
            }
            Some(ct) if ct == "application/json" || ct.ends_with("+json") => {
                for (key, value) in parse_json_object(&self.body)? {
                    input.insert(key, value);
                }
            }
            other => {
                let media_type = other.unwrap_or("none").to_string();
                debug!(
                    "rejecting {} byte body with content type {}",
                    self.body.len(),
                    media_type
                );
                return Err(Error::UnsupportedMediaType(media_type));
            }
        }

        trace!("collected {} input values for {} {}", input.len(), self.method, self.path);
        Ok(input)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
