// Validation failure payloads

use crate::ValidationErrors;
use formwork_core::{HttpResponse, ResponseMode};
use formwork_i18n::Locale;
use std::fmt;

/// Status used for every validation failure
pub const FAILURE_STATUS: u16 = 400;

/// Pre-rendered body of a failure, in the caller's chosen mode.
#[derive(Debug, Clone, PartialEq)]
pub enum FailurePayload {
    /// `{"success": false, "error": true, "msg": ..., "errors": {...}}`
    Json(serde_json::Value),
    /// `<ul><li><strong>field:</strong> message</li>...</ul>`
    Html(String),
}

impl FailurePayload {
    /// Body bytes as sent on the wire
    pub fn body(&self) -> String {
        match self {
            FailurePayload::Json(value) => value.to_string(),
            FailurePayload::Html(html) => html.clone(),
        }
    }
}

/// Raised once per validation pass when any rule failed.
///
/// Carries the full error set and the payload for the mode it was built
/// with. Turn it into a response with [`into_response`](Self::into_response).
#[derive(Debug, Clone)]
pub struct ValidationFailure {
    errors: ValidationErrors,
    locale: Locale,
    mode: ResponseMode,
    payload: FailurePayload,
}

impl ValidationFailure {
    pub fn new(errors: ValidationErrors, locale: Locale, mode: ResponseMode) -> Self {
        let payload = match mode {
            ResponseMode::Json => FailurePayload::Json(json_payload(&errors)),
            ResponseMode::Rendered => FailurePayload::Html(render_html(&errors)),
        };

        Self {
            errors,
            locale,
            mode,
            payload,
        }
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn into_errors(self) -> ValidationErrors {
        self.errors
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn mode(&self) -> ResponseMode {
        self.mode
    }

    pub fn payload(&self) -> &FailurePayload {
        &self.payload
    }

    pub fn status_code(&self) -> u16 {
        FAILURE_STATUS
    }

    /// The single-line aggregate of every message
    pub fn summary(&self) -> String {
        summary_message(&self.errors)
    }

    /// Rebuild the payload for another mode.
    pub fn with_mode(self, mode: ResponseMode) -> Self {
        if mode == self.mode {
            return self;
        }
        Self::new(self.errors, self.locale, mode)
    }

    pub fn into_response(self) -> HttpResponse {
        HttpResponse::new(FAILURE_STATUS)
            .content_type(self.mode.content_type())
            .with_body(self.payload.body().into_bytes())
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl std::error::Error for ValidationFailure {}

impl From<ValidationFailure> for HttpResponse {
    fn from(failure: ValidationFailure) -> Self {
        failure.into_response()
    }
}

impl From<ValidationFailure> for formwork_core::Error {
    fn from(failure: ValidationFailure) -> Self {
        formwork_core::Error::Validation(failure.summary())
    }
}

/// Join messages: `" , "` inside a field, `" , "` after every field but the
/// last, `" ."` after the last.
pub fn summary_message(errors: &ValidationErrors) -> String {
    let groups = errors.field_count();
    let mut msg = String::new();

    for (i, (_, violations)) in errors.iter().enumerate() {
        let joined = violations
            .iter()
            .map(|v| v.message.as_str())
            .collect::<Vec<_>>()
            .join(" , ");
        msg.push_str(&joined);
        msg.push_str(if i + 1 == groups { " ." } else { " , " });
    }

    msg
}

fn json_payload(errors: &ValidationErrors) -> serde_json::Value {
    serde_json::json!({
        "success": false,
        "error": true,
        "msg": summary_message(errors),
        "errors": errors,
    })
}

/// One `<li>` per message, each led by the bold field name.
pub fn render_html(errors: &ValidationErrors) -> String {
    let mut html = String::from("<ul>");
    for violation in errors {
        html.push_str("<li><strong>");
        html.push_str(&escape_html(&violation.field));
        html.push_str(":</strong> ");
        html.push_str(&escape_html(&violation.message));
        html.push_str("</li>");
    }
    html.push_str("</ul>");
    html
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldRuleViolation, FormatKind, RuleKey};
    use serde_json::json;

    fn errors() -> ValidationErrors {
        [
            FieldRuleViolation::new("name", RuleKey::MinLength, "short"),
            FieldRuleViolation::new("name", RuleKey::Format(FormatKind::Alpha), "letters"),
            FieldRuleViolation::new("email", RuleKey::Format(FormatKind::Email), "email"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_summary_joining() {
        assert_eq!(summary_message(&errors()), "short , letters , email .");

        let single: ValidationErrors =
            std::iter::once(FieldRuleViolation::new("a", RuleKey::Required, "needed")).collect();
        assert_eq!(summary_message(&single), "needed .");
    }

    #[test]
    fn test_json_payload() {
        let failure = ValidationFailure::new(errors(), Locale::en(), ResponseMode::Json);
        let FailurePayload::Json(body) = failure.payload() else {
            panic!("expected JSON payload");
        };

        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!(true));
        assert_eq!(body["msg"], json!("short , letters , email ."));
        assert_eq!(body["errors"]["name"], json!(["short", "letters"]));
        assert_eq!(failure.status_code(), 400);
    }

    #[test]
    fn test_html_payload() {
        let failure = ValidationFailure::new(errors(), Locale::en(), ResponseMode::Rendered);
        assert_eq!(
            failure.payload(),
            &FailurePayload::Html(
                "<ul><li><strong>name:</strong> short</li>\
                 <li><strong>name:</strong> letters</li>\
                 <li><strong>email:</strong> email</li></ul>"
                    .to_string()
            )
        );
    }

    #[test]
    fn test_html_escaping() {
        let errors: ValidationErrors = std::iter::once(FieldRuleViolation::new(
            "a<b>",
            RuleKey::Required,
            "Tom & Jerry",
        ))
        .collect();
        assert_eq!(
            render_html(&errors),
            "<ul><li><strong>a&lt;b&gt;:</strong> Tom &amp; Jerry</li></ul>"
        );
    }

    #[test]
    fn test_into_response() {
        let response = ValidationFailure::new(errors(), Locale::en(), ResponseMode::Rendered)
            .into_response();
        assert_eq!(response.status, 400);
        assert!(response.body_str().starts_with("<ul>"));
        assert_eq!(
            response.headers.get("Content-Type").map(String::as_str),
            Some("text/html; charset=utf-8")
        );
    }

    #[test]
    fn test_with_mode_rebuilds_payload() {
        let failure = ValidationFailure::new(errors(), Locale::es(), ResponseMode::Rendered)
            .with_mode(ResponseMode::Json);
        assert!(matches!(failure.payload(), FailurePayload::Json(_)));
        assert_eq!(failure.locale(), &Locale::es());
        assert_eq!(failure.to_string(), "short , letters , email .");
    }
}
