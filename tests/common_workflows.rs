//! Integration tests for common Formwork workflows.
//!
//! These tests drive a request through input collection, validation and
//! response building the way an application handler would.

use formwork::prelude::*;
use once_cell::sync::Lazy;
use serde_json::{Value, json};

#[derive(Debug)]
struct Registration {
    username: String,
    email: String,
    password: String,
    age: i64,
    newsletter: bool,
}

static REGISTRATION: Lazy<Schema> = Lazy::new(|| {
    Schema::new("Registration")
        .field(
            "username",
            FieldDescriptor::new()
                .min_length(3)
                .max_length(20)
                .format(FormatKind::Alphanumeric),
        )
        .field("email", FieldDescriptor::new().format(FormatKind::Email))
        .field(
            "password",
            FieldDescriptor::new()
                .min_length(8)
                .message(RuleKey::MinLength, "Pick a password of :min_length or more characters"),
        )
        .field(
            "age",
            FieldDescriptor::new().format(FormatKind::Integer).min(13).max(120),
        )
        .field(
            "newsletter",
            FieldDescriptor::optional()
                .default_value(false)
                .format(FormatKind::Boolean),
        )
});

impl Entity for Registration {
    fn schema() -> &'static Schema {
        &REGISTRATION
    }

    fn from_validated(mut values: ValidatedValues) -> Self {
        Self {
            age: values.get_i64("age").unwrap_or_default(),
            newsletter: values.get_bool("newsletter").unwrap_or(false),
            username: values.take_string("username").unwrap_or_default(),
            email: values.take_string("email").unwrap_or_default(),
            password: values.take_string("password").unwrap_or_default(),
        }
    }
}

fn pipe(mode: ResponseMode) -> ValidationPipe {
    let settings = ValidationSettings {
        response_mode: mode,
        ..Default::default()
    };
    ValidationPipe::new(Validator::default(), settings).unwrap()
}

// =============================================================================
// Successful submissions
// =============================================================================

#[test]
fn test_form_submission_builds_entity() {
    let req = HttpRequest::new("POST", "/register")
        .with_header("Content-Type", "application/x-www-form-urlencoded")
        .with_body("username=ana99&email=ana%40example.com&password=hunter2hunter2&age=31&newsletter=yes");

    let registration: Registration = pipe(ResponseMode::Rendered).parse(&req, None).unwrap();

    assert_eq!(registration.username, "ana99");
    assert_eq!(registration.email, "ana@example.com");
    assert_eq!(registration.password, "hunter2hunter2");
    assert_eq!(registration.age, 31);
    assert!(registration.newsletter);
}

#[test]
fn test_json_body_with_query_fallback() {
    let req = HttpRequest::new("POST", "/register")
        .with_query("age", "40")
        .with_header("Content-Type", "application/json")
        .with_body(
            json!({"username": "bob", "email": "bob@example.org", "password": "correcthorse"})
                .to_string(),
        );

    let registration: Registration = pipe(ResponseMode::Json).parse(&req, None).unwrap();
    assert_eq!(registration.age, 40);
    assert!(!registration.newsletter);
}

// =============================================================================
// Rejected submissions
// =============================================================================

#[test]
fn test_ajax_failure_response() {
    let req = HttpRequest::new("POST", "/register")
        .with_header("X-Requested-With", "XMLHttpRequest")
        .with_header("Content-Type", "application/json")
        .with_body(json!({"username": "a!", "password": "short", "age": 12}).to_string());

    let response = match pipe(ResponseMode::Rendered).parse::<Registration>(&req, Some("en")) {
        Ok(_) => panic!("expected a failure"),
        Err(err) => err.into_response(),
    };

    assert_eq!(response.status, 400);
    assert_eq!(
        response.headers.get("Content-Type").map(String::as_str),
        Some("application/json; charset=utf-8")
    );

    let body: Value = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!(true));
    assert_eq!(
        body["errors"]["username"],
        json!([
            "Field 'username' must be at least 3 characters long",
            "Field 'username' can only contain letters and numbers",
        ])
    );
    assert_eq!(body["errors"]["email"], json!(["Field 'email' is required"]));
    assert_eq!(
        body["errors"]["password"],
        json!(["Pick a password of 8 or more characters"])
    );
    assert_eq!(body["errors"]["age"], json!(["Field 'age' must be at least 13"]));
    assert!(body["errors"].get("newsletter").is_none());
    assert!(body["msg"].as_str().unwrap().ends_with("at least 13 ."));
}

#[test]
fn test_rendered_failure_in_spanish() {
    let req = HttpRequest::new("POST", "/register")
        .with_header("Content-Type", "application/x-www-form-urlencoded")
        .with_body("username=ana99&email=ana%40example.com&password=hunter2hunter2&age=abc");

    let err = pipe(ResponseMode::Rendered)
        .parse::<Registration>(&req, Some("es-MX"))
        .unwrap_err();

    let response = err.into_response();
    assert_eq!(response.status, 400);
    assert_eq!(
        response.body_str(),
        "<ul><li><strong>age:</strong> El campo 'age' debe ser un número entero</li></ul>"
    );
}

#[test]
fn test_malformed_body_is_a_client_error() {
    let req = HttpRequest::new("POST", "/register")
        .with_header("Content-Type", "application/json")
        .with_body("[1, 2, 3]");

    let err = pipe(ResponseMode::Json).parse::<Registration>(&req, None).unwrap_err();
    assert!(matches!(err, PipeError::Malformed(_)));
    assert_eq!(err.status_code(), 400);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_settings_from_config_manager() {
    let manager = formwork::formwork_config::ConfigManager::new();
    manager.set("default_locale", "spa").unwrap();
    manager.set("response_mode", "html").unwrap();

    let settings = ValidationSettings::from_manager(&manager).unwrap();
    let pipe = ValidationPipe::new(Validator::default(), settings).unwrap();

    let req = HttpRequest::new("GET", "/register").with_query("username", "ana99");
    let err = pipe.parse::<Registration>(&req, None).unwrap_err();
    let PipeError::Invalid(failure) = err else {
        panic!("expected a validation failure");
    };

    assert_eq!(failure.mode(), ResponseMode::Rendered);
    assert_eq!(failure.locale(), &Locale::es());
    assert_eq!(
        failure.errors().messages("email"),
        vec!["El campo 'email' es obligatorio"]
    );
}
