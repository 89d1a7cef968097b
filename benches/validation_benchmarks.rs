use criterion::{Criterion, criterion_group, criterion_main};
use formwork::prelude::*;
use formwork::formats;
use serde_json::json;
use std::hint::black_box;

fn raw(value: serde_json::Value) -> RawInput {
    value.as_object().cloned().unwrap_or_default()
}

fn signup_schema() -> Schema {
    Schema::new("Signup")
        .field("username", FieldDescriptor::new().min_length(3).max_length(20).format(FormatKind::Alphanumeric))
        .field("email", FieldDescriptor::new().format(FormatKind::Email))
        .field("password", FieldDescriptor::new().min_length(8))
        .field("age", FieldDescriptor::optional().format(FormatKind::Integer).min(13).max(120))
        .field("website", FieldDescriptor::optional().format(FormatKind::Url))
        .field("card", FieldDescriptor::optional().format(FormatKind::CreditCard))
}

fn bench_format_validators(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_validators");

    let valid_emails = vec![
        "user@example.com",
        "test.user+tag@domain.co.uk",
        "admin@subdomain.example.com",
    ];

    group.bench_function("email", |b| {
        b.iter(|| {
            for email in &valid_emails {
                black_box(formats::is_email(black_box(email)));
            }
        })
    });

    group.bench_function("url", |b| {
        b.iter(|| formats::is_url(black_box("https://subdomain.example.com/path?query=value")))
    });

    group.bench_function("uuid", |b| {
        b.iter(|| formats::is_uuid(black_box("550e8400-e29b-41d4-a716-446655440000")))
    });

    group.bench_function("credit_card", |b| {
        b.iter(|| formats::is_credit_card(black_box("4539 1488 0343 6467")))
    });

    group.bench_function("date", |b| {
        b.iter(|| formats::is_date(black_box("March 15, 2024")))
    });

    group.finish();
}

fn bench_schema_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("schema_validation");

    let validator = Validator::default();
    let schema = signup_schema();
    let valid = raw(json!({
        "username": "ana99",
        "email": "ana@example.com",
        "password": "hunter2hunter2",
        "age": "31",
        "website": "https://ana.dev",
        "card": "4539148803436467",
    }));
    let invalid = raw(json!({
        "username": "a!",
        "email": "nope",
        "password": "short",
        "age": 7,
        "website": "ana.dev",
        "card": "4539148803436468",
    }));

    group.bench_function("valid_input", |b| {
        b.iter(|| validator.check(&schema, black_box(&valid), &Locale::en()))
    });

    group.bench_function("invalid_input", |b| {
        b.iter(|| validator.check(&schema, black_box(&invalid), &Locale::en()))
    });

    group.bench_function("invalid_input_json_payload", |b| {
        b.iter(|| validator.validate_schema(&schema, black_box(&invalid), &Locale::es(), ResponseMode::Json))
    });

    group.bench_function("invalid_input_html_payload", |b| {
        b.iter(|| {
            validator.validate_schema(&schema, black_box(&invalid), &Locale::en(), ResponseMode::Rendered)
        })
    });

    group.finish();
}

fn bench_request_pipe(c: &mut Criterion) {
    let mut group = c.benchmark_group("request_pipe");

    let pipe = ValidationPipe::new(Validator::default(), ValidationSettings::default()).unwrap();
    let schema = signup_schema();
    let req = HttpRequest::new("POST", "/signup")
        .with_header("Content-Type", "application/x-www-form-urlencoded")
        .with_body("username=ana99&email=ana%40example.com&password=hunter2hunter2&age=31");

    group.bench_function("form_request", |b| {
        b.iter(|| pipe.parse_schema(&schema, black_box(&req), None))
    });

    group.finish();
}

criterion_group!(
    validation_benches,
    bench_format_validators,
    bench_schema_validation,
    bench_request_pipe,
);

criterion_main!(validation_benches);
