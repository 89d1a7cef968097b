//! Integration tests for formwork-i18n

use formwork_i18n::*;
use std::fs;

#[test]
fn test_load_catalog_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("pt.json"),
        r#"{"required": "O campo ':field' é obrigatório"}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("es.json"),
        r#"{"required": "Rellena ':field'"}"#,
    )
    .unwrap();
    fs::write(dir.path().join("README.json"), "{}").unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let catalog = Catalog::builder()
        .with_bundled()
        .load_from_dir(dir.path())
        .unwrap()
        .build();

    let pt = Locale::parse("pt-BR").unwrap();
    assert_eq!(
        format_template(catalog.template(&pt, "required").unwrap(), &[(":field", "email")]),
        "O campo 'email' é obrigatório"
    );

    // The file overlays the bundled Spanish table without dropping other keys
    assert_eq!(catalog.template(&Locale::es(), "required"), Some("Rellena ':field'"));
    assert!(catalog.template(&Locale::es(), "email").is_some());
}

#[test]
fn test_load_from_missing_directory() {
    let result = Catalog::builder().load_from_dir("/definitely/not/here");
    assert!(matches!(result, Err(I18nError::Io(_))));
}

#[test]
fn test_load_file_with_bad_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("en.json");
    fs::write(&path, "{ nope").unwrap();

    assert!(matches!(
        Catalog::builder().load_file(&path),
        Err(I18nError::Json(_))
    ));
}

#[test]
fn test_three_letter_codes_share_tables() {
    let catalog = Catalog::bundled();
    let eng = Locale::parse("eng").unwrap();
    let esp = Locale::parse("esp").unwrap();

    assert_eq!(
        catalog.template(&eng, "uuid"),
        catalog.template(&Locale::en(), "uuid")
    );
    assert_eq!(
        catalog.template(&esp, "uuid"),
        catalog.template(&Locale::es(), "uuid")
    );
}
