use std::io::Write;

use theme::{ThemeEngine, ThemeName};

use super::*;

const SIGNUP: &str = r#"{
    "fields": [
        {"name": "username", "type": "text", "label": "Username", "required": true},
        {"name": "email", "type": "email", "label": "Email Address", "required": true},
        {"name": "password", "type": "password", "label": "Password", "required": true},
        {"name": "nickname", "label": "Nickname"}
    ]
}"#;

#[test]
fn builds_fields_in_schema_order() {
    let engine = ThemeEngine::shared();
    let form = FormBuilder::from_json_str(&engine, SIGNUP).expect("valid schema");
    let form = form.borrow();

    assert_eq!(
        form.field_names(),
        ["username", "email", "password", "nickname"]
    );
    assert_eq!(form.label_text("email").as_deref(), Some("Email Address*"));
    assert_eq!(form.label_text("nickname").as_deref(), Some("Nickname"));
    assert_eq!(form.label_text("missing"), None);
    assert!(form.is_password("password"));
    assert!(!form.is_password("email"));
}

#[test]
fn submit_requires_every_required_field() {
    let engine = ThemeEngine::shared();
    let form = FormBuilder::from_json_str(&engine, SIGNUP).expect("valid schema");
    let mut form = form.borrow_mut();

    assert_eq!(form.error("username"), None);
    assert_eq!(form.submit(), None);
    assert_eq!(form.error("username"), Some(REQUIRED_MESSAGE));
    assert_eq!(form.error("password"), Some(REQUIRED_MESSAGE));
    assert_eq!(form.error("nickname"), None);

    form.set_value("username", "testuser");
    assert_eq!(form.error("username"), None);
    assert_eq!(form.value("username").as_deref(), Some("testuser"));

    form.set_value("email", "test@example.com");
    form.set_value("password", "password123");
    let data = form.submit().expect("all required fields set");
    assert_eq!(data["username"], "testuser");
    assert_eq!(data["email"], "test@example.com");
    assert_eq!(data["password"], "password123");
    assert_eq!(data["nickname"], "");
}

#[test]
fn loads_schema_from_file() {
    let engine = ThemeEngine::shared();
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"{{"fields": [{{"name": "title", "type": "text", "label": "Title", "required": true}}]}}"#
    )
    .expect("write schema");

    let form = FormBuilder::from_json_file(&engine, file.path()).expect("schema file");
    let mut form = form.borrow_mut();
    assert_eq!(form.field_names(), ["title"]);
    assert_eq!(form.submit(), None);
    assert_eq!(form.error("title"), Some(REQUIRED_MESSAGE));
}

#[test]
fn reports_unreadable_and_malformed_schemas() {
    let engine = ThemeEngine::shared();
    let dir = tempfile::tempdir().expect("temp dir");

    let missing = FormBuilder::from_json_file(&engine, dir.path().join("nope.json"));
    assert!(matches!(missing, Err(FormError::Read { .. })));

    let malformed = FormBuilder::from_json_str(&engine, "{\"fields\": [{}]}");
    assert!(matches!(malformed, Err(FormError::Parse(_))));
}

#[test]
fn labels_errors_and_inputs_restyle_on_switch() {
    let engine = ThemeEngine::shared();
    let form = FormBuilder::from_json_str(&engine, SIGNUP).expect("valid schema");
    assert_eq!(
        form.borrow().label_style().value("form label", "color"),
        Some(theme::LIGHT.text.primary)
    );

    engine.switch_to(ThemeName::Dark);
    let form = form.borrow();
    assert_eq!(
        form.label_style().value("form label", "color"),
        Some(theme::DARK.text.primary)
    );
    assert_eq!(
        form.error_style().value("form label.error", "color"),
        Some(theme::DARK.danger)
    );
    assert_eq!(
        form.fields[0].input.borrow().style().value("input", "background-color"),
        Some("#2c3034")
    );
}
