use super::*;

fn fields(name: &str, email: &str, password: &str) -> FormFields {
    FormFields { name: name.into(), email: email.into(), password: password.into() }
}

#[test]
fn signup_reports_every_violation_at_once() {
    let errors = validate(&FormFields::default(), Mode::Signup).unwrap_err();
    assert_eq!(errors.len(), 3);
    assert_eq!(errors.get(Field::Name), Some(NAME_REQUIRED));
    assert_eq!(errors.get(Field::Email), Some(INVALID_EMAIL));
    assert_eq!(errors.get(Field::Password), Some(PASSWORD_TOO_SHORT));
}

#[test]
fn login_ignores_missing_name() {
    let errors = validate(&fields("", "bad", "123"), Mode::Login).unwrap_err();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors.get(Field::Name), None);

    let valid = validate(&fields("", "john.doe@example.com", "password123"), Mode::Login).unwrap();
    assert_eq!(valid.name, None);
}

#[test]
fn login_drops_a_typed_name() {
    let valid = validate(&fields("Ghost", "john.doe@example.com", "password123"), Mode::Login).unwrap();
    assert_eq!(valid.name, None);
}

#[test]
fn register_keeps_name() {
    let valid = validate(&fields("John Doe", "john.doe@example.com", "password123"), Mode::Register).unwrap();
    assert_eq!(
        valid,
        ValidFields {
            name: Some("John Doe".into()),
            email: "john.doe@example.com".into(),
            password: "password123".into(),
        }
    );
}

#[test]
fn password_boundary_is_six() {
    assert!(validate(&fields("a", "a@b.co", "12345"), Mode::Signup).is_err());
    assert!(validate(&fields("a", "a@b.co", "123456"), Mode::Signup).is_ok());
}

#[test]
fn password_length_counts_characters() {
    assert!(validate(&fields("a", "a@b.co", "ééééé"), Mode::Login).is_err());
    assert!(validate(&fields("a", "a@b.co", "éééééé"), Mode::Login).is_ok());
}

#[test]
fn only_failing_fields_are_reported() {
    let errors = validate(&fields("John", "john@", "password123"), Mode::Register).unwrap_err();
    let reported: Vec<_> = errors.iter().map(|(field, _)| field).collect();
    assert_eq!(reported, vec![Field::Email]);
}

#[test]
fn email_grammar_accepts_common_addresses() {
    for ok in [
        "john.doe@example.com",
        "a@b.co",
        "first+tag@sub.domain.org",
        "o'brien_x@mail-host.io",
        "UPPER@EXAMPLE.COM",
    ] {
        assert!(is_valid_email(ok), "{ok} should be valid");
    }
}

#[test]
fn email_grammar_rejects_malformed_addresses() {
    for bad in [
        "",
        "plain",
        "@example.com",
        "user@",
        "a@b@c.com",
        "user@localhost",
        "user@example.c",
        "user@example.123",
        ".user@example.com",
        "user.@example.com",
        "us..er@example.com",
        "user@exa..mple.com",
        "user'@example.com",
        "user@-example.com",
        "user name@example.com",
        "user@.example.com",
    ] {
        assert!(!is_valid_email(bad), "{bad} should be invalid");
    }
}

#[test]
fn fields_get_and_set_by_field() {
    let mut f = FormFields::default();
    f.set(Field::Email, "x@y.zz".into());
    assert_eq!(f.get(Field::Email), "x@y.zz");
    assert_eq!(f.get(Field::Name), "");
}

#[test]
fn valid_fields_skip_absent_name_when_serialized() {
    let valid = validate(&fields("", "a@b.co", "123456"), Mode::Login).unwrap();
    assert_eq!(serde_json::to_value(&valid).unwrap(), serde_json::json!({ "email": "a@b.co", "password": "123456" }));
}
