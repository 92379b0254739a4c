use super::*;

#[test]
fn login_schema_has_no_name() {
    assert_eq!(Mode::Login.schema(), &[Field::Email, Field::Password]);
    assert!(!Mode::Login.requires(Field::Name));
}

#[test]
fn account_modes_require_all_three_fields() {
    for mode in [Mode::Signup, Mode::Register] {
        assert_eq!(mode.schema(), &[Field::Name, Field::Email, Field::Password]);
        assert!(mode.requires(Field::Name));
    }
}

#[test]
fn only_login_offers_social() {
    let social: Vec<_> = Mode::ALL.into_iter().filter(|m| m.offers_social()).collect();
    assert_eq!(social, vec![Mode::Login]);
}

#[test]
fn submit_labels_match_mode() {
    assert_eq!(Mode::Signup.submit_label(), "Sign Up");
    assert_eq!(Mode::Register.submit_label(), "Register");
    assert_eq!(Mode::Login.submit_label(), "Sign In");
}

#[test]
fn mode_parses_its_own_display() {
    for mode in Mode::ALL {
        assert_eq!(mode.to_string().parse::<Mode>(), Ok(mode));
    }
    assert!("credentials".parse::<Mode>().unwrap_err().contains("unknown form mode"));
}

#[test]
fn field_names_are_lowercase() {
    assert_eq!(Field::Name.to_string(), "name");
    assert_eq!(serde_json::to_value(Field::Password).unwrap(), serde_json::json!("password"));
}
