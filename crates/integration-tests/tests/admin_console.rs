//! Console-side behavior that needs no server: password machinery,
//! form-field parsing, and the settings document rules.

use atelier_admin::routes::forms;
use atelier_admin::services::auth::{hash_password, validate_password, verify_password};
use atelier_core::{FooterLink, SiteSettings};

#[test]
fn password_hashing_roundtrip() {
    let hash = hash_password("a sturdy password").expect("hash");

    // PHC string, not the password itself.
    assert!(hash.starts_with("$argon2"));
    assert!(verify_password(&hash, "a sturdy password"));
    assert!(!verify_password(&hash, "a different password"));
}

#[test]
fn short_passwords_are_rejected() {
    assert!(validate_password("1234567").is_err());
    assert!(validate_password("12345678").is_ok());
}

#[test]
fn datetime_local_fields_roundtrip_through_the_form() {
    let parsed = forms::parse_datetime_local("Start", "2026-08-06T14:30")
        .expect("parses")
        .expect("some instant");

    assert_eq!(forms::format_datetime_local(Some(parsed)), "2026-08-06T14:30");
}

#[test]
fn blank_optional_fields_mean_absent() {
    assert_eq!(forms::parse_datetime_local("End", "").expect("ok"), None);
    assert_eq!(forms::parse_optional_int("Order", " ").expect("ok"), None);
    assert_eq!(forms::non_empty("  ".to_string()), None);
}

#[test]
fn saving_footer_links_drops_half_filled_rows() {
    // The scenario from the footer form: an entry with an empty label
    // must not reach the stored document.
    let mut settings = SiteSettings {
        footer_links: vec![
            FooterLink {
                label: String::new(),
                url: "x".to_string(),
            },
            FooterLink {
                label: "GitHub".to_string(),
                url: "https://github.com/atelier-studio".to_string(),
            },
        ],
        ..SiteSettings::default()
    };

    settings.prune_links();

    assert_eq!(settings.footer_links.len(), 1);
    assert_eq!(settings.footer_links[0].label, "GitHub");
}

#[test]
fn settings_document_keeps_its_wire_shape() {
    let settings = SiteSettings {
        role_text: "Graphic Designer".to_string(),
        ..SiteSettings::default()
    };

    let value = serde_json::to_value(&settings).expect("serialize");
    assert!(value.get("roleText").is_some());
    assert!(value.get("footerLinks").is_some());
    assert!(value.get("socialLinks").is_some());

    let restored: SiteSettings = serde_json::from_value(value).expect("deserialize");
    assert_eq!(restored, settings);
}
