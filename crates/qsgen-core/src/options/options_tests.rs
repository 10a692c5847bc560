#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test]
fn GenerateOptions___default___has_expected_values() {
    let options = GenerateOptions::default();

    assert_eq!(options.orm_path(), "crate::orm");
    assert_eq!(options.custom_template(), None);
    assert!(options.header);
}

#[test]
fn GenerateOptions___builder___overrides_each_value() {
    let options = GenerateOptions::new()
        .with_orm_path("app::db")
        .with_custom_template("{# nothing #}")
        .with_header(false);

    assert_eq!(options.orm_path(), "app::db");
    assert_eq!(options.custom_template(), Some("{# nothing #}"));
    assert!(!options.header);
}

#[test]
fn GenerateOptions___from_empty_json___uses_defaults() {
    let options: GenerateOptions = serde_json::from_str("{}").unwrap();

    assert_eq!(options, GenerateOptions::default());
}

#[test_case("crate::orm" ; "crate path")]
#[test_case("orm" ; "single segment")]
#[test_case("::gorm_facade::db" ; "absolute path")]
fn GenerateOptions___validate___accepts_paths(path: &str) {
    let options = GenerateOptions::new().with_orm_path(path);

    assert!(options.validate().is_ok());
}

#[test_case("" ; "empty")]
#[test_case("   " ; "blank")]
#[test_case("crate::" ; "trailing separator")]
#[test_case("my-orm" ; "dash")]
fn GenerateOptions___validate___rejects_bad_paths(path: &str) {
    let options = GenerateOptions::new().with_orm_path(path);

    let err = options.validate().unwrap_err();

    assert!(matches!(err, QsError::Config(_)));
    assert_eq!(err.error_code(), 5);
}
