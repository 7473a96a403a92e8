//! Unit tests for argument validation

use super::*;

use serde_json::json;

#[test]
fn valid_component_arguments_pass() {
    let validated = validate("get_component", json!({"componentName": "button"})).unwrap();
    assert_eq!(validated["componentName"], "button");
}

#[test]
fn empty_component_name_is_rejected() {
    let error = validate("get_component", json!({"componentName": ""})).unwrap_err();
    match error {
        TendrilError::ValidationFailed { method, violations } => {
            assert_eq!(method, "get_component");
            assert_eq!(violations.len(), 1);
            assert!(violations[0].starts_with("componentName:"));
        }
        _ => panic!("expected a validation failure"),
    }
}

#[test]
fn missing_required_field_is_rejected() {
    let error = validate("get_component", json!({})).unwrap_err();
    assert!(matches!(error, TendrilError::ValidationFailed { .. }));
}

#[test]
fn unknown_fields_are_stripped_silently() {
    let validated = validate(
        "get_component",
        json!({"componentName": "button", "bogus": 42}),
    )
    .unwrap();
    assert!(validated.contains_key("componentName"));
    assert!(!validated.contains_key("bogus"));
}

#[test]
fn overlong_component_name_is_rejected() {
    let name = "x".repeat(101);
    let error = validate("get_component", json!({"componentName": name})).unwrap_err();
    assert!(matches!(error, TendrilError::ValidationFailed { .. }));
}

#[test]
fn wrong_type_is_reported_per_field() {
    let error = validate(
        "get_block",
        json!({"blockName": 7, "includeComponents": "yes"}),
    )
    .unwrap_err();
    match error {
        TendrilError::ValidationFailed { violations, .. } => {
            assert_eq!(violations.len(), 2);
            assert!(violations.iter().any(|v| v.contains("must be a string")));
            assert!(violations.iter().any(|v| v.contains("must be a boolean")));
        }
        _ => panic!("expected a validation failure"),
    }
}

#[test]
fn optional_fields_may_be_absent() {
    let validated = validate("get_block", json!({"blockName": "login-02"})).unwrap();
    assert!(!validated.contains_key("includeComponents"));

    let validated = validate("list_blocks", json!({})).unwrap();
    assert!(validated.is_empty());
}

#[test]
fn null_arguments_count_as_empty() {
    let validated = validate("list_blocks", Value::Null).unwrap();
    assert!(validated.is_empty());
}

#[test]
fn non_object_arguments_are_rejected() {
    let error = validate("list_blocks", json!([1, 2, 3])).unwrap_err();
    assert!(matches!(error, TendrilError::ValidationFailed { .. }));
}

#[test]
fn methods_without_rules_pass_arguments_through() {
    let validated = validate("unregistered_method", json!({"anything": true})).unwrap();
    assert_eq!(validated["anything"], true);
}
