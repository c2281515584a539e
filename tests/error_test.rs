use std::collections::HashMap;

use userstore::{ StoreError, StructuredError };

// The structured error must serialize its text under `message`. The field was
// misspelled `mesage` in an earlier incarnation of this code; keep this pinned.
#[test]
fn test_structured_error_field_is_spelled_message() {
    let err = StructuredError {
        message: "boom".to_string(),
        code: 7,
        domain: "users".to_string(),
        reason: "test".to_string(),
        details: HashMap::new(),
    };

    let value = serde_json::to_value(&err).unwrap();
    assert_eq!(value["message"], "boom");
    assert!(value.get("mesage").is_none());
}

#[test]
fn test_structured_error_default_is_empty() {
    let err = StructuredError::default();

    assert_eq!(err.message, "");
    assert_eq!(err.code, 0);
    assert_eq!(err.domain, "");
    assert_eq!(err.reason, "");
    assert!(err.details.is_empty());
}

#[test]
fn test_structured_error_round_trips_details() {
    let mut details = HashMap::new();
    details.insert("table".to_string(), serde_json::json!("users"));
    details.insert("attempt".to_string(), serde_json::json!(1));

    let err = StructuredError {
        message: "constraint failed".to_string(),
        code: 23505,
        domain: "users".to_string(),
        reason: "unique_violation".to_string(),
        details,
    };

    let json = serde_json::to_string(&err).unwrap();
    let back: StructuredError = serde_json::from_str(&json).unwrap();
    assert_eq!(back, err);
}

// Display output carries the underlying driver text where one exists
#[test]
fn test_error_display_wraps_driver_message() {
    let connect = StoreError::Connection("connection refused".to_string());
    assert_eq!(connect.to_string(), "failed to connect to database: connection refused");

    let exec = StoreError::Execution("duplicate key value".to_string());
    assert_eq!(exec.to_string(), "error executing the query: duplicate key value");

    assert_eq!(StoreError::NoConnection.to_string(), "no connection established");
    assert_eq!(
        StoreError::AlreadyClosed.to_string(),
        "connection is already closed or does not exist"
    );
}

#[test]
fn test_invariant_violation_display_includes_inner_message() {
    let err = StoreError::InvariantViolation(StructuredError {
        message: "INSERT ... RETURNING produced no row".to_string(),
        ..Default::default()
    });

    assert_eq!(err.to_string(), "invariant violation: INSERT ... RETURNING produced no row");
}
