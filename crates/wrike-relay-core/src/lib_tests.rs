//! Tests for the wrike-relay-core library module.

use super::*;

#[test]
fn test_identifier_rejects_blank_values() {
    assert!(matches!(
        TaskId::new(""),
        Err(ValidationError::Required { .. })
    ));
    assert!(matches!(
        RoomId::new("   "),
        Err(ValidationError::Required { .. })
    ));
}

#[test]
fn test_identifier_round_trips_value() {
    let id = FolderId::new("IEAAAAAQI4AAAAAA").unwrap();

    assert_eq!(id.as_str(), "IEAAAAAQI4AAAAAA");
    assert_eq!(id.to_string(), "IEAAAAAQI4AAAAAA");
}

#[test]
fn test_identifier_serializes_transparently() {
    let id = TaskId::from("TASK1");

    assert_eq!(serde_json::to_string(&id).unwrap(), "\"TASK1\"");
}

#[test]
fn test_required_error_names_the_type() {
    let error = RoomId::new("").unwrap_err();

    assert_eq!(error.to_string(), "Field 'RoomId' is required");
}
