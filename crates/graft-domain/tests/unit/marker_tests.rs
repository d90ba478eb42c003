//! Unit tests for markers

use graft_domain::constants::{DEFAULT_MARKERS, MARKER_REPOSITORY, MARKER_SERVICE};
use graft_domain::value_objects::Marker;

#[test]
fn test_default_markers() {
    let defaults = Marker::defaults();

    assert_eq!(defaults.len(), DEFAULT_MARKERS.len());
    assert!(defaults.contains(&Marker::new(MARKER_SERVICE)));
    assert!(defaults.contains(&Marker::new(MARKER_REPOSITORY)));
    assert!(!defaults.contains(&Marker::new("Gateway")));
}

#[test]
fn test_marker_serializes_as_plain_string() {
    let marker = Marker::from("Gateway".to_string());
    let json = serde_json::to_string(&marker).expect("serialization should succeed");

    assert_eq!(json, "\"Gateway\"");
    let back: Marker = serde_json::from_str(&json).expect("deserialization should succeed");
    assert_eq!(back, marker);
}
