//! Comprehensive tests for GeoBounds operations.

use viz_common::bounds::{BoundsParseError, GeoBounds};

// ============================================================================
// Constructor tests
// ============================================================================

#[test]
fn test_bounds_new() {
    let bounds = GeoBounds::new(-180.0, -90.0, 180.0, 90.0);
    assert_eq!(bounds.west, -180.0);
    assert_eq!(bounds.south, -90.0);
    assert_eq!(bounds.east, 180.0);
    assert_eq!(bounds.north, 90.0);
}

#[test]
fn test_bounds_copy() {
    let a = GeoBounds::new(0.0, 0.0, 10.0, 10.0);
    let b = a;
    assert_eq!(a, b);
}

// ============================================================================
// from_edge_string tests
// ============================================================================

#[test]
fn test_parse_integer_edges() {
    let bounds = GeoBounds::from_edge_string("0,0,100,50").unwrap();
    assert_eq!(bounds.west, 0.0);
    assert_eq!(bounds.south, 0.0);
    assert_eq!(bounds.east, 100.0);
    assert_eq!(bounds.north, 50.0);
}

#[test]
fn test_parse_floating_edges_with_spaces() {
    let bounds = GeoBounds::from_edge_string("-125.5, 24.75, -66.25, 50.125").unwrap();
    assert!((bounds.west - (-125.5)).abs() < 0.001);
    assert!((bounds.south - 24.75).abs() < 0.001);
    assert!((bounds.east - (-66.25)).abs() < 0.001);
    assert!((bounds.north - 50.125).abs() < 0.001);
}

#[test]
fn test_parse_wrong_arity() {
    let err = GeoBounds::from_edge_string("1,2,3").unwrap_err();
    assert!(matches!(err, BoundsParseError::InvalidFormat(_)));
}

#[test]
fn test_parse_non_numeric() {
    let err = GeoBounds::from_edge_string("a,b,c,d").unwrap_err();
    assert!(matches!(err, BoundsParseError::InvalidNumber(_)));
}

#[test]
fn test_parse_degenerate() {
    let err = GeoBounds::from_edge_string("5,0,5,10").unwrap_err();
    assert!(matches!(err, BoundsParseError::Degenerate(_)));
}

// ============================================================================
// Geometry tests
// ============================================================================

#[test]
fn test_contains_edges_inclusive() {
    let bounds = GeoBounds::new(-10.0, -5.0, 10.0, 5.0);
    assert!(bounds.contains(-10.0, -5.0));
    assert!(bounds.contains(10.0, 5.0));
    assert!(!bounds.contains(-10.001, 0.0));
}

#[test]
fn test_clamp_pulls_point_inside() {
    let bounds = GeoBounds::new(0.0, 0.0, 10.0, 10.0);
    assert_eq!(bounds.clamp(-5.0, 15.0), (0.0, 10.0));
    assert_eq!(bounds.clamp(3.0, 4.0), (3.0, 4.0));
}

#[test]
fn test_serde_round_trip() {
    let bounds = GeoBounds::new(-125.0, 24.0, -66.0, 50.0);
    let json = serde_json::to_string(&bounds).unwrap();
    assert!(json.contains("\"west\":-125.0"));
    let back: GeoBounds = serde_json::from_str(&json).unwrap();
    assert_eq!(bounds, back);
}
