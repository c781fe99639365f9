//! Tests for TileCoord addressing.

use geo_common::tile::{TileCoord, TileParseError};

#[test]
fn test_cache_key_and_display() {
    let coord = TileCoord::new(5, 10, 12);
    assert_eq!(coord.cache_key(), "5/10/12");
    assert_eq!(coord.to_string(), "5 10 12");
}

#[test]
fn test_parse_slash_separated() {
    let coord: TileCoord = "7/64/42".parse().unwrap();
    assert_eq!(coord, TileCoord::new(7, 64, 42));
}

#[test]
fn test_parse_space_separated() {
    let coord: TileCoord = "7 64 42".parse().unwrap();
    assert_eq!(coord, TileCoord::new(7, 64, 42));
}

#[test]
fn test_parse_display_roundtrip() {
    let coord = TileCoord::new(12, 2200, 1343);
    assert_eq!(coord.to_string().parse::<TileCoord>().unwrap(), coord);
}

#[test]
fn test_parse_errors() {
    assert!(matches!(
        "7/64".parse::<TileCoord>(),
        Err(TileParseError::InvalidFormat(_))
    ));
    assert_eq!(
        "7/-1/3".parse::<TileCoord>(),
        Err(TileParseError::InvalidNumber("-1".to_string()))
    );
}

#[test]
fn test_validity() {
    assert!(TileCoord::new(0, 0, 0).is_valid());
    assert!(!TileCoord::new(0, 1, 0).is_valid());
    assert!(TileCoord::new(3, 7, 7).is_valid());
    assert!(!TileCoord::new(3, 7, 8).is_valid());
}

#[test]
fn test_parent() {
    let coord = TileCoord::new(5, 17, 23);
    assert_eq!(coord.parent(), Some(TileCoord::new(4, 8, 11)));
}

#[test]
fn test_children_order() {
    let children = TileCoord::new(1, 1, 0).children();
    assert_eq!(
        children,
        Some([
            TileCoord::new(2, 2, 0),
            TileCoord::new(2, 3, 0),
            TileCoord::new(2, 2, 1),
            TileCoord::new(2, 3, 1),
        ])
    );
}

#[test]
fn test_flip_y_is_involution() {
    let coord = TileCoord::new(6, 10, 20);
    let tms = coord.flip_y().unwrap();
    assert_eq!(tms.y, 43);
    assert_eq!(tms.flip_y(), Some(coord));
}
