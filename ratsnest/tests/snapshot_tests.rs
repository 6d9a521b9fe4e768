//! Tests for loading board snapshots

use ratsnest::board::{Anchor, PadMount, TOP_COPPER};
use ratsnest::prelude::*;
use std::io::Write;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_load_fixture() {
    let snapshot =
        BoardSnapshot::load(&fixture_path("two_layer_board.json")).expect("Should load snapshot");

    assert_eq!(snapshot.boards.len(), 2);
    assert_eq!(snapshot.nets.len(), 3);

    let main = snapshot.find_board("main").expect("Should find main board");
    let gnd = snapshot.find_net("GND").expect("Should find GND");
    assert_eq!(gnd.pads_on(main).count(), 3);
    assert_eq!(gnd.planes_on(main).count(), 1);
    assert_eq!(gnd.net_segments_on(main).next().map(|s| s.vias.len()), Some(1));

    let mounts: Vec<bool> = gnd.pads_on(main).map(|p| p.is_through_hole()).collect();
    assert_eq!(mounts, vec![true, false, false]);
}

#[test]
fn test_lookup_by_uuid() {
    let snapshot =
        BoardSnapshot::load(&fixture_path("two_layer_board.json")).expect("Should load snapshot");

    let board = snapshot
        .find_board("00000000-0000-4000-8000-000000000002")
        .expect("Should find board by UUID");
    assert_eq!(board.name, "panel");

    let net = snapshot
        .find_net("00000000-0000-4000-8000-000000000103")
        .expect("Should find net by UUID");
    assert_eq!(net.name, "VCC");
}

#[test]
fn test_net_lines_reference_anchors() {
    let snapshot =
        BoardSnapshot::load(&fixture_path("two_layer_board.json")).expect("Should load snapshot");
    let sig = snapshot.find_net("SIG").expect("Should find SIG");
    let segment = &sig.net_segments[0];

    assert_eq!(segment.net_lines.len(), 2);
    assert!(matches!(segment.net_lines[0].start, Anchor::Pad { .. }));
    assert!(matches!(segment.net_lines[0].end, Anchor::NetPoint { .. }));
    assert_eq!(segment.net_lines[0].layer, TOP_COPPER);

    let layers = segment.net_point_layers();
    assert_eq!(layers.get(&segment.net_points[0].uuid), Some(&TOP_COPPER));
    assert!(!layers.contains_key(&segment.net_points[1].uuid));
}

#[test]
fn test_round_trip_through_file() {
    let original =
        BoardSnapshot::load(&fixture_path("two_layer_board.json")).expect("Should load snapshot");

    let mut file = tempfile::NamedTempFile::new().expect("Should create temp file");
    file.write_all(original.to_json().expect("Should serialize").as_bytes())
        .expect("Should write snapshot");

    let reloaded = BoardSnapshot::load(file.path()).expect("Should reload snapshot");
    let board = reloaded.select_board(None).expect("Should have a board");

    let before = RatsnestCore::analyze_board(&original, &original.boards[0], &RatsnestOptions::default())
        .expect("Should analyse original");
    let after = RatsnestCore::analyze_board(&reloaded, board, &RatsnestOptions::default())
        .expect("Should analyse reloaded");
    assert_eq!(before.stats, after.stats);
}

#[test]
fn test_minimal_snapshot_defaults() {
    let json = r#"{
        "boards": [{ "uuid": "00000000-0000-4000-8000-000000000001", "name": "main" }],
        "nets": [{ "uuid": "00000000-0000-4000-8000-000000000101", "name": "NC" }]
    }"#;

    let snapshot = ratsnest::parse_snapshot(json).expect("Should parse minimal snapshot");
    let net = &snapshot.nets[0];
    assert!(net.component_signals.is_empty());
    assert!(net.net_segments.is_empty());
    assert!(net.planes.is_empty());
}

#[test]
fn test_single_sided_mount_needs_layer() {
    let json = r#"{ "type": "single_sided" }"#;
    assert!(serde_json::from_str::<PadMount>(json).is_err());
}

#[test]
fn test_invalid_json() {
    let mut file = tempfile::NamedTempFile::new().expect("Should create temp file");
    file.write_all(b"{ \"boards\": [").expect("Should write");

    let result = BoardSnapshot::load(file.path());
    assert!(matches!(result, Err(RatsnestError::Json(_))));
}

#[test]
fn test_empty_snapshot_has_no_board() {
    let snapshot = BoardSnapshot::from_json("{}").expect("Should parse empty snapshot");
    assert!(matches!(
        snapshot.select_board(None),
        Err(RatsnestError::NoBoards)
    ));
}

#[test]
fn test_missing_file() {
    let result = BoardSnapshot::load(&PathBuf::from("not_a_real_file.json"));
    assert!(matches!(result, Err(RatsnestError::Io(_))));
}

#[test]
fn test_dangling_net_line_is_an_error() {
    let json = r#"{
        "boards": [{ "uuid": "00000000-0000-4000-8000-000000000001", "name": "main" }],
        "nets": [{
            "uuid": "00000000-0000-4000-8000-000000000101",
            "name": "SIG",
            "net_segments": [{
                "uuid": "00000000-0000-4000-8000-000000000601",
                "board": "00000000-0000-4000-8000-000000000001",
                "net": "00000000-0000-4000-8000-000000000101",
                "net_lines": [{
                    "uuid": "00000000-0000-4000-8000-000000001001",
                    "start": { "kind": "via", "uuid": "55555555-5555-4555-8555-555555555555" },
                    "end": { "kind": "via", "uuid": "66666666-6666-4666-8666-666666666666" },
                    "layer": "top_cu"
                }]
            }]
        }]
    }"#;

    let mut file = tempfile::NamedTempFile::new().expect("Should create temp file");
    file.write_all(json.as_bytes()).expect("Should write");

    let result = RatsnestCore::analyze_file(file.path(), None, &RatsnestOptions::default());
    match result {
        Err(RatsnestError::Inconsistent(message)) => {
            assert!(message.contains("not part of the net"), "{}", message)
        }
        other => panic!("expected an inconsistent snapshot, got {:?}", other.map(|r| r.board)),
    }
}

#[test]
fn test_segment_of_other_net_is_an_error() {
    let json = r#"{
        "boards": [{ "uuid": "00000000-0000-4000-8000-000000000001", "name": "main" }],
        "nets": [{
            "uuid": "00000000-0000-4000-8000-000000000101",
            "name": "SIG",
            "net_segments": [{
                "uuid": "00000000-0000-4000-8000-000000000601",
                "board": "00000000-0000-4000-8000-000000000001",
                "net": "00000000-0000-4000-8000-000000000102"
            }]
        }]
    }"#;

    assert!(matches!(
        ratsnest::parse_snapshot(json),
        Err(RatsnestError::Inconsistent(_))
    ));
}
