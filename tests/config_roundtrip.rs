//! Standard definition loading, strict lookup, and lossless JSON round-trips.

mod common;

use mechdraw::error::DraftError;
use mechdraw::standard::{LayerRole, LineWeightTier, StandardDefinition, TextHeightTier};

use common::test_output_path;

fn custom_json() -> &'static str {
    r#"{
    "line_types": {
        "CONTINUOUS": { "description": "solid", "pattern": [] },
        "DASHED": { "description": "dashed", "pattern": [2.0, -1.0] },
        "CHAIN": { "description": "chain", "pattern": [8.0, -2.0, 0.0, -2.0] }
    },
    "layer_mapping": {
        "VISIBLE": "OUTLINE",
        "HIDDEN": "HIDDEN",
        "DIMENSIONS": "DIM"
    },
    "line_weights": { "THIN": 0.18, "THICK": 0.5 },
    "text_heights": { "NORMAL": 3.5, "SMALL": 2.5 },
    "arrow_size": 2.5,
    "font_style": "iso3098"
}"#
}

#[test]
fn roundtrip_preserves_content_and_order() {
    let loaded = StandardDefinition::from_json_str(custom_json()).unwrap();
    let serialized = loaded.to_json_string().unwrap();
    let reloaded = StandardDefinition::from_json_str(&serialized).unwrap();
    assert_eq!(loaded, reloaded);

    let line_type_names: Vec<&str> = reloaded.line_types().map(|(name, _)| name).collect();
    assert_eq!(line_type_names, vec!["CONTINUOUS", "DASHED", "CHAIN"]);
    let roles: Vec<&str> = reloaded.layer_mapping().map(|(role, _)| role).collect();
    assert_eq!(roles, vec!["VISIBLE", "HIDDEN", "DIMENSIONS"]);
}

#[test]
fn omitted_scales_stay_omitted() {
    let loaded = StandardDefinition::from_json_str(custom_json()).unwrap();
    let serialized = loaded.to_json_string().unwrap();
    assert!(!serialized.contains("scales"));
    // The lookup still answers with the built-in preferred series
    assert_eq!(loaded.scales()[0], 1);
}

#[test]
fn explicit_scales_roundtrip() {
    let source = custom_json().replace(
        "\"font_style\": \"iso3098\"",
        "\"font_style\": \"iso3098\",\n    \"scales\": [1, 2, 5]",
    );
    let loaded = StandardDefinition::from_json_str(&source).unwrap();
    assert_eq!(loaded.scales(), [1, 2, 5]);
    let serialized = loaded.to_json_string().unwrap();
    assert!(serialized.contains("scales"));
    let reloaded = StandardDefinition::from_json_str(&serialized).unwrap();
    assert_eq!(loaded, reloaded);
}

#[test]
fn file_loading_roundtrips() {
    let path = test_output_path("custom_standard.json");
    std::fs::write(&path, custom_json()).unwrap();
    let from_file = StandardDefinition::from_file(&path).unwrap();
    let from_str = StandardDefinition::from_json_str(custom_json()).unwrap();
    assert_eq!(from_file, from_str);
}

#[test]
fn missing_file_reports_io_error() {
    let err = StandardDefinition::from_file(test_output_path("does_not_exist.json")).unwrap_err();
    assert!(matches!(err, DraftError::Io(_)));
}

#[test]
fn missing_required_key_fails_to_parse() {
    let source = r#"{
        "line_types": {},
        "layer_mapping": {},
        "line_weights": {},
        "text_heights": {},
        "font_style": "iso"
    }"#;
    let err = StandardDefinition::from_json_str(source).unwrap_err();
    assert!(matches!(err, DraftError::ConfigParse(_)));
    assert!(err.to_string().contains("arrow_size"));
}

#[test]
fn empty_pattern_on_a_dashed_type_is_a_config_error() {
    let source = custom_json().replace("[2.0, -1.0]", "[]");
    let err = StandardDefinition::from_json_str(&source).unwrap_err();
    match err {
        DraftError::Config(message) => assert!(message.contains("DASHED")),
        other => panic!("expected a config error, got {other}"),
    }
}

#[test]
fn lookups_fail_closed_on_a_sparse_definition() {
    let sparse = StandardDefinition::from_json_str(custom_json()).unwrap();

    assert_eq!(sparse.layer(LayerRole::Visible).unwrap(), "OUTLINE");
    let err = sparse.layer(LayerRole::Centerline).unwrap_err();
    assert!(matches!(
        err,
        DraftError::Lookup {
            table: "layer_mapping",
            ..
        }
    ));

    assert_eq!(sparse.line_weight(LineWeightTier::Thin).unwrap(), 0.18);
    assert!(sparse.line_weight(LineWeightTier::Medium).is_err());

    assert_eq!(sparse.text_height(TextHeightTier::Normal).unwrap(), 3.5);
    assert!(sparse.text_height(TextHeightTier::Title).is_err());

    assert!(sparse.line_type("CHAIN").is_ok());
    assert!(sparse.line_type("CENTER").is_err());

    // Coverage check reports the first gap instead of passing
    assert!(sparse.verify_coverage().is_err());
}

#[test]
fn gb_definition_is_complete_and_stable() {
    let gb = StandardDefinition::gb();
    gb.verify_coverage().unwrap();

    let json = gb.to_json_string().unwrap();
    let reloaded = StandardDefinition::from_json_str(&json).unwrap();
    assert_eq!(*gb, reloaded);

    assert_eq!(gb.layer(LayerRole::Visible).unwrap(), "1细实线");
    assert_eq!(gb.layer(LayerRole::TitleBlock).unwrap(), "2粗实线");
    assert_eq!(gb.line_weight(LineWeightTier::Thick).unwrap(), 0.7);
    assert_eq!(gb.text_height(TextHeightTier::Subtitle).unwrap(), 3.5);
    assert_eq!(gb.arrow_size(), 3.0);
    assert_eq!(gb.font_style(), "chinese");
    assert_eq!(
        gb.scales(),
        [1, 2, 5, 10, 20, 50, 100, 200, 500, 1000]
    );
}

#[test]
fn layer_for_key_supports_open_ended_roles() {
    let gb = StandardDefinition::gb();
    assert_eq!(gb.layer_for_key("AUXILIARY").unwrap(), "9辅助线");
    assert!(gb.layer_for_key("NONSTANDARD").is_err());
}
