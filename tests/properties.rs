//! Property tests: definition round-trips, baseline chain arithmetic, and
//! registry caching across arbitrary call sequences.

mod common;

use std::collections::BTreeMap;

use proptest::prelude::*;

use mechdraw::error::DraftError;
use mechdraw::registry::SharedStrategy;
use mechdraw::standard::StandardDefinition;
use mechdraw::strategy::{DimensionOp, LineRole, ShapeOp};
use mechdraw::types::Vector2;

use common::{recorded_texts, recording_session};

fn definition_json(
    layers: &BTreeMap<String, String>,
    weights: &BTreeMap<String, f64>,
    heights: &BTreeMap<String, f64>,
    arrow_size: f64,
) -> String {
    serde_json::json!({
        "line_types": {
            "CONTINUOUS": { "description": "solid", "pattern": [] },
            "DASHED": { "description": "dashed", "pattern": [2.0, -1.0] }
        },
        "layer_mapping": layers,
        "line_weights": weights,
        "text_heights": heights,
        "arrow_size": arrow_size,
        "font_style": "iso"
    })
    .to_string()
}

proptest! {
    #[test]
    fn definition_roundtrip_is_lossless(
        layers in proptest::collection::btree_map("[A-Z]{2,10}", "[a-z0-9]{1,12}", 1..8),
        weights in proptest::collection::btree_map("[A-Z]{2,8}", 0.1f64..2.0, 1..5),
        heights in proptest::collection::btree_map("[A-Z]{2,8}", 0.5f64..10.0, 1..5),
        arrow_size in 0.5f64..10.0,
    ) {
        let source = definition_json(&layers, &weights, &heights, arrow_size);
        let loaded = StandardDefinition::from_json_str(&source).unwrap();
        let reloaded = StandardDefinition::from_json_str(&loaded.to_json_string().unwrap()).unwrap();
        prop_assert_eq!(loaded, reloaded);
    }

    #[test]
    fn baseline_measures_every_target_from_the_origin(
        origin_x in -500i32..500,
        steps in proptest::collection::vec(1u32..200, 1..6),
        spacing in 1u32..20,
    ) {
        let origin = Vector2::new(f64::from(origin_x), 0.0);
        let mut targets = Vec::new();
        let mut expected = Vec::new();
        let mut offset = 0u32;
        for step in &steps {
            offset += step;
            targets.push(Vector2::new(origin.x + f64::from(offset), 0.0));
            expected.push(offset.to_string());
        }

        let (recorder, mut session) = recording_session();
        session
            .dispatch(DimensionOp::Baseline {
                origin: Some(origin),
                targets,
                spacing: f64::from(spacing),
                direction: Vector2::UNIT_X,
            })
            .unwrap();
        prop_assert_eq!(recorded_texts(&recorder), expected);
    }

    #[test]
    fn registry_caching_is_idempotent(
        sequence in proptest::collection::vec(0usize..4, 1..20),
    ) {
        const NAMES: [&str; 4] = ["basic_shapes", "dimensions", "symbols", "views"];
        let (_, mut session) = recording_session();
        let mut first_seen: BTreeMap<&str, SharedStrategy> = BTreeMap::new();
        for index in sequence {
            let name = NAMES[index];
            let instance = session.strategy(name).unwrap();
            match first_seen.get(name) {
                Some(original) => prop_assert!(std::rc::Rc::ptr_eq(original, &instance)),
                None => {
                    first_seen.insert(name, instance);
                }
            }
        }
        prop_assert_eq!(session.registry().instance_count(), first_seen.len());
    }

    #[test]
    fn circle_radius_sign_decides_the_outcome(radius in -100.0f64..100.0) {
        prop_assume!(radius != 0.0);
        let (recorder, mut session) = recording_session();
        let outcome = session.dispatch(ShapeOp::Circle {
            center: Vector2::new(50.0, 50.0),
            radius,
            role: LineRole::Visible,
        });
        if radius > 0.0 {
            prop_assert_eq!(outcome.unwrap().len(), 1);
            prop_assert_eq!(recorder.borrow().count_circles(), 1);
        } else {
            let err = outcome.unwrap_err();
            prop_assert!(
                matches!(
                    err,
                    DraftError::InvalidParameter { parameter: "radius", .. }
                ),
                "expected InvalidParameter for 'radius', got {:?}",
                err
            );
            prop_assert_eq!(recorder.borrow().call_count(), 0);
        }
    }
}
