use super::*;
use crate::foundation::math::approx_eq;
use crate::script::model::{Shape, Step};

#[test]
fn every_builtin_scene_validates_with_defaults() {
    let cfg = SceneConfig::default();
    for kind in SceneKind::ALL {
        let script = build_scene(kind, &cfg).unwrap();
        assert_eq!(script.name, kind.name());
        script.validate().unwrap();
        assert!(script.duration_secs() > 0.0);
    }
}

#[test]
fn carbon_compounds_draws_one_bond_per_chain_step() {
    let script = carbon_compounds(&SceneConfig::default()).unwrap();
    let chain_bonds = script
        .shapes
        .keys()
        .filter(|k| k.starts_with("chain_bond_"))
        .count();
    assert_eq!(chain_bonds, 7);

    let tracer_moves = script
        .steps
        .iter()
        .filter(|s| {
            matches!(s, Step::Play { animations, .. }
                if animations.iter().any(|a| matches!(a, Animation::MoveAlongPath { .. })))
        })
        .count();
    assert_eq!(tracer_moves, 7);
}

#[test]
fn carbon_parks_on_chain_start() {
    let script = carbon_compounds(&SceneConfig::default()).unwrap();
    let Some(Shape::Line { from, .. }) = script.shapes.get("chain_bond_0") else {
        panic!("missing first chain bond");
    };
    assert!(approx_eq(from.x, -2.8, 1e-9));
    assert!(approx_eq(from.y, 0.0, 1e-9));
}

#[test]
fn bonding_diagram_follows_config_labels() {
    let mut cfg = SceneConfig::default();
    cfg.bonds.labels = vec!["H".to_string(), "Cl".to_string()];
    let script = carbon_compounds(&cfg).unwrap();
    let Some(Shape::Text { content, .. }) = script.shapes.get("bond_label_1") else {
        panic!("missing label");
    };
    assert_eq!(content, "Cl");
    assert!(!script.shapes.contains_key("bond_2"));
}

#[test]
fn tangent_arrow_tip_sits_on_arc_end() {
    let script = tangent_arrow(&SceneConfig::default()).unwrap();
    let Some(Shape::Polygon { vertices, .. }) = script.shapes.get("tip") else {
        panic!("missing tip polygon");
    };
    assert_eq!(vertices.len(), 3);
    assert_eq!(vertices[0], Point::new(1.0, 0.0));
    // Clockwise semicircle ends heading straight down; the base sits above the tip.
    assert!(approx_eq(vertices[2].x, 1.0, 1e-6));
    assert!(approx_eq(vertices[2].y, 0.15, 1e-6));
}

#[test]
fn scenes_are_rebuilt_fresh_each_call() {
    let cfg = SceneConfig::default();
    let a = build_scene(SceneKind::CarbonCompounds, &cfg).unwrap();
    let b = build_scene(SceneKind::CarbonCompounds, &cfg).unwrap();
    assert_eq!(a, b);
}

#[test]
fn invalid_config_is_rejected_before_building() {
    let mut cfg = SceneConfig::default();
    cfg.arrow.radius = 0.5;
    assert!(build_scene(SceneKind::TangentArrow, &cfg).is_err());
}
