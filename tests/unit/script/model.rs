use super::*;

fn dot(x: f64, y: f64) -> Shape {
    Shape::Dot {
        center: Point::new(x, y),
        radius: 0.08,
        color: Color::BLUE_C,
    }
}

fn basic_script() -> Script {
    let mut shapes = BTreeMap::new();
    shapes.insert("atom".to_string(), dot(0.0, 0.0));
    shapes.insert(
        "bond".to_string(),
        Shape::Line {
            from: Point::new(0.0, 0.0),
            to: Point::new(1.0, 0.5),
            stroke_width: 4.0,
            color: Color::BLUE_C,
        },
    );
    shapes.insert(
        "label".to_string(),
        Shape::Text {
            content: "catenation".to_string(),
            markup: false,
            font_size: 28.0,
            color: Color::WHITE,
            place: Placement::NextTo {
                anchor: "bond".to_string(),
                direction: Edge::Down,
                buff: 1.0,
            },
        },
    );
    Script {
        name: "basic".to_string(),
        background: Color::BLACK,
        shapes,
        steps: vec![
            Step::Add {
                targets: vec!["atom".to_string()],
            },
            Step::Play {
                animations: vec![
                    Animation::Create {
                        target: "bond".to_string(),
                    },
                    Animation::MoveAlongPath {
                        target: "atom".to_string(),
                        path: "bond".to_string(),
                    },
                ],
                run_time: 0.6,
            },
            Step::Play {
                animations: vec![Animation::FadeIn {
                    target: "label".to_string(),
                }],
                run_time: 1.0,
            },
            Step::Wait { secs: 2.0 },
        ],
    }
}

#[test]
fn json_roundtrip_preserves_structure() {
    let script = basic_script();
    let s = script.to_json_pretty().unwrap();
    let de = Script::from_reader(s.as_bytes()).unwrap();
    assert_eq!(de, script);
    assert!(s.contains("\"kind\": \"dot\""));
    assert!(s.contains("\"op\": \"play\""));
    assert!(s.contains("\"anim\": \"move_along_path\""));
}

#[test]
fn duration_sums_plays_and_waits() {
    assert!((basic_script().duration_secs() - 3.6).abs() < 1e-12);
}

#[test]
fn validate_accepts_basic_script() {
    basic_script().validate().unwrap();
}

#[test]
fn validate_rejects_unknown_target() {
    let mut script = basic_script();
    script.steps.push(Step::Remove {
        targets: vec!["ghost".to_string()],
    });
    let err = script.validate().unwrap_err();
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn validate_rejects_move_along_non_path() {
    let mut script = basic_script();
    script.steps.push(Step::Play {
        animations: vec![Animation::MoveAlongPath {
            target: "bond".to_string(),
            path: "atom".to_string(),
        }],
        run_time: 1.0,
    });
    assert!(script.validate().is_err());
}

#[test]
fn validate_rejects_bad_timing() {
    let mut script = basic_script();
    script.steps.push(Step::Wait { secs: -1.0 });
    assert!(script.validate().is_err());

    let mut script = basic_script();
    script.steps.push(Step::Play {
        animations: vec![Animation::FadeOut {
            target: "atom".to_string(),
        }],
        run_time: 0.0,
    });
    assert!(script.validate().is_err());
}

#[test]
fn validate_rejects_double_animation_in_one_step() {
    let mut script = basic_script();
    script.steps.push(Step::Play {
        animations: vec![
            Animation::FadeOut {
                target: "atom".to_string(),
            },
            Animation::FadeIn {
                target: "atom".to_string(),
            },
        ],
        run_time: 1.0,
    });
    assert!(script.validate().is_err());
}

#[test]
fn validate_rejects_bad_shapes() {
    let mut script = basic_script();
    script.shapes.insert("bad".to_string(), dot(f64::NAN, 0.0));
    assert!(script.validate().is_err());

    let mut script = basic_script();
    script.shapes.insert(
        "tri".to_string(),
        Shape::Polygon {
            vertices: vec![Point::ORIGIN, Point::new(1.0, 0.0)],
            fill: Color::BLUE_C,
        },
    );
    assert!(script.validate().is_err());

    let mut script = basic_script();
    script.shapes.insert(
        "curve".to_string(),
        Shape::Path {
            d: "not a path".to_string(),
            stroke_width: 4.0,
            color: Color::BLUE_C,
        },
    );
    assert!(script.validate().is_err());
}

#[test]
fn animation_target_is_reported() {
    let a = Animation::Transform {
        target: "a".to_string(),
        into: "b".to_string(),
    };
    assert_eq!(a.target(), "a");
}
