use super::*;
use crate::script::model::Edge;

#[test]
fn builder_produces_valid_script() {
    let script = ScriptBuilder::new("demo")
        .shape("c", dot(Point::ORIGIN, 0.08, Color::BLUE_C))
        .unwrap()
        .shape(
            "title",
            text("hello", 48.0, Color::WHITE, Placement::ToEdge(Edge::Up)),
        )
        .unwrap()
        .add(["c"])
        .play(
            [Animation::FadeIn {
                target: "title".to_string(),
            }],
            1.0,
        )
        .wait(2.0)
        .build()
        .unwrap();
    assert_eq!(script.shapes.len(), 2);
    assert_eq!(script.steps.len(), 3);
    assert_eq!(script.background, Color::BLACK);
}

#[test]
fn duplicate_shape_keys_are_rejected() {
    let res = ScriptBuilder::new("demo")
        .shape("c", dot(Point::ORIGIN, 0.08, Color::BLUE_C))
        .unwrap()
        .shape("c", dot(Point::ORIGIN, 0.08, Color::BLUE_C));
    assert!(res.is_err());
}

#[test]
fn build_validates_references() {
    let res = ScriptBuilder::new("demo").add(["missing"]).build();
    assert!(res.is_err());
}

#[test]
fn path_shape_uses_svg_data() {
    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    p.line_to((1.0, 1.0));
    let Shape::Path { d, .. } = path(&p, 4.0, Color::BLUE_C) else {
        panic!("expected path shape");
    };
    assert!(d.starts_with('M'));
    assert!(BezPath::from_svg(&d).is_ok());
}
