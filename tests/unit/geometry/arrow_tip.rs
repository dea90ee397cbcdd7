use super::*;
use crate::foundation::math::{DEFAULT_EPS, approx_eq};
use std::f64::consts::{FRAC_PI_2, PI};

fn samples(pts: &[(f64, f64)]) -> PathSamples {
    PathSamples::new(pts.iter().map(|&(x, y)| Point::new(x, y)).collect()).unwrap()
}

fn assert_point(p: Point, x: f64, y: f64) {
    assert!(
        approx_eq(p.x, x, DEFAULT_EPS) && approx_eq(p.y, y, DEFAULT_EPS),
        "expected ({x}, {y}), got ({}, {})",
        p.x,
        p.y
    );
}

#[test]
fn straight_path_along_x_keeps_orientation() {
    let s = samples(&[(0.0, 0.0), (1.0, 0.0)]);
    let tip = ArrowTip::align(&s, TipShape::default(), DegenerateTangent::Reject).unwrap();
    assert_eq!(tip.pivot, Point::new(1.0, 0.0));
    assert_eq!(tip.angle, 0.0);
    assert_point(tip.base[0], 0.85, 0.15);
    assert_point(tip.base[1], 0.85, 0.0);
}

#[test]
fn upward_path_rotates_by_quarter_turn() {
    let s = samples(&[(5.0, 5.0), (0.0, 0.0), (0.0, 1.0)]);
    let shape = TipShape::default();
    let tip = ArrowTip::align(&s, shape, DegenerateTangent::Reject).unwrap();
    assert!(approx_eq(tip.angle, FRAC_PI_2, DEFAULT_EPS));
    assert_eq!(tip.pivot, Point::new(0.0, 1.0));

    // Direct rotation matrix about the pivot (origin), then translate by (0, 1).
    let (sin, cos) = FRAC_PI_2.sin_cos();
    for (local, placed) in shape.base.iter().zip(tip.base.iter()) {
        let x = local.x * cos - local.y * sin;
        let y = local.x * sin + local.y * cos + 1.0;
        assert_point(*placed, x, y);
    }
    assert_point(tip.base[0], -0.15, 0.85);
    assert_point(tip.base[1], 0.0, 0.85);
}

#[test]
fn angle_covers_negative_x_direction() {
    let s = samples(&[(1.0, 0.0), (0.0, 0.0)]);
    let tip = ArrowTip::align(&s, TipShape::default(), DegenerateTangent::Reject).unwrap();
    assert!(approx_eq(tip.angle, PI, DEFAULT_EPS));
    assert_point(tip.base[1], 0.15, 0.0);
}

#[test]
fn rotation_is_about_the_pivot_not_the_centroid() {
    let shape = TipShape {
        pivot: Point::new(2.0, 3.0),
        base: [Point::new(1.0, 4.0), Point::new(1.0, 3.0)],
    };
    let s = samples(&[(0.0, 0.0), (0.0, -1.0)]);
    let tip = ArrowTip::align(&s, shape, DegenerateTangent::Reject).unwrap();
    assert_eq!(tip.pivot, Point::new(0.0, -1.0));
    // Base offsets (-1, 1) and (-1, 0) rotated by -π/2 become (1, 1) and (0, 1).
    assert_point(tip.base[0], 1.0, 0.0);
    assert_point(tip.base[1], 0.0, 0.0);
}

#[test]
fn degenerate_tangent_is_rejected_by_default() {
    let s = samples(&[(0.0, 0.0), (1.0, 1.0), (1.0, 1.0)]);
    let err = ArrowTip::align(&s, TipShape::default(), DegenerateTangent::default()).unwrap_err();
    assert!(matches!(err, CatenaError::Geometry(_)));
}

#[test]
fn degenerate_tangent_fallback_yields_finite_geometry() {
    let s = samples(&[(1.0, 1.0), (1.0, 1.0)]);
    let tip =
        ArrowTip::align(&s, TipShape::default(), DegenerateTangent::Fallback(0.0)).unwrap();
    assert_eq!(tip.angle, 0.0);
    assert!(tip.vertices().iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    assert_point(tip.base[0], 0.85, 1.15);

    let err = ArrowTip::align(&s, TipShape::default(), DegenerateTangent::Fallback(f64::NAN))
        .unwrap_err();
    assert!(matches!(err, CatenaError::Validation(_)));
}

#[test]
fn samples_require_two_finite_points() {
    assert!(PathSamples::new(vec![Point::ORIGIN]).is_err());
    assert!(PathSamples::new(vec![Point::ORIGIN, Point::new(f64::NAN, 0.0)]).is_err());
}

#[test]
fn bezpath_samples_end_with_final_control_point() {
    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    path.curve_to((0.0, 1.0), (2.0, 1.0), (2.0, 0.0));
    let s = PathSamples::from_bezpath(&path).unwrap();
    assert_eq!(s.points().len(), 4);
    assert_eq!(s.end(), Point::new(2.0, 0.0));
    assert_eq!(s.end_tangent(), Vec2::new(0.0, -1.0));

    let tip = ArrowTip::for_path(&path, 0.15).unwrap();
    assert!(approx_eq(tip.angle, -FRAC_PI_2, DEFAULT_EPS));
}

#[test]
fn align_is_idempotent_and_path_is_closed_triangle() {
    let s = samples(&[(0.0, 0.0), (0.3, 0.7)]);
    let a = ArrowTip::align(&s, TipShape::default(), DegenerateTangent::Reject).unwrap();
    let b = ArrowTip::align(&s, TipShape::default(), DegenerateTangent::Reject).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_path().elements().len(), 4);
}

#[test]
fn backward_tangent_with_negative_zero_reports_pi() {
    let s = samples(&[(1.0, 0.0), (0.0, -0.0)]);
    let tip = ArrowTip::align(&s, TipShape::default(), DegenerateTangent::Reject).unwrap();
    assert_eq!(tip.angle, PI);
    assert_point(tip.base[0], 0.15, -0.15);
    assert_point(tip.base[1], 0.15, 0.0);
}

#[test]
fn half_head_rejects_unusable_sizes() {
    for size in [f64::NAN, f64::INFINITY, 0.0, -0.15] {
        let err = TipShape::half_head(size).unwrap_err();
        assert!(matches!(err, CatenaError::Validation(_)), "size {size}");
    }
    assert_eq!(TipShape::half_head(0.15).unwrap(), TipShape::default());

    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    path.line_to((1.0, 0.0));
    assert!(ArrowTip::for_path(&path, f64::NAN).is_err());
}
