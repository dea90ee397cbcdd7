use super::*;
use std::f64::consts::FRAC_PI_2;

#[test]
fn alternating_sign_flips_each_step() {
    assert_eq!(alternating_sign(0), 1.0);
    assert_eq!(alternating_sign(1), -1.0);
    assert_eq!(alternating_sign(2), 1.0);
    assert_eq!(alternating_sign(7), -1.0);
}

#[test]
fn rotate_about_keeps_pivot_fixed() {
    let pivot = Point::new(3.0, -1.0);
    let out = rotate_about(pivot, pivot, 1.234);
    assert!(approx_eq(out.x, pivot.x, DEFAULT_EPS));
    assert!(approx_eq(out.y, pivot.y, DEFAULT_EPS));
}

#[test]
fn rotate_about_quarter_turn_is_counter_clockwise() {
    let out = rotate_about(Point::new(2.0, 1.0), Point::new(1.0, 1.0), FRAC_PI_2);
    assert!(approx_eq(out.x, 1.0, DEFAULT_EPS));
    assert!(approx_eq(out.y, 2.0, DEFAULT_EPS));
}

#[test]
fn approx_eq_respects_tolerance() {
    assert!(approx_eq(1.0, 1.0 + 1e-12, DEFAULT_EPS));
    assert!(!approx_eq(1.0, 1.001, DEFAULT_EPS));
}
