use crate::foundation::core::{Affine, Point};

/// Default absolute tolerance for geometric comparisons.
pub const DEFAULT_EPS: f64 = 1e-9;

/// `(-1)^i` as a float: `1.0` for even `i`, `-1.0` for odd `i`.
#[inline]
pub fn alternating_sign(i: u32) -> f64 {
    if i % 2 == 0 { 1.0 } else { -1.0 }
}

/// Absolute-tolerance float comparison.
#[inline]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

/// Rotate `p` counter-clockwise (y-up) by `angle` radians about `pivot`.
///
/// `pivot` itself is a fixed point of the rotation.
pub fn rotate_about(p: Point, pivot: Point, angle: f64) -> Point {
    rotation_about(pivot, angle) * p
}

pub(crate) fn rotation_about(pivot: Point, angle: f64) -> Affine {
    let v = pivot.to_vec2();
    // T(pivot) * R(angle) * T(-pivot)
    Affine::translate(v) * Affine::rotate(angle) * Affine::translate(-v)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
