pub use kurbo::{Affine, BezPath, Line, Point, Vec2};

/// Length below which a direction vector is treated as zero.
pub(crate) const ZERO_LENGTH: f64 = 1e-12;

pub(crate) fn is_finite_point(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
