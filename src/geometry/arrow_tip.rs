use std::f64::consts::PI;

use kurbo::PathEl;

use crate::foundation::core::{BezPath, Point, Vec2, ZERO_LENGTH, is_finite_point};
use crate::foundation::error::{CatenaError, CatenaResult};
use crate::foundation::math::rotation_about;

/// Ordered samples approximating a curve. Only the last two are used for the end tangent.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PathSamples {
    points: Vec<Point>,
}

impl PathSamples {
    /// Wrap raw samples. Requires at least two finite points.
    pub fn new(points: Vec<Point>) -> CatenaResult<Self> {
        if points.len() < 2 {
            return Err(CatenaError::validation(format!(
                "path needs at least 2 samples to estimate a tangent, got {}",
                points.len()
            )));
        }
        if let Some(i) = points.iter().position(|p| !is_finite_point(*p)) {
            return Err(CatenaError::validation(format!(
                "path sample {i} is not finite"
            )));
        }
        Ok(Self { points })
    }

    /// Collect anchors and control points of `path` in drawing order.
    ///
    /// For a path ending in a curve the last two samples are the final control point and the
    /// end anchor, so their difference is the curve's end tangent.
    pub fn from_bezpath(path: &BezPath) -> CatenaResult<Self> {
        let mut points = Vec::new();
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => points.push(p),
                PathEl::QuadTo(c, p) => points.extend([c, p]),
                PathEl::CurveTo(c0, c1, p) => points.extend([c0, c1, p]),
                PathEl::ClosePath => {}
            }
        }
        Self::new(points)
    }

    /// All samples.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Terminal sample.
    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Finite-difference tangent at the end: last sample minus second-to-last.
    pub fn end_tangent(&self) -> Vec2 {
        let n = self.points.len();
        self.points[n - 1] - self.points[n - 2]
    }
}

/// Local arrowhead geometry: a pivot (the tip) and two base vertices, drawn pointing along +x.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TipShape {
    /// Tip vertex; rotation and placement are both about this point.
    pub pivot: Point,
    /// Base vertices.
    pub base: [Point; 2],
}

impl TipShape {
    /// Half-headed tip of the given size: pivot at origin, base at `(-size, size)` and
    /// `(-size, 0)`. `size` must be finite and positive.
    pub fn half_head(size: f64) -> CatenaResult<Self> {
        if !size.is_finite() || size <= 0.0 {
            return Err(CatenaError::validation(format!(
                "tip size must be finite and > 0, got {size}"
            )));
        }
        Ok(Self::half_head_unchecked(size))
    }

    const fn half_head_unchecked(size: f64) -> Self {
        Self {
            pivot: Point::ORIGIN,
            base: [Point::new(-size, size), Point::new(-size, 0.0)],
        }
    }
}

impl Default for TipShape {
    fn default() -> Self {
        Self::half_head_unchecked(0.15)
    }
}

/// What to do when the last two samples coincide and the tangent has no direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateTangent {
    /// Fail with [`CatenaError::Geometry`].
    #[default]
    Reject,
    /// Orient the tip at this fixed angle (radians).
    Fallback(f64),
}

/// An arrowhead rotated to the end tangent of a path and placed on its terminal point.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ArrowTip {
    /// Tip vertex, equal to the path's terminal sample.
    pub pivot: Point,
    /// Rotated and translated base vertices.
    pub base: [Point; 2],
    /// Orientation in radians, in `(-π, π]`.
    pub angle: f64,
}

impl ArrowTip {
    /// Align `shape` with the end tangent of `samples`.
    ///
    /// The shape is rotated by `atan2(t.y, t.x)` about its pivot and then translated so the
    /// pivot lands exactly on the path end.
    #[tracing::instrument(level = "debug", skip(samples))]
    pub fn align(
        samples: &PathSamples,
        shape: TipShape,
        on_degenerate: DegenerateTangent,
    ) -> CatenaResult<Self> {
        let tangent = samples.end_tangent();
        let angle = if tangent.hypot() > ZERO_LENGTH {
            // A -0.0 y component would give -π; keep the angle in (-π, π].
            let a = tangent.y.atan2(tangent.x);
            if a == -PI { PI } else { a }
        } else {
            match on_degenerate {
                DegenerateTangent::Reject => {
                    return Err(CatenaError::geometry(format!(
                        "zero-length end tangent at ({}, {})",
                        samples.end().x,
                        samples.end().y
                    )));
                }
                DegenerateTangent::Fallback(a) if a.is_finite() => {
                    tracing::warn!(angle = a, "degenerate end tangent, using fallback angle");
                    a
                }
                DegenerateTangent::Fallback(a) => {
                    return Err(CatenaError::validation(format!(
                        "fallback tip angle must be finite, got {a}"
                    )));
                }
            }
        };

        let rot = rotation_about(shape.pivot, angle);
        let end = samples.end();
        let shift = end - rot * shape.pivot;
        let place = |p: Point| rot * p + shift;

        Ok(Self {
            pivot: end,
            base: [place(shape.base[0]), place(shape.base[1])],
            angle,
        })
    }

    /// Align a default [`TipShape`] with the end of a Bézier path.
    pub fn for_path(path: &BezPath, size: f64) -> CatenaResult<Self> {
        let samples = PathSamples::from_bezpath(path)?;
        Self::align(&samples, TipShape::half_head(size)?, DegenerateTangent::Reject)
    }

    /// `[pivot, base0, base1]`.
    pub fn vertices(&self) -> [Point; 3] {
        [self.pivot, self.base[0], self.base[1]]
    }

    /// Closed triangle path.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.pivot);
        path.line_to(self.base[0]);
        path.line_to(self.base[1]);
        path.close_path();
        path
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/arrow_tip.rs"]
mod tests;
