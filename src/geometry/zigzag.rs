use std::f64::consts::FRAC_PI_6;

use crate::foundation::core::{Line, Point};
use crate::foundation::math::alternating_sign;

/// Builder for a centered zig-zag polyline.
///
/// Step `i` (1-based) advances `segment_length` along x and `segment_length * tan(θ·(−1)^i)`
/// along y, so the chain alternates down/up around the start height. After all points are
/// produced the chain is shifted horizontally so the midpoint of its first and last point
/// sits on `start.x`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZigZagChainBuilder {
    start: Point,
    segment_length: f64,
    atom_count: u32,
    half_angle: f64,
}

impl Default for ZigZagChainBuilder {
    fn default() -> Self {
        Self {
            start: Point::ORIGIN,
            segment_length: 0.8,
            atom_count: 7,
            half_angle: FRAC_PI_6,
        }
    }
}

impl ZigZagChainBuilder {
    /// Builder with `atom_count` segments of `segment_length`, starting at the origin.
    pub fn new(segment_length: f64, atom_count: u32) -> Self {
        Self {
            segment_length,
            atom_count,
            ..Self::default()
        }
    }

    /// Start point (and horizontal centering target).
    pub fn start(mut self, start: Point) -> Self {
        self.start = start;
        self
    }

    /// Alternating half angle in radians (default π/6).
    pub fn half_angle(mut self, half_angle: f64) -> Self {
        self.half_angle = half_angle;
        self
    }

    /// Compute the chain. Never fails; degenerate parameters give degenerate chains.
    #[tracing::instrument(level = "debug")]
    pub fn build(self) -> ZigZagChain {
        let n = self.atom_count as usize;
        let l = self.segment_length;

        let mut points = Vec::with_capacity(n + 1);
        points.push(self.start);
        let mut prev = self.start;
        for i in 1..=self.atom_count {
            let angle = self.half_angle * alternating_sign(i);
            let next = Point::new(prev.x + l, prev.y + l * angle.tan());
            points.push(next);
            prev = next;
        }

        // Measured from the start so a non-origin start stays the centering target.
        let offset = (prev.x - self.start.x) / 2.0;
        for p in &mut points {
            p.x -= offset;
        }

        tracing::debug!(points = points.len(), offset, "zig-zag chain built");
        ZigZagChain { points }
    }
}

/// Ordered, horizontally centered zig-zag points (`atom_count + 1` of them).
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ZigZagChain {
    points: Vec<Point>,
}

impl ZigZagChain {
    /// All atom positions in chain order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points (`atom_count + 1`).
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: a chain holds at least its start point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of segments.
    pub fn atom_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// First point of the chain.
    pub fn first(&self) -> Point {
        self.points[0]
    }

    /// Last point of the chain.
    pub fn last(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// x coordinate of the midpoint between the first and last point.
    pub fn midpoint_x(&self) -> f64 {
        (self.first().x + self.last().x) / 2.0
    }

    /// Bond segments between consecutive points.
    pub fn bonds(&self) -> impl Iterator<Item = Line> + '_ {
        self.points.windows(2).map(|w| Line::new(w[0], w[1]))
    }

    /// Consume the chain into its points.
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/zigzag.rs"]
mod tests;
