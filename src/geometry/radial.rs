use std::f64::consts::{FRAC_PI_2, TAU};

use crate::foundation::core::{Point, Vec2};

/// Layout of `n` bonds radiating from a central atom at equal angular spacing.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RadialBondLayout {
    /// Central atom position.
    pub center: Point,
    /// Bond length.
    pub radius: f64,
    /// Angle of the first bond in radians (default π/2, straight up).
    pub start_angle: f64,
    /// Distance from the bond end to its label anchor, along the bond direction.
    pub label_offset: f64,
}

impl Default for RadialBondLayout {
    fn default() -> Self {
        Self {
            center: Point::ORIGIN,
            radius: 1.6,
            start_angle: FRAC_PI_2,
            label_offset: 0.25,
        }
    }
}

/// One bond of a [`RadialBondLayout`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RadialBond {
    /// Bond direction in radians.
    pub angle: f64,
    /// Bond end (the bonded atom).
    pub end: Point,
    /// Where the bonded atom's label is centered.
    pub label_anchor: Point,
}

impl RadialBondLayout {
    /// Layout centered on `center` with default radius and angles.
    pub fn around(center: Point) -> Self {
        Self {
            center,
            ..Self::default()
        }
    }

    /// Compute `n` bonds, counter-clockwise from `start_angle`.
    pub fn layout(&self, n: usize) -> Vec<RadialBond> {
        if n == 0 {
            return Vec::new();
        }
        let step = TAU / n as f64;
        (0..n)
            .map(|i| {
                let angle = self.start_angle + step * i as f64;
                let dir = Vec2::from_angle(angle);
                let end = self.center + dir * self.radius;
                RadialBond {
                    angle,
                    end,
                    label_anchor: end + dir * self.label_offset,
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/radial.rs"]
mod tests;
