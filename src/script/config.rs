use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::color::Color;
use crate::foundation::core::{Point, is_finite_point};
use crate::foundation::error::{CatenaError, CatenaResult};

/// Parameters for every built-in scene. All fields have defaults, so `{}` is a valid config.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Colors.
    pub palette: Palette,
    /// Zig-zag chain layout.
    pub chain: ChainConfig,
    /// Radial bond diagram layout.
    pub bonds: BondConfig,
    /// Curved arrow layout.
    pub arrow: ArrowConfig,
}

/// Scene colors.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    /// Atom dots and the carbon symbol.
    pub atom: Color,
    /// Bond lines and arrows.
    pub bond: Color,
    /// Headings and labels.
    pub text: Color,
    /// Frame background.
    pub background: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            atom: Color::BLUE_C,
            bond: Color::BLUE_C,
            text: Color::WHITE,
            background: Color::BLACK,
        }
    }
}

/// Zig-zag chain parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChainConfig {
    /// Number of bonds in the chain.
    pub atom_count: u32,
    /// Bond length (horizontal advance per step).
    pub segment_length: f64,
    /// Alternating half angle in degrees.
    pub half_angle_deg: f64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            atom_count: 7,
            segment_length: 0.8,
            half_angle_deg: 30.0,
        }
    }
}

/// Radial bond diagram parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BondConfig {
    /// Bonded atom labels, counter-clockwise from `start_angle_deg`.
    pub labels: Vec<String>,
    /// Bond length.
    pub radius: f64,
    /// Angle of the first bond in degrees.
    pub start_angle_deg: f64,
    /// Gap between bond end and label center.
    pub label_offset: f64,
    /// Central carbon position.
    pub center: Point,
}

impl Default for BondConfig {
    fn default() -> Self {
        Self {
            labels: ["H", "O", "N", "S", "halogens"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            radius: 1.6,
            start_angle_deg: 90.0,
            label_offset: 0.25,
            center: Point::new(0.0, -0.2),
        }
    }
}

/// Curved arrow parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArrowConfig {
    /// Tail position.
    pub start: Point,
    /// Horizontal distance from tail to head.
    pub span: f64,
    /// Signed arc radius; negative bends clockwise.
    pub radius: f64,
    /// Size of the half-headed tip.
    pub tip_size: f64,
}

impl Default for ArrowConfig {
    fn default() -> Self {
        Self {
            start: Point::new(-2.0, 0.0),
            span: 3.0,
            radius: -1.5,
            tip_size: 0.15,
        }
    }
}

impl ChainConfig {
    /// Largest accepted `atom_count`.
    pub const MAX_ATOM_COUNT: u32 = 10_000;

    /// Reject chains the layout cannot produce finite points for.
    pub fn validate(&self) -> CatenaResult<()> {
        if self.atom_count > Self::MAX_ATOM_COUNT {
            return Err(CatenaError::validation(format!(
                "chain.atom_count must be <= {}, got {}",
                Self::MAX_ATOM_COUNT,
                self.atom_count
            )));
        }
        if !self.segment_length.is_finite() || self.segment_length < 0.0 {
            return Err(CatenaError::validation(
                "chain.segment_length must be finite and >= 0",
            ));
        }
        if !self.half_angle_deg.is_finite() || self.half_angle_deg.abs() >= 90.0 {
            return Err(CatenaError::validation(
                "chain.half_angle_deg must be finite with |angle| < 90",
            ));
        }
        Ok(())
    }
}

impl SceneConfig {
    /// Parse a config from a JSON reader and validate it.
    pub fn from_reader<R: std::io::Read>(r: R) -> CatenaResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| CatenaError::serde(format!("parse scene config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a config from a JSON file on disk and validate it.
    pub fn from_path(path: impl AsRef<Path>) -> CatenaResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CatenaError::validation(format!("open scene config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject values the geometry cannot use.
    pub fn validate(&self) -> CatenaResult<()> {
        self.chain.validate()?;

        let b = &self.bonds;
        if !b.radius.is_finite() || b.radius <= 0.0 {
            return Err(CatenaError::validation("bonds.radius must be > 0"));
        }
        if !b.start_angle_deg.is_finite() || !b.label_offset.is_finite() {
            return Err(CatenaError::validation(
                "bonds.start_angle_deg and bonds.label_offset must be finite",
            ));
        }
        if !is_finite_point(b.center) {
            return Err(CatenaError::validation("bonds.center must be finite"));
        }
        if let Some(i) = b.labels.iter().position(|l| l.trim().is_empty()) {
            return Err(CatenaError::validation(format!(
                "bonds.labels[{i}] must be non-empty"
            )));
        }

        let a = &self.arrow;
        if !is_finite_point(a.start) {
            return Err(CatenaError::validation("arrow.start must be finite"));
        }
        if !a.span.is_finite() || a.span == 0.0 {
            return Err(CatenaError::validation(
                "arrow.span must be finite and non-zero",
            ));
        }
        if !a.radius.is_finite() || a.radius.abs() < a.span.abs() / 2.0 {
            return Err(CatenaError::validation(
                "arrow.radius must be finite with |radius| >= |span| / 2",
            ));
        }
        if !a.tip_size.is_finite() || a.tip_size <= 0.0 {
            return Err(CatenaError::validation("arrow.tip_size must be > 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/config.rs"]
mod tests;
