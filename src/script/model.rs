use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::color::Color;
use crate::foundation::core::{Point, is_finite_point};
use crate::foundation::error::{CatenaError, CatenaResult};

/// A named piece of geometry. Coordinates are scene units, y-up.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// Filled circle.
    Dot {
        /// Center.
        center: Point,
        /// Radius.
        radius: f64,
        /// Fill color.
        color: Color,
    },
    /// Straight stroke.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Stroke width in engine units.
        stroke_width: f64,
        /// Stroke color.
        color: Color,
    },
    /// Filled closed polygon without stroke.
    Polygon {
        /// Vertices in order.
        vertices: Vec<Point>,
        /// Fill color.
        fill: Color,
    },
    /// Stroked Bézier path in SVG path-data syntax.
    Path {
        /// SVG path data.
        d: String,
        /// Stroke width in engine units.
        stroke_width: f64,
        /// Stroke color.
        color: Color,
    },
    /// Text label. Shaping and exact placement belong to the engine.
    Text {
        /// Text content (Pango-style markup when `markup` is set).
        content: String,
        /// Whether `content` carries markup tags such as `<b>`.
        #[serde(default)]
        markup: bool,
        /// Font size in engine points.
        font_size: f64,
        /// Fill color.
        color: Color,
        /// Placement request.
        place: Placement,
    },
}

/// Frame edge or direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    /// Top (+y).
    Up,
    /// Bottom (-y).
    Down,
    /// Left (-x).
    Left,
    /// Right (+x).
    Right,
}

/// Where a text shape should be placed.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Centered on a point.
    At(Point),
    /// Against a frame edge.
    ToEdge(Edge),
    /// Next to another shape, separated by `buff`.
    NextTo {
        /// Key of the anchoring shape.
        anchor: String,
        /// Side of the anchor to place on.
        direction: Edge,
        /// Gap between the two.
        buff: f64,
    },
}

/// One animation inside a [`Step::Play`]; all animations of a step run concurrently.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "anim", rename_all = "snake_case")]
pub enum Animation {
    /// Fade a shape in.
    FadeIn {
        /// Shape key.
        target: String,
    },
    /// Fade a shape out.
    FadeOut {
        /// Shape key.
        target: String,
    },
    /// Handwrite text.
    Write {
        /// Shape key.
        target: String,
    },
    /// Draw a shape along its outline.
    Create {
        /// Shape key.
        target: String,
    },
    /// Morph `target` into the geometry of `into`; `target` stays the displayed key.
    Transform {
        /// Shape key being morphed.
        target: String,
        /// Shape key providing the final geometry.
        into: String,
    },
    /// Move a shape's center to `to`, optionally scaling it.
    MoveTo {
        /// Shape key.
        target: String,
        /// Final center.
        to: Point,
        /// Uniform scale factor applied during the move.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scale: Option<f64>,
    },
    /// Move a shape's center along a line or path shape.
    MoveAlongPath {
        /// Shape key.
        target: String,
        /// Key of a `line` or `path` shape.
        path: String,
    },
}

impl Animation {
    /// Key of the animated shape.
    pub fn target(&self) -> &str {
        match self {
            Self::FadeIn { target }
            | Self::FadeOut { target }
            | Self::Write { target }
            | Self::Create { target }
            | Self::Transform { target, .. }
            | Self::MoveTo { target, .. }
            | Self::MoveAlongPath { target, .. } => target,
        }
    }
}

/// A single entry of the ordered command list.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Show shapes immediately.
    Add {
        /// Shape keys.
        targets: Vec<String>,
    },
    /// Hide shapes immediately.
    Remove {
        /// Shape keys.
        targets: Vec<String>,
    },
    /// Run animations concurrently for `run_time` seconds.
    Play {
        /// Animations started together.
        animations: Vec<Animation>,
        /// Duration in seconds.
        run_time: f64,
    },
    /// Hold the current state.
    Wait {
        /// Duration in seconds.
        secs: f64,
    },
}

/// A complete scene: named shapes plus the ordered steps that animate them.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Script {
    /// Scene name.
    pub name: String,
    /// Background color.
    pub background: Color,
    /// Shape table keyed by stable names.
    pub shapes: BTreeMap<String, Shape>,
    /// Ordered command list.
    pub steps: Vec<Step>,
}

impl Script {
    /// Parse a script from a JSON reader (not validated).
    pub fn from_reader<R: std::io::Read>(r: R) -> CatenaResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| CatenaError::serde(format!("parse script JSON: {e}")))
    }

    /// Parse a script from a JSON file on disk (not validated).
    pub fn from_path(path: impl AsRef<Path>) -> CatenaResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CatenaError::validation(format!("open script JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Pretty JSON for the external engine.
    pub fn to_json_pretty(&self) -> CatenaResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CatenaError::serde(format!("serialize script '{}': {e}", self.name)))
    }

    /// Total running time in seconds (plays plus waits).
    pub fn duration_secs(&self) -> f64 {
        self.steps
            .iter()
            .map(|s| match s {
                Step::Play { run_time, .. } => *run_time,
                Step::Wait { secs } => *secs,
                Step::Add { .. } | Step::Remove { .. } => 0.0,
            })
            .sum()
    }

    /// Check that every reference resolves and every number is usable.
    pub fn validate(&self) -> CatenaResult<()> {
        if self.name.trim().is_empty() {
            return Err(CatenaError::validation("script name must be non-empty"));
        }

        for (key, shape) in &self.shapes {
            shape
                .validate(&self.shapes)
                .map_err(|e| CatenaError::validation(format!("shape '{key}': {e}")))?;
        }

        for (i, step) in self.steps.iter().enumerate() {
            self.validate_step(step)
                .map_err(|e| CatenaError::validation(format!("step {i}: {e}")))?;
        }

        Ok(())
    }

    fn validate_step(&self, step: &Step) -> Result<(), String> {
        match step {
            Step::Add { targets } | Step::Remove { targets } => {
                if targets.is_empty() {
                    return Err("add/remove needs at least one target".to_owned());
                }
                targets.iter().try_for_each(|t| self.require(t))
            }
            Step::Play {
                animations,
                run_time,
            } => {
                if animations.is_empty() {
                    return Err("play needs at least one animation".to_owned());
                }
                if !run_time.is_finite() || *run_time <= 0.0 {
                    return Err(format!("run_time must be > 0, got {run_time}"));
                }
                let mut seen = BTreeSet::new();
                for anim in animations {
                    if !seen.insert(anim.target()) {
                        return Err(format!(
                            "'{}' is animated twice in the same step",
                            anim.target()
                        ));
                    }
                    self.validate_animation(anim)?;
                }
                Ok(())
            }
            Step::Wait { secs } => {
                if !secs.is_finite() || *secs < 0.0 {
                    return Err(format!("wait must be >= 0, got {secs}"));
                }
                Ok(())
            }
        }
    }

    fn validate_animation(&self, anim: &Animation) -> Result<(), String> {
        self.require(anim.target())?;
        match anim {
            Animation::Transform { into, .. } => self.require(into),
            Animation::MoveTo { to, scale, .. } => {
                if !is_finite_point(*to) {
                    return Err("move_to destination must be finite".to_owned());
                }
                match scale {
                    Some(s) if !s.is_finite() || *s <= 0.0 => {
                        Err(format!("move_to scale must be > 0, got {s}"))
                    }
                    _ => Ok(()),
                }
            }
            Animation::MoveAlongPath { path, .. } => match self.shapes.get(path) {
                Some(Shape::Line { .. } | Shape::Path { .. }) => Ok(()),
                Some(_) => Err(format!("'{path}' is not a line or path")),
                None => Err(format!("unknown shape '{path}'")),
            },
            _ => Ok(()),
        }
    }

    fn require(&self, key: &str) -> Result<(), String> {
        if self.shapes.contains_key(key) {
            Ok(())
        } else {
            Err(format!("unknown shape '{key}'"))
        }
    }
}

impl Shape {
    fn validate(&self, shapes: &BTreeMap<String, Shape>) -> Result<(), String> {
        fn positive(what: &str, v: f64) -> Result<(), String> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(format!("{what} must be > 0, got {v}"))
            }
        }
        fn finite(what: &str, p: Point) -> Result<(), String> {
            if is_finite_point(p) {
                Ok(())
            } else {
                Err(format!("{what} must be finite"))
            }
        }

        match self {
            Self::Dot { center, radius, .. } => {
                finite("center", *center)?;
                positive("radius", *radius)
            }
            Self::Line {
                from,
                to,
                stroke_width,
                ..
            } => {
                finite("from", *from)?;
                finite("to", *to)?;
                positive("stroke_width", *stroke_width)
            }
            Self::Polygon { vertices, .. } => {
                if vertices.len() < 3 {
                    return Err(format!(
                        "polygon needs at least 3 vertices, got {}",
                        vertices.len()
                    ));
                }
                vertices.iter().try_for_each(|v| finite("vertex", *v))
            }
            Self::Path {
                d, stroke_width, ..
            } => {
                kurbo::BezPath::from_svg(d).map_err(|e| format!("invalid path data: {e}"))?;
                positive("stroke_width", *stroke_width)
            }
            Self::Text {
                content,
                font_size,
                place,
                ..
            } => {
                if content.trim().is_empty() {
                    return Err("text must be non-empty".to_owned());
                }
                positive("font_size", *font_size)?;
                match place {
                    Placement::At(p) => finite("position", *p),
                    Placement::ToEdge(_) => Ok(()),
                    Placement::NextTo { anchor, buff, .. } => {
                        if !shapes.contains_key(anchor) {
                            return Err(format!("unknown anchor '{anchor}'"));
                        }
                        if !buff.is_finite() || *buff < 0.0 {
                            return Err(format!("buff must be >= 0, got {buff}"));
                        }
                        Ok(())
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/model.rs"]
mod tests;
