use std::collections::BTreeMap;

use crate::foundation::color::Color;
use crate::foundation::core::{BezPath, Point};
use crate::foundation::error::{CatenaError, CatenaResult};
use crate::script::model::{Animation, Placement, Script, Shape, Step};

/// Incremental builder for a [`Script`]. `build` validates the result.
pub struct ScriptBuilder {
    name: String,
    background: Color,
    shapes: BTreeMap<String, Shape>,
    steps: Vec<Step>,
}

impl ScriptBuilder {
    /// Empty script with a black background.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background: Color::BLACK,
            shapes: BTreeMap::new(),
            steps: Vec::new(),
        }
    }

    /// Background color.
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Register a shape under a unique key.
    pub fn shape(mut self, key: impl Into<String>, shape: Shape) -> CatenaResult<Self> {
        let key = key.into();
        if self.shapes.contains_key(&key) {
            return Err(CatenaError::validation(format!(
                "duplicate shape key '{key}'"
            )));
        }
        self.shapes.insert(key, shape);
        Ok(self)
    }

    /// Show shapes immediately.
    pub fn add<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps.push(Step::Add {
            targets: targets.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Hide shapes immediately.
    pub fn remove<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps.push(Step::Remove {
            targets: targets.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Run `animations` together for `run_time` seconds.
    pub fn play(mut self, animations: impl IntoIterator<Item = Animation>, run_time: f64) -> Self {
        self.steps.push(Step::Play {
            animations: animations.into_iter().collect(),
            run_time,
        });
        self
    }

    /// Hold for `secs` seconds.
    pub fn wait(mut self, secs: f64) -> Self {
        self.steps.push(Step::Wait { secs });
        self
    }

    /// Finish and validate.
    pub fn build(self) -> CatenaResult<Script> {
        let script = Script {
            name: self.name,
            background: self.background,
            shapes: self.shapes,
            steps: self.steps,
        };
        script.validate()?;
        tracing::debug!(
            name = %script.name,
            shapes = script.shapes.len(),
            steps = script.steps.len(),
            "script built"
        );
        Ok(script)
    }
}

/// Filled circle.
pub fn dot(center: Point, radius: f64, color: Color) -> Shape {
    Shape::Dot {
        center,
        radius,
        color,
    }
}

/// Straight stroke.
pub fn line(from: Point, to: Point, stroke_width: f64, color: Color) -> Shape {
    Shape::Line {
        from,
        to,
        stroke_width,
        color,
    }
}

/// Filled polygon.
pub fn polygon(vertices: impl IntoIterator<Item = Point>, fill: Color) -> Shape {
    Shape::Polygon {
        vertices: vertices.into_iter().collect(),
        fill,
    }
}

/// Stroked Bézier path.
pub fn path(path: &BezPath, stroke_width: f64, color: Color) -> Shape {
    Shape::Path {
        d: path.to_svg(),
        stroke_width,
        color,
    }
}

/// Plain text.
pub fn text(content: impl Into<String>, font_size: f64, color: Color, place: Placement) -> Shape {
    Shape::Text {
        content: content.into(),
        markup: false,
        font_size,
        color,
        place,
    }
}

/// Text carrying markup tags (`<b>`, `<i>`).
pub fn markup(
    content: impl Into<String>,
    font_size: f64,
    color: Color,
    place: Placement,
) -> Shape {
    Shape::Text {
        content: content.into(),
        markup: true,
        font_size,
        color,
        place,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/dsl.rs"]
mod tests;
