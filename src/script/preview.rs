use std::collections::BTreeMap;
use std::fmt::Write as _;

use kurbo::{PathEl, Shape as _};

use crate::foundation::color::Color;
use crate::foundation::core::{Affine, BezPath, Point, Vec2};
use crate::foundation::error::{CatenaError, CatenaResult};
use crate::script::model::{Animation, Edge, Placement, Script, Shape, Step};

/// Approximate scene units per font point, used only to place preview text.
const UNITS_PER_PT: f64 = 1.0 / 64.0;
/// Gap between a frame edge and text placed against it.
const EDGE_BUFF: f64 = 0.5;
/// Engine stroke widths are hundredths of a scene unit.
const STROKE_UNITS: f64 = 0.01;
const MAX_ANCHOR_DEPTH: usize = 16;

/// Preview canvas settings. The frame is always 16:9.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreviewOpts {
    /// Output width in pixels.
    pub width_px: u32,
    /// Visible frame width in scene units, centered on the origin.
    pub frame_width: f64,
}

impl Default for PreviewOpts {
    fn default() -> Self {
        Self {
            width_px: 1280,
            frame_width: 8.0 * 16.0 / 9.0,
        }
    }
}

impl PreviewOpts {
    fn frame_height(&self) -> f64 {
        self.frame_width * 9.0 / 16.0
    }

    fn height_px(&self) -> u32 {
        (f64::from(self.width_px) * 9.0 / 16.0).round() as u32
    }

    fn px_per_unit(&self) -> f64 {
        f64::from(self.width_px) / self.frame_width
    }

    /// Scene units (y-up, origin at center) to SVG pixels (y-down, origin top-left).
    fn to_px(&self) -> Affine {
        let s = self.px_per_unit();
        Affine::new([
            s,
            0.0,
            0.0,
            -s,
            self.frame_width / 2.0 * s,
            self.frame_height() / 2.0 * s,
        ])
    }
}

/// Replay `script` and return the shapes visible after its last step, most recently shown
/// last. Any animation other than a fade-out shows its target; transforms and moves are
/// applied to the returned geometry.
pub fn visible_shapes(script: &Script) -> CatenaResult<Vec<(String, Shape)>> {
    let (current, order) = replay(script)?;
    Ok(order
        .into_iter()
        .filter_map(|k| current.get(k).map(|s| (k.to_owned(), s.clone())))
        .collect())
}

/// Final geometry of every shape, plus the keys visible at the end in first-shown order.
fn replay(script: &Script) -> CatenaResult<(BTreeMap<&str, Shape>, Vec<&str>)> {
    let mut current: BTreeMap<&str, Shape> = script
        .shapes
        .iter()
        .map(|(k, s)| (k.as_str(), s.clone()))
        .collect();
    let mut order: Vec<&str> = Vec::new();

    fn show<'a>(order: &mut Vec<&'a str>, key: &'a str) {
        if !order.contains(&key) {
            order.push(key);
        }
    }
    fn hide(order: &mut Vec<&str>, key: &str) {
        order.retain(|k| *k != key);
    }
    let lookup = |key: &str| {
        script
            .shapes
            .get(key)
            .ok_or_else(|| CatenaError::validation(format!("unknown shape '{key}'")))
    };

    for step in &script.steps {
        match step {
            Step::Add { targets } => targets.iter().for_each(|t| show(&mut order, t)),
            Step::Remove { targets } => targets.iter().for_each(|t| hide(&mut order, t)),
            Step::Wait { .. } => {}
            Step::Play { animations, .. } => {
                for anim in animations {
                    lookup(anim.target())?;
                    match anim {
                        Animation::FadeIn { target }
                        | Animation::Write { target }
                        | Animation::Create { target } => show(&mut order, target),
                        Animation::FadeOut { target } => hide(&mut order, target),
                        Animation::Transform { target, into } => {
                            current.insert(target.as_str(), lookup(into)?.clone());
                            show(&mut order, target);
                        }
                        Animation::MoveTo { target, to, scale } => {
                            let shape = current_mut(&mut current, target)?;
                            *shape = moved(shape, *to, scale.unwrap_or(1.0))?;
                            show(&mut order, target);
                        }
                        Animation::MoveAlongPath { target, path } => {
                            let to = path_end(lookup(path)?)?;
                            let shape = current_mut(&mut current, target)?;
                            *shape = moved(shape, to, 1.0)?;
                            show(&mut order, target);
                        }
                    }
                }
            }
        }
    }

    Ok((current, order))
}

fn current_mut<'m>(
    current: &'m mut BTreeMap<&str, Shape>,
    key: &str,
) -> CatenaResult<&'m mut Shape> {
    current
        .get_mut(key)
        .ok_or_else(|| CatenaError::validation(format!("unknown shape '{key}'")))
}

/// Visual center used as the reference point for moves.
fn center_of(shape: &Shape) -> CatenaResult<Option<Point>> {
    Ok(match shape {
        Shape::Dot { center, .. } => Some(*center),
        Shape::Line { from, to, .. } => Some(from.midpoint(*to)),
        Shape::Polygon { vertices, .. } => bounds_center(vertices.iter().copied()),
        Shape::Path { d, .. } => Some(parse_path(d)?.bounding_box().center()),
        Shape::Text { place, .. } => match place {
            Placement::At(p) => Some(*p),
            Placement::ToEdge(_) | Placement::NextTo { .. } => None,
        },
    })
}

fn bounds_center(points: impl Iterator<Item = Point>) -> Option<Point> {
    let mut it = points;
    let first = it.next()?;
    let (mut lo, mut hi) = (first, first);
    for p in it {
        lo = Point::new(lo.x.min(p.x), lo.y.min(p.y));
        hi = Point::new(hi.x.max(p.x), hi.y.max(p.y));
    }
    Some(lo.midpoint(hi))
}

fn path_end(shape: &Shape) -> CatenaResult<Point> {
    match shape {
        Shape::Line { to, .. } => Ok(*to),
        Shape::Path { d, .. } => {
            let path = parse_path(d)?;
            path.elements()
                .iter()
                .rev()
                .find_map(|el| match *el {
                    PathEl::MoveTo(p)
                    | PathEl::LineTo(p)
                    | PathEl::QuadTo(_, p)
                    | PathEl::CurveTo(_, _, p) => Some(p),
                    PathEl::ClosePath => None,
                })
                .ok_or_else(|| CatenaError::validation("move-along path is empty"))
        }
        _ => Err(CatenaError::validation(
            "move-along target must be a line or path",
        )),
    }
}

/// Move `shape` so its center lands on `to`, scaling by `scale` about that center.
fn moved(shape: &Shape, to: Point, scale: f64) -> CatenaResult<Shape> {
    let Some(center) = center_of(shape)? else {
        // Text without a fixed position: pin it to the destination.
        let mut out = shape.clone();
        if let Shape::Text {
            place, font_size, ..
        } = &mut out
        {
            *place = Placement::At(to);
            *font_size *= scale;
        }
        return Ok(out);
    };
    let xf = Affine::translate(to.to_vec2())
        * Affine::scale(scale)
        * Affine::translate(-center.to_vec2());
    Ok(transformed(shape, xf, scale))
}

fn transformed(shape: &Shape, xf: Affine, scale: f64) -> Shape {
    match shape.clone() {
        Shape::Dot {
            center,
            radius,
            color,
        } => Shape::Dot {
            center: xf * center,
            radius: radius * scale,
            color,
        },
        Shape::Line {
            from,
            to,
            stroke_width,
            color,
        } => Shape::Line {
            from: xf * from,
            to: xf * to,
            stroke_width,
            color,
        },
        Shape::Polygon { vertices, fill } => Shape::Polygon {
            vertices: vertices.into_iter().map(|v| xf * v).collect(),
            fill,
        },
        Shape::Path {
            d,
            stroke_width,
            color,
        } => Shape::Path {
            d: BezPath::from_svg(&d)
                .map(|p| (xf * p).to_svg())
                .unwrap_or(d),
            stroke_width,
            color,
        },
        Shape::Text {
            content,
            markup,
            font_size,
            color,
            place,
        } => Shape::Text {
            content,
            markup,
            font_size: font_size * scale,
            color,
            place: match place {
                Placement::At(p) => Placement::At(xf * p),
                other => other,
            },
        },
    }
}

fn parse_path(d: &str) -> CatenaResult<BezPath> {
    BezPath::from_svg(d).map_err(|e| CatenaError::validation(format!("invalid path data: {e}")))
}

/// Render the final visible state of `script` as a standalone SVG document.
///
/// Text placement is approximate; the external engine owns real text layout.
#[tracing::instrument(level = "debug", skip(script), fields(name = %script.name))]
pub fn render_svg(script: &Script, opts: PreviewOpts) -> CatenaResult<String> {
    if opts.width_px == 0 || !opts.frame_width.is_finite() || opts.frame_width <= 0.0 {
        return Err(CatenaError::validation(
            "preview width_px and frame_width must be > 0",
        ));
    }
    let (current, order) = replay(script)?;
    let mut out = String::new();
    write_svg(&mut out, script, &current, &order, opts)
        .map_err(|e| CatenaError::Other(anyhow::Error::new(e)))?;
    tracing::debug!(shapes = order.len(), bytes = out.len(), "svg preview rendered");
    Ok(out)
}

fn write_svg(
    out: &mut String,
    script: &Script,
    current: &BTreeMap<&str, Shape>,
    order: &[&str],
    opts: PreviewOpts,
) -> std::fmt::Result {
    let (w, h) = (opts.width_px, opts.height_px());
    let to_px = opts.to_px();
    let s = opts.px_per_unit();

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    )?;
    writeln!(
        out,
        r#"  <rect width="{w}" height="{h}" {}/>"#,
        paint("fill", script.background)
    )?;

    for (key, shape) in order.iter().filter_map(|k| current.get(k).map(|s| (*k, s))) {
        match shape {
            Shape::Dot {
                center,
                radius,
                color,
            } => {
                let c = to_px * *center;
                writeln!(
                    out,
                    r#"  <circle id="{}" cx="{:.3}" cy="{:.3}" r="{:.3}" {}/>"#,
                    escape(key),
                    c.x,
                    c.y,
                    radius * s,
                    paint("fill", *color)
                )?;
            }
            Shape::Line {
                from,
                to,
                stroke_width,
                color,
            } => {
                let (a, b) = (to_px * *from, to_px * *to);
                writeln!(
                    out,
                    r#"  <line id="{}" x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}" {} stroke-width="{:.3}" stroke-linecap="round"/>"#,
                    escape(key),
                    a.x,
                    a.y,
                    b.x,
                    b.y,
                    paint("stroke", *color),
                    stroke_width * STROKE_UNITS * s
                )?;
            }
            Shape::Polygon { vertices, fill } => {
                let mut pts = String::new();
                for v in vertices {
                    let p = to_px * *v;
                    write!(pts, "{:.3},{:.3} ", p.x, p.y)?;
                }
                writeln!(
                    out,
                    r#"  <polygon id="{}" points="{}" {}/>"#,
                    escape(key),
                    pts.trim_end(),
                    paint("fill", *fill)
                )?;
            }
            Shape::Path {
                d,
                stroke_width,
                color,
            } => {
                // Shapes were validated; unparsable data is skipped rather than guessed at.
                let Ok(path) = BezPath::from_svg(d) else {
                    continue;
                };
                writeln!(
                    out,
                    r#"  <path id="{}" d="{}" fill="none" {} stroke-width="{:.3}"/>"#,
                    escape(key),
                    (to_px * path).to_svg(),
                    paint("stroke", *color),
                    stroke_width * STROKE_UNITS * s
                )?;
            }
            Shape::Text {
                content,
                markup,
                font_size,
                color,
                ..
            } => {
                let anchor = to_px * text_anchor(current, shape, opts, 0);
                let plain = if *markup {
                    strip_tags(content)
                } else {
                    content.clone()
                };
                let size_px = font_size * UNITS_PER_PT * s;
                write!(
                    out,
                    r#"  <text id="{}" x="{:.3}" y="{:.3}" font-size="{:.3}" text-anchor="middle" dominant-baseline="middle" {}>"#,
                    escape(key),
                    anchor.x,
                    anchor.y,
                    size_px,
                    paint("fill", *color)
                )?;
                for (i, line) in plain.lines().enumerate() {
                    let dy = if i == 0 { "0" } else { "1.2em" };
                    write!(
                        out,
                        r#"<tspan x="{:.3}" dy="{dy}">{}</tspan>"#,
                        anchor.x,
                        escape(line)
                    )?;
                }
                writeln!(out, "</text>")?;
            }
        }
    }

    writeln!(out, "</svg>")
}

/// Approximate center of a text shape in scene units, with `NextTo` anchors resolved
/// against their replayed geometry.
fn text_anchor(
    current: &BTreeMap<&str, Shape>,
    shape: &Shape,
    opts: PreviewOpts,
    depth: usize,
) -> Point {
    let (place, font_size) = match shape {
        Shape::Text {
            place, font_size, ..
        } => (place, *font_size),
        other => return center_of(other).ok().flatten().unwrap_or(Point::ORIGIN),
    };
    let half = font_size * UNITS_PER_PT / 2.0;
    match place {
        Placement::At(p) => *p,
        Placement::ToEdge(edge) => {
            let (hw, hh) = (opts.frame_width / 2.0, opts.frame_height() / 2.0);
            match edge {
                Edge::Up => Point::new(0.0, hh - EDGE_BUFF - half),
                Edge::Down => Point::new(0.0, -hh + EDGE_BUFF + half),
                Edge::Left => Point::new(-hw + EDGE_BUFF + half, 0.0),
                Edge::Right => Point::new(hw - EDGE_BUFF - half, 0.0),
            }
        }
        Placement::NextTo {
            anchor,
            direction,
            buff,
        } => {
            let base = match current.get(anchor.as_str()) {
                Some(a) if depth < MAX_ANCHOR_DEPTH => text_anchor(current, a, opts, depth + 1),
                _ => Point::ORIGIN,
            };
            base + edge_dir(*direction) * (buff + 2.0 * half)
        }
    }
}

fn edge_dir(edge: Edge) -> Vec2 {
    match edge {
        Edge::Up => Vec2::new(0.0, 1.0),
        Edge::Down => Vec2::new(0.0, -1.0),
        Edge::Left => Vec2::new(-1.0, 0.0),
        Edge::Right => Vec2::new(1.0, 0.0),
    }
}

fn paint(attr: &str, c: Color) -> String {
    let [_, _, _, a] = c.to_rgba8();
    if a == 255 {
        format!(r#"{attr}="{}""#, c.to_hex_rgb())
    } else {
        format!(
            r#"{attr}="{}" {attr}-opacity="{:.3}""#,
            c.to_hex_rgb(),
            c.a.clamp(0.0, 1.0)
        )
    }
}

fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/script/preview.rs"]
mod tests;
