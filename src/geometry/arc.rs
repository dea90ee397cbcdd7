use kurbo::{Arc, PathEl, Shape as _};

use crate::foundation::core::{BezPath, Point, Vec2, ZERO_LENGTH, is_finite_point};
use crate::foundation::error::{CatenaError, CatenaResult};

/// Flattening tolerance used when converting arcs to cubic Béziers.
const ARC_TOLERANCE: f64 = 1e-4;

/// Sweep angle of the circular arc of signed `radius` through `start` and `end`.
///
/// A positive radius sweeps counter-clockwise (y-up), a negative one clockwise. The minor arc
/// is chosen; `|radius|` equal to half the chord gives a semicircle.
pub fn sweep_for_radius(start: Point, end: Point, radius: f64) -> CatenaResult<f64> {
    if !radius.is_finite() || radius == 0.0 {
        return Err(CatenaError::validation(format!(
            "arc radius must be finite and non-zero, got {radius}"
        )));
    }
    let half_chord = (end - start).hypot() / 2.0;
    if half_chord <= ZERO_LENGTH {
        return Err(CatenaError::geometry("arc endpoints coincide"));
    }
    let r = radius.abs();
    if r < half_chord {
        return Err(CatenaError::geometry(format!(
            "arc radius {r} is smaller than half the distance between its endpoints ({half_chord})"
        )));
    }
    Ok(2.0 * (half_chord / r).asin() * radius.signum())
}

/// Circular arc from `start` to `end` sweeping `sweep` radians (positive = counter-clockwise).
///
/// The returned path starts and ends exactly on the given endpoints.
pub fn arc_between(start: Point, end: Point, sweep: f64) -> CatenaResult<BezPath> {
    if !is_finite_point(start) || !is_finite_point(end) {
        return Err(CatenaError::validation("arc endpoints must be finite"));
    }
    if !sweep.is_finite() || sweep == 0.0 || sweep.abs() >= std::f64::consts::TAU {
        return Err(CatenaError::validation(format!(
            "arc sweep must be finite, non-zero and below a full turn, got {sweep}"
        )));
    }
    let chord = end - start;
    let len = chord.hypot();
    if len <= ZERO_LENGTH {
        return Err(CatenaError::geometry("arc endpoints coincide"));
    }

    let half = sweep / 2.0;
    let left = Vec2::new(-chord.y, chord.x) / len;
    let center = start.midpoint(end) + left * ((len / 2.0) * half.cos() / half.sin());
    let radius = (len / 2.0) / half.sin().abs();
    let start_angle = (start - center).atan2();

    let arc = Arc::new(center, Vec2::new(radius, radius), start_angle, sweep, 0.0);
    let mut els: Vec<PathEl> = arc.path_elements(ARC_TOLERANCE).collect();
    snap_endpoints(&mut els, start, end);

    tracing::debug!(
        segments = els.len().saturating_sub(1),
        radius,
        sweep,
        "arc built"
    );
    Ok(BezPath::from_vec(els))
}

/// Arc between `start` and `end` with a signed radius, as used for curved mechanism arrows.
#[tracing::instrument(level = "debug")]
pub fn curved_arrow(start: Point, end: Point, radius: f64) -> CatenaResult<BezPath> {
    let sweep = sweep_for_radius(start, end, radius)?;
    arc_between(start, end, sweep)
}

fn snap_endpoints(els: &mut [PathEl], start: Point, end: Point) {
    if let Some(PathEl::MoveTo(p)) = els.first_mut() {
        *p = start;
    }
    match els.last_mut() {
        Some(PathEl::CurveTo(_, _, p))
        | Some(PathEl::QuadTo(_, p))
        | Some(PathEl::LineTo(p)) => *p = end,
        _ => {}
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/arc.rs"]
mod tests;
