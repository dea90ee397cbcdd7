//! Every function here is a pure, single-shot coordinate computation: no shared state, no IO.

/// Circular arcs between two points (curved mechanism arrows).
pub mod arc;
/// Tangent-aligned arrowheads for paths whose built-in tip is suppressed.
pub mod arrow_tip;
/// Equally spaced bonds radiating from a central atom.
pub mod radial;
/// Horizontally centered zig-zag polylines (skeletal carbon chains).
pub mod zigzag;
