//! Catena is a small geometry toolkit for educational organic-chemistry animations.
//!
//! It computes the coordinates a scene needs (zig-zag carbon chains, radial bond diagrams,
//! curved mechanism arrows with tangent-aligned tips) and packages them into explicit,
//! serializable scene [`Script`]s. Rasterization, text shaping, easing and video encoding are
//! left to an external animation engine that consumes those scripts.
//!
//! # Layout
//!
//! - [`geometry`]: pure, single-shot coordinate computations
//! - [`script`]: ordered `(geometry, operation)` command lists and per-scene factories
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure geometry**: every layout function is deterministic and stateless.
//! - **No shared scene state**: each scene factory builds fresh geometry on every call.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Pure 2D layout utilities.
pub mod geometry;
/// Scene scripts: data model, builder DSL, configuration, factories and SVG preview.
pub mod script;

pub use foundation::color::Color;
pub use foundation::core::{Affine, BezPath, Line, Point, Vec2};
pub use foundation::error::{CatenaError, CatenaResult};
pub use foundation::math::{DEFAULT_EPS, alternating_sign, approx_eq, rotate_about};

pub use geometry::arc::{arc_between, curved_arrow, sweep_for_radius};
pub use geometry::arrow_tip::{ArrowTip, DegenerateTangent, PathSamples, TipShape};
pub use geometry::radial::{RadialBond, RadialBondLayout};
pub use geometry::zigzag::{ZigZagChain, ZigZagChainBuilder};

pub use script::config::{ArrowConfig, BondConfig, ChainConfig, Palette, SceneConfig};
pub use script::dsl::ScriptBuilder;
pub use script::model::{Animation, Edge, Placement, Script, Shape, Step};
pub use script::preview::{PreviewOpts, render_svg, visible_shapes};
pub use script::scenes::{SceneKind, build_scene, carbon_compounds, tangent_arrow, title_card};
