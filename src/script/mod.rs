//! Scene scripts are the only thing handed to the external animation engine: a table of named
//! shapes plus an explicit ordered list of steps that add, remove or animate them.

/// Scene configuration (palette and layout parameters), loadable from JSON.
pub mod config;
/// Builder DSL for scripts and shapes.
pub mod dsl;
/// Script data model and validation.
pub mod model;
/// Static SVG preview of a script's final state.
pub mod preview;
/// Per-scene factory functions.
pub mod scenes;
