//! Shared primitives: kurbo re-exports, colors, the error taxonomy and small math helpers.

pub(crate) mod color;
pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod math;
