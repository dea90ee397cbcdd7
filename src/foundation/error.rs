/// Convenience result type used across Catena.
pub type CatenaResult<T> = Result<T, CatenaError>;

/// Top-level error taxonomy used by geometry and script APIs.
#[derive(thiserror::Error, Debug)]
pub enum CatenaError {
    /// Invalid user-provided parameters, configuration or script data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Geometry that has no well-defined result (degenerate tangent, impossible arc).
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CatenaError {
    /// Build a [`CatenaError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CatenaError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`CatenaError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
