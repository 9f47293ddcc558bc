/// Convenience result type used across sketchreel.
pub type SketchResult<T> = Result<T, SketchError>;

/// Top-level error taxonomy for the fallible edges of the crate.
///
/// Frame evaluation itself never fails. These errors only surface while
/// decoding scene documents or validating options.
#[derive(thiserror::Error, Debug)]
pub enum SketchError {
    /// Invalid user-provided option or timing data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A scene document that cannot be interpreted at all.
    #[error("scene error: {0}")]
    Scene(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SketchError {
    /// Build a [`SketchError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SketchError::Scene`] value.
    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene(msg.into())
    }

    /// Build a [`SketchError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for SketchError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
