/// Convenience result type used across Fractaline.
pub type FractalineResult<T> = Result<T, FractalineError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum FractalineError {
    /// Invalid user-provided or model data (empty frame list, bad sizes).
    #[error("validation error: {0}")]
    Validation(String),

    /// The host lacks a capability the frame editor cannot work without.
    #[error("unsupported host: {0}")]
    Unsupported(String),

    /// Errors in raster buffer operations (byte-length or size mismatches).
    #[error("raster error: {0}")]
    Raster(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FractalineError {
    /// Build a [`FractalineError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FractalineError::Unsupported`] value.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Build a [`FractalineError::Raster`] value.
    pub fn raster(msg: impl Into<String>) -> Self {
        Self::Raster(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
