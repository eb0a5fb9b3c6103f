/// Convenience result type used across hapticore.
pub type HapticResult<T> = Result<T, HapticError>;

/// Top-level error taxonomy.
///
/// Only [`HapticError::Validation`] and [`HapticError::Serde`] ever reach a caller of the public
/// API directly. Backend failures are recovered inside the dispatch worker.
#[derive(thiserror::Error, Debug)]
pub enum HapticError {
    /// Invalid builder input or effect data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Native playback failed or the native API is unavailable.
    #[error("backend error: {0}")]
    Backend(String),

    /// The device has no vibration capability at all.
    #[error("unsupported platform: {0}")]
    Unsupported(String),

    /// Errors when serializing or deserializing effect data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HapticError {
    /// Build a [`HapticError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HapticError::Backend`] value.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Build a [`HapticError::Unsupported`] value.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Build a [`HapticError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
