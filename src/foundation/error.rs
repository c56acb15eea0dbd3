/// Convenience result type used across the engine.
pub type SkeletonResult<T> = Result<T, SkeletonError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Only [`SkeletonError::InvalidRoot`] and [`SkeletonError::Config`] abort an analysis. Anything
/// raised while processing a single node is recovered and reported as a diagnostic.
#[derive(thiserror::Error, Debug)]
pub enum SkeletonError {
    /// The analysis root is missing or unknown to the host.
    #[error("invalid root: {0}")]
    InvalidRoot(String),

    /// A computed style value could not be parsed.
    #[error("malformed style: {0}")]
    MalformedStyle(String),

    /// A host tree operation failed.
    #[error("host error: {0}")]
    Host(String),

    /// Invalid analysis options.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SkeletonError {
    /// Build a [`SkeletonError::InvalidRoot`] value.
    pub fn invalid_root(msg: impl Into<String>) -> Self {
        Self::InvalidRoot(msg.into())
    }

    /// Build a [`SkeletonError::MalformedStyle`] value.
    pub fn malformed_style(msg: impl Into<String>) -> Self {
        Self::MalformedStyle(msg.into())
    }

    /// Build a [`SkeletonError::Host`] value.
    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host(msg.into())
    }

    /// Build a [`SkeletonError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`SkeletonError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for SkeletonError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
