use crate::config::validate::ConfigErrors;

/// Convenience result type used across horologe.
pub type HorologeResult<T> = Result<T, HorologeError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum HorologeError {
    /// Rejected configuration (bad layer id, occupied slot, mismatched ids).
    #[error("validation error: {0}")]
    Validation(String),

    /// Non-finite input or output inside angle/position math.
    #[error("computation error: {0}")]
    Computation(String),

    /// Lifecycle misuse or repeated tick failure in the clock orchestrator.
    #[error("orchestrator error: {0}")]
    Orchestrator(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Every hard validation error found in a layer set.
    #[error("invalid layer set:\n{0}")]
    Config(#[from] ConfigErrors),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HorologeError {
    /// Build a [`HorologeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HorologeError::Computation`] value.
    pub fn computation(msg: impl Into<String>) -> Self {
        Self::Computation(msg.into())
    }

    /// Build a [`HorologeError::Orchestrator`] value.
    pub fn orchestrator(msg: impl Into<String>) -> Self {
        Self::Orchestrator(msg.into())
    }

    /// Build a [`HorologeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for HorologeError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
