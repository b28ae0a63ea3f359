//! Validation errors shared by the client and the daemon

use thiserror::Error;

/// Reasons a planet submission is refused before it reaches the store
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A mandatory field is absent or blank
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A numeric field is NaN or infinite
    #[error("field {0} must be a finite number")]
    NotFinite(&'static str),

    /// The value is well-formed but cannot be rendered (e.g. zero distance)
    #[error("degenerate input: {0}")]
    Degenerate(String),
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField(field) | Self::NotFinite(field) => Some(field),
            Self::Degenerate(_) => None,
        }
    }
}
