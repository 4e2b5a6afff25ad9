//! Error types for synthetic trial generation.
//!
//! All fallible operations in the crate return [`SynthError`] through the
//! crate-local [`Result`] alias. Recovery policy lives with the caller:
//! `InsufficientSamples` and `InvalidRow` are recoverable (skip the input
//! and continue), the rest indicate caller bugs and are fatal to the call.

use thiserror::Error;

/// Main error type for synthetic trial generation.
#[derive(Error, Debug)]
pub enum SynthError {
    /// Input width does not match the expected dimensionality.
    #[error("Dimension mismatch: expected {expected} columns, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The latent projector was used before being fitted.
    #[error("Projector transform called before fit")]
    NotFitted,

    /// Too few rows for the requested statistic or fit.
    #[error("Insufficient samples: need at least {min} rows, got {actual}")]
    InsufficientSamples { min: usize, actual: usize },

    /// A raw record could not be assembled into a frame.
    #[error("Invalid row {index}: {reason}")]
    InvalidRow { index: usize, reason: String },

    /// Configuration validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for synthetic trial generation.
pub type Result<T> = std::result::Result<T, SynthError>;

impl SynthError {
    /// Create a dimension mismatch error.
    #[must_use]
    pub const fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Create an insufficient samples error.
    #[must_use]
    pub const fn insufficient_samples(min: usize, actual: usize) -> Self {
        Self::InsufficientSamples { min, actual }
    }

    /// Create an invalid row error.
    #[must_use]
    pub fn invalid_row(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidRow {
            index,
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Whether the caller may skip the offending input and continue.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InsufficientSamples { .. } | Self::InvalidRow { .. }
        )
    }
}
