//! Error types for inspect-types construction.

use thiserror::Error;

/// Errors raised when building invariant-carrying types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InspectTypesError {
    /// Zone coordinates do not satisfy `x1 > x0`, `y1 > y0`.
    #[error("degenerate reference zone (require x1 > x0, y1 > y0): {0:?}")]
    DegenerateZone([f32; 4]),

    /// Zone contains a NaN or infinite coordinate.
    #[error("non-finite reference zone coordinate: {0:?}")]
    NonFiniteZone([f32; 4]),

    /// A tolerance margin is negative or non-finite.
    #[error("invalid margin {name}: {value}")]
    InvalidMargin {
        /// Which margin was rejected.
        name: String,
        /// The rejected value.
        value: f32,
    },
}

impl InspectTypesError {
    /// Creates an invalid margin error.
    #[must_use]
    pub fn invalid_margin(name: impl Into<String>, value: f32) -> Self {
        Self::InvalidMargin {
            name: name.into(),
            value,
        }
    }
}
