//! Error types for the color-ramps public API.
//!
//! [`ConfigError`] is returned synchronously when parameters are rejected,
//! before any work starts. [`RampError`] covers everything that can fail
//! during an extraction and wraps [`ConfigError`] for `?` propagation.

use thiserror::Error;

use crate::ColorId;

/// Rejected configuration.
///
/// # Example
///
/// ```
/// use color_ramps::{ConfigError, MethodKind};
///
/// let err = "Fancy".parse::<MethodKind>().unwrap_err();
/// assert!(matches!(err, ConfigError::UnknownMethod { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Method name is not one of `BasicHSV`, `VectorHSV` or `CIEDE2000`.
    #[error("unknown extraction method '{name}' (expected BasicHSV, VectorHSV or CIEDE2000)")]
    UnknownMethod { name: String },

    /// A numeric parameter is out of range or not a number.
    #[error("invalid value for {field}: {reason}")]
    InvalidParameter { field: String, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Failure of an extraction run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RampError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A graph node or ramp entry has no color in the palette.
    #[error("color id {id} is not in the palette")]
    UnknownColor { id: ColorId },

    /// A caller-supplied ramp is malformed.
    #[error("ramp {index} is invalid: {reason}")]
    InvalidRamp { index: usize, reason: String },

    /// The progress observer asked to stop.
    #[error("extraction cancelled")]
    Cancelled,
}

/// Fails unless `value` is finite and `>= 0`.
pub(crate) fn ensure_non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::invalid(field, format!("{value} is not a finite number")));
    }
    if value < 0.0 {
        return Err(ConfigError::invalid(field, format!("{value} is negative")));
    }
    Ok(())
}
