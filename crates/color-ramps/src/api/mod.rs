//! Public API for the color-ramps crate.
//!
//! This module provides the high-level API: the [`RampExtractor`] builder,
//! [`check_ramps`] for re-imported ramps, and the [`ConfigError`] /
//! [`RampError`] error types.

mod error;
mod extractor;

pub use error::{ConfigError, RampError};
pub use extractor::{check_ramps, Extraction, RampExtractor};

pub(crate) use error::ensure_non_negative;
