//! Ramp candidate search
//!
//! [`RampSearch`] walks the color graph depth first and keeps every path
//! that passes the configured [`StepValidator`] and cannot be extended.
//!
//! # Methods
//!
//! | Method | Parameters | Rule per step |
//! |--------|------------|---------------|
//! | `BasicHSV` | [`BasicHsvParams`] | each of H, S, V within `[min, max]`, even spacing, optional one-direction |
//! | `VectorHSV` | [`VectorHsvParams`] | HSV step length bounded, direction change bounded |
//! | `CIEDE2000` | [`Ciede2000Params`] | ΔE₀₀ within `[min, max]`, even spacing, optional direction bound |

mod dfs;
mod params;
mod validator;

pub use dfs::RampSearch;
pub use params::{
    BasicHsvParams, Ciede2000Params, ExtractionMethod, MethodKind, ValidityParams,
    VectorHsvParams,
};
pub use validator::StepValidator;

pub(crate) use validator::MONOTONIC_NOISE;
