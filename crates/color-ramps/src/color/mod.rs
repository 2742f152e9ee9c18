//! Color types and color-space math
//!
//! This module provides the value types the ramp engine works on and the pure
//! conversions between them.
//!
//! # Color Spaces
//!
//! - [`Color`]: 8-bit RGBA as found in the source image. Use for I/O.
//! - [`Hsv`]: hue/saturation/value in `[0, 1)`. Used by the HSV step
//!   predicates and by the scorer's monotony term.
//! - [`Lab`]: CIE L\*a\*b\* (D65). Used for CIEDE2000 distances.
//!
//! A [`ColorSample`] bundles all three so every color is converted once per
//! extraction rather than once per path test.
//!
//! # Example
//!
//! ```
//! use color_ramps::{Color, ColorSample};
//!
//! let dark = ColorSample::from(Color::rgb(40, 60, 120));
//! let light = ColorSample::from(Color::rgb(80, 110, 200));
//!
//! assert!(light.hsv.v > dark.hsv.v);
//! assert!(dark.delta_e(&light) > 0.0);
//! ```

mod hsv;
mod lab;
mod rgba;
mod sample;
mod similarity;

pub use hsv::{hsv_steps, hue_delta, hue_delta_degrees, Hsv};
pub use lab::{ciede2000, Lab};
pub use rgba::Color;
pub use sample::ColorSample;
pub use similarity::SimilarityTest;
