//! Rampforge - color ramp extraction for pixel-art palettes
//!
//! Command-line front end for the `color-ramps` crate: PNG loading, YAML
//! configuration and saved palette state.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod services;
