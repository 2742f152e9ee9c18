//! Palette storage
//!
//! A [`ColorTable`] is the mutable id → color mapping owned by the caller.
//! Extraction never reads it directly; it takes a [`PaletteSnapshot`] with
//! HSV and Lab precomputed for every id.

mod snapshot;
mod table;

pub use snapshot::PaletteSnapshot;
pub use table::{ColorGroup, ColorTable, PixelBuffer};
