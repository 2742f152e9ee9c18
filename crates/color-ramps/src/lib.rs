#![allow(clippy::needless_range_loop, clippy::module_inception)]

//! color-ramps: color ramp extraction for pixel-art palettes
//!
//! A *ramp* is an ordered run of palette colors that brightens (or shifts
//! hue, or saturates) in small, even steps, the way a pixel artist shades a
//! material. This crate finds ramps hidden in an existing palette.
//!
//! # Quick Start
//!
//! ```
//! use color_ramps::{
//!     AdjacencyCounts, AdjacencyThreshold, ColorTable, Neighborhood, PaletteSnapshot,
//!     PixelBuffer, Ramp, RampExtractor, ValidityParams,
//! };
//!
//! // four grey pixels, dark to light
//! let bytes: Vec<u8> = [51u8, 102, 153, 204]
//!     .iter()
//!     .flat_map(|&v| [v, v, v, 255])
//!     .collect();
//! let image = PixelBuffer::new(4, 1, &bytes).unwrap();
//!
//! let table = ColorTable::from_image(&image);
//! let snapshot = PaletteSnapshot::from(&table);
//! let graph = AdjacencyCounts::scan(&image, &table, Neighborhood::Four)
//!     .to_graph(AdjacencyThreshold::Absolute(1))
//!     .unwrap();
//!
//! let ramps = RampExtractor::new(ValidityParams::default())
//!     .unwrap()
//!     .extract(&graph, &snapshot)
//!     .unwrap();
//!
//! assert_eq!(ramps, vec![Ramp::from(vec![0, 1, 2, 3])]);
//! ```
//!
//! # Pipeline
//!
//! 1. **Graph**: connect colors that touch in the image ([`AdjacencyCounts`])
//!    or that look alike ([`similarity_graph`]).
//! 2. **Search**: depth-first enumeration of maximal paths whose every step
//!    passes the chosen [`ExtractionMethod`] ([`RampSearch`]).
//! 3. **Filter**: drop mirrors, permutations and fragments ([`RampFilter`]).
//! 4. **Cluster** (optional): collapse near-duplicates to their best scoring
//!    member ([`RampClusterer`]).
//!
//! [`RampExtractor`] runs steps 2–4; the caller builds the graph so it can
//! be cached between runs.
//!
//! # Determinism
//!
//! Every stage iterates in a fixed order (start nodes by brightness then id,
//! neighbors by id) and every tie is broken by the lexicographically smaller
//! id sequence, so identical inputs produce identical output.
//!
//! # Purity
//!
//! Extraction reads a [`PaletteSnapshot`] taken from the caller's
//! [`ColorTable`] and a borrowed [`PixelBuffer`]; neither is modified.

pub mod api;
pub mod cluster;
pub mod color;
pub mod filter;
pub mod graph;
pub mod palette;
pub mod progress;
pub mod ramp;
pub mod score;
pub mod search;


/// Palette id of a color.
pub type ColorId = u32;

pub use api::{check_ramps, ConfigError, Extraction, RampError, RampExtractor};
pub use cluster::{
    ClusterMember, ClusterOptions, ClusterOutcome, EditCosts, RampCluster, RampClusterer,
    RampDistance,
};
pub use color::{ciede2000, hue_delta, Color, ColorSample, Hsv, Lab, SimilarityTest};
pub use filter::{FilterOptions, RampFilter};
pub use graph::{
    similarity_graph, AdjacencyCounts, AdjacencyThreshold, ColorGraph, EdgeKey, Neighborhood,
};
pub use palette::{ColorGroup, ColorTable, PaletteSnapshot, PixelBuffer};
pub use progress::{CancelFlag, NoProgress, ProgressObserver, Stage};
pub use ramp::{Ramp, MAX_RAMP_LENGTH_LIMIT, MIN_RAMP_LENGTH};
pub use score::{RampScorer, ScoreResult, ScorerConfig};
pub use search::{
    BasicHsvParams, Ciede2000Params, ExtractionMethod, MethodKind, RampSearch, StepValidator,
    ValidityParams, VectorHsvParams,
};
