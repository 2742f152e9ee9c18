//! Color graphs: which palette colors may sit next to each other in a ramp
//!
//! Two ways to build one:
//!
//! - **Adjacency**: colors are connected when their pixels touch in the
//!   image, see [`AdjacencyCounts`].
//! - **Similarity**: colors are connected when they pass a
//!   [`SimilarityTest`](crate::SimilarityTest), see [`similarity_graph`].
//!
//! Both produce a [`ColorGraph`] with one node per palette color and no
//! self-loops.

mod adjacency;
mod color_graph;
mod similarity;

pub use adjacency::{AdjacencyCounts, AdjacencyThreshold, Neighborhood};
pub use color_graph::{ColorGraph, EdgeKey};
pub use similarity::similarity_graph;
