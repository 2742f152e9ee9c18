//! Spatial adjacency: which palette colors touch in the image
//!
//! Counting is separated from thresholding so a UI can rescan only when the
//! image or the neighborhood changes and rebuild the graph cheaply when only
//! the threshold moves.

use std::collections::{BTreeMap, BTreeSet};

use super::{ColorGraph, EdgeKey};
use crate::api::{ensure_non_negative, ConfigError};
use crate::{ColorId, ColorTable, PixelBuffer};

/// Which pixels count as neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Neighborhood {
    /// Left, right, up, down.
    #[default]
    Four,
    /// The four above plus diagonals.
    Eight,
}

impl Neighborhood {
    /// Parse a neighbor count (4 or 8).
    pub fn from_count(count: u32) -> Result<Self, ConfigError> {
        match count {
            4 => Ok(Self::Four),
            8 => Ok(Self::Eight),
            other => Err(ConfigError::invalid(
                "graph.neighborhood",
                format!("{other} is not 4 or 8"),
            )),
        }
    }

    pub fn count(self) -> u32 {
        match self {
            Self::Four => 4,
            Self::Eight => 8,
        }
    }

    // Forward half of the neighborhood so every unordered pixel pair is
    // visited exactly once.
    fn forward_offsets(self) -> &'static [(i64, i64)] {
        match self {
            Self::Four => &[(1, 0), (0, 1)],
            Self::Eight => &[(1, 0), (0, 1), (1, 1), (-1, 1)],
        }
    }
}

/// Rule deciding which counted pairs become edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AdjacencyThreshold {
    /// At least this many neighboring pixel pairs.
    Absolute(u32),
    /// Pair count divided by the larger of the two colors' pixel counts is
    /// at least this ratio, `[0, 1]`.
    Relative(f64),
    /// Pair count is at least this percentile (`[0, 100]`, linear
    /// interpolation) of all non-zero pair counts.
    Percentile(f64),
}

impl Default for AdjacencyThreshold {
    fn default() -> Self {
        Self::Absolute(1)
    }
}

impl AdjacencyThreshold {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::Absolute(_) => Ok(()),
            Self::Relative(ratio) => {
                ensure_non_negative("graph.threshold_value", ratio)?;
                if ratio > 1.0 {
                    return Err(ConfigError::invalid(
                        "graph.threshold_value",
                        format!("relative threshold {ratio} is above 1"),
                    ));
                }
                Ok(())
            }
            Self::Percentile(p) => {
                ensure_non_negative("graph.threshold_value", p)?;
                if p > 100.0 {
                    return Err(ConfigError::invalid(
                        "graph.threshold_value",
                        format!("percentile {p} is above 100"),
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Co-occurrence counts gathered from one image scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjacencyCounts {
    neighborhood: Neighborhood,
    nodes: BTreeSet<ColorId>,
    pairs: BTreeMap<EdgeKey, u32>,
    occurrences: BTreeMap<ColorId, u32>,
}

impl AdjacencyCounts {
    /// Count neighboring pixel pairs of distinct palette colors.
    ///
    /// Transparent pixels and colors missing from `table` are skipped; the
    /// latter are counted and reported with a warning.
    pub fn scan(image: &PixelBuffer<'_>, table: &ColorTable, neighborhood: Neighborhood) -> Self {
        let mut counts = Self {
            neighborhood,
            nodes: table.ids().collect(),
            ..Self::default()
        };

        let (w, h) = (image.width() as i64, image.height() as i64);
        let id_at = |x: i64, y: i64| -> Option<ColorId> {
            let color = image.pixel(x as u32, y as u32);
            if color.is_transparent() {
                None
            } else {
                table.id_of(color)
            }
        };

        let mut unknown = 0usize;
        for y in 0..h {
            for x in 0..w {
                let Some(a) = id_at(x, y) else {
                    if !image.pixel(x as u32, y as u32).is_transparent() {
                        unknown += 1;
                    }
                    continue;
                };
                *counts.occurrences.entry(a).or_insert(0) += 1;

                for &(dx, dy) in neighborhood.forward_offsets() {
                    let (nx, ny) = (x + dx, y + dy);
                    if nx < 0 || ny < 0 || nx >= w || ny >= h {
                        continue;
                    }
                    let Some(b) = id_at(nx, ny) else {
                        continue;
                    };
                    if let Some(key) = EdgeKey::new(a, b) {
                        *counts.pairs.entry(key).or_insert(0) += 1;
                    }
                }
            }
        }

        if unknown > 0 {
            tracing::warn!(pixels = unknown, "Skipped pixels whose color is not in the palette");
        }
        tracing::debug!(
            neighborhood = neighborhood.count(),
            pairs = counts.pairs.len(),
            "Scanned color adjacency"
        );
        counts
    }

    pub fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }

    /// Number of neighboring pixel pairs for two colors.
    pub fn pair_count(&self, a: ColorId, b: ColorId) -> u32 {
        EdgeKey::new(a, b)
            .and_then(|k| self.pairs.get(&k).copied())
            .unwrap_or(0)
    }

    /// Number of pixels carrying `id`.
    pub fn occurrences(&self, id: ColorId) -> u32 {
        self.occurrences.get(&id).copied().unwrap_or(0)
    }

    /// Build the adjacency graph under `threshold`.
    ///
    /// Every palette color becomes a node even when it has no edge.
    /// Edge weights carry the pair counts.
    pub fn to_graph(&self, threshold: AdjacencyThreshold) -> Result<ColorGraph, ConfigError> {
        threshold.validate()?;

        let mut graph = ColorGraph::new();
        for &id in &self.nodes {
            graph.add_node(id);
        }

        let percentile_cut = match threshold {
            AdjacencyThreshold::Percentile(p) => {
                let mut values: Vec<u32> = self.pairs.values().copied().collect();
                values.sort_unstable();
                percentile(&values, p)
            }
            _ => 0.0,
        };

        for (key, &count) in &self.pairs {
            let keep = match threshold {
                AdjacencyThreshold::Absolute(min) => count >= min,
                AdjacencyThreshold::Relative(ratio) => {
                    let larger = self
                        .occurrences(key.low())
                        .max(self.occurrences(key.high()));
                    larger > 0 && count as f64 / larger as f64 >= ratio
                }
                AdjacencyThreshold::Percentile(_) => count as f64 >= percentile_cut,
            };
            if keep {
                graph.add_edge(key.low(), key.high(), Some(count));
            }
        }

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Built adjacency graph"
        );
        Ok(graph)
    }
}

/// Percentile of sorted values with linear interpolation between ranks.
fn percentile(sorted: &[u32], p: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0] as f64,
        n => {
            let rank = p / 100.0 * (n - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            let frac = rank - lo as f64;
            sorted[lo] as f64 + (sorted[hi] as f64 - sorted[lo] as f64) * frac
        }
    }
}
