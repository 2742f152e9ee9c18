//! Near-duplicate ramp clustering
//!
//! Ramps that differ by an insertion, a substitution with a similar color or
//! a swap of two neighbors are grouped, and each group is reduced to its
//! best scoring member.
//!
//! 1. Pairwise [`RampDistance`] over all candidates.
//! 2. [`average_linkage`] cut at `distance_threshold`.
//! 3. Best member of each cluster by [`RampScorer`].
//! 4. Representatives sorted by the brightness of their first color.

mod distance;
mod linkage;

pub use distance::{EditCosts, RampDistance};
pub use linkage::{average_linkage, DistanceMatrix};

use serde::Serialize;

use crate::api::{ensure_non_negative, ConfigError, RampError};
use crate::progress::{ProgressObserver, Stage};
use crate::score::{best_index, RampScorer, ScoreResult};
use crate::{PaletteSnapshot, Ramp, SimilarityTest};

/// Clustering parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterOptions {
    /// Clusters closer than this (average linkage) are merged.
    pub distance_threshold: f64,
    pub costs: EditCosts,
    /// When a substitution counts as free.
    pub similarity: SimilarityTest,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            distance_threshold: 2.0,
            costs: EditCosts::default(),
            similarity: SimilarityTest::CLUSTERING,
        }
    }
}

impl ClusterOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_negative("cluster.distance_threshold", self.distance_threshold)?;
        self.costs.validate()?;
        self.similarity.validate("cluster.similarity")
    }
}

/// One candidate inside a cluster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterMember {
    pub ramp: Ramp,
    pub score: ScoreResult,
}

/// A group of near-duplicate ramps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RampCluster {
    /// Members in candidate order.
    pub members: Vec<ClusterMember>,
    /// Index into `members` of the representative.
    pub selected: usize,
}

impl RampCluster {
    pub fn representative(&self) -> &Ramp {
        &self.members[self.selected].ramp
    }
}

/// Result of [`RampClusterer::run`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClusterOutcome {
    /// One ramp per cluster, darkest first color first.
    pub representatives: Vec<Ramp>,
    /// Every cluster with its members; empty when clustering was skipped.
    pub clusters: Vec<RampCluster>,
}

pub struct RampClusterer<'a> {
    options: ClusterOptions,
    scorer: &'a RampScorer,
}

impl<'a> RampClusterer<'a> {
    pub fn new(options: ClusterOptions, scorer: &'a RampScorer) -> Self {
        Self { options, scorer }
    }

    /// Group `candidates` and pick one representative per group.
    ///
    /// With fewer than three candidates nothing is clustered and the input
    /// comes back unchanged.
    pub fn run(
        &self,
        candidates: Vec<Ramp>,
        snapshot: &PaletteSnapshot,
        observer: &dyn ProgressObserver,
    ) -> Result<ClusterOutcome, RampError> {
        self.options.validate()?;

        if candidates.len() < 3 {
            tracing::debug!(candidates = candidates.len(), "Too few ramps to cluster");
            return Ok(ClusterOutcome {
                representatives: candidates,
                clusters: Vec::new(),
            });
        }

        let scores = self.scorer.score_group(&candidates, snapshot)?;
        let matrix = self.distances(&candidates, snapshot, observer)?;

        observer.report(Stage::Clustering, 0, 1);
        let labels = average_linkage(&matrix, self.options.distance_threshold);
        let cluster_count = labels.iter().max().map_or(0, |m| m + 1);

        let mut grouped: Vec<Vec<usize>> = vec![Vec::new(); cluster_count];
        for (item, &label) in labels.iter().enumerate() {
            grouped[label].push(item);
        }

        let mut clusters = Vec::with_capacity(cluster_count);
        for members in grouped {
            let ramps: Vec<Ramp> = members.iter().map(|&i| candidates[i].clone()).collect();
            let member_scores: Vec<ScoreResult> = members.iter().map(|&i| scores[i]).collect();
            let selected = best_index(&ramps, &member_scores).unwrap_or(0);
            clusters.push(RampCluster {
                members: ramps
                    .into_iter()
                    .zip(member_scores)
                    .map(|(ramp, score)| ClusterMember { ramp, score })
                    .collect(),
                selected,
            });
        }
        observer.report(Stage::Clustering, 1, 1);

        let mut representatives: Vec<Ramp> =
            clusters.iter().map(|c| c.representative().clone()).collect();
        sort_by_first_brightness(&mut representatives, snapshot);

        tracing::debug!(
            candidates = candidates.len(),
            clusters = clusters.len(),
            "Clustered ramps"
        );
        Ok(ClusterOutcome {
            representatives,
            clusters,
        })
    }

    fn distances(
        &self,
        ramps: &[Ramp],
        snapshot: &PaletteSnapshot,
        observer: &dyn ProgressObserver,
    ) -> Result<DistanceMatrix, RampError> {
        let metric = RampDistance::new(self.options.costs, self.options.similarity, snapshot);
        let n = ramps.len();
        let mut matrix = DistanceMatrix::new(n);
        for i in 0..n {
            if observer.is_cancelled() {
                return Err(RampError::Cancelled);
            }
            observer.report(Stage::ComputingDistances, i, n);
            for j in i + 1..n {
                matrix.set(i, j, metric.between(&ramps[i], &ramps[j]));
            }
        }
        observer.report(Stage::ComputingDistances, n, n);
        Ok(matrix)
    }
}

/// Order by V of the first color, then by ids.
pub(crate) fn sort_by_first_brightness(ramps: &mut [Ramp], snapshot: &PaletteSnapshot) {
    let brightness = |r: &Ramp| {
        r.first()
            .and_then(|id| snapshot.get(id))
            .map_or(0.0, |s| s.hsv.v)
    };
    ramps.sort_by(|a, b| {
        brightness(a)
            .total_cmp(&brightness(b))
            .then_with(|| a.ids().cmp(b.ids()))
    });
}
