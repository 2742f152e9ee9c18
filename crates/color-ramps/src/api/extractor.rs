//! RampExtractor builder -- the primary entry point for the crate.
//!
//! [`RampExtractor`] runs search, filtering and optional clustering over a
//! prebuilt [`ColorGraph`] and a [`PaletteSnapshot`].

use super::error::{ConfigError, RampError};
use crate::cluster::{ClusterOptions, RampCluster, RampClusterer};
use crate::filter::{FilterOptions, RampFilter};
use crate::progress::{NoProgress, ProgressObserver, Stage};
use crate::score::{RampScorer, ScoreResult, ScorerConfig};
use crate::search::{RampSearch, ValidityParams};
use crate::{ColorGraph, PaletteSnapshot, Ramp};

/// High-level ramp extraction builder.
///
/// # Design
///
/// - Constructor validates [`ValidityParams`] (no invalid states)
/// - Configuration methods consume and return `self`
/// - [`extract()`](Self::extract) takes `&self` so one extractor serves
///   many graphs
///
/// # Example
///
/// ```
/// use color_ramps::{
///     BasicHsvParams, Color, ColorGraph, ExtractionMethod, PaletteSnapshot, Ramp,
///     RampExtractor, ValidityParams,
/// };
///
/// let snapshot: PaletteSnapshot = [
///     (1, Color::rgb(51, 51, 51)),
///     (2, Color::rgb(102, 102, 102)),
///     (3, Color::rgb(153, 153, 153)),
/// ]
/// .into_iter()
/// .collect();
///
/// let mut graph = ColorGraph::new();
/// graph.add_edge(1, 2, None);
/// graph.add_edge(2, 3, None);
///
/// let params = ValidityParams::new(ExtractionMethod::BasicHsv(BasicHsvParams::default()), 20);
/// let ramps = RampExtractor::new(params)
///     .unwrap()
///     .extract(&graph, &snapshot)
///     .unwrap();
///
/// assert_eq!(ramps, vec![Ramp::from(vec![1, 2, 3])]);
/// ```
#[derive(Debug, Clone)]
pub struct RampExtractor {
    params: ValidityParams,
    filter: FilterOptions,
    cluster: Option<ClusterOptions>,
    scorer: RampScorer,
}

/// Everything one extraction produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Final ramps.
    pub ramps: Vec<Ramp>,
    /// Raw search candidates before filtering.
    pub candidates: usize,
    /// Ramps left after filtering, before clustering.
    pub filtered: usize,
    /// Cluster membership; empty unless clustering ran.
    pub clusters: Vec<RampCluster>,
}

impl RampExtractor {
    /// Create an extractor with default filters and no clustering.
    pub fn new(params: ValidityParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            params,
            filter: FilterOptions::default(),
            cluster: None,
            scorer: RampScorer::default(),
        })
    }

    /// Set which redundancy filters run.
    #[inline]
    pub fn filter(mut self, options: FilterOptions) -> Self {
        self.filter = options;
        self
    }

    /// Enable near-duplicate clustering.
    #[inline]
    pub fn cluster(mut self, options: ClusterOptions) -> Self {
        self.cluster = Some(options);
        self
    }

    /// Disable clustering.
    #[inline]
    pub fn no_cluster(mut self) -> Self {
        self.cluster = None;
        self
    }

    /// Replace the scoring weights.
    #[inline]
    pub fn scorer(mut self, config: ScorerConfig) -> Self {
        self.scorer = RampScorer::new(config);
        self
    }

    pub fn params(&self) -> &ValidityParams {
        &self.params
    }

    /// Check every option set on the builder.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.params.validate()?;
        self.scorer.config().validate()?;
        if let Some(cluster) = &self.cluster {
            cluster.validate()?;
        }
        Ok(())
    }

    /// Extract ramps without progress reporting.
    pub fn extract(
        &self,
        graph: &ColorGraph,
        snapshot: &PaletteSnapshot,
    ) -> Result<Vec<Ramp>, RampError> {
        Ok(self.extract_with(graph, snapshot, &NoProgress)?.ramps)
    }

    /// Extract ramps, reporting to `observer` and honoring cancellation.
    ///
    /// Runs:
    /// 1. Search for candidate paths
    /// 2. Redundancy filters
    /// 3. Clustering, when enabled and at least three ramps remain
    pub fn extract_with(
        &self,
        graph: &ColorGraph,
        snapshot: &PaletteSnapshot,
        observer: &dyn ProgressObserver,
    ) -> Result<Extraction, RampError> {
        self.validate()?;

        if graph.is_empty() {
            tracing::debug!("Empty graph, nothing to extract");
            return Ok(Extraction::default());
        }

        // 1. Search
        let candidates = RampSearch::new(graph, snapshot, &self.params).run(observer)?;
        let candidate_count = candidates.len();

        // 2. Filter
        observer.report(Stage::FilteringRamps, 0, 1);
        let filtered = RampFilter::new(self.filter, &self.scorer).apply(candidates, snapshot)?;
        let filtered_count = filtered.len();
        observer.report(Stage::FilteringRamps, 1, 1);
        if observer.is_cancelled() {
            return Err(RampError::Cancelled);
        }

        // 3. Cluster
        let (ramps, clusters) = match &self.cluster {
            Some(options) => {
                let outcome =
                    RampClusterer::new(*options, &self.scorer).run(filtered, snapshot, observer)?;
                (outcome.representatives, outcome.clusters)
            }
            None => (filtered, Vec::new()),
        };

        tracing::debug!(
            candidates = candidate_count,
            filtered = filtered_count,
            ramps = ramps.len(),
            "Extraction finished"
        );
        Ok(Extraction {
            ramps,
            candidates: candidate_count,
            filtered: filtered_count,
            clusters,
        })
    }

    /// Score ramps against each other with this extractor's weights.
    pub fn score(
        &self,
        ramps: &[Ramp],
        snapshot: &PaletteSnapshot,
    ) -> Result<Vec<ScoreResult>, RampError> {
        self.scorer.score_group(ramps, snapshot)
    }
}

/// Validate ramps loaded from outside: at least three colors, no repeated
/// id, and every id in the palette. The search's length cap does not apply.
///
/// # Example
///
/// ```
/// use color_ramps::{check_ramps, Color, PaletteSnapshot, Ramp, RampError};
///
/// let snapshot: PaletteSnapshot = (0..3).map(|id| (id, Color::rgb(0, 0, 0))).collect();
/// assert!(check_ramps(&[Ramp::from(vec![0, 1, 2])], &snapshot).is_ok());
///
/// let err = check_ramps(&[Ramp::from(vec![0, 1])], &snapshot).unwrap_err();
/// assert!(matches!(err, RampError::InvalidRamp { index: 0, .. }));
/// ```
pub fn check_ramps(ramps: &[Ramp], snapshot: &PaletteSnapshot) -> Result<(), RampError> {
    for (index, ramp) in ramps.iter().enumerate() {
        ramp.check()
            .map_err(|reason| RampError::InvalidRamp { index, reason })?;
        if let Some(id) = ramp.ids().iter().find(|id| !snapshot.contains(**id)) {
            return Err(RampError::InvalidRamp {
                index,
                reason: format!("color {} is not in the palette", id),
            });
        }
    }
    Ok(())
}
