//! Image-to-ramps pipeline: color table, graph, extraction.

use color_ramps::{
    similarity_graph, AdjacencyCounts, ColorGraph, ColorTable, Extraction, PaletteSnapshot,
    PixelBuffer, ProgressObserver, Ramp, RampExtractor, ScoreResult, Stage,
};

use crate::error::AppError;
use crate::models::{ExtractionConfig, GraphMode, PaletteState};

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// Palette and final ramps, ready to save.
    pub state: PaletteState,
    pub extraction: Extraction,
    pub edge_count: usize,
}

/// Configured extraction over decoded images.
#[derive(Debug, Clone)]
pub struct RampPipeline {
    config: ExtractionConfig,
    extractor: RampExtractor,
}

impl RampPipeline {
    /// Validate `config` and prepare the extractor.
    pub fn new(config: ExtractionConfig) -> Result<Self, AppError> {
        config.validate()?;
        let mut extractor =
            RampExtractor::new(config.ramps.validity_params()?)?.filter(config.filter.into());
        if let Some(options) = config.cluster.options()? {
            extractor = extractor.cluster(options);
        }
        Ok(Self { config, extractor })
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Link colors by touching pixels or by appearance, per `graph.mode`.
    pub fn build_graph(
        &self,
        image: &PixelBuffer<'_>,
        table: &ColorTable,
        snapshot: &PaletteSnapshot,
        observer: &dyn ProgressObserver,
    ) -> Result<ColorGraph, AppError> {
        let graph_config = &self.config.graph;
        observer.report(Stage::BuildingGraph, 0, 1);
        let graph = match graph_config.mode {
            GraphMode::Adjacency => {
                let counts = AdjacencyCounts::scan(image, table, graph_config.neighborhood()?);
                counts.to_graph(graph_config.adjacency_threshold()?)?
            }
            GraphMode::Similarity => similarity_graph(snapshot, &graph_config.similarity_test()?)?,
        };
        observer.report(Stage::BuildingGraph, 1, 1);
        tracing::debug!(
            mode = ?graph_config.mode,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Built color graph"
        );
        Ok(graph)
    }

    /// Derive the palette from `image` and extract its ramps.
    pub fn run(
        &self,
        image: &PixelBuffer<'_>,
        observer: &dyn ProgressObserver,
    ) -> Result<PipelineOutput, AppError> {
        let table = ColorTable::from_image(image);
        let snapshot = PaletteSnapshot::from(&table);
        tracing::info!(colors = table.len(), "Collected palette");

        let graph = self.build_graph(image, &table, &snapshot, observer)?;
        let extraction = self.extractor.extract_with(&graph, &snapshot, observer)?;
        tracing::info!(
            candidates = extraction.candidates,
            filtered = extraction.filtered,
            ramps = extraction.ramps.len(),
            "Extracted ramps"
        );

        Ok(PipelineOutput {
            state: PaletteState::new(table, extraction.ramps.clone()),
            extraction,
            edge_count: graph.edge_count(),
        })
    }

    /// Score the ramps of a saved state against each other.
    pub fn score(&self, state: &PaletteState) -> Result<Vec<ScoreResult>, AppError> {
        state.check()?;
        Ok(self.extractor.score(&state.ramps, &state.snapshot())?)
    }
}

/// Hex colors of `ramp`, in ramp order.
pub fn ramp_hex(ramp: &Ramp, table: &ColorTable) -> Vec<String> {
    ramp.ids()
        .iter()
        .map(|&id| {
            table
                .color(id)
                .map_or_else(|| format!("?{id}"), |c| c.to_hex())
        })
        .collect()
}
