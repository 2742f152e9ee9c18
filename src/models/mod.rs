pub mod config;
pub mod state;

pub use config::{
    ClusterConfig, ExtractionConfig, FilterConfig, GraphConfig, GraphMode, RampsConfig,
    SimilarityMetric, StepValue, ThresholdKind, CONFIG_ENV,
};
pub use state::PaletteState;
