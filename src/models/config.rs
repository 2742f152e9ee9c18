use std::path::{Path, PathBuf};

use color_ramps::{
    AdjacencyThreshold, BasicHsvParams, Ciede2000Params, ClusterOptions, ConfigError,
    ExtractionMethod, FilterOptions, MethodKind, Neighborhood, SimilarityTest, ValidityParams,
    VectorHsvParams, MAX_RAMP_LENGTH_LIMIT,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Environment variable naming the config file when `--config` is absent.
pub const CONFIG_ENV: &str = "RAMPFORGE_CONFIG";

/// Extraction settings loaded from YAML. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    #[serde(default)]
    pub graph: GraphConfig,

    #[serde(default)]
    pub ramps: RampsConfig,

    #[serde(default)]
    pub filter: FilterConfig,

    #[serde(default)]
    pub cluster: ClusterConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphMode {
    /// Colors are linked when their pixels touch.
    #[default]
    Adjacency,
    /// Colors are linked when they look alike.
    Similarity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdKind {
    Absolute,
    #[default]
    Relative,
    Percentile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityMetric {
    Hsv,
    #[default]
    Ciede2000,
}

/// How the color graph is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    #[serde(default)]
    pub mode: GraphMode,

    /// 4 or 8 neighboring pixels.
    #[serde(default = "default_neighborhood")]
    pub neighborhood: u32,

    #[serde(default)]
    pub threshold: ThresholdKind,

    /// Pair count, ratio or percentile depending on `threshold`.
    #[serde(default = "default_threshold_value")]
    pub threshold_value: f64,

    #[serde(default)]
    pub similarity_metric: SimilarityMetric,

    #[serde(default = "default_max_delta_e")]
    pub max_delta_e: f64,

    /// Hue in degrees, saturation, value.
    #[serde(default = "default_hsv_thresholds")]
    pub hsv_thresholds: [f64; 3],
}

fn default_neighborhood() -> u32 {
    4
}

fn default_threshold_value() -> f64 {
    0.5
}

fn default_max_delta_e() -> f64 {
    30.0
}

fn default_hsv_thresholds() -> [f64; 3] {
    [15.0, 0.1, 0.1]
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            mode: GraphMode::default(),
            neighborhood: default_neighborhood(),
            threshold: ThresholdKind::default(),
            threshold_value: default_threshold_value(),
            similarity_metric: SimilarityMetric::default(),
            max_delta_e: default_max_delta_e(),
            hsv_thresholds: default_hsv_thresholds(),
        }
    }
}

impl GraphConfig {
    pub fn neighborhood(&self) -> Result<Neighborhood, ConfigError> {
        Neighborhood::from_count(self.neighborhood)
    }

    pub fn adjacency_threshold(&self) -> Result<AdjacencyThreshold, ConfigError> {
        let value = self.threshold_value;
        let threshold = match self.threshold {
            ThresholdKind::Absolute => {
                if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64
                {
                    return Err(invalid(
                        "graph.threshold_value",
                        format!("absolute threshold must be a whole pair count, got {value}"),
                    ));
                }
                AdjacencyThreshold::Absolute(value as u32)
            }
            ThresholdKind::Relative => AdjacencyThreshold::Relative(value),
            ThresholdKind::Percentile => AdjacencyThreshold::Percentile(value),
        };
        threshold.validate()?;
        Ok(threshold)
    }

    pub fn similarity_test(&self) -> Result<SimilarityTest, ConfigError> {
        let test = match self.similarity_metric {
            SimilarityMetric::Hsv => SimilarityTest::Hsv {
                hue_degrees: self.hsv_thresholds[0],
                saturation: self.hsv_thresholds[1],
                value: self.hsv_thresholds[2],
            },
            SimilarityMetric::Ciede2000 => SimilarityTest::DeltaE {
                max_delta_e: self.max_delta_e,
            },
        };
        test.validate("graph")?;
        Ok(test)
    }
}

/// A step parameter: one number, or one per HSV component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepValue {
    Scalar(f64),
    PerComponent([f64; 3]),
}

/// Step-validity settings. Missing step values take the method's defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RampsConfig {
    /// `BasicHSV`, `VectorHSV` or `CIEDE2000`.
    #[serde(default = "default_method")]
    pub method: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_step: Option<StepValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_step: Option<StepValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_tolerance: Option<StepValue>,

    #[serde(default)]
    pub monotonicity: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle_tolerance_deg: Option<f64>,

    #[serde(default = "default_max_ramp_length")]
    pub max_ramp_length: usize,
}

fn default_method() -> String {
    MethodKind::BasicHsv.to_string()
}

fn default_max_ramp_length() -> usize {
    MAX_RAMP_LENGTH_LIMIT
}

impl Default for RampsConfig {
    fn default() -> Self {
        Self {
            method: default_method(),
            max_step: None,
            min_step: None,
            step_tolerance: None,
            monotonicity: false,
            angle_tolerance_deg: None,
            max_ramp_length: default_max_ramp_length(),
        }
    }
}

impl RampsConfig {
    pub fn method_kind(&self) -> Result<MethodKind, ConfigError> {
        self.method.parse()
    }

    /// Resolve the method name and step values into core parameters.
    ///
    /// A parameter the method does not use is an error rather than being
    /// ignored.
    pub fn validity_params(&self) -> Result<ValidityParams, ConfigError> {
        let kind = self.method_kind()?;
        self.reject_unused(kind)?;

        let method = match kind {
            MethodKind::BasicHsv => {
                let defaults = BasicHsvParams::default();
                ExtractionMethod::BasicHsv(BasicHsvParams {
                    max_step: per_component("ramps.max_step", self.max_step, defaults.max_step)?,
                    min_step: per_component("ramps.min_step", self.min_step, defaults.min_step)?,
                    step_tolerance: per_component(
                        "ramps.step_tolerance",
                        self.step_tolerance,
                        defaults.step_tolerance,
                    )?,
                    monotonic: self.monotonicity,
                })
            }
            MethodKind::VectorHsv => {
                let defaults = VectorHsvParams::default();
                ExtractionMethod::VectorHsv(VectorHsvParams {
                    max_step: scalar("ramps.max_step", self.max_step, defaults.max_step)?,
                    angle_tolerance_deg: self
                        .angle_tolerance_deg
                        .unwrap_or(defaults.angle_tolerance_deg),
                })
            }
            MethodKind::Ciede2000 => {
                let defaults = Ciede2000Params::default();
                ExtractionMethod::Ciede2000(Ciede2000Params {
                    max_step: scalar("ramps.max_step", self.max_step, defaults.max_step)?,
                    min_step: scalar("ramps.min_step", self.min_step, defaults.min_step)?,
                    step_tolerance: scalar(
                        "ramps.step_tolerance",
                        self.step_tolerance,
                        defaults.step_tolerance,
                    )?,
                    angle_tolerance_deg: self.angle_tolerance_deg,
                })
            }
        };
        let params = ValidityParams::new(method, self.max_ramp_length);
        params.validate()?;
        Ok(params)
    }
}

impl RampsConfig {
    fn reject_unused(&self, kind: MethodKind) -> Result<(), ConfigError> {
        let unused = match kind {
            MethodKind::BasicHsv => vec![(
                "ramps.angle_tolerance_deg",
                self.angle_tolerance_deg.is_some(),
            )],
            MethodKind::VectorHsv => vec![
                ("ramps.min_step", self.min_step.is_some()),
                ("ramps.step_tolerance", self.step_tolerance.is_some()),
                ("ramps.monotonicity", self.monotonicity),
            ],
            MethodKind::Ciede2000 => vec![("ramps.monotonicity", self.monotonicity)],
        };
        match unused.into_iter().find(|(_, set)| *set) {
            Some((field, _)) => Err(invalid(field, format!("not used by the {kind} method"))),
            None => Ok(()),
        }
    }
}

fn per_component(
    field: &str,
    value: Option<StepValue>,
    default: [f64; 3],
) -> Result<[f64; 3], ConfigError> {
    match value {
        None => Ok(default),
        Some(StepValue::PerComponent(v)) => Ok(v),
        Some(StepValue::Scalar(v)) => Err(invalid(
            field,
            format!("BasicHSV expects [h, s, v], got the single value {v}"),
        )),
    }
}

fn scalar(field: &str, value: Option<StepValue>, default: f64) -> Result<f64, ConfigError> {
    match value {
        None => Ok(default),
        Some(StepValue::Scalar(v)) => Ok(v),
        Some(StepValue::PerComponent(v)) => Err(invalid(
            field,
            format!("expected a single value, got {v:?}"),
        )),
    }
}

fn invalid(field: &str, reason: String) -> ConfigError {
    ConfigError::InvalidParameter {
        field: field.to_string(),
        reason,
    }
}

/// Redundancy filters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_true")]
    pub skip_reverse: bool,

    #[serde(default = "default_true")]
    pub skip_subsequences: bool,

    #[serde(default)]
    pub skip_permutations: bool,
}

fn default_true() -> bool {
    true
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            skip_reverse: true,
            skip_subsequences: true,
            skip_permutations: false,
        }
    }
}

impl From<FilterConfig> for FilterOptions {
    fn from(config: FilterConfig) -> Self {
        FilterOptions {
            skip_reverse: config.skip_reverse,
            skip_subsequences: config.skip_subsequences,
            skip_permutations: config.skip_permutations,
        }
    }
}

/// Near-duplicate clustering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterConfig {
    #[serde(default)]
    pub cluster_and_reduce: bool,

    #[serde(default = "default_distance_threshold")]
    pub distance_threshold: f64,
}

fn default_distance_threshold() -> f64 {
    2.0
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            cluster_and_reduce: false,
            distance_threshold: default_distance_threshold(),
        }
    }
}

impl ClusterConfig {
    /// Options for the clusterer, or `None` when clustering is off.
    pub fn options(&self) -> Result<Option<ClusterOptions>, ConfigError> {
        if !self.cluster_and_reduce {
            return Ok(None);
        }
        let options = ClusterOptions {
            distance_threshold: self.distance_threshold,
            ..ClusterOptions::default()
        };
        options.validate()?;
        Ok(Some(options))
    }
}

impl ExtractionConfig {
    /// Load from `path`, else from `$RAMPFORGE_CONFIG`, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        let Some(path) = path else {
            tracing::debug!("No config file given, using defaults");
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(&path).map_err(|e| AppError::read(&path, e))?;
        let config = Self::from_yaml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            method = %config.ramps.method,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse and validate a YAML document. An empty document is the default.
    pub fn from_yaml_str(content: &str) -> Result<Self, AppError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section resolves to valid core parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.graph.mode {
            GraphMode::Adjacency => {
                self.graph.neighborhood()?;
                self.graph.adjacency_threshold()?;
            }
            GraphMode::Similarity => {
                self.graph.similarity_test()?;
            }
        }
        self.ramps.validity_params()?;
        self.cluster.options()?;
        Ok(())
    }

    pub fn to_yaml_string(&self) -> Result<String, AppError> {
        Ok(serde_yaml::to_string(self)?)
    }
}
