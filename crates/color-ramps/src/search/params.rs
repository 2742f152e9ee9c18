//! Extraction method parameters
//!
//! Each method carries its own parameter struct; [`ExtractionMethod`] is
//! the tagged union the search dispatches on. All HSV quantities are in
//! normalized units (hue as a fraction of a turn); CIEDE2000 quantities are
//! ΔE₀₀ values.

use std::fmt;
use std::str::FromStr;

use crate::api::{ensure_non_negative, ConfigError};
use crate::ramp::{MAX_RAMP_LENGTH_LIMIT, MIN_RAMP_LENGTH};

/// Method name without parameters, as written in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    BasicHsv,
    VectorHsv,
    Ciede2000,
}

impl MethodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BasicHsv => "BasicHSV",
            Self::VectorHsv => "VectorHSV",
            Self::Ciede2000 => "CIEDE2000",
        }
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MethodKind {
    type Err = ConfigError;

    /// Accepts `BasicHSV`, `VectorHSV` and `CIEDE2000`, ignoring case and
    /// separators (`Basic HSV`, `basic_hsv`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "basichsv" => Ok(Self::BasicHsv),
            "vectorhsv" => Ok(Self::VectorHsv),
            "ciede2000" => Ok(Self::Ciede2000),
            _ => Err(ConfigError::UnknownMethod {
                name: s.to_string(),
            }),
        }
    }
}

/// Per-component HSV step bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasicHsvParams {
    /// Largest allowed `|Δ|` per component `[h, s, v]`.
    pub max_step: [f64; 3],
    /// Smallest allowed `|Δ|` per component.
    pub min_step: [f64; 3],
    /// Largest allowed change between consecutive non-zero steps.
    pub step_tolerance: [f64; 3],
    /// Require every component to move in one direction.
    pub monotonic: bool,
}

impl Default for BasicHsvParams {
    fn default() -> Self {
        Self {
            max_step: [0.5, 0.5, 0.5],
            min_step: [0.0; 3],
            step_tolerance: [0.2, 0.2, 0.2],
            monotonic: false,
        }
    }
}

impl BasicHsvParams {
    fn validate(&self) -> Result<(), ConfigError> {
        const NAMES: [&str; 3] = ["h", "s", "v"];
        for (i, name) in NAMES.iter().enumerate() {
            ensure_non_negative(&format!("ramps.max_step[{name}]"), self.max_step[i])?;
            ensure_non_negative(&format!("ramps.min_step[{name}]"), self.min_step[i])?;
            ensure_non_negative(
                &format!("ramps.step_tolerance[{name}]"),
                self.step_tolerance[i],
            )?;
            if self.min_step[i] > self.max_step[i] {
                return Err(ConfigError::invalid(
                    &format!("ramps.min_step[{name}]"),
                    format!(
                        "{} is larger than max_step {}",
                        self.min_step[i], self.max_step[i]
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// Bounds on HSV step vectors as a whole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorHsvParams {
    /// Largest allowed Euclidean length of one step.
    pub max_step: f64,
    /// Largest allowed angle between consecutive steps, in degrees.
    pub angle_tolerance_deg: f64,
}

impl Default for VectorHsvParams {
    fn default() -> Self {
        Self {
            max_step: 1.0,
            angle_tolerance_deg: 15.0,
        }
    }
}

impl VectorHsvParams {
    fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_negative("ramps.max_step", self.max_step)?;
        validate_angle(self.angle_tolerance_deg)
    }
}

/// Perceptual step bounds in ΔE₀₀.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ciede2000Params {
    pub max_step: f64,
    pub min_step: f64,
    /// Largest allowed change between consecutive ΔE values.
    pub step_tolerance: f64,
    /// Optional bound on the angle between consecutive Lab step vectors.
    pub angle_tolerance_deg: Option<f64>,
}

impl Default for Ciede2000Params {
    fn default() -> Self {
        Self {
            max_step: 5.0,
            min_step: 0.0,
            step_tolerance: 2.0,
            angle_tolerance_deg: None,
        }
    }
}

impl Ciede2000Params {
    fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_negative("ramps.max_step", self.max_step)?;
        ensure_non_negative("ramps.min_step", self.min_step)?;
        ensure_non_negative("ramps.step_tolerance", self.step_tolerance)?;
        if self.min_step > self.max_step {
            return Err(ConfigError::invalid(
                "ramps.min_step",
                format!(
                    "{} is larger than max_step {}",
                    self.min_step, self.max_step
                ),
            ));
        }
        match self.angle_tolerance_deg {
            Some(angle) => validate_angle(angle),
            None => Ok(()),
        }
    }
}

fn validate_angle(angle: f64) -> Result<(), ConfigError> {
    ensure_non_negative("ramps.angle_tolerance_deg", angle)?;
    if angle > 180.0 {
        return Err(ConfigError::invalid(
            "ramps.angle_tolerance_deg",
            format!("{angle} is above 180"),
        ));
    }
    Ok(())
}

/// Step-validity method with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExtractionMethod {
    BasicHsv(BasicHsvParams),
    VectorHsv(VectorHsvParams),
    Ciede2000(Ciede2000Params),
}

impl ExtractionMethod {
    pub fn kind(&self) -> MethodKind {
        match self {
            Self::BasicHsv(_) => MethodKind::BasicHsv,
            Self::VectorHsv(_) => MethodKind::VectorHsv,
            Self::Ciede2000(_) => MethodKind::Ciede2000,
        }
    }
}

impl Default for ExtractionMethod {
    fn default() -> Self {
        Self::BasicHsv(BasicHsvParams::default())
    }
}

/// Everything the search needs to decide whether a path is a ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidityParams {
    pub method: ExtractionMethod,
    /// Longest ramp the search will build, `3..=20`.
    pub max_ramp_length: usize,
}

impl Default for ValidityParams {
    fn default() -> Self {
        Self {
            method: ExtractionMethod::default(),
            max_ramp_length: MAX_RAMP_LENGTH_LIMIT,
        }
    }
}

impl ValidityParams {
    pub fn new(method: ExtractionMethod, max_ramp_length: usize) -> Self {
        Self {
            method,
            max_ramp_length,
        }
    }

    /// Reject out-of-range or inconsistent parameters.
    ///
    /// # Example
    /// ```
    /// use color_ramps::{ExtractionMethod, ValidityParams};
    ///
    /// let params = ValidityParams::new(ExtractionMethod::default(), 2);
    /// assert!(params.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_RAMP_LENGTH..=MAX_RAMP_LENGTH_LIMIT).contains(&self.max_ramp_length) {
            return Err(ConfigError::invalid(
                "ramps.max_ramp_length",
                format!(
                    "{} is outside {}..={}",
                    self.max_ramp_length, MIN_RAMP_LENGTH, MAX_RAMP_LENGTH_LIMIT
                ),
            ));
        }
        match &self.method {
            ExtractionMethod::BasicHsv(p) => p.validate(),
            ExtractionMethod::VectorHsv(p) => p.validate(),
            ExtractionMethod::Ciede2000(p) => p.validate(),
        }
    }
}
