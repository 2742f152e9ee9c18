//! Pairwise "these two colors are close" predicates
//!
//! Shared by the similarity graph and the clustering edit distance.

use super::{hue_delta_degrees, ColorSample};
use crate::api::{ensure_non_negative, ConfigError};

/// Closeness test between two palette colors. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimilarityTest {
    /// Per-component HSV bounds. Hue in degrees, saturation and value in `[0, 1]`.
    Hsv {
        hue_degrees: f64,
        saturation: f64,
        value: f64,
    },
    /// CIEDE2000 bound.
    DeltaE { max_delta_e: f64 },
}

impl SimilarityTest {
    /// HSV test with the bounds used by ramp clustering: 15°, 0.1, 0.1.
    pub const CLUSTERING: Self = Self::Hsv {
        hue_degrees: 15.0,
        saturation: 0.1,
        value: 0.1,
    };

    /// Returns true when `a` and `b` fall within every bound.
    pub fn matches(&self, a: &ColorSample, b: &ColorSample) -> bool {
        match *self {
            Self::Hsv {
                hue_degrees,
                saturation,
                value,
            } => {
                hue_delta_degrees(a.hsv.h, b.hsv.h).abs() <= hue_degrees
                    && (a.hsv.s - b.hsv.s).abs() <= saturation
                    && (a.hsv.v - b.hsv.v).abs() <= value
            }
            Self::DeltaE { max_delta_e } => a.delta_e(b) <= max_delta_e,
        }
    }

    /// Check every bound is a finite non-negative number.
    pub fn validate(&self, field: &str) -> Result<(), ConfigError> {
        match *self {
            Self::Hsv {
                hue_degrees,
                saturation,
                value,
            } => {
                ensure_non_negative(&format!("{field}.hue"), hue_degrees)?;
                ensure_non_negative(&format!("{field}.saturation"), saturation)?;
                ensure_non_negative(&format!("{field}.value"), value)
            }
            Self::DeltaE { max_delta_e } => {
                ensure_non_negative(&format!("{field}.max_delta_e"), max_delta_e)
            }
        }
    }
}

impl Default for SimilarityTest {
    fn default() -> Self {
        Self::CLUSTERING
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn sample(r: u8, g: u8, b: u8) -> ColorSample {
        ColorSample::from(Color::rgb(r, g, b))
    }

    #[test]
    fn test_hsv_bounds_are_inclusive() {
        let a = sample(100, 100, 100);
        let b = sample(100, 100, 100);
        let zero = SimilarityTest::Hsv {
            hue_degrees: 0.0,
            saturation: 0.0,
            value: 0.0,
        };
        assert!(zero.matches(&a, &b));
    }

    #[test]
    fn test_hsv_value_bound() {
        let dark = sample(51, 51, 51);
        let light = sample(102, 102, 102);
        // value differs by 0.2
        assert!(!SimilarityTest::CLUSTERING.matches(&dark, &light));

        let loose = SimilarityTest::Hsv {
            hue_degrees: 15.0,
            saturation: 0.1,
            value: 0.25,
        };
        assert!(loose.matches(&dark, &light));
    }

    #[test]
    fn test_hsv_hue_wraps() {
        // hues at about 358° and 2°
        let a = sample(255, 0, 9);
        let b = sample(255, 9, 0);
        assert!(SimilarityTest::CLUSTERING.matches(&a, &b));
    }

    #[test]
    fn test_delta_e_bound() {
        let a = sample(200, 30, 30);
        let b = sample(190, 35, 35);
        let de = a.delta_e(&b);

        assert!(SimilarityTest::DeltaE { max_delta_e: de }.matches(&a, &b));
        assert!(!SimilarityTest::DeltaE {
            max_delta_e: de - 1e-6
        }
        .matches(&a, &b));
    }

    #[test]
    fn test_validate_rejects_negative() {
        let err = SimilarityTest::DeltaE { max_delta_e: -1.0 }
            .validate("graph.similarity")
            .unwrap_err();
        assert!(err.to_string().contains("graph.similarity.max_delta_e"), "{err}");
    }
}
