//! Step-validity predicates
//!
//! A validator looks at a whole candidate path and decides whether every
//! step in it is acceptable. The search calls it once per extension, so a
//! path is rejected the moment its newest step breaks a rule.

use super::params::{BasicHsvParams, Ciede2000Params, ExtractionMethod, VectorHsvParams};
use crate::color::hsv_steps;
use crate::ColorSample;

/// Slack on the Basic HSV step limits, absorbs 8-bit rounding.
const STEP_LIMIT_SLACK: f64 = 1e-5;

/// Steps smaller than this are ignored by the consistency check.
const CONSISTENCY_ZERO: f64 = 0.001;

/// Steps smaller than this are ignored by the monotonicity check.
pub(crate) const MONOTONIC_NOISE: f64 = 0.05;

/// Vector pairs whose norm product is below this carry no direction.
const DIRECTION_ZERO: f64 = 0.001;

/// Decides whether a path of colors forms an acceptable ramp so far.
pub trait StepValidator {
    fn is_valid(&self, path: &[&ColorSample]) -> bool;
}

impl StepValidator for BasicHsvParams {
    fn is_valid(&self, path: &[&ColorSample]) -> bool {
        let hsv: Vec<_> = path.iter().map(|s| s.hsv).collect();
        let steps = hsv_steps(&hsv);

        (0..3).all(|c| {
            let deltas: Vec<f64> = steps.iter().map(|s| s[c]).collect();
            let within = deltas.iter().all(|d| {
                let size = d.abs();
                size <= self.max_step[c] + STEP_LIMIT_SLACK
                    && size >= self.min_step[c] - STEP_LIMIT_SLACK
            });
            within
                && consistent_steps(&deltas, self.step_tolerance[c])
                && (!self.monotonic || one_direction(&deltas))
        })
    }
}

impl StepValidator for VectorHsvParams {
    fn is_valid(&self, path: &[&ColorSample]) -> bool {
        let hsv: Vec<_> = path.iter().map(|s| s.hsv).collect();
        let steps = hsv_steps(&hsv);

        if steps.iter().any(|s| norm(s) > self.max_step) {
            return false;
        }
        angles_within(&steps, self.angle_tolerance_deg)
    }
}

impl StepValidator for Ciede2000Params {
    fn is_valid(&self, path: &[&ColorSample]) -> bool {
        let deltas: Vec<f64> = path.windows(2).map(|w| w[0].delta_e(w[1])).collect();

        if deltas
            .iter()
            .any(|&d| d > self.max_step || d < self.min_step)
        {
            return false;
        }
        if deltas
            .windows(2)
            .any(|w| (w[1] - w[0]).abs() > self.step_tolerance)
        {
            return false;
        }

        match self.angle_tolerance_deg {
            Some(tolerance) => {
                let steps: Vec<[f64; 3]> = path
                    .windows(2)
                    .map(|w| {
                        [
                            w[1].lab.l - w[0].lab.l,
                            w[1].lab.a - w[0].lab.a,
                            w[1].lab.b - w[0].lab.b,
                        ]
                    })
                    .collect();
                angles_within(&steps, tolerance)
            }
            None => true,
        }
    }
}

impl StepValidator for ExtractionMethod {
    fn is_valid(&self, path: &[&ColorSample]) -> bool {
        match self {
            Self::BasicHsv(p) => p.is_valid(path),
            Self::VectorHsv(p) => p.is_valid(path),
            Self::Ciede2000(p) => p.is_valid(path),
        }
    }
}

/// Consecutive non-zero steps may differ by at most `tolerance`.
fn consistent_steps(deltas: &[f64], tolerance: f64) -> bool {
    let moving: Vec<f64> = deltas
        .iter()
        .copied()
        .filter(|d| d.abs() > CONSISTENCY_ZERO)
        .collect();
    moving.windows(2).all(|w| (w[1] - w[0]).abs() <= tolerance)
}

/// All steps above the noise floor share a sign.
fn one_direction(deltas: &[f64]) -> bool {
    let mut moving = deltas.iter().filter(|d| d.abs() > MONOTONIC_NOISE);
    let mut rest = moving.clone();
    moving.all(|&d| d >= 0.0) || rest.all(|&d| d <= 0.0)
}

fn norm(v: &[f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// Angle between each pair of consecutive vectors is at most `tolerance_deg`.
/// Pairs involving a near-zero vector are skipped.
fn angles_within(steps: &[[f64; 3]], tolerance_deg: f64) -> bool {
    let limit = tolerance_deg.to_radians();
    steps.windows(2).all(|w| {
        let norms = norm(&w[0]) * norm(&w[1]);
        if norms < DIRECTION_ZERO {
            return true;
        }
        let dot = w[0][0] * w[1][0] + w[0][1] * w[1][1] + w[0][2] * w[1][2];
        (dot / norms).clamp(-1.0, 1.0).acos() <= limit
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn samples(colors: &[Color]) -> Vec<ColorSample> {
        colors.iter().map(|c| ColorSample::from(*c)).collect()
    }

    fn greys(values: &[u8]) -> Vec<ColorSample> {
        samples(&values.iter().map(|&v| Color::rgb(v, v, v)).collect::<Vec<_>>())
    }

    fn refs(s: &[ColorSample]) -> Vec<&ColorSample> {
        s.iter().collect()
    }

    fn basic_v(max: f64, min: f64, tol: f64) -> BasicHsvParams {
        BasicHsvParams {
            max_step: [1.0, 1.0, max],
            min_step: [0.0, 0.0, min],
            step_tolerance: [1.0, 1.0, tol],
            monotonic: false,
        }
    }

    #[test]
    fn test_basic_hsv_even_grey_ramp() {
        let path = greys(&[51, 102, 153, 204]);
        assert!(basic_v(0.3, 0.0, 0.05).is_valid(&refs(&path)));
        // each step is 0.2 in V
        assert!(!basic_v(0.15, 0.0, 0.05).is_valid(&refs(&path)));
        assert!(!basic_v(0.3, 0.25, 0.05).is_valid(&refs(&path)));
    }

    #[test]
    fn test_basic_hsv_step_consistency() {
        // steps 0.2 then 0.4
        let path = greys(&[51, 102, 204]);
        assert!(!basic_v(0.5, 0.0, 0.1).is_valid(&refs(&path)));
        assert!(basic_v(0.5, 0.0, 0.25).is_valid(&refs(&path)));
    }

    #[test]
    fn test_basic_hsv_limits_include_boundary() {
        let path = greys(&[51, 102]);
        assert!(basic_v(0.2, 0.2, 0.0).is_valid(&refs(&path)));
    }

    #[test]
    fn test_basic_hsv_monotonic_flag() {
        let path = greys(&[51, 153, 102]);
        let mut params = basic_v(0.5, 0.0, 1.0);
        assert!(params.is_valid(&refs(&path)));
        params.monotonic = true;
        assert!(!params.is_valid(&refs(&path)));
    }

    #[test]
    fn test_monotonic_ignores_noise() {
        assert!(one_direction(&[0.2, -0.04, 0.2]));
        assert!(!one_direction(&[0.2, -0.06, 0.2]));
        assert!(one_direction(&[]));
    }

    #[test]
    fn test_consistency_ignores_flat_steps() {
        assert!(consistent_steps(&[0.2, 0.0, 0.2], 0.01));
        assert!(!consistent_steps(&[0.2, -0.2], 0.1));
    }

    #[test]
    fn test_vector_hsv_magnitude() {
        let path = greys(&[51, 102, 153]);
        let ok = VectorHsvParams {
            max_step: 0.25,
            angle_tolerance_deg: 10.0,
        };
        assert!(ok.is_valid(&refs(&path)));

        let tight = VectorHsvParams {
            max_step: 0.1,
            ..ok
        };
        assert!(!tight.is_valid(&refs(&path)));
    }

    #[test]
    fn test_vector_hsv_turning_path_rejected() {
        // brighten then darken: 180 degree turn
        let path = greys(&[51, 153, 102]);
        let params = VectorHsvParams {
            max_step: 1.0,
            angle_tolerance_deg: 90.0,
        };
        assert!(!params.is_valid(&refs(&path)));
    }

    #[test]
    fn test_vector_hsv_skips_zero_vectors() {
        let path = greys(&[51, 51, 153]);
        let params = VectorHsvParams {
            max_step: 1.0,
            angle_tolerance_deg: 0.0,
        };
        assert!(params.is_valid(&refs(&path)));
    }

    #[test]
    fn test_ciede2000_max_step_boundary() {
        let path = greys(&[60, 90, 120]);
        let d1 = path[0].delta_e(&path[1]);
        let d2 = path[1].delta_e(&path[2]);
        let largest = d1.max(d2);

        let at = Ciede2000Params {
            max_step: largest,
            min_step: 0.0,
            step_tolerance: 100.0,
            angle_tolerance_deg: None,
        };
        assert!(at.is_valid(&refs(&path)));

        let below = Ciede2000Params {
            max_step: largest - 1e-9,
            ..at
        };
        assert!(!below.is_valid(&refs(&path)));
    }

    #[test]
    fn test_ciede2000_tolerance_and_min_step() {
        let path = greys(&[40, 60, 200]);
        let loose = Ciede2000Params {
            max_step: 100.0,
            min_step: 0.0,
            step_tolerance: 100.0,
            angle_tolerance_deg: None,
        };
        assert!(loose.is_valid(&refs(&path)));
        assert!(!Ciede2000Params {
            step_tolerance: 5.0,
            ..loose
        }
        .is_valid(&refs(&path)));
        assert!(!Ciede2000Params {
            min_step: 20.0,
            ..loose
        }
        .is_valid(&refs(&path)));
    }

    #[test]
    fn test_ciede2000_angle_option() {
        let path = greys(&[60, 150, 90]);
        let base = Ciede2000Params {
            max_step: 100.0,
            min_step: 0.0,
            step_tolerance: 100.0,
            angle_tolerance_deg: None,
        };
        assert!(base.is_valid(&refs(&path)));
        assert!(!Ciede2000Params {
            angle_tolerance_deg: Some(45.0),
            ..base
        }
        .is_valid(&refs(&path)));
    }

    #[test]
    fn test_short_paths_are_valid() {
        let one = greys(&[10]);
        assert!(ExtractionMethod::default().is_valid(&refs(&one)));
        assert!(ExtractionMethod::Ciede2000(Ciede2000Params::default()).is_valid(&[]));
    }
}
