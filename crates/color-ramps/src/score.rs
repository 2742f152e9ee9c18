//! Ramp quality scoring
//!
//! A ramp scores well when its perceptual steps sit in a comfortable band,
//! are evenly spaced, each HSV component keeps one direction, and it is long
//! relative to the ramps it competes with.
//!
//! ```text
//! final = monotony + length_bonus * length_weight - step_size - consistency
//! ```

use serde::Serialize;

use crate::api::{ensure_non_negative, ConfigError, RampError};
use crate::color::hsv_steps;
use crate::search::MONOTONIC_NOISE;
use crate::{ColorSample, PaletteSnapshot, Ramp};

/// Weights and bands used by [`RampScorer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScorerConfig {
    /// Lower edge of the comfortable step band, in ΔE₀₀ / 100.
    pub comfortable_min: f64,
    /// Upper edge of the comfortable step band, in ΔE₀₀ / 100.
    pub comfortable_max: f64,
    pub size_weight: f64,
    pub consistency_weight: f64,
    /// Bonus per HSV component for a reversal-free ramp.
    pub monotony_unit: f64,
    pub length_weight: f64,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            comfortable_min: 0.02,
            comfortable_max: 0.20,
            size_weight: 0.2,
            consistency_weight: 1.0,
            monotony_unit: 0.1 / 3.0,
            length_weight: 0.01,
        }
    }
}

impl ScorerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_negative("score.comfortable_min", self.comfortable_min)?;
        ensure_non_negative("score.comfortable_max", self.comfortable_max)?;
        ensure_non_negative("score.size_weight", self.size_weight)?;
        ensure_non_negative("score.consistency_weight", self.consistency_weight)?;
        ensure_non_negative("score.monotony_unit", self.monotony_unit)?;
        ensure_non_negative("score.length_weight", self.length_weight)?;
        if self.comfortable_min > self.comfortable_max {
            return Err(ConfigError::invalid(
                "score.comfortable_min",
                format!(
                    "{} is larger than comfortable_max {}",
                    self.comfortable_min, self.comfortable_max
                ),
            ));
        }
        Ok(())
    }
}

/// Score breakdown for one ramp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreResult {
    pub final_score: f64,
    pub step_size_penalty: f64,
    pub step_consistency_penalty: f64,
    pub monotony_score: f64,
    /// Colors beyond the shortest ramp in the comparison group.
    pub length_bonus: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RampScorer {
    config: ScorerConfig,
}

impl RampScorer {
    pub fn new(config: ScorerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Score a ramp given as resolved colors.
    pub fn score(&self, colors: &[&ColorSample], min_length: usize) -> ScoreResult {
        let cfg = &self.config;
        let deltas: Vec<f64> = colors
            .windows(2)
            .map(|w| w[0].delta_e(w[1]) / 100.0)
            .collect();

        let step_size_penalty = cfg.size_weight * rms(deltas.iter().map(|&d| self.band_penalty(d)));

        let step_consistency_penalty = cfg.consistency_weight
            * rms(deltas.windows(2).map(|w| (w[1] - w[0]).powi(2)));

        let hsv: Vec<_> = colors.iter().map(|s| s.hsv).collect();
        let steps = hsv_steps(&hsv);
        let monotony_score = (0..3)
            .map(|c| {
                let component: Vec<f64> = steps.iter().map(|s| s[c]).collect();
                cfg.monotony_unit / (1.0 + reversals(&component) as f64)
            })
            .sum::<f64>();

        let length_bonus = colors.len().saturating_sub(min_length) as f64;

        ScoreResult {
            final_score: monotony_score + length_bonus * cfg.length_weight
                - step_size_penalty
                - step_consistency_penalty,
            step_size_penalty,
            step_consistency_penalty,
            monotony_score,
            length_bonus,
        }
    }

    /// Score a ramp by id.
    pub fn score_ramp(
        &self,
        ramp: &Ramp,
        snapshot: &PaletteSnapshot,
        min_length: usize,
    ) -> Result<ScoreResult, RampError> {
        Ok(self.score(&snapshot.samples_of(ramp)?, min_length))
    }

    /// Score every ramp against the shortest one in `ramps`.
    pub fn score_group(
        &self,
        ramps: &[Ramp],
        snapshot: &PaletteSnapshot,
    ) -> Result<Vec<ScoreResult>, RampError> {
        let min_length = ramps.iter().map(Ramp::len).min().unwrap_or(0);
        ramps
            .iter()
            .map(|r| self.score_ramp(r, snapshot, min_length))
            .collect()
    }

    // Zero inside the band, squared relative overshoot outside.
    fn band_penalty(&self, delta: f64) -> f64 {
        let (lo, hi) = (self.config.comfortable_min, self.config.comfortable_max);
        if delta < lo {
            ((lo - delta) / lo).powi(2)
        } else if delta > hi {
            if hi > 0.0 {
                ((delta - hi) / hi).powi(2)
            } else {
                delta.powi(2)
            }
        } else {
            0.0
        }
    }
}

/// Whether `a` should win over `b`: higher score first, then the
/// lexicographically smaller id sequence.
pub fn outranks(a: (&Ramp, f64), b: (&Ramp, f64)) -> bool {
    match a.1.total_cmp(&b.1) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => a.0.ids() < b.0.ids(),
    }
}

/// Index of the best ramp under [`outranks`].
pub fn best_index(ramps: &[Ramp], scores: &[ScoreResult]) -> Option<usize> {
    (0..ramps.len().min(scores.len())).reduce(|best, i| {
        if outranks((&ramps[i], scores[i].final_score), (&ramps[best], scores[best].final_score)) {
            i
        } else {
            best
        }
    })
}

// Squares are summed in sorted order so a ramp and its mirror score
// bit-for-bit the same.
fn rms(values: impl Iterator<Item = f64>) -> f64 {
    let mut squares: Vec<f64> = values.map(|v| v * v).collect();
    if squares.is_empty() {
        return 0.0;
    }
    squares.sort_by(f64::total_cmp);
    (squares.iter().sum::<f64>() / squares.len() as f64).sqrt()
}

/// Sign changes between steps above the noise floor.
fn reversals(deltas: &[f64]) -> usize {
    let signs: Vec<bool> = deltas
        .iter()
        .filter(|d| d.abs() > MONOTONIC_NOISE)
        .map(|d| *d > 0.0)
        .collect();
    signs.windows(2).filter(|w| w[0] != w[1]).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn greys(values: &[u8]) -> Vec<ColorSample> {
        values
            .iter()
            .map(|&v| ColorSample::from(Color::rgb(v, v, v)))
            .collect()
    }

    fn score(values: &[u8], min_len: usize) -> ScoreResult {
        let s = greys(values);
        let refs: Vec<&ColorSample> = s.iter().collect();
        RampScorer::default().score(&refs, min_len)
    }

    #[test]
    fn test_reversal_count() {
        assert_eq!(reversals(&[0.1, 0.1, 0.1]), 0);
        assert_eq!(reversals(&[0.1, -0.1, 0.1]), 2);
        assert_eq!(reversals(&[0.1, -0.01, 0.1]), 0);
        assert_eq!(reversals(&[]), 0);
    }

    #[test]
    fn test_monotone_grey_ramp_has_full_monotony() {
        let result = score(&[40, 80, 120, 160], 4);
        let expected = 0.1;
        assert!(
            (result.monotony_score - expected).abs() < 1e-12,
            "monotony {}",
            result.monotony_score
        );
        assert_eq!(result.length_bonus, 0.0);
    }

    #[test]
    fn test_reversal_lowers_monotony() {
        let straight = score(&[40, 120, 200], 3);
        let zigzag = score(&[40, 200, 120], 3);
        assert!(zigzag.monotony_score < straight.monotony_score);
    }

    #[test]
    fn test_length_bonus_relative_to_group() {
        let result = score(&[40, 80, 120, 160, 200], 3);
        assert_eq!(result.length_bonus, 2.0);
    }

    #[test]
    fn test_even_steps_beat_uneven() {
        let even = score(&[40, 90, 140], 3);
        let uneven = score(&[40, 50, 140], 3);
        assert!(even.step_consistency_penalty < uneven.step_consistency_penalty);
        assert!(even.final_score > uneven.final_score);
    }

    #[test]
    fn test_tiny_steps_are_penalised() {
        let tiny = score(&[100, 101, 102], 3);
        assert!(tiny.step_size_penalty > 0.0);
    }

    #[test]
    fn test_final_score_formula() {
        let r = score(&[30, 90, 150, 220], 3);
        let expected =
            r.monotony_score + r.length_bonus * 0.01 - r.step_size_penalty - r.step_consistency_penalty;
        assert!((r.final_score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_mirror_scores_identical() {
        let forward = score(&[30, 70, 150, 160, 240], 3);
        let backward = score(&[240, 160, 150, 70, 30], 3);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_outranks_tie_break() {
        let a = Ramp::from(vec![1, 2, 3]);
        let b = Ramp::from(vec![3, 2, 1]);
        assert!(outranks((&a, 0.5), (&b, 0.5)));
        assert!(!outranks((&b, 0.5), (&a, 0.5)));
        assert!(outranks((&b, 0.6), (&a, 0.5)));
    }

    #[test]
    fn test_best_index() {
        let ramps = vec![Ramp::from(vec![5, 6, 7]), Ramp::from(vec![1, 2, 3])];
        let s = ScoreResult {
            final_score: 0.1,
            step_size_penalty: 0.0,
            step_consistency_penalty: 0.0,
            monotony_score: 0.1,
            length_bonus: 0.0,
        };
        assert_eq!(best_index(&ramps, &[s, s]), Some(1));
        assert_eq!(best_index(&[], &[]), None);
    }

    #[test]
    fn test_config_validation() {
        let cfg = ScorerConfig {
            comfortable_min: 0.3,
            ..ScorerConfig::default()
        };
        assert!(cfg.validate().is_err());
        assert!(ScorerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_band_floor() {
        let scorer = RampScorer::new(ScorerConfig {
            comfortable_min: 0.0,
            ..ScorerConfig::default()
        });
        assert_eq!(scorer.band_penalty(0.0), 0.0);
    }
}
