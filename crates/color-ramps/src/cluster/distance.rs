//! Edit distance between ramps
//!
//! Damerau–Levenshtein (optimal string alignment) over color ids, where a
//! substitution is free when the two colors pass a [`SimilarityTest`].

use crate::api::{ensure_non_negative, ConfigError};
use crate::{ColorId, PaletteSnapshot, Ramp, SimilarityTest};

/// Operation costs for [`RampDistance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditCosts {
    /// Inserting or deleting one color.
    pub insertion: f64,
    /// Replacing a color with a dissimilar one.
    pub substitution: f64,
    /// Swapping two neighboring colors.
    pub transposition: f64,
    /// Distance between two ramps over the same color set.
    pub permutation: f64,
}

impl Default for EditCosts {
    fn default() -> Self {
        Self {
            insertion: 1.0,
            substitution: 1.0,
            transposition: 0.5,
            permutation: 0.0,
        }
    }
}

impl EditCosts {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_negative("cluster.insertion_cost", self.insertion)?;
        ensure_non_negative("cluster.substitution_cost", self.substitution)?;
        ensure_non_negative("cluster.transposition_cost", self.transposition)?;
        ensure_non_negative("cluster.permutation_cost", self.permutation)
    }
}

/// Ramp-to-ramp distance with color-aware substitutions.
#[derive(Debug, Clone, Copy)]
pub struct RampDistance<'a> {
    costs: EditCosts,
    similarity: SimilarityTest,
    snapshot: &'a PaletteSnapshot,
}

impl<'a> RampDistance<'a> {
    pub fn new(costs: EditCosts, similarity: SimilarityTest, snapshot: &'a PaletteSnapshot) -> Self {
        Self {
            costs,
            similarity,
            snapshot,
        }
    }

    /// Edit distance from `a` to `b`.
    ///
    /// Ramps over identical color sets short-circuit to the permutation
    /// cost. Colors missing from the snapshot are never similar.
    pub fn between(&self, a: &Ramp, b: &Ramp) -> f64 {
        if a.color_set() == b.color_set() {
            return self.costs.permutation;
        }

        let (r1, r2) = (a.ids(), b.ids());
        let (n, m) = (r1.len(), r2.len());
        let ins = self.costs.insertion;

        let mut d = vec![vec![0.0f64; m + 1]; n + 1];
        for (i, row) in d.iter_mut().enumerate() {
            row[0] = i as f64 * ins;
        }
        for j in 0..=m {
            d[0][j] = j as f64 * ins;
        }

        for i in 1..=n {
            for j in 1..=m {
                let substitution = if r1[i - 1] == r2[j - 1] || self.similar(r1[i - 1], r2[j - 1]) {
                    0.0
                } else {
                    self.costs.substitution
                };

                let mut best = (d[i - 1][j] + ins)
                    .min(d[i][j - 1] + ins)
                    .min(d[i - 1][j - 1] + substitution);

                if i > 1 && j > 1 && r1[i - 1] == r2[j - 2] && r1[i - 2] == r2[j - 1] {
                    best = best.min(d[i - 2][j - 2] + self.costs.transposition);
                }
                d[i][j] = best;
            }
        }
        d[n][m]
    }

    fn similar(&self, a: ColorId, b: ColorId) -> bool {
        match (self.snapshot.get(a), self.snapshot.get(b)) {
            (Some(sa), Some(sb)) => self.similarity.matches(sa, sb),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    // ids 1..=4 are far apart greys, 11 is near 1
    fn snapshot() -> PaletteSnapshot {
        [
            (1, Color::rgb(20, 20, 20)),
            (2, Color::rgb(80, 80, 80)),
            (3, Color::rgb(140, 140, 140)),
            (4, Color::rgb(200, 200, 200)),
            (5, Color::rgb(250, 250, 250)),
            (11, Color::rgb(24, 24, 24)),
        ]
        .into_iter()
        .collect()
    }

    fn dist(a: &[u32], b: &[u32]) -> f64 {
        let snap = snapshot();
        RampDistance::new(EditCosts::default(), SimilarityTest::CLUSTERING, &snap)
            .between(&Ramp::from(a.to_vec()), &Ramp::from(b.to_vec()))
    }

    #[test]
    fn test_identical_is_zero() {
        assert_eq!(dist(&[1, 2, 3], &[1, 2, 3]), 0.0);
    }

    #[test]
    fn test_permutation_short_circuit() {
        assert_eq!(dist(&[1, 2, 3], &[3, 1, 2]), 0.0);
    }

    #[test]
    fn test_single_insertion() {
        assert_eq!(dist(&[1, 2, 3], &[1, 2, 3, 4]), 1.0);
        assert_eq!(dist(&[1, 2, 3, 4], &[2, 3, 4]), 1.0);
    }

    #[test]
    fn test_dissimilar_substitution() {
        assert_eq!(dist(&[1, 2, 3], &[1, 2, 5]), 1.0);
    }

    #[test]
    fn test_similar_substitution_is_free() {
        assert_eq!(dist(&[1, 2, 3], &[11, 2, 3]), 0.0);
    }

    #[test]
    fn test_adjacent_swap_is_discounted() {
        // same set would short-circuit, so add a differing tail
        assert_eq!(dist(&[1, 2, 3, 4], &[2, 1, 3, 5]), 1.5);
    }

    #[test]
    fn test_symmetric() {
        assert_eq!(dist(&[1, 2, 3, 4], &[2, 5]), dist(&[2, 5], &[1, 2, 3, 4]));
    }

    #[test]
    fn test_costs_validation() {
        let costs = EditCosts {
            transposition: -0.5,
            ..EditCosts::default()
        };
        assert!(costs.validate().is_err());
    }
}
