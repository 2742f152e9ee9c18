//! Redundancy filters over raw search candidates
//!
//! Three passes, each toggled by [`FilterOptions`]:
//!
//! 1. **Permutations**: ramps over the same color set collapse to the best.
//! 2. **Reverses**: a ramp and its mirror collapse to the better one. Skipped
//!    when permutations were already removed, since a mirror is a
//!    permutation.
//! 3. **Subsequences**: a ramp that runs (forwards or backwards) inside a
//!    longer surviving ramp is dropped. Candidates are visited best first so
//!    a fragment never displaces the ramp it came from.
//!
//! "Best" uses [`outranks`]; scores are computed once over the full
//! candidate set. Survivors keep their original relative order.

use std::collections::{BTreeSet, HashMap};

use crate::api::RampError;
use crate::score::{outranks, RampScorer};
use crate::{ColorId, PaletteSnapshot, Ramp};

/// Which redundancy passes to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOptions {
    pub skip_reverse: bool,
    pub skip_subsequences: bool,
    pub skip_permutations: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            skip_reverse: true,
            skip_subsequences: true,
            skip_permutations: false,
        }
    }
}

impl FilterOptions {
    /// Keep every candidate.
    pub fn none() -> Self {
        Self {
            skip_reverse: false,
            skip_subsequences: false,
            skip_permutations: false,
        }
    }

    /// True when at least one pass is enabled.
    pub fn any(&self) -> bool {
        self.skip_reverse || self.skip_subsequences || self.skip_permutations
    }

    pub fn all() -> Self {
        Self {
            skip_reverse: true,
            skip_subsequences: true,
            skip_permutations: true,
        }
    }
}

/// Applies [`FilterOptions`] to a candidate list.
pub struct RampFilter<'a> {
    options: FilterOptions,
    scorer: &'a RampScorer,
}

impl<'a> RampFilter<'a> {
    pub fn new(options: FilterOptions, scorer: &'a RampScorer) -> Self {
        Self { options, scorer }
    }

    pub fn apply(
        &self,
        candidates: Vec<Ramp>,
        snapshot: &PaletteSnapshot,
    ) -> Result<Vec<Ramp>, RampError> {
        if !self.options.any() {
            return Ok(candidates);
        }

        let scores: Vec<f64> = self
            .scorer
            .score_group(&candidates, snapshot)?
            .into_iter()
            .map(|s| s.final_score)
            .collect();
        let mut keep = vec![true; candidates.len()];
        let before = candidates.len();

        if self.options.skip_permutations {
            drop_permutations(&candidates, &scores, &mut keep);
            tracing::debug!(remaining = count(&keep), "Removed permutations");
        } else if self.options.skip_reverse {
            drop_reverses(&candidates, &scores, &mut keep);
            tracing::debug!(remaining = count(&keep), "Removed reverses");
        }

        if self.options.skip_subsequences {
            drop_subsequences(&candidates, &scores, &mut keep);
            tracing::debug!(remaining = count(&keep), "Removed subsequences");
        }

        let survivors: Vec<Ramp> = candidates
            .into_iter()
            .zip(keep)
            .filter_map(|(ramp, k)| k.then_some(ramp))
            .collect();
        tracing::debug!(before, after = survivors.len(), "Filtered ramp candidates");
        Ok(survivors)
    }
}

fn count(keep: &[bool]) -> usize {
    keep.iter().filter(|k| **k).count()
}

/// Keep the best member of each group under `key`.
fn keep_best_per_group<K, F>(ramps: &[Ramp], scores: &[f64], keep: &mut [bool], key: F)
where
    K: std::hash::Hash + Eq,
    F: Fn(&Ramp) -> K,
{
    let mut best: HashMap<K, usize> = HashMap::new();
    for (i, ramp) in ramps.iter().enumerate() {
        if !keep[i] {
            continue;
        }
        match best.entry(key(ramp)) {
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(i);
            }
            std::collections::hash_map::Entry::Occupied(mut slot) => {
                let j = *slot.get();
                if outranks((ramp, scores[i]), (&ramps[j], scores[j])) {
                    keep[j] = false;
                    slot.insert(i);
                } else {
                    keep[i] = false;
                }
            }
        }
    }
}

fn drop_permutations(ramps: &[Ramp], scores: &[f64], keep: &mut [bool]) {
    keep_best_per_group(ramps, scores, keep, |r| {
        r.ids().iter().copied().collect::<BTreeSet<ColorId>>()
    });
}

fn drop_reverses(ramps: &[Ramp], scores: &[f64], keep: &mut [bool]) {
    // A ramp and its mirror share the orientation-free key min(fwd, rev).
    keep_best_per_group(ramps, scores, keep, |r| {
        let reversed = r.reversed();
        if reversed.ids() < r.ids() {
            reversed
        } else {
            r.clone()
        }
    });
}

fn drop_subsequences(ramps: &[Ramp], scores: &[f64], keep: &mut [bool]) {
    let mut order: Vec<usize> = (0..ramps.len()).filter(|&i| keep[i]).collect();
    order.sort_by(|&a, &b| {
        if outranks((&ramps[a], scores[a]), (&ramps[b], scores[b])) {
            std::cmp::Ordering::Less
        } else if outranks((&ramps[b], scores[b]), (&ramps[a], scores[a])) {
            std::cmp::Ordering::Greater
        } else {
            std::cmp::Ordering::Equal
        }
    });

    for &i in &order {
        let candidate = &ramps[i];
        let reversed = candidate.reversed();
        let inside_longer = (0..ramps.len()).any(|j| {
            j != i
                && keep[j]
                && ramps[j].len() > candidate.len()
                && (ramps[j].contains_run(candidate) || ramps[j].contains_run(&reversed))
        });
        if inside_longer {
            keep[i] = false;
        }
    }
}
