use std::collections::HashMap;

use super::params::ValidityParams;
use super::validator::StepValidator;
use crate::api::RampError;
use crate::progress::{ProgressObserver, Stage};
use crate::ramp::MIN_RAMP_LENGTH;
use crate::{ColorGraph, ColorId, ColorSample, PaletteSnapshot, Ramp};

/// Depth-first enumeration of maximal valid paths in a [`ColorGraph`].
///
/// Start nodes are visited from darkest to brightest (ties by id) and
/// neighbors in ascending id order, so identical inputs always yield the
/// same candidate list in the same order.
pub struct RampSearch<'a> {
    graph: &'a ColorGraph,
    snapshot: &'a PaletteSnapshot,
    params: &'a ValidityParams,
}

impl<'a> RampSearch<'a> {
    pub fn new(
        graph: &'a ColorGraph,
        snapshot: &'a PaletteSnapshot,
        params: &'a ValidityParams,
    ) -> Self {
        Self {
            graph,
            snapshot,
            params,
        }
    }

    /// Collect every path that cannot be extended further and has at least
    /// three colors.
    pub fn run(&self, observer: &dyn ProgressObserver) -> Result<Vec<Ramp>, RampError> {
        self.params.validate()?;

        let samples = self
            .graph
            .nodes()
            .map(|id| self.snapshot.require(id).map(|s| (id, s)))
            .collect::<Result<HashMap<ColorId, &ColorSample>, _>>()?;

        let mut starts: Vec<ColorId> = self.graph.nodes().collect();
        starts.sort_by(|a, b| {
            samples[a]
                .hsv
                .v
                .total_cmp(&samples[b].hsv.v)
                .then(a.cmp(b))
        });

        let total = starts.len();
        let mut candidates = Vec::new();
        for (index, &start) in starts.iter().enumerate() {
            if observer.is_cancelled() {
                tracing::debug!(index, total, "Ramp search cancelled");
                return Err(RampError::Cancelled);
            }
            observer.report(Stage::ExtractingRamps, index, total);
            self.search_from(start, &samples, &mut candidates);
        }
        observer.report(Stage::ExtractingRamps, total, total);

        tracing::debug!(
            starts = total,
            candidates = candidates.len(),
            method = %self.params.method.kind(),
            "Ramp search finished"
        );
        Ok(candidates)
    }

    fn search_from(
        &self,
        start: ColorId,
        samples: &HashMap<ColorId, &ColorSample>,
        candidates: &mut Vec<Ramp>,
    ) {
        let max_len = self.params.max_ramp_length;
        let mut stack: Vec<Vec<ColorId>> = vec![vec![start]];

        while let Some(path) = stack.pop() {
            let mut extended = false;

            if path.len() < max_len {
                let Some(&current) = path.last() else {
                    continue;
                };
                for next in self.graph.neighbors(current) {
                    if path.contains(&next) {
                        continue;
                    }
                    let mut longer = path.clone();
                    longer.push(next);
                    let colors: Vec<&ColorSample> = longer.iter().map(|id| samples[id]).collect();
                    if self.params.method.is_valid(&colors) {
                        stack.push(longer);
                        extended = true;
                    }
                }
            }

            if !extended && path.len() >= MIN_RAMP_LENGTH {
                candidates.push(Ramp::new(path));
            }
        }
    }
}
