//! Assertion helpers for tests.

use std::collections::BTreeSet;

use color_ramps::{ColorTable, Ramp};
use pretty_assertions::assert_eq;

/// Assert every ramp is a simple path of known colors with at least three
/// entries.
pub fn assert_well_formed(ramps: &[Ramp], colors: &ColorTable) {
    for ramp in ramps {
        assert!(ramp.len() >= 3, "Ramp {} is shorter than 3", ramp);
        let unique: BTreeSet<_> = ramp.ids().iter().collect();
        assert_eq!(unique.len(), ramp.len(), "Ramp {} repeats a color", ramp);
        for id in ramp.ids() {
            assert!(
                colors.color(*id).is_some(),
                "Ramp {} uses unknown color {}",
                ramp,
                id
            );
        }
    }
}

/// Assert the colors of `ramp` get brighter (sum of channels) step by step.
pub fn assert_brightening(ramp: &Ramp, colors: &ColorTable) {
    let sums: Vec<u32> = ramp
        .ids()
        .iter()
        .map(|id| {
            let c = colors.color(*id).unwrap();
            c.r as u32 + c.g as u32 + c.b as u32
        })
        .collect();
    assert!(
        sums.windows(2).all(|w| w[0] < w[1]),
        "Ramp {} does not brighten: {:?}",
        ramp,
        sums
    );
}
