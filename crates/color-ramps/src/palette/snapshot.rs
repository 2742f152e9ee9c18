use std::collections::BTreeMap;

use crate::api::RampError;
use crate::{ColorId, ColorSample, ColorTable, Ramp};

/// Read-only view of a palette with every color pre-converted.
///
/// Extraction works on a snapshot so the caller's table can keep changing
/// while a run is in flight.
#[derive(Debug, Clone, Default)]
pub struct PaletteSnapshot {
    samples: BTreeMap<ColorId, ColorSample>,
}

impl PaletteSnapshot {
    pub fn get(&self, id: ColorId) -> Option<&ColorSample> {
        self.samples.get(&id)
    }

    /// Like [`get`](Self::get) but fails with [`RampError::UnknownColor`].
    pub fn require(&self, id: ColorId) -> Result<&ColorSample, RampError> {
        self.samples.get(&id).ok_or(RampError::UnknownColor { id })
    }

    /// Samples along a ramp, in ramp order.
    pub fn samples_of(&self, ramp: &Ramp) -> Result<Vec<&ColorSample>, RampError> {
        ramp.ids().iter().map(|id| self.require(*id)).collect()
    }

    pub fn contains(&self, id: ColorId) -> bool {
        self.samples.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColorId, &ColorSample)> {
        self.samples.iter().map(|(id, s)| (*id, s))
    }
}

impl From<&ColorTable> for PaletteSnapshot {
    fn from(table: &ColorTable) -> Self {
        Self {
            samples: table
                .iter()
                .map(|(id, group)| (id, ColorSample::from(group.color)))
                .collect(),
        }
    }
}

impl FromIterator<(ColorId, crate::Color)> for PaletteSnapshot {
    fn from_iter<T: IntoIterator<Item = (ColorId, crate::Color)>>(iter: T) -> Self {
        Self {
            samples: iter
                .into_iter()
                .map(|(id, color)| (id, ColorSample::from(color)))
                .collect(),
        }
    }
}
