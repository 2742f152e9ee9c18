//! The ramp value type

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ColorId;

/// Shortest sequence accepted as a ramp.
pub const MIN_RAMP_LENGTH: usize = 3;

/// Upper limit for the configurable maximum ramp length.
pub const MAX_RAMP_LENGTH_LIMIT: usize = 20;

/// An ordered sequence of distinct palette ids, darkest end first.
///
/// Construction is lenient so that loaded or hand-built ramps can be
/// inspected; use [`Ramp::check`] before trusting one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ramp(Vec<ColorId>);

impl Ramp {
    #[inline]
    pub fn new(ids: Vec<ColorId>) -> Self {
        Self(ids)
    }

    #[inline]
    pub fn ids(&self) -> &[ColorId] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn first(&self) -> Option<ColorId> {
        self.0.first().copied()
    }

    /// The same ids in reverse order.
    pub fn reversed(&self) -> Ramp {
        Ramp(self.0.iter().rev().copied().collect())
    }

    /// The set of ids, ignoring order.
    pub fn color_set(&self) -> BTreeSet<ColorId> {
        self.0.iter().copied().collect()
    }

    /// True when `other` appears as a contiguous run inside `self`.
    ///
    /// # Example
    /// ```
    /// use color_ramps::Ramp;
    /// let long = Ramp::from(vec![1, 2, 3, 4]);
    /// assert!(long.contains_run(&Ramp::from(vec![2, 3])));
    /// assert!(!long.contains_run(&Ramp::from(vec![1, 3])));
    /// ```
    pub fn contains_run(&self, other: &Ramp) -> bool {
        if other.is_empty() {
            return true;
        }
        self.0.windows(other.len()).any(|w| w == other.ids())
    }

    /// Check minimum length and id uniqueness.
    ///
    /// The search's length cap is not applied; stored ramps may be longer.
    /// Returns a human readable reason on failure.
    pub fn check(&self) -> Result<(), String> {
        if self.len() < MIN_RAMP_LENGTH {
            return Err(format!(
                "has {} colors, at least {} required",
                self.len(),
                MIN_RAMP_LENGTH
            ));
        }
        let mut seen = BTreeSet::new();
        for id in &self.0 {
            if !seen.insert(*id) {
                return Err(format!("color {} appears more than once", id));
            }
        }
        Ok(())
    }
}

impl From<Vec<ColorId>> for Ramp {
    fn from(ids: Vec<ColorId>) -> Self {
        Self(ids)
    }
}

impl fmt::Display for Ramp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|id| id.to_string()).collect();
        write!(f, "[{}]", parts.join(" → "))
    }
}
