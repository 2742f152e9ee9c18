//! Progress reporting and cooperative cancellation
//!
//! Long calls take a `&dyn ProgressObserver`. Reports never influence the
//! result; cancellation is polled between start nodes of the search and
//! between rows of the clustering distance matrix.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Phase of an extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    BuildingGraph,
    ExtractingRamps,
    FilteringRamps,
    ComputingDistances,
    Clustering,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::BuildingGraph => "building graph",
            Self::ExtractingRamps => "extracting ramps",
            Self::FilteringRamps => "filtering ramps",
            Self::ComputingDistances => "computing distances",
            Self::Clustering => "clustering",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Receives progress updates and may request cancellation.
pub trait ProgressObserver {
    /// `current` runs from 0 to `total` within a stage.
    fn report(&self, stage: Stage, current: usize, total: usize) {
        let _ = (stage, current, total);
    }

    /// Polled between units of work; returning true aborts the run with
    /// [`RampError::Cancelled`](crate::RampError::Cancelled).
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Observer that ignores every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {}

/// Observer that only carries a cancellation flag.
///
/// # Example
/// ```
/// use color_ramps::{CancelFlag, ProgressObserver};
///
/// let flag = CancelFlag::default();
/// assert!(!flag.is_cancelled());
/// flag.cancel();
/// assert!(flag.is_cancelled());
/// ```
#[derive(Debug, Default)]
pub struct CancelFlag {
    cancelled: AtomicBool,
}

impl CancelFlag {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

impl ProgressObserver for CancelFlag {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::{Cell, RefCell};

    use super::*;

    /// Records every report and cancels after a number of polls.
    #[derive(Default)]
    pub struct Recorder {
        pub reports: RefCell<Vec<(Stage, usize, usize)>>,
        pub cancel_after: Option<usize>,
        polls: Cell<usize>,
    }

    impl Recorder {
        pub fn cancelling_after(polls: usize) -> Self {
            Self {
                cancel_after: Some(polls),
                ..Self::default()
            }
        }

        pub fn stages(&self) -> Vec<Stage> {
            let mut stages: Vec<Stage> = Vec::new();
            for (stage, _, _) in self.reports.borrow().iter() {
                if stages.last() != Some(stage) {
                    stages.push(*stage);
                }
            }
            stages
        }
    }

    impl ProgressObserver for Recorder {
        fn report(&self, stage: Stage, current: usize, total: usize) {
            self.reports.borrow_mut().push((stage, current, total));
        }

        fn is_cancelled(&self) -> bool {
            let polls = self.polls.get() + 1;
            self.polls.set(polls);
            self.cancel_after.is_some_and(|limit| polls > limit)
        }
    }
}
