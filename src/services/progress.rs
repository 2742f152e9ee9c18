use std::cell::Cell;
use std::sync::Arc;

use color_ramps::{CancelFlag, ProgressObserver, Stage};

/// Logs stage transitions through `tracing`.
///
/// Each stage is announced once at `info` when it starts; finer updates go
/// to `debug`.
#[derive(Debug, Default)]
pub struct TracingProgress {
    current: Cell<Option<Stage>>,
    cancel: Option<Arc<CancelFlag>>,
}

impl TracingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the run once `flag` is set.
    pub fn with_cancel(mut self, flag: Arc<CancelFlag>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Last stage reported, if any.
    pub fn stage(&self) -> Option<Stage> {
        self.current.get()
    }
}

impl ProgressObserver for TracingProgress {
    fn report(&self, stage: Stage, current: usize, total: usize) {
        if self.current.get() != Some(stage) {
            self.current.set(Some(stage));
            tracing::info!(%stage, total, "Started");
        }
        if current >= total {
            tracing::debug!(%stage, total, "Finished");
        } else {
            tracing::debug!(%stage, current, total, "Progress");
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|flag| flag.is_cancelled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_current_stage() {
        let progress = TracingProgress::new();
        assert_eq!(progress.stage(), None);
        progress.report(Stage::ExtractingRamps, 0, 3);
        progress.report(Stage::ExtractingRamps, 3, 3);
        progress.report(Stage::FilteringRamps, 0, 1);
        assert_eq!(progress.stage(), Some(Stage::FilteringRamps));
    }

    #[test]
    fn test_cancel_flag() {
        let flag = Arc::new(CancelFlag::default());
        let progress = TracingProgress::new().with_cancel(flag.clone());
        assert!(!progress.is_cancelled());
        flag.cancel();
        assert!(progress.is_cancelled());
    }

    #[test]
    fn test_without_flag_never_cancels() {
        assert!(!TracingProgress::new().is_cancelled());
    }
}
