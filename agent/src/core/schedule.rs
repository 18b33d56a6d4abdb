//! Loop cadence: fixed delay between iterations and an optional iteration cap.

use std::time::Duration;

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSchedule {
    /// Delay after each iteration before the next one starts.
    pub interval: Duration,
    /// Stop after this many iterations. `None` runs until stopped externally.
    pub max_iterations: Option<u64>,
}

impl Default for LoopSchedule {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            max_iterations: None,
        }
    }
}

impl LoopSchedule {
    /// True once `completed` iterations have reached the cap.
    pub fn is_exhausted(&self, completed: u64) -> bool {
        self.max_iterations.is_some_and(|max| completed >= max)
    }
}
