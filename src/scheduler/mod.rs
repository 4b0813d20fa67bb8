//! Poll cycles: timer and manual triggers, one fetch per feed, results fed
//! through the aggregator as they settle.

mod handle;
pub mod interval;
mod messages;
mod runner;

pub use handle::SchedulerHandle;
pub use messages::{SchedulerError, SchedulerStatus};
pub use runner::PollScheduler;

use std::fmt;
use std::time::Duration;

use crate::pipeline::FeedReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Timer,
    Manual,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Timer => write!(f, "timer"),
            Trigger::Manual => write!(f, "manual"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Refreshing,
}

/// Outcome of one poll cycle, one report per feed in settle order.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub trigger: Trigger,
    pub feeds: Vec<FeedReport>,
    pub elapsed: Duration,
}

impl CycleReport {
    pub fn admitted(&self) -> usize {
        self.feeds.iter().map(|f| f.admitted).sum()
    }

    pub fn errors(&self) -> usize {
        self.feeds.iter().filter(|f| f.is_failure()).count()
    }
}
