use tokio::sync::oneshot;

use super::{CycleReport, PollState};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchedulerError {
    #[error("A refresh is already in progress")]
    AlreadyRefreshing,

    #[error("Scheduler is busy, try again")]
    QueueFull,

    #[error("Scheduler unavailable")]
    ServiceUnavailable,
}

/// Snapshot of the scheduler's session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerStatus {
    pub state: PollState,
    pub seen: usize,
    pub rendered: usize,
}

pub enum SchedulerMessage {
    /// Manual refresh. Without a reply channel the outcome is only surfaced
    /// through the render sink.
    Refresh {
        reply: Option<oneshot::Sender<Result<CycleReport, SchedulerError>>>,
    },

    Status {
        reply: oneshot::Sender<SchedulerStatus>,
    },

    ResetSeen,
}
