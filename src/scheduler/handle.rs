use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};

use super::messages::{SchedulerError, SchedulerMessage, SchedulerStatus};
use super::CycleReport;

/// Public face of a running [`PollScheduler`](super::PollScheduler).
///
/// Dropping every handle stops the scheduler.
#[derive(Clone)]
pub struct SchedulerHandle {
    sender: mpsc::Sender<SchedulerMessage>,
}

impl SchedulerHandle {
    pub(super) fn new(sender: mpsc::Sender<SchedulerMessage>) -> Self {
        Self { sender }
    }

    /// Run a manual cycle and wait for every feed in it to settle.
    ///
    /// Fails with [`SchedulerError::AlreadyRefreshing`] if a manual cycle is
    /// still in flight.
    pub async fn refresh(&self) -> Result<CycleReport, SchedulerError> {
        let (reply, rx) = oneshot::channel();
        self.sender
            .send(SchedulerMessage::Refresh { reply: Some(reply) })
            .await
            .map_err(|_| SchedulerError::ServiceUnavailable)?;
        rx.await.map_err(|_| SchedulerError::ServiceUnavailable)?
    }

    /// Request a manual cycle without waiting for it.
    pub fn trigger_refresh(&self) -> Result<(), SchedulerError> {
        self.sender
            .try_send(SchedulerMessage::Refresh { reply: None })
            .map_err(queue_error)
    }

    pub async fn status(&self) -> Result<SchedulerStatus, SchedulerError> {
        let (reply, rx) = oneshot::channel();
        self.sender
            .send(SchedulerMessage::Status { reply })
            .await
            .map_err(|_| SchedulerError::ServiceUnavailable)?;
        rx.await.map_err(|_| SchedulerError::ServiceUnavailable)
    }

    /// Forget every seen identity.
    pub fn reset_seen(&self) -> Result<(), SchedulerError> {
        self.sender
            .try_send(SchedulerMessage::ResetSeen)
            .map_err(queue_error)
    }
}

fn queue_error<T>(error: TrySendError<T>) -> SchedulerError {
    match error {
        TrySendError::Full(_) => SchedulerError::QueueFull,
        TrySendError::Closed(_) => SchedulerError::ServiceUnavailable,
    }
}
