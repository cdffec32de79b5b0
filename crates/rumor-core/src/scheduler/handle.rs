use std::fmt;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::command::BoxedCommand;
use crate::scheduler::{errors::SchedulerError, messages::SchedulerMessage};

/// Submission side of a [`Scheduler`](crate::scheduler::Scheduler), usable
/// from any task while the event loop runs.
pub struct SchedulerHandle<W> {
    tx: mpsc::Sender<SchedulerMessage<W>>,
    shutdown: CancellationToken,
}

impl<W> SchedulerHandle<W> {
    pub(crate) fn new(tx: mpsc::Sender<SchedulerMessage<W>>, shutdown: CancellationToken) -> Self {
        Self { tx, shutdown }
    }

    /// Submits a command. It is scheduled at `now + delay` when the loop
    /// next takes a player turn; the inbox keeps submissions in order.
    pub async fn sched(&self, command: BoxedCommand<W>) -> Result<(), SchedulerError> {
        debug!(command = command.name(), "submit command");
        self.send(SchedulerMessage::Schedule(command)).await
    }

    pub fn try_sched(&self, command: BoxedCommand<W>) -> Result<(), SchedulerError> {
        if self.shutdown.is_cancelled() {
            return Err(SchedulerError::Closed);
        }
        match self.tx.try_send(SchedulerMessage::Schedule(command)) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(_)) => Err(SchedulerError::Full),
            Err(mpsc::error::TrySendError::Closed(_)) => Err(SchedulerError::Closed),
        }
    }

    /// Graceful stop: commands submitted before this call are still taken.
    pub async fn shutdown(&self) -> Result<(), SchedulerError> {
        info!("scheduler shutdown requested");
        self.send(SchedulerMessage::Shutdown).await
    }

    /// Immediate stop at the next player turn.
    pub fn cancel(&self) {
        self.shutdown.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.shutdown.is_cancelled() || self.tx.is_closed()
    }

    /// Resolves once the event loop has stopped.
    pub async fn closed(&self) {
        self.shutdown.cancelled().await;
    }
}

impl<W> SchedulerHandle<W> {
    /// Waits for inbox room, giving up as soon as the loop stops.
    async fn send(&self, message: SchedulerMessage<W>) -> Result<(), SchedulerError> {
        let sent = tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => false,
            result = self.tx.send(message) => result.is_ok(),
        };

        if sent {
            Ok(())
        } else {
            warn!("submit failed: scheduler closed");
            Err(SchedulerError::Closed)
        }
    }
}

impl<W> Clone for SchedulerHandle<W> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            shutdown: self.shutdown.clone(),
        }
    }
}

impl<W> fmt::Debug for SchedulerHandle<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchedulerHandle")
            .field("closed", &self.is_closed())
            .finish()
    }
}
