//! Ordered command queue between the control surface and the transport.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use serde::Serialize;
use shared::protocol::Command;
use tokio::{
    sync::mpsc::{self, error::TrySendError},
    task::JoinHandle,
};
use tracing::{debug, warn};

use crate::{error::DispatchError, transport::Transport};

pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatcherStats {
    pub sent: u64,
    /// Accepted by the queue but lost because the transport failed.
    pub failed: u64,
    /// Refused at submission (queue full or closed).
    pub rejected: u64,
}

#[derive(Default)]
struct Counters {
    sent: AtomicU64,
    failed: AtomicU64,
    rejected: AtomicU64,
}

impl Counters {
    fn snapshot(&self) -> DispatcherStats {
        DispatcherStats {
            sent: self.sent.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }
}

/// Single-consumer queue feeding one transport. Commands reach the robot in
/// the order they were submitted.
pub struct CommandDispatcher {
    tx: mpsc::Sender<Command>,
    counters: Arc<Counters>,
    worker: JoinHandle<()>,
}

impl CommandDispatcher {
    pub fn spawn(transport: Arc<dyn Transport>, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let counters = Arc::new(Counters::default());
        let worker = tokio::spawn(run_worker(transport, rx, Arc::clone(&counters)));
        Self {
            tx,
            counters,
            worker,
        }
    }

    /// Queues a command without waiting. Never blocks the caller.
    pub fn submit(&self, command: Command) -> Result<(), DispatchError> {
        match self.tx.try_send(command) {
            Ok(()) => {
                debug!(%command, "dispatch: queued command");
                Ok(())
            }
            Err(TrySendError::Full(command)) => {
                self.counters.rejected.fetch_add(1, Ordering::Relaxed);
                Err(DispatchError::QueueFull(command))
            }
            Err(TrySendError::Closed(command)) => {
                self.counters.rejected.fetch_add(1, Ordering::Relaxed);
                Err(DispatchError::Closed(command))
            }
        }
    }

    pub fn stats(&self) -> DispatcherStats {
        self.counters.snapshot()
    }

    /// Closes the queue and waits for the worker to drain what was accepted.
    pub async fn shutdown(self) -> DispatcherStats {
        let Self {
            tx,
            counters,
            worker,
        } = self;
        drop(tx);
        if let Err(err) = worker.await {
            warn!(%err, "dispatch: worker ended abnormally");
        }
        counters.snapshot()
    }
}

async fn run_worker(
    transport: Arc<dyn Transport>,
    mut rx: mpsc::Receiver<Command>,
    counters: Arc<Counters>,
) {
    while let Some(command) = rx.recv().await {
        match transport.send_message(command.payload()).await {
            Ok(()) => {
                counters.sent.fetch_add(1, Ordering::Relaxed);
                debug!(%command, "dispatch: sent command");
            }
            Err(err) => {
                counters.failed.fetch_add(1, Ordering::Relaxed);
                warn!(%command, %err, "dispatch: dropped command");
            }
        }
    }
    debug!("dispatch: queue closed, worker exiting");
}

#[cfg(test)]
#[path = "tests/dispatcher_tests.rs"]
mod tests;
