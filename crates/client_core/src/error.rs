use std::io;

use shared::protocol::Command;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },
    #[error("transport is not connected")]
    NotConnected,
    #[error("failed to write to robot: {0}")]
    Write(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("command queue is full; dropped {0}")]
    QueueFull(Command),
    #[error("command dispatcher has shut down; dropped {0}")]
    Closed(Command),
}
