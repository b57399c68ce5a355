//! Command intake from the control pad.
//!
//! The robot serves one controller at a time. Each received line selects
//! the current motion; an unreadable line or a dropped connection puts the
//! robot back into its standby posture.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures::StreamExt;
use shared::{
    error::ProtocolError,
    protocol::decode_line,
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    net::{TcpListener, TcpStream},
    sync::RwLock,
    time::{interval, MissedTickBehavior},
};
use tokio_stream::wrappers::LinesStream;
use tracing::{debug, info, warn};

use crate::motion::MotionState;

pub type SharedMotion = Arc<RwLock<MotionState>>;

pub async fn serve(listener: TcpListener, motion: SharedMotion, status_interval: Duration) {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                info!(%peer, "robot: controller connected");
                handle_connection(stream, peer, &motion, status_interval).await;
            }
            Err(err) => {
                warn!(%err, "robot: accept failed");
                tokio::time::sleep(Duration::from_millis(250)).await;
            }
        }
    }
}

async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    motion: &SharedMotion,
    status_interval: Duration,
) {
    let mut lines = LinesStream::new(BufReader::new(stream).lines());
    let mut status = interval(status_interval);
    status.set_missed_tick_behavior(MissedTickBehavior::Delay);
    status.tick().await;

    loop {
        tokio::select! {
            line = lines.next() => match line {
                Some(Ok(line)) => apply_line(motion, &line).await,
                Some(Err(err)) => {
                    warn!(%peer, %err, "robot: read failed");
                    break;
                }
                None => break,
            },
            _ = status.tick() => log_status(motion).await,
        }
    }

    motion.write().await.reset();
    info!(%peer, "robot: controller disconnected, holding standby");
}

pub async fn apply_line(motion: &SharedMotion, line: &str) {
    match decode_line(line) {
        Ok(command) => {
            let mut state = motion.write().await;
            state.apply(command);
            info!(%command, gait = state.gait().name(), "robot: command applied");
        }
        Err(ProtocolError::EmptyFrame) => debug!("robot: skipped empty frame"),
        Err(err) => {
            motion.write().await.reset();
            warn!(%err, "robot: unreadable command, holding standby");
        }
    }
}

async fn log_status(motion: &SharedMotion) {
    let state = motion.read().await;
    match serde_json::to_string(&*state) {
        Ok(snapshot) => debug!(gait = state.gait().name(), %snapshot, "robot: status"),
        Err(err) => warn!(%err, "robot: failed to encode status"),
    }
}

#[cfg(test)]
#[path = "tests/link_tests.rs"]
mod tests;
