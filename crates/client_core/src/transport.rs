//! TCP link to the robot.
//!
//! The transport mirrors the robot's own link: text payloads go out one per
//! line, anything the robot writes back is surfaced as
//! [`TransportEvent::MessageReceived`], and a closed or failed link is
//! reported once as `MessageReceived(None)`. There is no reconnect.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use async_trait::async_trait;
use futures::StreamExt;
use shared::protocol::frame;
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::{
        tcp::{OwnedReadHalf, OwnedWriteHalf},
        TcpStream,
    },
    sync::{broadcast, Mutex},
    task::JoinHandle,
};
use tokio_stream::wrappers::LinesStream;
use tracing::{debug, info, warn};

use crate::error::TransportError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Connected,
    /// A line from the robot, or `None` once the link is gone.
    MessageReceived(Option<String>),
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send_message(&self, text: &str) -> Result<(), TransportError>;
    fn is_connected(&self) -> bool;
    fn subscribe_events(&self) -> broadcast::Receiver<TransportEvent>;
}

pub struct TcpTransport {
    addr: String,
    writer: Arc<Mutex<Option<OwnedWriteHalf>>>,
    connected: Arc<AtomicBool>,
    events: broadcast::Sender<TransportEvent>,
    reader_task: Mutex<Option<JoinHandle<()>>>,
}

impl TcpTransport {
    pub fn new(host: &str, port: u16) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            addr: format!("{host}:{port}"),
            writer: Arc::new(Mutex::new(None)),
            connected: Arc::new(AtomicBool::new(false)),
            events,
            reader_task: Mutex::new(None),
        })
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Opens the connection. Subscribe before calling this to observe
    /// [`TransportEvent::Connected`].
    pub async fn connect(&self) -> Result<(), TransportError> {
        let stream = TcpStream::connect(&self.addr)
            .await
            .map_err(|source| TransportError::Connect {
                addr: self.addr.clone(),
                source,
            })?;
        if let Err(err) = stream.set_nodelay(true) {
            debug!(addr = %self.addr, %err, "transport: failed to disable nagle");
        }
        let (read_half, write_half) = stream.into_split();

        // A stale reader must be gone before the new writer is installed,
        // or its EOF handling would tear down this connection.
        let mut reader_task = self.reader_task.lock().await;
        if let Some(previous) = reader_task.take() {
            previous.abort();
            let _ = previous.await;
        }

        *self.writer.lock().await = Some(write_half);
        self.connected.store(true, Ordering::SeqCst);
        info!(addr = %self.addr, "transport: connected");
        let _ = self.events.send(TransportEvent::Connected);

        *reader_task = Some(self.spawn_reader(read_half));
        Ok(())
    }

    pub async fn disconnect(&self) {
        if let Some(task) = self.reader_task.lock().await.take() {
            task.abort();
        }
        if let Some(mut writer) = self.writer.lock().await.take() {
            if let Err(err) = writer.shutdown().await {
                debug!(addr = %self.addr, %err, "transport: shutdown failed");
            }
        }
        if self.connected.swap(false, Ordering::SeqCst) {
            info!(addr = %self.addr, "transport: disconnected");
            let _ = self.events.send(TransportEvent::MessageReceived(None));
        }
    }

    fn spawn_reader(&self, read_half: OwnedReadHalf) -> JoinHandle<()> {
        let addr = self.addr.clone();
        let writer = Arc::clone(&self.writer);
        let connected = Arc::clone(&self.connected);
        let events = self.events.clone();
        tokio::spawn(async move {
            let mut lines = LinesStream::new(BufReader::new(read_half).lines());
            while let Some(line) = lines.next().await {
                match line {
                    Ok(line) => {
                        debug!(%addr, %line, "transport: received line");
                        let _ = events.send(TransportEvent::MessageReceived(Some(line)));
                    }
                    Err(err) => {
                        warn!(%addr, %err, "transport: read failed");
                        break;
                    }
                }
            }
            writer.lock().await.take();
            if connected.swap(false, Ordering::SeqCst) {
                info!(%addr, "transport: robot closed the connection");
                let _ = events.send(TransportEvent::MessageReceived(None));
            }
        })
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn send_message(&self, text: &str) -> Result<(), TransportError> {
        let mut guard = self.writer.lock().await;
        let Some(writer) = guard.as_mut() else {
            return Err(TransportError::NotConnected);
        };

        let line = frame(text);
        let result = async {
            writer.write_all(line.as_bytes()).await?;
            writer.flush().await
        }
        .await;

        if let Err(err) = result {
            guard.take();
            if self.connected.swap(false, Ordering::SeqCst) {
                warn!(addr = %self.addr, %err, "transport: write failed, link dropped");
                let _ = self.events.send(TransportEvent::MessageReceived(None));
            }
            return Err(TransportError::Write(err));
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn subscribe_events(&self) -> broadcast::Receiver<TransportEvent> {
        self.events.subscribe()
    }
}

impl Drop for TcpTransport {
    fn drop(&mut self) {
        if let Some(task) = self.reader_task.get_mut().take() {
            task.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
