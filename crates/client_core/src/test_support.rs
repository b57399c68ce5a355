use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use async_trait::async_trait;
use tokio::sync::{broadcast, Mutex};

use crate::{
    error::TransportError,
    transport::{Transport, TransportEvent},
};

/// In-memory transport that records every payload it is asked to send.
pub(crate) struct RecordingTransport {
    sent: Arc<Mutex<Vec<String>>>,
    connected: AtomicBool,
    events: broadcast::Sender<TransportEvent>,
}

impl RecordingTransport {
    pub fn connected() -> Arc<Self> {
        let (events, _) = broadcast::channel(16);
        Arc::new(Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            connected: AtomicBool::new(true),
            events,
        })
    }

    pub fn disconnected() -> Arc<Self> {
        let transport = Self::connected();
        transport.connected.store(false, Ordering::SeqCst);
        transport
    }

    pub async fn sent(&self) -> Vec<String> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send_message(&self, text: &str) -> Result<(), TransportError> {
        if !self.connected.load(Ordering::SeqCst) {
            return Err(TransportError::NotConnected);
        }
        self.sent.lock().await.push(text.to_string());
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn subscribe_events(&self) -> broadcast::Receiver<TransportEvent> {
        self.events.subscribe()
    }
}
