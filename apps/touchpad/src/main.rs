use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use client_core::{CommandDispatcher, ControlPad, TcpTransport, Transport, TransportEvent};
use serde::Serialize;
use shared::{domain::Point, protocol::Command};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod input;

use config::{load_settings_from, Settings, SETTINGS_FILE};
use input::{parse_line, PadInput};

/// Drive a hexapod from touch points read on stdin.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = SETTINGS_FILE)]
    config: PathBuf,
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    #[arg(long)]
    width: Option<f32>,
    #[arg(long)]
    height: Option<f32>,
    #[arg(long)]
    queue_capacity: Option<usize>,
    /// Print one JSON object per touch instead of the bare command.
    #[arg(long)]
    json: bool,
}

impl Args {
    fn apply(&self, settings: &mut Settings) {
        if let Some(host) = &self.host {
            settings.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.port = port;
        }
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(capacity) = self.queue_capacity {
            settings.queue_capacity = capacity;
        }
    }
}

#[derive(Debug, Serialize)]
struct TouchReport {
    x: f32,
    y: f32,
    command: Option<Command>,
}

impl TouchReport {
    fn render(&self, json: bool) -> Result<String> {
        if json {
            return Ok(serde_json::to_string(self)?);
        }
        Ok(self
            .command
            .map(|command| command.payload().to_string())
            .unwrap_or_else(|| "-".to_string()))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut settings = load_settings_from(&args.config, |key| std::env::var(key).ok())?;
    args.apply(&mut settings);

    let transport = TcpTransport::new(&settings.host, settings.port);
    let event_task = tokio::spawn(log_transport_events(transport.subscribe_events()));
    if let Err(err) = transport.connect().await {
        warn!(
            addr = transport.addr(),
            %err,
            "touchpad: robot unreachable; commands will be dropped"
        );
    }

    let mut pad = ControlPad::new(CommandDispatcher::spawn(
        transport.clone(),
        settings.queue_capacity,
    ));
    if settings.width > 0.0 && settings.height > 0.0 {
        pad.measure(settings.width, settings.height);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(PadInput::Quit)) => break,
            Ok(Some(PadInput::Layout { width, height })) => pad.remeasure(width, height),
            Ok(Some(PadInput::Touch(point))) => {
                if pad.geometry().is_none() {
                    warn!("touchpad: no layout yet; send `layout <width> <height>` first");
                }
                let report = touch_report(point, pad.touch(point));
                println!("{}", report.render(args.json)?);
            }
            Err(err) => warn!(%line, "touchpad: ignored input: {err:#}"),
        }
    }

    let stats = pad.shutdown().await;
    transport.disconnect().await;
    event_task.abort();
    info!(
        sent = stats.sent,
        failed = stats.failed,
        rejected = stats.rejected,
        "touchpad: finished"
    );
    Ok(())
}

fn touch_report(point: Point, command: Option<Command>) -> TouchReport {
    TouchReport {
        x: point.x,
        y: point.y,
        command,
    }
}

async fn log_transport_events(mut events: broadcast::Receiver<TransportEvent>) {
    loop {
        match events.recv().await {
            Ok(TransportEvent::Connected) => info!("touchpad: connected to robot"),
            Ok(TransportEvent::MessageReceived(Some(message))) => {
                info!(%message, "touchpad: robot says")
            }
            Ok(TransportEvent::MessageReceived(None)) => {
                warn!("touchpad: robot link closed; further commands are dropped")
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "touchpad: missed transport events")
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
