use shared::{
    domain::{ControlGeometry, Point},
    protocol::Command,
};
use tracing::{debug, info, warn};

use crate::{
    dispatcher::{CommandDispatcher, DispatcherStats},
    mapper::map_touch_in,
};

/// The circular control: holds its measured geometry and forwards mapped
/// touches to the dispatcher.
pub struct ControlPad {
    geometry: Option<ControlGeometry>,
    dispatcher: CommandDispatcher,
}

impl ControlPad {
    pub fn new(dispatcher: CommandDispatcher) -> Self {
        Self {
            geometry: None,
            dispatcher,
        }
    }

    /// Records the first real measurement; later calls are ignored.
    /// Returns whether the measurement was applied.
    pub fn measure(&mut self, width: f32, height: f32) -> bool {
        if self.geometry.is_some_and(|g| g.is_measured()) {
            return false;
        }
        self.remeasure(width, height);
        true
    }

    pub fn remeasure(&mut self, width: f32, height: f32) {
        let geometry = ControlGeometry::new(width, height);
        info!(width, height, radius = geometry.radius(), "pad: measured");
        self.geometry = Some(geometry);
    }

    pub fn geometry(&self) -> Option<ControlGeometry> {
        self.geometry
    }

    pub fn touch(&self, point: Point) -> Option<Command> {
        let geometry = self.geometry?;
        let command = map_touch_in(&geometry, point)?;
        debug!(x = point.x, y = point.y, %command, "pad: touch mapped");
        if let Err(err) = self.dispatcher.submit(command) {
            warn!(%err, "pad: command not queued");
        }
        Some(command)
    }

    pub fn stats(&self) -> DispatcherStats {
        self.dispatcher.stats()
    }

    pub async fn shutdown(self) -> DispatcherStats {
        self.dispatcher.shutdown().await
    }
}

#[cfg(test)]
#[path = "tests/control_pad_tests.rs"]
mod tests;
