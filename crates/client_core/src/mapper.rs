//! Touch geometry to motion command mapping.

use shared::{
    domain::{ControlGeometry, Point, Sector, Zone},
    protocol::Command,
};

/// Maps a touch on the circular control to a command.
///
/// `touch` is relative to the control's top-left corner; `center_x`,
/// `center_y` and `radius` describe the measured circle. Touches with a
/// negative coordinate are rejected before any geometry, and a non-positive
/// radius (control not yet measured) yields no command.
pub fn map_touch(touch: Point, center_x: f32, center_y: f32, radius: f32) -> Option<Command> {
    if touch.x < 0.0 || touch.y < 0.0 {
        return None;
    }
    if radius.is_nan() || radius <= 0.0 {
        return None;
    }

    let dx = touch.x - center_x;
    let dy = touch.y - center_y;
    let distance = (dx * dx + dy * dy).sqrt();

    match Zone::classify(distance, radius) {
        Zone::Beyond => None,
        Zone::Inner => Some(Command::Standby),
        zone => Command::for_zone(zone, Sector::from_angle(dy.atan2(dx))),
    }
}

pub fn map_touch_in(geometry: &ControlGeometry, touch: Point) -> Option<Command> {
    let center = geometry.center();
    map_touch(touch, center.x, center.y, geometry.radius())
}

#[cfg(test)]
#[path = "tests/mapper_tests.rs"]
mod tests;
