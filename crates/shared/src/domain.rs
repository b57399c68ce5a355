use std::f32::consts::FRAC_PI_4;

use serde::{Deserialize, Serialize};

const THREE_FRAC_PI_4: f32 = 3.0 * FRAC_PI_4;

/// Touch location relative to the control's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Measured size of the circular control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlGeometry {
    pub width: f32,
    pub height: f32,
}

impl ControlGeometry {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn radius(&self) -> f32 {
        self.width.min(self.height) / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn is_measured(&self) -> bool {
        self.radius() > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Inner,
    Middle,
    Outer,
    Beyond,
}

impl Zone {
    /// Bands are half-open: `[0, r/3)`, `[r/3, 2r/3)`, `[2r/3, r)`.
    /// Anything else, NaN included, is `Beyond`.
    pub fn classify(distance: f32, radius: f32) -> Self {
        if distance < radius / 3.0 {
            Zone::Inner
        } else if distance >= radius / 3.0 && distance < 2.0 * radius / 3.0 {
            Zone::Middle
        } else if distance >= 2.0 * radius / 3.0 && distance < radius {
            Zone::Outer
        } else {
            Zone::Beyond
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    Right,
    Back,
    Forward,
    Left,
}

impl Sector {
    /// Quadrants are open below and closed above. Screen y grows downward,
    /// so positive angles point towards the robot's back.
    pub fn from_angle(angle: f32) -> Self {
        if angle > -FRAC_PI_4 && angle <= FRAC_PI_4 {
            Sector::Right
        } else if angle > FRAC_PI_4 && angle <= THREE_FRAC_PI_4 {
            Sector::Back
        } else if angle > -THREE_FRAC_PI_4 && angle <= -FRAC_PI_4 {
            Sector::Forward
        } else {
            Sector::Left
        }
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
