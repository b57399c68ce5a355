use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::protocol::Command;

/// Motion routine the robot runs for a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gait {
    Standby,
    Walk0,
    Walk180,
    WalkL90,
    WalkR90,
    FastForward,
    FastBackward,
    TurnLeft,
    TurnRight,
}

impl Gait {
    pub fn for_command(command: Option<Command>) -> Self {
        match command {
            None | Some(Command::Standby) => Gait::Standby,
            Some(Command::MoveForward) => Gait::Walk0,
            Some(Command::MoveBack) => Gait::Walk180,
            Some(Command::MoveLeft) => Gait::WalkL90,
            Some(Command::MoveRight) => Gait::WalkR90,
            Some(Command::FastForward) => Gait::FastForward,
            Some(Command::FastBack) => Gait::FastBackward,
            Some(Command::TurnLeft) => Gait::TurnLeft,
            Some(Command::TurnRight) => Gait::TurnRight,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Gait::Standby => "standby",
            Gait::Walk0 => "walk0",
            Gait::Walk180 => "walk180",
            Gait::WalkL90 => "walkl90",
            Gait::WalkR90 => "walkr90",
            Gait::FastForward => "fastforward",
            Gait::FastBackward => "fastbackward",
            Gait::TurnLeft => "turnleft",
            Gait::TurnRight => "turnright",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MotionState {
    /// `None` means the robot holds its standby posture.
    pub current: Option<Command>,
    pub commands_received: u64,
    pub updated_at: DateTime<Utc>,
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            current: None,
            commands_received: 0,
            updated_at: Utc::now(),
        }
    }
}

impl MotionState {
    pub fn apply(&mut self, command: Command) {
        self.commands_received += 1;
        self.current = (!command.is_standby()).then_some(command);
        self.updated_at = Utc::now();
    }

    pub fn reset(&mut self) {
        self.current = None;
        self.updated_at = Utc::now();
    }

    pub fn gait(&self) -> Gait {
        Gait::for_command(self.current)
    }
}

#[cfg(test)]
#[path = "tests/motion_tests.rs"]
mod tests;
