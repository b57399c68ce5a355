use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    domain::{Sector, Zone},
    error::ProtocolError,
};

pub const FRAME_DELIMITER: char = '\n';

/// Motion directive sent to the robot. The serialized form is the exact
/// payload string the robot expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    #[serde(rename = "Standby")]
    Standby,
    #[serde(rename = "Move right")]
    MoveRight,
    #[serde(rename = "Move back")]
    MoveBack,
    #[serde(rename = "Move forward")]
    MoveForward,
    #[serde(rename = "Move left")]
    MoveLeft,
    #[serde(rename = "Turn right")]
    TurnRight,
    #[serde(rename = "Fast back")]
    FastBack,
    #[serde(rename = "Fast forward")]
    FastForward,
    #[serde(rename = "Turn left")]
    TurnLeft,
}

impl Command {
    pub const ALL: [Command; 9] = [
        Command::Standby,
        Command::MoveRight,
        Command::MoveBack,
        Command::MoveForward,
        Command::MoveLeft,
        Command::TurnRight,
        Command::FastBack,
        Command::FastForward,
        Command::TurnLeft,
    ];

    pub fn payload(self) -> &'static str {
        match self {
            Command::Standby => "Standby",
            Command::MoveRight => "Move right",
            Command::MoveBack => "Move back",
            Command::MoveForward => "Move forward",
            Command::MoveLeft => "Move left",
            Command::TurnRight => "Turn right",
            Command::FastBack => "Fast back",
            Command::FastForward => "Fast forward",
            Command::TurnLeft => "Turn left",
        }
    }

    pub fn is_standby(self) -> bool {
        self == Command::Standby
    }

    /// Command selected by a zone/sector pair. `Beyond` has none, and the
    /// inner zone ignores the sector.
    pub fn for_zone(zone: Zone, sector: Sector) -> Option<Self> {
        let command = match (zone, sector) {
            (Zone::Inner, _) => Command::Standby,
            (Zone::Middle, Sector::Right) => Command::MoveRight,
            (Zone::Middle, Sector::Back) => Command::MoveBack,
            (Zone::Middle, Sector::Forward) => Command::MoveForward,
            (Zone::Middle, Sector::Left) => Command::MoveLeft,
            (Zone::Outer, Sector::Right) => Command::TurnRight,
            (Zone::Outer, Sector::Back) => Command::FastBack,
            (Zone::Outer, Sector::Forward) => Command::FastForward,
            (Zone::Outer, Sector::Left) => Command::TurnLeft,
            (Zone::Beyond, _) => return None,
        };
        Some(command)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.payload())
    }
}

impl FromStr for Command {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Command::ALL
            .into_iter()
            .find(|command| command.payload() == trimmed)
            .ok_or_else(|| ProtocolError::UnknownCommand(trimmed.to_string()))
    }
}

/// Terminates a payload with the frame delimiter.
pub fn frame(payload: &str) -> String {
    let mut line = String::with_capacity(payload.len() + 1);
    line.push_str(payload);
    line.push(FRAME_DELIMITER);
    line
}

pub fn encode_line(command: Command) -> String {
    frame(command.payload())
}

pub fn decode_line(line: &str) -> Result<Command, ProtocolError> {
    let line = line
        .strip_suffix(FRAME_DELIMITER)
        .unwrap_or(line)
        .trim_end_matches('\r');
    if line.trim().is_empty() {
        return Err(ProtocolError::EmptyFrame);
    }
    line.parse()
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
