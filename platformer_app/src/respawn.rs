//! Persistent respawn record
//!
//! Stored as three lines of text:
//!
//! ```text
//! 1
//! TestRoom
//! -120 -114
//! ```
//!
//! a has-record flag, the room name, and the respawn position.

use std::fs;
use std::io;
use std::path::Path;

use platformer_engine::foundation::math::Vec2;
use thiserror::Error;

/// Where the player comes back after dying
#[derive(Debug, Clone, PartialEq)]
pub struct RespawnRecord {
    /// Whether a respawn point has ever been set
    pub has_record: bool,
    /// Room the respawn point belongs to
    pub room: String,
    /// Respawn position
    pub position: Vec2,
}

impl Default for RespawnRecord {
    fn default() -> Self {
        Self {
            has_record: false,
            room: String::new(),
            position: Vec2::zeros(),
        }
    }
}

impl RespawnRecord {
    /// A set respawn point
    pub fn new(room: impl Into<String>, position: Vec2) -> Self {
        Self {
            has_record: true,
            room: room.into(),
            position,
        }
    }

    /// Parse the three-line text form
    pub fn parse(text: &str) -> Result<Self, RecordError> {
        let mut lines = text.lines();

        let flag = lines.next().ok_or(RecordError::MissingLine(1))?.trim();
        let has_record = match flag {
            "1" => true,
            "0" => false,
            other => return Err(RecordError::InvalidFlag(other.to_string())),
        };

        let room = lines.next().ok_or(RecordError::MissingLine(2))?.trim().to_string();

        let coordinates = lines.next().ok_or(RecordError::MissingLine(3))?;
        let mut parts = coordinates.split_whitespace().map(str::parse::<f32>);
        let position = match (parts.next(), parts.next(), parts.next()) {
            (Some(Ok(x)), Some(Ok(y)), None) if x.is_finite() && y.is_finite() => Vec2::new(x, y),
            _ => return Err(RecordError::InvalidCoordinate(coordinates.trim().to_string())),
        };

        Ok(Self { has_record, room, position })
    }

    /// Render the three-line text form
    pub fn to_text(&self) -> String {
        format!(
            "{}\n{}\n{} {}\n",
            u8::from(self.has_record),
            self.room,
            self.position.x,
            self.position.y
        )
    }

    /// Read a record file
    pub fn read_from(path: impl AsRef<Path>) -> Result<Self, RecordError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Write a record file, replacing any previous one
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), RecordError> {
        fs::write(path, self.to_text())?;
        Ok(())
    }
}

/// Errors reading or writing a respawn record
#[derive(Error, Debug)]
pub enum RecordError {
    /// File could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// File ended early
    #[error("Line {0} is missing")]
    MissingLine(usize),

    /// First line is not 0 or 1
    #[error("Invalid record flag: {0:?}")]
    InvalidFlag(String),

    /// Third line is not two numbers
    #[error("Invalid coordinates: {0:?}")]
    InvalidCoordinate(String),
}

impl RecordError {
    /// Whether the file simply does not exist yet
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }
}
