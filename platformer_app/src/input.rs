//! Player input
//!
//! There is no window or keyboard here; input comes from a looping script
//! and reaches the player through a shared cell the application writes once
//! per frame.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Buttons held this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInput {
    /// Move left
    pub left: bool,
    /// Move right
    pub right: bool,
    /// Jump (held)
    pub jump: bool,
}

impl PlayerInput {
    /// Horizontal direction: -1, 0 or 1
    pub fn direction(self) -> f32 {
        f32::from(u8::from(self.right)) - f32::from(u8::from(self.left))
    }
}

/// Input cell shared between the application and the player
pub type SharedInput = Rc<Cell<PlayerInput>>;

/// Fresh input cell with nothing pressed
pub fn shared_input() -> SharedInput {
    Rc::new(Cell::new(PlayerInput::default()))
}

/// Input held for a number of frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSegment {
    /// How long the segment lasts
    pub frames: u32,
    /// Move left
    pub left: bool,
    /// Move right
    pub right: bool,
    /// Jump (held)
    pub jump: bool,
}

impl InputSegment {
    fn input(self) -> PlayerInput {
        PlayerInput { left: self.left, right: self.right, jump: self.jump }
    }

    /// Walk right through the checkpoint, hop once, into the spike, then back left toward the door
    pub fn demo_script() -> Vec<Self> {
        vec![
            Self { frames: 20, ..Self::default() },
            Self { frames: 30, right: true, ..Self::default() },
            Self { frames: 10, right: true, jump: true, ..Self::default() },
            Self { frames: 120, right: true, ..Self::default() },
            Self { frames: 90, left: true, ..Self::default() },
            Self { frames: 20, ..Self::default() },
        ]
    }
}

/// Looping input script
#[derive(Debug, Clone)]
pub struct InputScript {
    segments: Vec<InputSegment>,
    period: u64,
}

impl InputScript {
    /// Build a script; zero-length segments are ignored
    pub fn new(segments: Vec<InputSegment>) -> Self {
        let segments: Vec<_> = segments.into_iter().filter(|segment| segment.frames > 0).collect();
        let period = segments.iter().map(|segment| u64::from(segment.frames)).sum();
        Self { segments, period }
    }

    /// Input for a frame number; an empty script presses nothing
    pub fn input_at(&self, frame: u64) -> PlayerInput {
        if self.period == 0 {
            return PlayerInput::default();
        }

        let mut offset = frame % self.period;
        for segment in &self.segments {
            let length = u64::from(segment.frames);
            if offset < length {
                return segment.input();
            }
            offset -= length;
        }
        PlayerInput::default()
    }
}
