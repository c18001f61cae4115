//! Cursor keys
//!
//! The four direction actions bundled into one handle, captured once by the
//! scene and read every frame.

use super::{Action, InputFrame};

/// Which actions act as the four cursor directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorKeys {
    pub left: Action,
    pub right: Action,
    pub up: Action,
    pub down: Action,
}

/// Held state of the cursor directions for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl CursorKeys {
    /// Arrow keys (and their gamepad equivalents).
    pub fn arrows() -> Self {
        Self {
            left: Action::Left,
            right: Action::Right,
            up: Action::Up,
            down: Action::Down,
        }
    }

    pub fn poll(&self, frame: &InputFrame) -> CursorState {
        CursorState {
            left: frame.is_down(self.left),
            right: frame.is_down(self.right),
            up: frame.is_down(self.up),
            down: frame.is_down(self.down),
        }
    }
}

impl Default for CursorKeys {
    fn default() -> Self {
        Self::arrows()
    }
}
