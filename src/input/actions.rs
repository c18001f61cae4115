//! Game action definitions
//!
//! Keyboard / gamepad mapping:
//! - Arrow keys, D-pad or left stick = Left / Right / Up / Down
//! - Up also on A (south button)
//! - R / Start = Restart
//! - F1 / Select = ToggleDebug

/// Everything the player can ask for in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Cursor directions
    Left,
    Right,
    Up,
    Down,

    // System
    Restart,
    ToggleDebug,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Left,
        Action::Right,
        Action::Up,
        Action::Down,
        Action::Restart,
        Action::ToggleDebug,
    ];

    /// Bit of this action inside an [`InputFrame`](super::InputFrame) mask.
    pub const fn bit(self) -> u32 {
        1 << self as u32
    }
}
