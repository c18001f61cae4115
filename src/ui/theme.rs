//! UI Theme - Shared text styles and colours
//!
//! Centralized definitions for the on-screen labels.

use macroquad::prelude::{Color, BLACK};

use crate::game::Text;

/// Font size and colour of a label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub color: Color,
}

impl TextStyle {
    /// Text component carrying this style.
    pub fn text(&self, content: impl Into<String>) -> Text {
        Text {
            content: content.into(),
            font_size: self.font_size,
            color: self.color,
        }
    }
}

// =============================================================================
// Labels
// =============================================================================

/// Score counter in the top-left corner
pub const SCORE_STYLE: TextStyle = TextStyle {
    font_size: 32.0,
    color: BLACK,
};

/// Banner shown when a bomb ends the game
pub const GAME_OVER_STYLE: TextStyle = TextStyle {
    font_size: 64.0,
    color: Color::new(0.85, 0.1, 0.1, 1.0),
};

/// Hint under the game over banner
pub const HINT_STYLE: TextStyle = TextStyle {
    font_size: 24.0,
    color: BLACK,
};
