//! Input state management
//!
//! Polls keyboard (macroquad) and gamepad once per displayed frame and
//! folds both into an immutable [`InputFrame`]. The simulation only ever
//! sees frames, so tests can drive it with synthetic input.

use macroquad::prelude::*;

use super::gamepad::{button, Gamepad};
use super::Action;

/// Stick deflection that counts as a held direction
const STICK_THRESHOLD: f32 = 0.5;

/// Snapshot of the actions for one displayed frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame {
    held: u32,
    pressed: u32,
}

impl InputFrame {
    /// Frame with the given actions held (and nothing newly pressed).
    #[cfg(test)]
    pub fn from_held(actions: &[Action]) -> Self {
        Self {
            held: mask_of(actions),
            pressed: 0,
        }
    }

    /// Mark actions as pressed this frame (they are also held).
    #[cfg(test)]
    pub fn with_pressed(mut self, actions: &[Action]) -> Self {
        let mask = mask_of(actions);
        self.held |= mask;
        self.pressed |= mask;
        self
    }

    /// Action is held down
    pub fn is_down(&self, action: Action) -> bool {
        self.held & action.bit() != 0
    }

    /// Action went down this frame
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed & action.bit() != 0
    }
}

#[cfg(test)]
fn mask_of(actions: &[Action]) -> u32 {
    actions.iter().fold(0, |mask, a| mask | a.bit())
}

/// Keyboard + gamepad poller.
pub struct InputState {
    gamepad: Gamepad,
    last_held: u32,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            gamepad: Gamepad::new(),
            last_held: 0,
        }
    }

    /// Call once per displayed frame.
    pub fn poll(&mut self) -> InputFrame {
        self.gamepad.poll();

        let held = Action::ALL
            .iter()
            .filter(|&&action| self.keyboard_down(action) || self.gamepad_down(action))
            .fold(0, |mask, a| mask | a.bit());

        let frame = InputFrame {
            held,
            pressed: held & !self.last_held,
        };
        self.last_held = held;
        frame
    }

    pub fn has_gamepad(&self) -> bool {
        self.gamepad.has_gamepad()
    }

    fn keyboard_down(&self, action: Action) -> bool {
        match action {
            Action::Left => is_key_down(KeyCode::Left),
            Action::Right => is_key_down(KeyCode::Right),
            Action::Up => is_key_down(KeyCode::Up),
            Action::Down => is_key_down(KeyCode::Down),
            Action::Restart => is_key_down(KeyCode::R),
            Action::ToggleDebug => is_key_down(KeyCode::F1),
        }
    }

    fn gamepad_down(&self, action: Action) -> bool {
        let mask = self.gamepad.button_mask();
        let down = |b: u32| mask & (1 << b) != 0;
        let stick = self.gamepad.left_stick();

        match action {
            Action::Left => down(button::DPAD_LEFT) || stick.x < -STICK_THRESHOLD,
            Action::Right => down(button::DPAD_RIGHT) || stick.x > STICK_THRESHOLD,
            Action::Up => down(button::DPAD_UP) || down(button::A) || stick.y < -STICK_THRESHOLD,
            Action::Down => down(button::DPAD_DOWN) || stick.y > STICK_THRESHOLD,
            Action::Restart => down(button::START),
            Action::ToggleDebug => down(button::SELECT),
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
