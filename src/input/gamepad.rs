//! Gamepad support
//!
//! Native: gilrs, first connected pad wins
//! WASM: no gamepad backend, keyboard only

use macroquad::prelude::Vec2;

// Standard gamepad button bits (Xbox layout)
pub mod button {
    pub const A: u32 = 0;           // South
    pub const SELECT: u32 = 8;      // Back/Select
    pub const START: u32 = 9;       // Start/Options
    pub const DPAD_UP: u32 = 12;
    pub const DPAD_DOWN: u32 = 13;
    pub const DPAD_LEFT: u32 = 14;
    pub const DPAD_RIGHT: u32 = 15;
}

// ============================================================================
// WASM Implementation
// ============================================================================

#[cfg(target_arch = "wasm32")]
mod platform {
    use super::*;

    pub struct Gamepad;

    impl Gamepad {
        pub fn new() -> Self {
            Self
        }

        pub fn poll(&mut self) {}

        pub fn has_gamepad(&self) -> bool {
            false
        }

        pub fn button_mask(&self) -> u32 {
            0
        }

        pub fn left_stick(&self) -> Vec2 {
            Vec2::ZERO
        }
    }

    impl Default for Gamepad {
        fn default() -> Self {
            Self::new()
        }
    }
}

// ============================================================================
// Native Implementation (gilrs)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
mod platform {
    use super::*;
    use gilrs::{Axis, Button as GilrsButton, Gilrs};
    use log::{info, warn};

    pub struct Gamepad {
        /// `None` when the platform has no gamepad backend
        gilrs: Option<Gilrs>,
        deadzone: f32,
    }

    impl Gamepad {
        pub fn new() -> Self {
            let gilrs = match Gilrs::new() {
                Ok(gilrs) => Some(gilrs),
                Err(e) => {
                    warn!("Gamepad support unavailable: {}", e);
                    None
                }
            };
            Self { gilrs, deadzone: 0.15 }
        }

        pub fn poll(&mut self) {
            let Some(gilrs) = self.gilrs.as_mut() else { return };
            while let Some(event) = gilrs.next_event() {
                match event.event {
                    gilrs::EventType::Connected => info!("Gamepad {:?} connected", event.id),
                    gilrs::EventType::Disconnected => info!("Gamepad {:?} disconnected", event.id),
                    _ => {}
                }
            }
        }

        pub fn has_gamepad(&self) -> bool {
            self.active_gamepad().is_some()
        }

        fn active_gamepad(&self) -> Option<gilrs::Gamepad<'_>> {
            self.gilrs.as_ref()?.gamepads().next().map(|(_, gp)| gp)
        }

        pub fn button_mask(&self) -> u32 {
            let Some(gp) = self.active_gamepad() else { return 0 };
            let mut mask = 0u32;

            if gp.is_pressed(GilrsButton::South) { mask |= 1 << button::A; }
            if gp.is_pressed(GilrsButton::Select) { mask |= 1 << button::SELECT; }
            if gp.is_pressed(GilrsButton::Start) { mask |= 1 << button::START; }
            if gp.is_pressed(GilrsButton::DPadUp) { mask |= 1 << button::DPAD_UP; }
            if gp.is_pressed(GilrsButton::DPadDown) { mask |= 1 << button::DPAD_DOWN; }
            if gp.is_pressed(GilrsButton::DPadLeft) { mask |= 1 << button::DPAD_LEFT; }
            if gp.is_pressed(GilrsButton::DPadRight) { mask |= 1 << button::DPAD_RIGHT; }

            mask
        }

        /// Left stick with y pointing down (screen space).
        pub fn left_stick(&self) -> Vec2 {
            let Some(gp) = self.active_gamepad() else { return Vec2::ZERO };
            let x = gp.value(Axis::LeftStickX);
            let y = -gp.value(Axis::LeftStickY);
            apply_deadzone(x, y, self.deadzone)
        }
    }

    impl Default for Gamepad {
        fn default() -> Self {
            Self::new()
        }
    }
}

// ============================================================================
// Shared utilities
// ============================================================================

/// Apply radial deadzone with linear rescaling
#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
fn apply_deadzone(x: f32, y: f32, deadzone: f32) -> Vec2 {
    let len = (x * x + y * y).sqrt();
    if len < deadzone {
        return Vec2::ZERO;
    }
    // Rescale from deadzone..1.0 to 0.0..1.0
    let scale = (len - deadzone) / (1.0 - deadzone) / len;
    Vec2::new(x * scale, y * scale)
}

pub use platform::Gamepad;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadzone() {
        assert_eq!(apply_deadzone(0.1, 0.0, 0.15), Vec2::ZERO);
        let full = apply_deadzone(1.0, 0.0, 0.15);
        assert!((full.x - 1.0).abs() < 1e-5);
        let half = apply_deadzone(0.575, 0.0, 0.15);
        assert!((half.x - 0.5).abs() < 1e-3);
    }
}
