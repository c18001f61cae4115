//! Input handling with gamepad support
//!
//! Action-based input over keyboard and gamepad. Each displayed frame is
//! folded into one immutable `InputFrame` that the simulation reads.
//!
//! Native: gilrs for gamepad input
//! WASM: keyboard only

mod actions;
mod cursor;
mod gamepad;
mod state;

pub use actions::*;
pub use cursor::{CursorKeys, CursorState};
pub use state::*;
