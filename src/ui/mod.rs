//! On-screen labels
//!
//! Labels are ordinary world entities with a `Text` component; this module
//! holds the styles and the score counter built on top of them.

mod score_label;
mod theme;

pub use score_label::ScoreLabel;
pub use theme::*;
