//! Score label
//!
//! Integer score paired with the text entity that displays it. The text is
//! rewritten on every change, so it always reads `Score: N`.

use macroquad::math::vec2;

use crate::game::{Entity, World};
use super::theme::TextStyle;

#[derive(Debug, Clone, Copy)]
pub struct ScoreLabel {
    entity: Entity,
    score: u32,
}

impl ScoreLabel {
    /// Spawn the label at `(x, y)` (top-left corner).
    pub fn new(world: &mut World, x: f32, y: f32, score: u32, style: TextStyle) -> Self {
        let entity = world.spawn_text(vec2(x, y), style.text(format_score(score)));
        Self { entity, score }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    #[cfg(test)]
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Add points and refresh the text. Returns the new score.
    pub fn add(&mut self, world: &mut World, points: u32) -> u32 {
        self.set_score(world, self.score.saturating_add(points));
        self.score
    }

    pub fn set_score(&mut self, world: &mut World, score: u32) {
        self.score = score;
        if let Some(text) = world.texts.get_mut(self.entity) {
            text.content = format_score(score);
        }
    }
}

pub fn format_score(score: u32) -> String {
    format!("Score: {}", score)
}
