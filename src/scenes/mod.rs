//! Scenes
//!
//! The game has a single scene plus the hazard spawner it owns.

mod bomb_spawner;
mod game_scene;

pub use game_scene::GameScene;
