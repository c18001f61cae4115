//! Scene contract
//!
//! A scene is a plain struct implementing [`Scene`]. The runtime calls its
//! hooks in order:
//! 1. `preload` once, to declare assets
//! 2. `create` once (and again on restart), to build the world
//! 3. `update` every tick, before the physics step
//! 4. `on_overlap` for every overlap event the step produced
//!
//! Hooks receive everything they may touch through an explicit
//! [`SceneContext`].

use rand::rngs::StdRng;
use thiserror::Error;

use crate::asset::{AssetCache, AssetError, LoadQueue};
use crate::config::GameConfig;
use crate::game::{OverlapEvent, Physics, World};
use crate::input::InputFrame;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error("animation '{0}' references an unknown texture")]
    UnknownAnimationTexture(String),
}

/// Borrowed view of the runtime handed to scene hooks.
pub struct SceneContext<'a> {
    pub world: &'a mut World,
    pub physics: &'a mut Physics,
    pub assets: &'a AssetCache,
    pub input: &'a InputFrame,
    pub rng: &'a mut StdRng,
    pub config: &'a GameConfig,
}

pub trait Scene {
    /// Stable name used in logs.
    fn key(&self) -> &'static str;

    /// Declare every asset the scene uses.
    fn preload(&self, queue: &mut LoadQueue);

    /// Build the world. Called on start and on every restart with an empty
    /// world and no physics rules.
    fn create(&mut self, ctx: &mut SceneContext) -> Result<(), SceneError>;

    /// Per-tick logic, run before the physics step.
    fn update(&mut self, ctx: &mut SceneContext);

    /// An overlap rule matched during the last physics step.
    fn on_overlap(&mut self, _ctx: &mut SceneContext, _event: OverlapEvent) {}
}
