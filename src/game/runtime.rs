//! Scene Runtime
//!
//! Owns the world, physics, asset cache, RNG and config of one scene and
//! drives it with a fixed timestep. Per tick:
//! scene update → physics step → overlap dispatch → animations
//!
//! Rendering is separate and happens once per displayed frame.

use log::{debug, info};
use macroquad::math::Rect;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::asset::{AssetCache, LoadQueue};
use crate::config::GameConfig;
use crate::input::{Action, InputFrame};
use crate::scene::{Scene, SceneContext, SceneError};
use super::animation;
use super::{Events, Physics, World};

/// Width of the game world in pixels
pub const WORLD_WIDTH: f32 = 800.0;
/// Height of the game world in pixels
pub const WORLD_HEIGHT: f32 = 600.0;

/// World rectangle bodies are kept inside.
pub fn world_bounds() -> Rect {
    Rect::new(0.0, 0.0, WORLD_WIDTH, WORLD_HEIGHT)
}

/// Builds a [`SceneContext`] from disjoint runtime fields.
macro_rules! scene_context {
    ($rt:expr, $input:expr) => {
        SceneContext {
            world: &mut $rt.world,
            physics: &mut $rt.physics,
            assets: &$rt.assets,
            input: $input,
            rng: &mut $rt.rng,
            config: &$rt.config,
        }
    };
}

pub struct Runtime<S: Scene> {
    scene: S,
    world: World,
    physics: Physics,
    events: Events,
    assets: AssetCache,
    rng: StdRng,
    config: GameConfig,
    /// Unsimulated frame time, in seconds
    accumulator: f32,
}

impl<S: Scene> Runtime<S> {
    /// Declare the scene's assets. Textures are not loaded yet, so a runtime
    /// can run headless.
    pub fn new(scene: S, config: GameConfig) -> Result<Self, SceneError> {
        let mut queue = LoadQueue::new();
        scene.preload(&mut queue);

        let mut assets = AssetCache::new();
        assets.declare(&queue)?;

        let seed = config.seed.unwrap_or_else(clock_seed);
        info!("Scene '{}': {} assets, rng seed {}", scene.key(), assets.len(), seed);

        let mut physics = Physics::new(&config.physics, world_bounds());
        physics.debug = config.debug;

        Ok(Self {
            scene,
            world: World::new(),
            physics,
            events: Events::new(),
            assets,
            rng: StdRng::seed_from_u64(seed),
            config,
            accumulator: 0.0,
        })
    }

    /// Run the scene's `create` hook.
    pub fn start(&mut self) -> Result<(), SceneError> {
        let idle = InputFrame::default();
        let mut ctx = scene_context!(self, &idle);
        self.scene.create(&mut ctx)?;
        info!("Scene '{}' created with {} entities", self.scene.key(), self.world.entity_count());
        Ok(())
    }

    /// Tear the world down and build it again.
    pub fn restart(&mut self) -> Result<(), SceneError> {
        info!("Restarting scene '{}'", self.scene.key());
        self.world.clear();
        self.physics.reset();
        self.events.clear_all();
        self.accumulator = 0.0;
        self.start()
    }

    /// Simulate one fixed tick.
    pub fn tick(&mut self, input: &InputFrame) {
        let dt = self.config.physics.tick_dt();

        {
            let mut ctx = scene_context!(self, input);
            self.scene.update(&mut ctx);
        }

        self.physics.step(&mut self.world, &mut self.events, dt);

        let overlaps: Vec<_> = self.events.overlap.drain().collect();
        if !overlaps.is_empty() {
            let mut ctx = scene_context!(self, input);
            for event in overlaps {
                self.scene.on_overlap(&mut ctx, event);
            }
        }

        animation::advance_all(&mut self.world, dt);
    }

    /// Feed one displayed frame: handle system actions, then run as many
    /// fixed ticks as the elapsed time covers. Returns the ticks run.
    pub fn advance(&mut self, frame_time: f32, input: &InputFrame) -> Result<u32, SceneError> {
        if input.is_pressed(Action::ToggleDebug) {
            self.physics.debug = !self.physics.debug;
            debug!("Physics debug {}", if self.physics.debug { "on" } else { "off" });
        }
        if input.is_pressed(Action::Restart) {
            self.restart()?;
        }

        let dt = self.config.physics.tick_dt();
        let max_steps = self.config.physics.max_steps_per_frame;
        self.accumulator += frame_time.max(0.0);

        let mut steps = 0;
        while self.accumulator >= dt && steps < max_steps {
            self.tick(input);
            self.accumulator -= dt;
            steps += 1;
        }

        if self.accumulator >= dt {
            debug!("Dropping {:.1} ms of simulation", self.accumulator * 1000.0);
            self.accumulator %= dt;
        }
        Ok(steps)
    }

    /// Run `f` against the scene with a live context (idle input).
    #[cfg(test)]
    pub fn with_scene<R>(&mut self, f: impl FnOnce(&mut S, &mut SceneContext) -> R) -> R {
        let idle = InputFrame::default();
        let mut ctx = scene_context!(self, &idle);
        f(&mut self.scene, &mut ctx)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn physics(&self) -> &Physics {
        &self.physics
    }

    pub fn assets(&self) -> &AssetCache {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut AssetCache {
        &mut self.assets
    }
}

/// Seed from the wall clock (works on native and WASM).
fn clock_seed() -> u64 {
    (macroquad::miniquad::date::now() * 1000.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Body, Entity, OverlapEvent, OverlapId};
    use macroquad::math::vec2;

    /// One falling box over a floor, with an overlap trigger at the bottom.
    #[derive(Default)]
    struct DropScene {
        created: u32,
        updates: u32,
        crate_entity: Option<Entity>,
        trigger_rule: Option<OverlapId>,
        hits: Vec<OverlapEvent>,
    }

    impl Scene for DropScene {
        fn key(&self) -> &'static str {
            "drop"
        }

        fn preload(&self, queue: &mut LoadQueue) {
            queue.image("box", "box.png", 20, 20).image("floor", "floor.png", 800, 20);
        }

        fn create(&mut self, ctx: &mut SceneContext) -> Result<(), SceneError> {
            self.created += 1;
            self.hits.clear();
            let size = ctx.assets.frame_size("box")?;
            let floor_size = ctx.assets.frame_size("floor")?;

            let floor = ctx.world.spawn_sprite(vec2(400.0, 590.0), "floor", Body::fixed(floor_size));
            let crate_entity = ctx.world.spawn_sprite(vec2(400.0, 500.0), "box", Body::dynamic(size));
            ctx.physics.add_collider(crate_entity, floor);
            self.trigger_rule = Some(ctx.physics.add_overlap(crate_entity, floor));
            self.crate_entity = Some(crate_entity);
            Ok(())
        }

        fn update(&mut self, _ctx: &mut SceneContext) {
            self.updates += 1;
        }

        fn on_overlap(&mut self, _ctx: &mut SceneContext, event: OverlapEvent) {
            self.hits.push(event);
        }
    }

    fn runtime() -> Runtime<DropScene> {
        let config = GameConfig { seed: Some(1), ..GameConfig::default() };
        let mut rt = Runtime::new(DropScene::default(), config).expect("runtime");
        rt.start().expect("start");
        rt
    }

    #[test]
    fn test_start_runs_create_once() {
        let rt = runtime();
        assert_eq!(rt.scene().created, 1);
        assert_eq!(rt.world().entity_count(), 2);
        assert_eq!(rt.scene().updates, 0);
    }

    #[test]
    fn test_fixed_steps_from_frame_time() {
        let mut rt = runtime();
        let idle = InputFrame::default();

        assert_eq!(rt.advance(1.0 / 120.0, &idle).ok(), Some(0));
        assert_eq!(rt.advance(1.0 / 120.0 + 1e-4, &idle).ok(), Some(1));
        assert_eq!(rt.advance(0.05, &idle).ok(), Some(3));
        assert_eq!(rt.scene().updates, 4);
    }

    #[test]
    fn test_catch_up_is_capped() {
        let mut rt = runtime();
        let steps = rt.advance(2.0, &InputFrame::default()).ok();
        assert_eq!(steps, Some(5));
        assert_eq!(rt.advance(0.0, &InputFrame::default()).ok(), Some(0), "backlog is dropped");
    }

    #[test]
    fn test_overlaps_reach_the_scene() {
        let mut rt = runtime();
        let idle = InputFrame::default();
        for _ in 0..120 {
            rt.tick(&idle);
        }

        let scene = rt.scene();
        let crate_entity = scene.crate_entity.expect("crate");
        assert!(rt.world().body(crate_entity).is_some_and(|b| b.touching.down));
        assert!(scene.hits.is_empty(), "resting on the floor is not an overlap");

        if let Some(body) = rt.world_mut().body_mut(crate_entity) {
            body.velocity.y = 600.0;
        }
        rt.tick(&idle);
        assert!(rt.scene().hits.is_empty(), "separation runs before overlap tests");
    }

    #[test]
    fn test_restart_rebuilds_world() {
        let mut rt = runtime();
        rt.tick(&InputFrame::default());

        let frame = InputFrame::default().with_pressed(&[Action::Restart]);
        rt.advance(0.0, &frame).expect("restart");
        assert_eq!(rt.scene().created, 2);
        assert_eq!(rt.world().entity_count(), 2);
        assert_eq!(rt.physics().overlap_count(), 1);
    }

    #[test]
    fn test_toggle_debug() {
        let mut rt = runtime();
        assert!(!rt.physics().debug);
        let frame = InputFrame::default().with_pressed(&[Action::ToggleDebug]);
        rt.advance(0.0, &frame).expect("advance");
        assert!(rt.physics().debug);
    }

    #[test]
    fn test_missing_asset_fails_create() {
        struct Broken;
        impl Scene for Broken {
            fn key(&self) -> &'static str {
                "broken"
            }
            fn preload(&self, _queue: &mut LoadQueue) {}
            fn create(&mut self, ctx: &mut SceneContext) -> Result<(), SceneError> {
                ctx.assets.frame_size("nothing")?;
                Ok(())
            }
            fn update(&mut self, _ctx: &mut SceneContext) {}
        }

        let mut rt = Runtime::new(Broken, GameConfig::default()).expect("runtime");
        assert!(matches!(rt.start(), Err(SceneError::Asset(_))));
    }
}
