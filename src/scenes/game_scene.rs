//! Game Scene
//!
//! The whole game: a sky, four platforms, the player, twelve falling stars
//! and a score label. Catching a star scores 10; catching the last active
//! one brings all of them back at the top. Every catch drops a bomb on the
//! other half of the screen.

use log::{debug, info};
use macroquad::color::RED;
use macroquad::math::{vec2, Vec2};
use rand::Rng;

use crate::asset::LoadQueue;
use crate::game::{AnimationDef, Body, Entity, GroupId, OverlapEvent, OverlapId, Repeat};
use crate::input::{CursorKeys, CursorState};
use crate::scene::{Scene, SceneContext, SceneError};
use crate::ui::{ScoreLabel, GAME_OVER_STYLE, HINT_STYLE, SCORE_STYLE};
use super::bomb_spawner::BombSpawner;

pub const SCENE_KEY: &str = "hello-scene";

// Player
const PLAYER_START: Vec2 = Vec2::new(100.0, 400.0);
const PLAYER_BOUNCE: f32 = 0.2;
const RUN_SPEED: f32 = 160.0;
const JUMP_SPEED: f32 = 350.0;

// Stars
const STAR_COUNT: u32 = 12;
const STAR_START: Vec2 = Vec2::new(12.0, 0.0);
const STAR_STEP_X: f32 = 70.0;
const STAR_POINTS: u32 = 10;

/// Platform centres and scales; the first is the ground
const PLATFORMS: [(f32, f32, f32); 4] = [
    (400.0, 568.0, 2.0),
    (600.0, 400.0, 1.0),
    (50.0, 250.0, 1.0),
    (750.0, 220.0, 1.0),
];

pub const ANIM_LEFT: &str = "left";
pub const ANIM_RIGHT: &str = "right";
pub const ANIM_TURN: &str = "turn";

/// Every asset key `create` relies on.
const ASSET_KEYS: [&str; 5] = ["sky", "bomb", "ground", "star", "dude"];

/// What the player should do this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub velocity_x: f32,
    /// Apply the jump impulse
    pub jump: bool,
    pub animation: &'static str,
    pub ignore_if_playing: bool,
}

/// Map held cursor keys to player motion. Left wins over right; jumping
/// needs ground contact.
pub fn player_motion(cursors: CursorState, grounded: bool) -> Motion {
    let (velocity_x, animation, ignore_if_playing) = if cursors.left {
        (-RUN_SPEED, ANIM_LEFT, true)
    } else if cursors.right {
        (RUN_SPEED, ANIM_RIGHT, true)
    } else {
        (0.0, ANIM_TURN, false)
    };

    Motion {
        velocity_x,
        jump: cursors.up && grounded,
        animation,
        ignore_if_playing,
    }
}

/// Handles created by `create`.
struct SceneState {
    player: Entity,
    cursors: CursorKeys,
    #[cfg(test)]
    platforms: GroupId,
    stars: GroupId,
    score: ScoreLabel,
    /// `None` when hazards are disabled
    bomb_spawner: Option<BombSpawner>,
    collect_rule: OverlapId,
    /// `None` unless hazards are lethal
    hit_rule: Option<OverlapId>,
    game_over: bool,
}

#[derive(Default)]
pub struct GameScene {
    state: Option<SceneState>,
}

impl GameScene {
    pub fn new() -> Self {
        Self::default()
    }

    fn create_platforms(ctx: &mut SceneContext) -> Result<GroupId, SceneError> {
        let size = ctx.assets.frame_size("ground")?;
        let platforms = ctx.world.create_group();

        for (x, y, scale) in PLATFORMS {
            let platform = ctx.world.spawn_sprite(vec2(x, y), "ground", Body::fixed(size));
            if scale != 1.0 {
                ctx.world.set_scale(platform, scale);
            }
            ctx.world.add_to_group(platforms, platform);
        }
        Ok(platforms)
    }

    fn create_player(ctx: &mut SceneContext) -> Result<Entity, SceneError> {
        let size = ctx.assets.frame_size("dude")?;
        let body = Body::dynamic(size)
            .with_bounce(PLAYER_BOUNCE, PLAYER_BOUNCE)
            .with_world_bounds();
        let player = ctx.world.spawn_sprite(PLAYER_START, "dude", body);

        let anims = [
            AnimationDef::frame_range(ANIM_LEFT, "dude", 0..=3, 10.0, Repeat::Forever),
            AnimationDef::frame_range(ANIM_RIGHT, "dude", 5..=8, 10.0, Repeat::Forever),
            AnimationDef::frame_range(ANIM_TURN, "dude", 4..=4, 20.0, Repeat::Times(0)),
        ];
        for def in anims {
            if !ctx.assets.contains(&def.texture) {
                return Err(SceneError::UnknownAnimationTexture(def.key));
            }
            ctx.world.anims.create(def);
        }
        Ok(player)
    }

    fn create_stars(ctx: &mut SceneContext) -> Result<GroupId, SceneError> {
        let size = ctx.assets.frame_size("star")?;
        let stars = ctx.world.create_group();

        for i in 0..STAR_COUNT {
            let position = STAR_START + vec2(STAR_STEP_X * i as f32, 0.0);
            let bounce_y = ctx.rng.gen_range(0.4..0.8);
            let star = ctx.world.spawn_sprite(position, "star", Body::dynamic(size).with_bounce(0.0, bounce_y));
            ctx.world.add_to_group(stars, star);
        }
        Ok(stars)
    }
}

#[cfg(test)]
impl GameScene {
    pub fn score(&self) -> Option<u32> {
        self.state.as_ref().map(|s| s.score.score())
    }

    pub fn player(&self) -> Option<Entity> {
        self.state.as_ref().map(|s| s.player)
    }

    pub fn stars(&self) -> Option<GroupId> {
        self.state.as_ref().map(|s| s.stars)
    }

    pub fn platforms(&self) -> Option<GroupId> {
        self.state.as_ref().map(|s| s.platforms)
    }

    pub fn score_entity(&self) -> Option<Entity> {
        self.state.as_ref().map(|s| s.score.entity())
    }

    pub fn bombs(&self) -> Option<GroupId> {
        self.state.as_ref()?.bomb_spawner.as_ref().map(|b| b.group())
    }

    pub fn collect_rule(&self) -> Option<OverlapId> {
        self.state.as_ref().map(|s| s.collect_rule)
    }

    pub fn hit_rule(&self) -> Option<OverlapId> {
        self.state.as_ref()?.hit_rule
    }

    pub fn is_game_over(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.game_over)
    }
}

impl SceneState {
    fn collect_star(&mut self, ctx: &mut SceneContext, player: Entity, star: Entity) {
        // Already collected earlier this step
        if !ctx.world.body(star).is_some_and(|b| b.enabled) {
            return;
        }

        ctx.world.disable_body(star, true);
        let score = self.score.add(ctx.world, STAR_POINTS);

        if ctx.world.count_active(self.stars) == 0 {
            let members = ctx.world.members(self.stars).to_vec();
            for star in members {
                let x = ctx.world.position(star).map_or(0.0, |p| p.x);
                ctx.world.enable_body(star, Some(vec2(x, 0.0)), true);
            }
            info!("All stars collected, score {}", score);
        }

        match &self.bomb_spawner {
            Some(spawner) => {
                let player_x = ctx.world.position(player).map_or(0.0, |p| p.x);
                spawner.spawn(ctx, player_x);
            }
            None => debug!("Hazards disabled, no bomb for this star"),
        }
    }

    fn hit_bomb(&mut self, ctx: &mut SceneContext) {
        ctx.physics.pause();
        if let Some(sprite) = ctx.world.sprites.get_mut(self.player) {
            sprite.tint = RED;
        }
        ctx.world.play_animation(self.player, ANIM_TURN, false);

        ctx.world.spawn_text(vec2(240.0, 240.0), GAME_OVER_STYLE.text("Game over"));
        ctx.world.spawn_text(vec2(300.0, 320.0), HINT_STYLE.text("Press R to restart"));
        self.game_over = true;
        info!("Game over, final score {}", self.score.score());
    }
}

impl Scene for GameScene {
    fn key(&self) -> &'static str {
        SCENE_KEY
    }

    /// Keep in sync with `ASSETS` in `xtask/src/main.rs`, which
    /// `cargo xtask check-assets` verifies the files against.
    fn preload(&self, queue: &mut LoadQueue) {
        queue
            .image("sky", "sky.png", 800, 600)
            .image("bomb", "bomb.png", 14, 14)
            .image("ground", "platform.png", 400, 32)
            .image("star", "star.png", 24, 22)
            .spritesheet("dude", "dude.png", 32, 48, 288, 48);
    }

    fn create(&mut self, ctx: &mut SceneContext) -> Result<(), SceneError> {
        for key in ASSET_KEYS {
            ctx.assets.frame_size(key)?;
        }

        ctx.world.spawn_image(vec2(400.0, 300.0), "sky");

        let platforms = Self::create_platforms(ctx)?;

        let player = Self::create_player(ctx)?;
        ctx.physics.add_collider(player, platforms);

        let cursors = CursorKeys::arrows();

        let stars = Self::create_stars(ctx)?;
        ctx.physics.add_collider(stars, platforms);
        let collect_rule = ctx.physics.add_overlap(player, stars);

        let score = ScoreLabel::new(ctx.world, 16.0, 16.0, 0, SCORE_STYLE);

        let bomb_spawner = if ctx.config.hazards.enabled {
            let spawner = BombSpawner::new(ctx, "bomb")?;
            ctx.physics.add_collider(spawner.group(), platforms);
            Some(spawner)
        } else {
            None
        };
        let hit_rule = match &bomb_spawner {
            Some(spawner) if ctx.config.hazards.lethal => Some(ctx.physics.add_overlap(player, spawner.group())),
            _ => None,
        };

        self.state = Some(SceneState {
            player,
            cursors,
            #[cfg(test)]
            platforms,
            stars,
            score,
            bomb_spawner,
            collect_rule,
            hit_rule,
            game_over: false,
        });
        Ok(())
    }

    fn update(&mut self, ctx: &mut SceneContext) {
        let Some(state) = self.state.as_mut() else { return };
        if state.game_over {
            return;
        }

        let cursors = state.cursors.poll(ctx.input);
        let grounded = ctx.world.body(state.player).is_some_and(|b| b.touching.down);
        let motion = player_motion(cursors, grounded);

        if let Some(body) = ctx.world.body_mut(state.player) {
            body.velocity.x = motion.velocity_x;
            if motion.jump {
                body.velocity.y = -JUMP_SPEED;
            }
        }
        ctx.world.play_animation(state.player, motion.animation, motion.ignore_if_playing);
    }

    fn on_overlap(&mut self, ctx: &mut SceneContext, event: OverlapEvent) {
        let Some(state) = self.state.as_mut() else { return };
        if state.game_over {
            return;
        }

        if event.rule == state.collect_rule {
            state.collect_star(ctx, event.a, event.b);
        } else if Some(event.rule) == state.hit_rule {
            state.hit_bomb(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::Runtime;
    use crate::input::{Action, InputFrame};

    fn runtime_with(config: GameConfig) -> Runtime<GameScene> {
        let mut rt = Runtime::new(GameScene::new(), config).expect("runtime");
        rt.start().expect("create");
        rt
    }

    fn runtime() -> Runtime<GameScene> {
        runtime_with(GameConfig { seed: Some(7), ..GameConfig::default() })
    }

    fn run(rt: &mut Runtime<GameScene>, input: &InputFrame, ticks: usize) {
        for _ in 0..ticks {
            rt.tick(input);
        }
    }

    fn stars(rt: &Runtime<GameScene>) -> Vec<Entity> {
        let group = rt.scene().stars().expect("stars");
        rt.world().members(group).to_vec()
    }

    fn is_active(rt: &Runtime<GameScene>, e: Entity) -> bool {
        rt.world().body(e).is_some_and(|b| b.enabled)
    }

    fn collect(rt: &mut Runtime<GameScene>, star: Entity) {
        let rule = rt.scene().collect_rule().expect("rule");
        let player = rt.scene().player().expect("player");
        rt.with_scene(|scene, ctx| scene.on_overlap(ctx, OverlapEvent { rule, a: player, b: star }));
    }

    fn cursor(left: bool, right: bool, up: bool) -> CursorState {
        CursorState { left, right, up, down: false }
    }

    #[test]
    fn test_player_motion_table() {
        for left in [false, true] {
            for right in [false, true] {
                for up in [false, true] {
                    for grounded in [false, true] {
                        let m = player_motion(cursor(left, right, up), grounded);
                        let expected_vx = if left { -160.0 } else if right { 160.0 } else { 0.0 };
                        assert_eq!(m.velocity_x, expected_vx, "left={left} right={right}");
                        assert_eq!(m.jump, up && grounded);
                    }
                }
            }
        }
    }

    #[test]
    fn test_player_motion_animations() {
        let m = player_motion(cursor(true, true, false), true);
        assert_eq!((m.animation, m.ignore_if_playing), (ANIM_LEFT, true));
        let m = player_motion(cursor(false, true, false), true);
        assert_eq!((m.animation, m.ignore_if_playing), (ANIM_RIGHT, true));
        let m = player_motion(cursor(false, false, true), true);
        assert_eq!((m.animation, m.ignore_if_playing), (ANIM_TURN, false));
    }

    #[test]
    fn test_initial_world() {
        let rt = runtime();
        let scene = rt.scene();
        assert_eq!(scene.score(), Some(0));
        assert!(!scene.is_game_over());

        let stars = stars(&rt);
        assert_eq!(stars.len(), 12);
        for (i, &star) in stars.iter().enumerate() {
            assert_eq!(rt.world().position(star), Some(vec2(12.0 + 70.0 * i as f32, 0.0)));
            let bounce = rt.world().body(star).map(|b| b.bounce.y).unwrap_or_default();
            assert!((0.4..0.8).contains(&bounce), "star {i} bounce {bounce}");
        }

        let platforms = rt.world().members(rt.scene().platforms().expect("platforms")).to_vec();
        assert_eq!(platforms.len(), 4);
        assert_eq!(rt.world().body(platforms[0]).map(|b| b.size), Some(vec2(800.0, 64.0)));
        assert_eq!(rt.world().body(platforms[1]).map(|b| b.size), Some(vec2(400.0, 32.0)));
        assert!(platforms.iter().all(|&p| rt.world().body(p).is_some_and(|b| b.is_static())));

        let player = scene.player().expect("player");
        assert_eq!(rt.world().position(player), Some(vec2(100.0, 400.0)));
        assert_eq!(rt.world().anims.len(), 3);
        assert!(scene.bombs().is_some());
        assert!(scene.hit_rule().is_none(), "hazards are harmless by default");
    }

    #[test]
    fn test_same_seed_same_stars() {
        let a = runtime();
        let b = runtime();
        let bounces = |rt: &Runtime<GameScene>| -> Vec<f32> {
            stars(rt).iter().filter_map(|&s| rt.world().body(s).map(|b| b.bounce.y)).collect()
        };
        assert_eq!(bounces(&a), bounces(&b));
    }

    #[test]
    fn test_collect_one_star() {
        let mut rt = runtime();
        let stars = stars(&rt);

        collect(&mut rt, stars[0]);

        assert_eq!(rt.scene().score(), Some(10));
        assert!(!is_active(&rt, stars[0]));
        assert!(!rt.world().sprites.get(stars[0]).is_some_and(|s| s.visible));
        assert!(stars[1..].iter().all(|&s| is_active(&rt, s)));
        let label = rt.scene().score_entity().and_then(|e| rt.world().texts.get(e));
        assert_eq!(label.map(|t| t.content.as_str()), Some("Score: 10"));
    }

    #[test]
    fn test_running_through_settled_stars_collects_them() {
        let mut rt = runtime();
        run(&mut rt, &InputFrame::default(), 200);
        let stars = stars(&rt);
        assert!(stars.iter().all(|&s| is_active(&rt, s)), "nothing collected standing still");

        run(&mut rt, &InputFrame::from_held(&[Action::Right]), 300);

        let score = rt.scene().score().unwrap_or_default();
        assert!(score > 0, "the two ground stars are on the way");
        assert_eq!(score % 10, 0);
        let collected = stars.iter().filter(|&&s| !is_active(&rt, s)).count() as u32;
        assert_eq!(collected, score / 10);
        assert!(stars
            .iter()
            .filter(|&&s| !is_active(&rt, s))
            .all(|&s| !rt.world().sprites.get(s).is_some_and(|sp| sp.visible)));

        let bombs = rt.scene().bombs().expect("bombs");
        assert_eq!(rt.world().members(bombs).len() as u32, score / 10);
        let player = rt.scene().player().expect("player");
        assert!(rt.world().position(player).is_some_and(|p| p.x > 700.0));
    }

    #[test]
    fn test_duplicate_overlap_is_ignored() {
        let mut rt = runtime();
        let stars = stars(&rt);

        collect(&mut rt, stars[3]);
        collect(&mut rt, stars[3]);

        assert_eq!(rt.scene().score(), Some(10));
        let bombs = rt.scene().bombs().expect("bombs");
        assert_eq!(rt.world().members(bombs).len(), 1);
    }

    #[test]
    fn test_last_star_brings_all_back() {
        let mut rt = runtime();
        run(&mut rt, &InputFrame::default(), 90);
        let stars = stars(&rt);
        assert!(stars.iter().any(|&s| rt.world().position(s).is_some_and(|p| p.y > 0.0)));

        for &star in &stars {
            collect(&mut rt, star);
        }

        assert_eq!(rt.scene().score(), Some(120));
        for (i, &star) in stars.iter().enumerate() {
            assert!(is_active(&rt, star));
            assert_eq!(rt.world().position(star), Some(vec2(12.0 + 70.0 * i as f32, 0.0)));
            assert!(rt.world().sprites.get(star).is_some_and(|s| s.visible));
            assert_eq!(rt.world().body(star).map(|b| b.velocity), Some(Vec2::ZERO));
        }
        let bombs = rt.scene().bombs().expect("bombs");
        assert_eq!(rt.world().members(bombs).len(), 12);
    }

    #[test]
    fn test_bomb_lands_opposite_player() {
        let mut rt = runtime();
        let stars = stars(&rt);
        let bombs = rt.scene().bombs().expect("bombs");

        collect(&mut rt, stars[0]);
        let bomb = rt.world().members(bombs)[0];
        assert!(rt.world().position(bomb).is_some_and(|p| p.x >= 400.0));

        let player = rt.scene().player().expect("player");
        if let Some(t) = rt.world_mut().transforms.get_mut(player) {
            t.position.x = 700.0;
        }
        collect(&mut rt, stars[1]);
        let bomb = rt.world().members(bombs)[1];
        assert!(rt.world().position(bomb).is_some_and(|p| p.x <= 400.0));
    }

    #[test]
    fn test_hazards_disabled() {
        let mut config = GameConfig { seed: Some(7), ..GameConfig::default() };
        config.hazards.enabled = false;
        let mut rt = runtime_with(config);
        assert!(rt.scene().bombs().is_none());

        let star = stars(&rt)[0];
        let before = rt.world().entity_count();
        collect(&mut rt, star);
        assert_eq!(rt.scene().score(), Some(10));
        assert_eq!(rt.world().entity_count(), before);
    }

    #[test]
    fn test_player_lands_on_ground() {
        let mut rt = runtime();
        run(&mut rt, &InputFrame::default(), 180);

        let player = rt.scene().player().expect("player");
        let body = rt.world().body(player).copied().expect("body");
        assert!(body.touching.down);
        let bottom = rt.world().position(player).map(|p| p.y + 24.0).unwrap_or_default();
        assert!((bottom - 536.0).abs() < 0.01);
    }

    #[test]
    fn test_update_moves_and_animates() {
        let mut rt = runtime();
        let player = rt.scene().player().expect("player");
        let anim = |rt: &Runtime<GameScene>| {
            rt.world().animators.get(player).and_then(|a| a.current_key().map(str::to_string))
        };

        run(&mut rt, &InputFrame::from_held(&[Action::Left]), 1);
        assert_eq!(rt.world().body(player).map(|b| b.velocity.x), Some(-160.0));
        assert_eq!(anim(&rt).as_deref(), Some(ANIM_LEFT));

        run(&mut rt, &InputFrame::from_held(&[Action::Right]), 1);
        assert_eq!(rt.world().body(player).map(|b| b.velocity.x), Some(160.0));
        assert_eq!(anim(&rt).as_deref(), Some(ANIM_RIGHT));

        run(&mut rt, &InputFrame::default(), 1);
        assert_eq!(rt.world().body(player).map(|b| b.velocity.x), Some(0.0));
        assert_eq!(anim(&rt).as_deref(), Some(ANIM_TURN));
        assert_eq!(rt.world().sprites.get(player).map(|s| s.frame), Some(4));
    }

    #[test]
    fn test_jump_needs_ground() {
        let mut rt = runtime();
        let player = rt.scene().player().expect("player");
        let up = InputFrame::from_held(&[Action::Up]);

        // Airborne at spawn
        run(&mut rt, &up, 1);
        assert!(rt.world().body(player).is_some_and(|b| b.velocity.y > 0.0));

        run(&mut rt, &InputFrame::default(), 180);
        run(&mut rt, &up, 1);
        let vy = rt.world().body(player).map(|b| b.velocity.y).unwrap_or_default();
        assert!(vy < -300.0, "jump impulse applied, vy={vy}");
    }

    #[test]
    fn test_lethal_bomb_ends_game_and_restart_recovers() {
        let mut config = GameConfig { seed: Some(7), ..GameConfig::default() };
        config.hazards.lethal = true;
        let mut rt = runtime_with(config);

        let stars = stars(&rt);
        collect(&mut rt, stars[0]);
        let rule = rt.scene().hit_rule().expect("hit rule");
        let player = rt.scene().player().expect("player");
        let bomb = rt.world().members(rt.scene().bombs().expect("bombs"))[0];
        rt.with_scene(|scene, ctx| scene.on_overlap(ctx, OverlapEvent { rule, a: player, b: bomb }));

        assert!(rt.scene().is_game_over());
        assert!(rt.physics().is_paused());
        assert_eq!(rt.world().sprites.get(player).map(|s| s.tint), Some(RED));

        // Input is ignored and nothing moves
        let before = rt.world().position(player);
        run(&mut rt, &InputFrame::from_held(&[Action::Left]), 10);
        assert_eq!(rt.world().position(player), before);
        collect(&mut rt, stars[1]);
        assert_eq!(rt.scene().score(), Some(10));

        let restart = InputFrame::default().with_pressed(&[Action::Restart]);
        rt.advance(0.0, &restart).expect("restart");
        assert!(!rt.scene().is_game_over());
        assert!(!rt.physics().is_paused());
        assert_eq!(rt.scene().score(), Some(0));
        assert_eq!(self::stars(&rt).len(), 12);
    }
}
