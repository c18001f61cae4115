//! Bomb spawner
//!
//! Owns the bomb group. Each spawn drops a bouncing bomb on the half of the
//! world the player is not in.

use log::debug;
use macroquad::math::{vec2, Vec2};
use rand::Rng;

use crate::game::{Body, Entity, GroupId, WORLD_WIDTH};
use crate::scene::{SceneContext, SceneError};

/// Height bombs appear at
const SPAWN_Y: f32 = 16.0;
/// Horizontal launch speed range, px/s
const MAX_SPEED_X: i32 = 200;
/// Initial downward speed, px/s
const SPEED_Y: f32 = 20.0;

#[derive(Debug, Clone)]
pub struct BombSpawner {
    key: String,
    size: Vec2,
    group: GroupId,
}

impl BombSpawner {
    pub fn new(ctx: &mut SceneContext, key: &str) -> Result<Self, SceneError> {
        let size = ctx.assets.frame_size(key)?;
        let group = ctx.world.create_group();
        Ok(Self {
            key: key.to_string(),
            size,
            group,
        })
    }

    /// Group every spawned bomb joins (rule target).
    pub fn group(&self) -> GroupId {
        self.group
    }

    pub fn spawn(&self, ctx: &mut SceneContext, player_x: f32) -> Entity {
        let mid = (WORLD_WIDTH * 0.5) as i32;
        let x: i32 = if player_x < mid as f32 {
            ctx.rng.gen_range(mid..=WORLD_WIDTH as i32)
        } else {
            ctx.rng.gen_range(0..=mid)
        };
        let x = x as f32;
        let vx = ctx.rng.gen_range(-MAX_SPEED_X..=MAX_SPEED_X) as f32;

        let body = Body::dynamic(self.size).with_bounce(1.0, 1.0).with_world_bounds();
        let bomb = ctx.world.spawn_sprite(vec2(x, SPAWN_Y), &self.key, body);
        if let Some(body) = ctx.world.body_mut(bomb) {
            body.velocity = vec2(vx, SPEED_Y);
        }
        ctx.world.add_to_group(self.group, bomb);

        debug!("Bomb spawned at x={} (player at {:.0}), vx={}", x, player_x, vx);
        bomb
    }
}
