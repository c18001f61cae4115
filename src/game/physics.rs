//! Arcade Physics
//!
//! Axis-aligned bodies, constant downward gravity and two kinds of rules:
//! - collider rules separate moving bodies from static ones and reflect
//!   velocity by the body's bounce (platforms)
//! - overlap rules only report intersections (pickups, hazards)
//!
//! One `step`:
//! 1. integrate every enabled dynamic body (gravity, velocity, world bounds)
//! 2. resolve collider rules, setting `touching` flags; a body resting on a
//!    static top counts as touching it even when this step's sink is too
//!    small to register as overlap
//! 3. test overlap rules, queueing one `OverlapEvent` per intersecting pair
//!
//! Separation between two moving bodies is not handled; every collider in
//! this game pairs movers against static platforms.

use log::debug;
use macroquad::math::{vec2, Rect, Vec2};

use crate::config::PhysicsConfig;
use super::components::Body;
use super::entity::Entity;
use super::event::{Events, OverlapEvent};
use super::group::GroupId;
use super::transform::Transform;
use super::world::World;

/// Slack when deciding which side a body came from.
const CONTACT_EPSILON: f32 = 0.01;

/// Penetration below this is edge contact, not overlap.
const OVERLAP_EPSILON: f32 = 1e-3;

/// What a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Entity(Entity),
    Group(GroupId),
}

impl From<Entity> for Target {
    fn from(entity: Entity) -> Self {
        Target::Entity(entity)
    }
}

impl From<GroupId> for Target {
    fn from(group: GroupId) -> Self {
        Target::Group(group)
    }
}

/// Handle returned by [`Physics::add_overlap`], echoed in every event the
/// rule produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlapId(pub(crate) u32);

#[derive(Debug, Clone, Copy)]
struct ColliderRule {
    a: Target,
    b: Target,
}

#[derive(Debug, Clone, Copy)]
struct OverlapRule {
    id: OverlapId,
    a: Target,
    b: Target,
}

pub struct Physics {
    /// Acceleration applied to bodies with `allow_gravity`, px/s²
    pub gravity: Vec2,
    /// Region bodies with `collide_world_bounds` are kept inside
    pub bounds: Rect,
    /// Rebounds slower than this (px/s) come to rest
    pub rest_speed: f32,
    /// Draw body outlines
    pub debug: bool,
    paused: bool,
    colliders: Vec<ColliderRule>,
    overlaps: Vec<OverlapRule>,
    next_overlap: u32,
}

impl Physics {
    pub fn new(config: &PhysicsConfig, bounds: Rect) -> Self {
        Self {
            gravity: vec2(0.0, config.gravity),
            bounds,
            rest_speed: config.rest_speed,
            debug: false,
            paused: false,
            colliders: Vec::new(),
            overlaps: Vec::new(),
            next_overlap: 0,
        }
    }

    // =========================================================================
    // Rules
    // =========================================================================

    /// Blocking collision between two targets.
    pub fn add_collider(&mut self, a: impl Into<Target>, b: impl Into<Target>) {
        self.colliders.push(ColliderRule { a: a.into(), b: b.into() });
    }

    /// Detection-only check between two targets.
    pub fn add_overlap(&mut self, a: impl Into<Target>, b: impl Into<Target>) -> OverlapId {
        let id = OverlapId(self.next_overlap);
        self.next_overlap += 1;
        self.overlaps.push(OverlapRule { id, a: a.into(), b: b.into() });
        id
    }

    #[cfg(test)]
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    #[cfg(test)]
    pub fn overlap_count(&self) -> usize {
        self.overlaps.len()
    }

    /// Forget all rules and unpause (scene restart).
    pub fn reset(&mut self) {
        self.colliders.clear();
        self.overlaps.clear();
        self.next_overlap = 0;
        self.paused = false;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    #[cfg(test)]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    // =========================================================================
    // Simulation
    // =========================================================================

    pub fn step(&self, world: &mut World, events: &mut Events, dt: f32) {
        if self.paused {
            return;
        }
        self.integrate(world, dt);
        self.resolve_colliders(world);
        self.detect_overlaps(world, events);
    }

    fn integrate(&self, world: &mut World, dt: f32) {
        let World { bodies, transforms, .. } = world;

        for (index, body) in bodies.iter_mut() {
            if !body.enabled || body.is_static() {
                continue;
            }
            let Some(transform) = transforms.get_mut_by_index(index) else { continue };

            body.touching = Default::default();
            body.blocked = Default::default();
            body.prev_position = transform.position;

            if body.allow_gravity {
                body.velocity += self.gravity * dt;
            }
            transform.position += body.velocity * dt;

            if body.collide_world_bounds {
                self.clamp_to_bounds(body, transform);
            }
        }
    }

    fn clamp_to_bounds(&self, body: &mut Body, transform: &mut Transform) {
        let half = body.size * 0.5;
        let pos = &mut transform.position;
        let b = self.bounds;

        if pos.x - half.x < b.left() {
            pos.x = b.left() + half.x;
            if body.velocity.x < 0.0 {
                body.velocity.x = rebound(body.velocity.x, body.bounce.x, self.rest_speed);
            }
            body.blocked.left = true;
        } else if pos.x + half.x > b.right() {
            pos.x = b.right() - half.x;
            if body.velocity.x > 0.0 {
                body.velocity.x = rebound(body.velocity.x, body.bounce.x, self.rest_speed);
            }
            body.blocked.right = true;
        }

        if pos.y - half.y < b.top() {
            pos.y = b.top() + half.y;
            if body.velocity.y < 0.0 {
                body.velocity.y = rebound(body.velocity.y, body.bounce.y, self.rest_speed);
            }
            body.blocked.up = true;
        } else if pos.y + half.y > b.bottom() {
            pos.y = b.bottom() - half.y;
            if body.velocity.y > 0.0 {
                body.velocity.y = rebound(body.velocity.y, body.bounce.y, self.rest_speed);
            }
            body.blocked.down = true;
        }
    }

    fn resolve_colliders(&self, world: &mut World) {
        for rule in &self.colliders {
            let a_members = resolve(world, rule.a);
            let b_members = resolve(world, rule.b);

            for &a in &a_members {
                for &b in &b_members {
                    if a != b {
                        self.collide_pair(world, a, b);
                    }
                }
            }
        }
    }

    /// Push the moving member of a pair out of the static one.
    fn collide_pair(&self, world: &mut World, a: Entity, b: Entity) {
        let (Some(body_a), Some(body_b)) = (world.body(a), world.body(b)) else { return };
        if !body_a.enabled || !body_b.enabled {
            return;
        }

        let (mover, fixed) = match (body_a.is_static(), body_b.is_static()) {
            (false, true) => (a, b),
            (true, false) => (b, a),
            _ => return,
        };

        let Some(fixed_rect) = body_rect(world, fixed) else { return };
        let World { bodies, transforms, .. } = world;
        let (Some(body), Some(transform)) = (bodies.get_mut(mover), transforms.get_mut(mover)) else {
            return;
        };
        separate(body, transform, fixed_rect, self.rest_speed);
    }

    fn detect_overlaps(&self, world: &World, events: &mut Events) {
        for rule in &self.overlaps {
            let a_members = resolve(world, rule.a);
            let b_members = resolve(world, rule.b);

            for &a in &a_members {
                let Some(rect_a) = active_rect(world, a) else { continue };
                for &b in &b_members {
                    if a == b {
                        continue;
                    }
                    let Some(rect_b) = active_rect(world, b) else { continue };
                    if intersects(&rect_a, &rect_b) {
                        events.overlap.send(OverlapEvent { rule: rule.id, a, b });
                    }
                }
            }
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn resolve(world: &World, target: Target) -> Vec<Entity> {
    match target {
        Target::Entity(e) if world.is_alive(e) => vec![e],
        Target::Entity(_) => Vec::new(),
        Target::Group(id) => world.members(id).to_vec(),
    }
}

/// World rectangle of an entity's body.
pub fn body_rect(world: &World, entity: Entity) -> Option<Rect> {
    let body = world.body(entity)?;
    let transform = world.transforms.get(entity)?;
    Some(transform.centered_rect(body.size))
}

fn active_rect(world: &World, entity: Entity) -> Option<Rect> {
    if !world.body(entity)?.enabled {
        return None;
    }
    body_rect(world, entity)
}

/// Strict intersection: rectangles that only share an edge do not count.
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() - OVERLAP_EPSILON
        && a.right() > b.left() + OVERLAP_EPSILON
        && a.top() < b.bottom() - OVERLAP_EPSILON
        && a.bottom() > b.top() + OVERLAP_EPSILON
}

/// Reflected velocity after hitting a surface.
fn rebound(velocity: f32, bounce: f32, rest_speed: f32) -> f32 {
    let reflected = -velocity * bounce;
    if reflected.abs() < rest_speed {
        0.0
    } else {
        reflected
    }
}

/// Move a dynamic body out of a static rectangle. The side is picked from
/// where the body was before this step; a body that started inside is
/// pushed out along the shallower axis.
fn separate(body: &mut Body, transform: &mut Transform, fixed: Rect, rest_speed: f32) -> bool {
    let rect = transform.centered_rect(body.size);
    if !intersects(&rect, &fixed) {
        if resting_on(body, &rect, &fixed) {
            land_on_top(body, transform, fixed, rest_speed);
            return true;
        }
        return false;
    }
    let prev = Transform::from_position(body.prev_position).centered_rect(body.size);

    if prev.bottom() <= fixed.top() + CONTACT_EPSILON {
        land_on_top(body, transform, fixed, rest_speed);
    } else if prev.top() >= fixed.bottom() - CONTACT_EPSILON {
        hit_underside(body, transform, fixed, rest_speed);
    } else if prev.right() <= fixed.left() + CONTACT_EPSILON {
        hit_left_face(body, transform, fixed, rest_speed);
    } else if prev.left() >= fixed.right() - CONTACT_EPSILON {
        hit_right_face(body, transform, fixed, rest_speed);
    } else {
        let overlap_x = rect.right().min(fixed.right()) - rect.left().max(fixed.left());
        let overlap_y = rect.bottom().min(fixed.bottom()) - rect.top().max(fixed.top());
        let above = rect.center().y < fixed.center().y;
        let leftward = rect.center().x < fixed.center().x;
        debug!("Body embedded in static body, overlap ({:.1}, {:.1})", overlap_x, overlap_y);

        match (overlap_y <= overlap_x, above, leftward) {
            (true, true, _) => land_on_top(body, transform, fixed, rest_speed),
            (true, false, _) => hit_underside(body, transform, fixed, rest_speed),
            (false, _, true) => hit_left_face(body, transform, fixed, rest_speed),
            (false, _, false) => hit_right_face(body, transform, fixed, rest_speed),
        }
    }
    true
}

/// Bottom edge within `CONTACT_EPSILON` of the top of `fixed`, not moving
/// up, and horizontally over it.
fn resting_on(body: &Body, rect: &Rect, fixed: &Rect) -> bool {
    body.velocity.y >= 0.0
        && (rect.bottom() - fixed.top()).abs() <= CONTACT_EPSILON
        && rect.right() > fixed.left() + OVERLAP_EPSILON
        && rect.left() < fixed.right() - OVERLAP_EPSILON
}

fn land_on_top(body: &mut Body, transform: &mut Transform, fixed: Rect, rest: f32) {
    transform.position.y = fixed.top() - body.size.y * 0.5;
    if body.velocity.y > 0.0 {
        body.velocity.y = rebound(body.velocity.y, body.bounce.y, rest);
    }
    body.touching.down = true;
}

fn hit_underside(body: &mut Body, transform: &mut Transform, fixed: Rect, rest: f32) {
    transform.position.y = fixed.bottom() + body.size.y * 0.5;
    if body.velocity.y < 0.0 {
        body.velocity.y = rebound(body.velocity.y, body.bounce.y, rest);
    }
    body.touching.up = true;
}

fn hit_left_face(body: &mut Body, transform: &mut Transform, fixed: Rect, rest: f32) {
    transform.position.x = fixed.left() - body.size.x * 0.5;
    if body.velocity.x > 0.0 {
        body.velocity.x = rebound(body.velocity.x, body.bounce.x, rest);
    }
    body.touching.right = true;
}

fn hit_right_face(body: &mut Body, transform: &mut Transform, fixed: Rect, rest: f32) {
    transform.position.x = fixed.right() + body.size.x * 0.5;
    if body.velocity.x < 0.0 {
        body.velocity.x = rebound(body.velocity.x, body.bounce.x, rest);
    }
    body.touching.left = true;
}
