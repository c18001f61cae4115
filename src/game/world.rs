//! Game World
//!
//! The World owns every game object of the running scene:
//! - entity allocation and spawn order (doubles as draw order)
//! - component storage (transforms, sprites, bodies, animators, text)
//! - groups used as collider/overlap targets
//! - the animation library shared by all sprites
//!
//! Component types are fixed fields rather than a type-erased map; the
//! scene knows exactly what it needs. Objects live until the world is
//! cleared; the scene disables bodies instead of removing them.

use log::warn;
use macroquad::math::Vec2;

use super::animation::{AnimationLibrary, Animator};
use super::component::ComponentStorage;
use super::components::{Body, Sprite, Text};
use super::entity::{Entity, EntityAllocator};
use super::group::{Group, GroupId};
use super::transform::Transform;

pub struct World {
    entities: EntityAllocator,

    /// Live entities in spawn order
    order: Vec<Entity>,

    groups: Vec<Group>,

    pub transforms: ComponentStorage<Transform>,
    pub sprites: ComponentStorage<Sprite>,
    pub bodies: ComponentStorage<Body>,
    pub animators: ComponentStorage<Animator>,
    pub texts: ComponentStorage<Text>,

    pub anims: AnimationLibrary,
}

impl World {
    pub fn new() -> Self {
        Self {
            entities: EntityAllocator::new(),
            order: Vec::new(),
            groups: Vec::new(),
            transforms: ComponentStorage::new(),
            sprites: ComponentStorage::new(),
            bodies: ComponentStorage::new(),
            animators: ComponentStorage::new(),
            texts: ComponentStorage::new(),
            anims: AnimationLibrary::new(),
        }
    }

    // =========================================================================
    // Entity Management
    // =========================================================================

    /// Spawn an entity with only a transform.
    pub fn spawn_at(&mut self, position: Vec2) -> Entity {
        let entity = self.entities.allocate();
        self.transforms.insert(entity, Transform::from_position(position));
        self.order.push(entity);
        entity
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    pub fn entity_count(&self) -> u32 {
        self.entities.alive_count()
    }

    /// Live entities in spawn order.
    pub fn entities(&self) -> &[Entity] {
        &self.order
    }

    /// Drop every entity, group and animation (scene restart).
    pub fn clear(&mut self) {
        self.entities.clear();
        self.order.clear();
        self.groups.clear();
        self.transforms.clear();
        self.sprites.clear();
        self.bodies.clear();
        self.animators.clear();
        self.texts.clear();
        self.anims.clear();
    }

    // =========================================================================
    // Convenience Spawners
    // =========================================================================

    /// Decorative image with no body (background).
    pub fn spawn_image(&mut self, position: Vec2, texture: &str) -> Entity {
        let entity = self.spawn_at(position);
        self.sprites.insert(entity, Sprite::new(texture));
        entity
    }

    /// Sprite with a physics body centred on `position`.
    pub fn spawn_sprite(&mut self, position: Vec2, texture: &str, mut body: Body) -> Entity {
        let entity = self.spawn_image(position, texture);
        body.prev_position = position;
        self.bodies.insert(entity, body);
        entity
    }

    /// Text label anchored at its top-left corner.
    pub fn spawn_text(&mut self, position: Vec2, text: Text) -> Entity {
        let entity = self.spawn_at(position);
        self.texts.insert(entity, text);
        entity
    }

    // =========================================================================
    // Component Helpers
    // =========================================================================

    pub fn position(&self, entity: Entity) -> Option<Vec2> {
        if !self.is_alive(entity) {
            return None;
        }
        self.transforms.get(entity).map(|t| t.position)
    }

    pub fn body(&self, entity: Entity) -> Option<&Body> {
        if !self.is_alive(entity) {
            return None;
        }
        self.bodies.get(entity)
    }

    pub fn body_mut(&mut self, entity: Entity) -> Option<&mut Body> {
        if !self.is_alive(entity) {
            return None;
        }
        self.bodies.get_mut(entity)
    }

    /// Change the uniform scale, resizing the body to match.
    pub fn set_scale(&mut self, entity: Entity, scale: f32) {
        let Some(transform) = self.transforms.get_mut(entity) else { return };
        let old = transform.scale;
        transform.scale = scale;

        if let Some(body) = self.bodies.get_mut(entity) {
            if old > 0.0 {
                body.size = body.size / old * scale;
            }
        }
    }

    /// Take a body out of the simulation, optionally hiding its sprite.
    pub fn disable_body(&mut self, entity: Entity, hide: bool) {
        if let Some(body) = self.body_mut(entity) {
            body.enabled = false;
            body.velocity = Vec2::ZERO;
        }
        if hide {
            if let Some(sprite) = self.sprites.get_mut(entity) {
                sprite.visible = false;
            }
        }
    }

    /// Put a body back into the simulation. With `reset_to`, the object is
    /// moved there and stopped.
    pub fn enable_body(&mut self, entity: Entity, reset_to: Option<Vec2>, show: bool) {
        if !self.is_alive(entity) {
            return;
        }
        if let Some(position) = reset_to {
            if let Some(transform) = self.transforms.get_mut(entity) {
                transform.position = position;
            }
            if let Some(body) = self.bodies.get_mut(entity) {
                body.reset_motion(position);
            }
        }
        if let Some(body) = self.bodies.get_mut(entity) {
            body.enabled = true;
        }
        if show {
            if let Some(sprite) = self.sprites.get_mut(entity) {
                sprite.visible = true;
            }
        }
    }

    /// Play an animation on an entity, attaching an animator if needed.
    pub fn play_animation(&mut self, entity: Entity, key: &str, ignore_if_playing: bool) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        if !self.animators.contains(entity) {
            self.animators.insert(entity, Animator::new());
        }

        let Some(animator) = self.animators.get_mut(entity) else { return false };
        let started = animator.play(&self.anims, key, ignore_if_playing);
        if !started {
            warn!("Animation '{}' is not registered", key);
        }
        started
    }

    // =========================================================================
    // Groups
    // =========================================================================

    pub fn create_group(&mut self) -> GroupId {
        self.groups.push(Group::new());
        GroupId(self.groups.len() as u32 - 1)
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id.0 as usize)
    }

    /// Add a live entity to a group. Returns false for an unknown group or
    /// a dead entity.
    pub fn add_to_group(&mut self, id: GroupId, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        match self.groups.get_mut(id.0 as usize) {
            Some(group) => {
                group.add(entity);
                true
            }
            None => false,
        }
    }

    /// Group members, or an empty slice for an unknown group.
    pub fn members(&self, id: GroupId) -> &[Entity] {
        self.group(id).map(|g| g.members()).unwrap_or(&[])
    }

    /// Members whose body is enabled.
    pub fn count_active(&self, id: GroupId) -> usize {
        self.members(id)
            .iter()
            .filter(|&&e| self.body(e).is_some_and(|b| b.enabled))
            .count()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
