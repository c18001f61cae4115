//! Game Components
//!
//! Plain data attached to entities. Behaviour lives in the physics step,
//! the animation player and the scene.

use macroquad::color::{Color, WHITE};
use macroquad::math::{vec2, Vec2};

// =============================================================================
// Physics
// =============================================================================

/// Whether a body is simulated or fixed in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Moves under velocity and gravity
    Dynamic,
    /// Never moves, unaffected by forces (platforms)
    Static,
}

/// Per-side contact flags, cleared at the start of every physics step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Touching {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Touching {
    #[cfg(test)]
    pub fn none(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }
}

/// Axis-aligned arcade physics body. Its centre is the entity's
/// [`Transform`](super::transform::Transform) position.
#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub kind: BodyKind,
    /// Full extents in world pixels (already scaled)
    pub size: Vec2,
    pub velocity: Vec2,
    /// Fraction of velocity kept when reflecting off a surface, per axis
    pub bounce: Vec2,
    pub allow_gravity: bool,
    pub collide_world_bounds: bool,
    /// Disabled bodies are skipped by integration, colliders and overlaps
    pub enabled: bool,
    /// Contacts with other bodies during the last step
    pub touching: Touching,
    /// Contacts with the world bounds during the last step
    pub blocked: Touching,
    /// Centre before the last integration (used to find the contact side)
    pub prev_position: Vec2,
}

impl Body {
    pub fn dynamic(size: Vec2) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            size,
            velocity: Vec2::ZERO,
            bounce: Vec2::ZERO,
            allow_gravity: true,
            collide_world_bounds: false,
            enabled: true,
            touching: Touching::default(),
            blocked: Touching::default(),
            prev_position: Vec2::ZERO,
        }
    }

    pub fn fixed(size: Vec2) -> Self {
        Self {
            kind: BodyKind::Static,
            allow_gravity: false,
            ..Self::dynamic(size)
        }
    }

    pub fn with_bounce(mut self, x: f32, y: f32) -> Self {
        self.bounce = vec2(x, y);
        self
    }

    pub fn with_world_bounds(mut self) -> Self {
        self.collide_world_bounds = true;
        self
    }

    pub fn is_static(&self) -> bool {
        self.kind == BodyKind::Static
    }

    /// Stop the body and clear its contacts (used when re-enabling).
    pub fn reset_motion(&mut self, position: Vec2) {
        self.velocity = Vec2::ZERO;
        self.touching = Touching::default();
        self.blocked = Touching::default();
        self.prev_position = position;
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Textured quad drawn centred on the transform.
#[derive(Debug, Clone)]
pub struct Sprite {
    /// Asset key of the image or spritesheet
    pub texture: String,
    /// Spritesheet frame (always 0 for plain images)
    pub frame: u32,
    pub visible: bool,
    pub tint: Color,
}

impl Sprite {
    pub fn new(texture: impl Into<String>) -> Self {
        Self {
            texture: texture.into(),
            frame: 0,
            visible: true,
            tint: WHITE,
        }
    }
}

/// Screen text anchored at its top-left corner.
#[derive(Debug, Clone)]
pub struct Text {
    pub content: String,
    pub font_size: f32,
    pub color: Color,
}
