//! Transform
//!
//! 2D placement for every game object. Positions are sprite centres in
//! world pixels (y grows downward, origin at the top-left of the world),
//! matching how the scene lays out platforms and stars.

use macroquad::math::{Rect, Vec2};

/// Position and uniform scale of a game object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Centre of the object
    pub position: Vec2,
    /// Uniform scale applied to the sprite and (after a refresh) its body
    pub scale: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Vec2::ZERO,
        scale: 1.0,
    };

    pub fn from_position(position: Vec2) -> Self {
        Self { position, scale: 1.0 }
    }

    /// Axis-aligned rectangle of `size` centred on this transform.
    pub fn centered_rect(&self, size: Vec2) -> Rect {
        Rect::new(
            self.position.x - size.x * 0.5,
            self.position.y - size.y * 0.5,
            size.x,
            size.y,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::math::vec2;

    #[test]
    fn test_centered_rect() {
        let t = Transform::from_position(vec2(400.0, 568.0));
        let r = t.centered_rect(vec2(800.0, 64.0));
        assert_eq!(r.x, 0.0);
        assert_eq!(r.y, 536.0);
        assert_eq!(r.bottom(), 600.0);
    }

    #[test]
    fn test_default_is_unscaled_origin() {
        let t = Transform::default();
        assert_eq!(t.position, Vec2::ZERO);
        assert_eq!(t.scale, 1.0);
    }
}
