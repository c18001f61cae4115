//! Scene Renderer
//!
//! Draws the world once per displayed frame: sprites and text in spawn
//! order, then optional physics outlines. The 800x600 world is letterboxed
//! into whatever the window or canvas actually is.

use macroquad::prelude::*;

use crate::asset::AssetCache;
use super::components::{Sprite, Text};
use super::physics::{body_rect, Physics};
use super::runtime::{WORLD_HEIGHT, WORLD_WIDTH};
use super::transform::Transform;
use super::World;

const LETTERBOX: Color = Color::new(0.04, 0.04, 0.05, 1.0);
const DEBUG_DYNAMIC: Color = Color::new(0.3, 1.0, 0.3, 1.0);
const DEBUG_STATIC: Color = Color::new(0.3, 0.6, 1.0, 1.0);
const DEBUG_DISABLED: Color = Color::new(0.5, 0.5, 0.5, 0.6);
const DEBUG_CONTACT: Color = Color::new(1.0, 0.3, 0.3, 1.0);

/// Where the world lands on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

impl Viewport {
    /// Largest aspect-preserving fit of the world into the screen, centred.
    pub fn fit(screen_w: f32, screen_h: f32) -> Self {
        let scale = (screen_w / WORLD_WIDTH).min(screen_h / WORLD_HEIGHT);
        let w = WORLD_WIDTH * scale;
        let h = WORLD_HEIGHT * scale;
        Self {
            x: (screen_w - w) * 0.5,
            y: (screen_h - h) * 0.5,
            scale,
        }
    }

    /// World point to screen point.
    pub fn to_screen(&self, point: Vec2) -> Vec2 {
        vec2(self.x + point.x * self.scale, self.y + point.y * self.scale)
    }

    /// World rectangle to screen rectangle.
    pub fn rect_to_screen(&self, rect: Rect) -> Rect {
        let origin = self.to_screen(rect.point());
        Rect::new(origin.x, origin.y, rect.w * self.scale, rect.h * self.scale)
    }
}

/// Draw the world into the current frame.
pub fn draw_world(world: &World, assets: &AssetCache, physics: &Physics) {
    let viewport = Viewport::fit(screen_width(), screen_height());

    clear_background(LETTERBOX);
    draw_rectangle(viewport.x, viewport.y, WORLD_WIDTH * viewport.scale, WORLD_HEIGHT * viewport.scale, BLACK);

    for &entity in world.entities() {
        let Some(transform) = world.transforms.get(entity) else { continue };

        if let Some(sprite) = world.sprites.get(entity) {
            draw_sprite(&viewport, transform, sprite, assets);
        }
        if let Some(text) = world.texts.get(entity) {
            draw_label(&viewport, transform, text);
        }
    }

    if physics.debug {
        draw_bodies(&viewport, world);
    }
}

fn draw_sprite(viewport: &Viewport, transform: &Transform, sprite: &Sprite, assets: &AssetCache) {
    if !sprite.visible {
        return;
    }
    let Ok(frame_size) = assets.frame_size(&sprite.texture) else { return };
    let dest = viewport.rect_to_screen(transform.centered_rect(frame_size * transform.scale));

    match assets.texture(&sprite.texture) {
        Some(texture) => {
            draw_texture_ex(
                texture,
                dest.x,
                dest.y,
                sprite.tint,
                DrawTextureParams {
                    dest_size: Some(dest.size()),
                    source: assets.frame_rect(&sprite.texture, sprite.frame),
                    ..Default::default()
                },
            );
        }
        None => {
            // Headless or not loaded yet
            let base = assets.placeholder_color(&sprite.texture).unwrap_or(MAGENTA);
            let color = Color::new(
                base.r * sprite.tint.r,
                base.g * sprite.tint.g,
                base.b * sprite.tint.b,
                base.a * sprite.tint.a,
            );
            draw_rectangle(dest.x, dest.y, dest.w, dest.h, color);
        }
    }
}

/// Text is anchored at its top-left corner.
fn draw_label(viewport: &Viewport, transform: &Transform, text: &Text) {
    let font_size = (text.font_size * viewport.scale).round().max(1.0) as u16;
    let dims = measure_text(&text.content, None, font_size, 1.0);
    let origin = viewport.to_screen(transform.position);
    draw_text(&text.content, origin.x, origin.y + dims.offset_y, font_size as f32, text.color);
}

fn draw_bodies(viewport: &Viewport, world: &World) {
    for &entity in world.entities() {
        let Some(body) = world.body(entity) else { continue };
        let Some(rect) = body_rect(world, entity) else { continue };
        let r = viewport.rect_to_screen(rect);

        let color = if !body.enabled {
            DEBUG_DISABLED
        } else if body.is_static() {
            DEBUG_STATIC
        } else {
            DEBUG_DYNAMIC
        };
        draw_rectangle_lines(r.x, r.y, r.w, r.h, 1.0, color);

        if body.touching.down {
            draw_line(r.x, r.bottom(), r.right(), r.bottom(), 2.0, DEBUG_CONTACT);
        }
        if body.enabled && !body.is_static() {
            let centre = viewport.to_screen(rect.center());
            let tip = centre + body.velocity * 0.1 * viewport.scale;
            draw_line(centre.x, centre.y, tip.x, tip.y, 1.0, color);
        }
    }
}

/// Full-screen message, used when the scene could not be built.
pub fn draw_message(title: &str, detail: &str) {
    let viewport = Viewport::fit(screen_width(), screen_height());
    clear_background(LETTERBOX);

    let title_pos = viewport.to_screen(vec2(40.0, 260.0));
    let detail_pos = viewport.to_screen(vec2(40.0, 300.0));
    draw_text(title, title_pos.x, title_pos.y, 32.0 * viewport.scale, RED);
    draw_text(detail, detail_pos.x, detail_pos.y, 18.0 * viewport.scale, LIGHTGRAY);
}
