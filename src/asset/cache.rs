//! Asset cache
//!
//! Holds every declared asset by key. Sizes come from the declaration until
//! a texture is loaded; the renderer draws placeholders for anything that
//! has no texture.

use std::collections::HashMap;

use log::{debug, info, warn};
use macroquad::color::Color;
use macroquad::file::load_file;
use macroquad::math::{vec2, Rect, Vec2};
use macroquad::texture::{FilterMode, Image, Texture2D};

use super::queue::{AssetDecl, AssetKind, LoadQueue};
use super::AssetError;

struct CachedAsset {
    decl: AssetDecl,
    texture: Option<Texture2D>,
}

impl CachedAsset {
    fn frame_size(&self) -> Vec2 {
        match self.decl.kind {
            AssetKind::Image => vec2(self.decl.width as f32, self.decl.height as f32),
            AssetKind::SpriteSheet { frame_width, frame_height } => {
                vec2(frame_width as f32, frame_height as f32)
            }
        }
    }

    fn columns(&self) -> u32 {
        match self.decl.kind {
            AssetKind::Image => 1,
            AssetKind::SpriteSheet { frame_width, .. } => (self.decl.width / frame_width).max(1),
        }
    }

    fn frame_count(&self) -> u32 {
        match self.decl.kind {
            AssetKind::Image => 1,
            AssetKind::SpriteSheet { frame_width, frame_height } => {
                (self.decl.width / frame_width) * (self.decl.height / frame_height)
            }
        }
    }
}

#[derive(Default)]
pub struct AssetCache {
    entries: HashMap<String, CachedAsset>,
    /// Declaration order, used for loading
    order: Vec<String>,
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every declaration of a queue. Sizes are available as soon as
    /// this returns.
    pub fn declare(&mut self, queue: &LoadQueue) -> Result<(), AssetError> {
        for decl in queue.declarations() {
            if self.entries.contains_key(&decl.key) {
                return Err(AssetError::DuplicateKey(decl.key.clone()));
            }
            if let AssetKind::SpriteSheet { frame_width, frame_height } = decl.kind {
                let fits = frame_width > 0
                    && frame_height > 0
                    && decl.width % frame_width == 0
                    && decl.height % frame_height == 0;
                if !fits {
                    return Err(AssetError::BadSheet {
                        key: decl.key.clone(),
                        width: decl.width,
                        height: decl.height,
                        frame_width,
                        frame_height,
                    });
                }
            }

            debug!("Declared asset '{}' ({})", decl.key, decl.path());
            self.order.push(decl.key.clone());
            self.entries.insert(decl.key.clone(), CachedAsset { decl: decl.clone(), texture: None });
        }
        Ok(())
    }

    /// Load textures for every declared asset. Files that fail are replaced
    /// by placeholders; the failures are returned for reporting.
    pub async fn load_textures(&mut self) -> Vec<AssetError> {
        let mut failures = Vec::new();

        for key in &self.order {
            let Some(entry) = self.entries.get_mut(key) else { continue };
            let path = entry.decl.path();

            let texture = match load_image(&path).await {
                Ok(image) => {
                    if image.width as u32 != entry.decl.width || image.height as u32 != entry.decl.height {
                        warn!(
                            "Asset '{}' is {}x{}, expected {}x{}",
                            key, image.width, image.height, entry.decl.width, entry.decl.height
                        );
                    }
                    Texture2D::from_image(&image)
                }
                Err(message) => {
                    let error = AssetError::Load { key: key.clone(), path, message };
                    warn!("{}, using placeholder", error);
                    failures.push(error);

                    let pixels = placeholder_pixels(entry.decl.width, entry.decl.height, entry.decl.placeholder);
                    Texture2D::from_rgba8(entry.decl.width as u16, entry.decl.height as u16, &pixels)
                }
            };
            texture.set_filter(FilterMode::Nearest);
            entry.texture = Some(texture);
        }

        info!("Loaded {} textures ({} placeholders)", self.order.len(), failures.len());
        failures
    }

    fn entry(&self, key: &str) -> Result<&CachedAsset, AssetError> {
        self.entries.get(key).ok_or_else(|| AssetError::UnknownKey(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Size of one displayed frame (the whole image for plain images).
    pub fn frame_size(&self, key: &str) -> Result<Vec2, AssetError> {
        Ok(self.entry(key)?.frame_size())
    }

    /// Source rectangle of a frame inside the texture. Frames run left to
    /// right, then top to bottom; out of range frames clamp to the last.
    pub fn frame_rect(&self, key: &str, frame: u32) -> Option<Rect> {
        let entry = self.entries.get(key)?;
        let size = entry.frame_size();
        let frame = frame.min(entry.frame_count().saturating_sub(1));
        let columns = entry.columns();
        let col = frame % columns;
        let row = frame / columns;
        Some(Rect::new(col as f32 * size.x, row as f32 * size.y, size.x, size.y))
    }

    pub fn texture(&self, key: &str) -> Option<&Texture2D> {
        self.entries.get(key)?.texture.as_ref()
    }

    pub fn placeholder_color(&self, key: &str) -> Option<Color> {
        self.entries.get(key).map(|e| e.decl.placeholder)
    }
}

async fn load_image(path: &str) -> Result<Image, String> {
    let bytes = load_file(path).await.map_err(|e| e.to_string())?;
    Image::from_file_with_format(&bytes, None).map_err(|e| e.to_string())
}

/// RGBA pixels of a flat placeholder with a one pixel darker border.
pub fn placeholder_pixels(width: u32, height: u32, color: Color) -> Vec<u8> {
    let fill: [u8; 4] = color.into();
    let edge = [fill[0] / 2, fill[1] / 2, fill[2] / 2, 255];

    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let border = x == 0 || y == 0 || x + 1 == width || y + 1 == height;
            pixels.extend_from_slice(if border { &edge } else { &fill });
        }
    }
    pixels
}
