//! Load queue filled during a scene's preload phase.

use macroquad::color::Color;

/// Directory asset paths are relative to
pub const ASSETS_DIR: &str = "assets";

/// Flat colours used when a texture is missing, picked by declaration order.
const PLACEHOLDER_COLORS: [Color; 5] = [
    Color::new(0.40, 0.70, 0.95, 1.0),
    Color::new(0.20, 0.20, 0.20, 1.0),
    Color::new(0.35, 0.65, 0.30, 1.0),
    Color::new(0.95, 0.85, 0.20, 1.0),
    Color::new(0.55, 0.35, 0.75, 1.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    /// Horizontal strip (or grid) of equally sized frames
    SpriteSheet { frame_width: u32, frame_height: u32 },
}

/// One declared asset.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetDecl {
    pub key: String,
    /// File name relative to [`ASSETS_DIR`]
    pub file: String,
    pub kind: AssetKind,
    /// Size of the whole image as shipped
    pub width: u32,
    pub height: u32,
    pub placeholder: Color,
}

impl AssetDecl {
    pub fn path(&self) -> String {
        format!("{}/{}", ASSETS_DIR, self.file)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadQueue {
    decls: Vec<AssetDecl>,
}

impl LoadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&mut self, key: &str, file: &str, width: u32, height: u32) -> &mut Self {
        self.push(key, file, AssetKind::Image, width, height)
    }

    pub fn spritesheet(
        &mut self,
        key: &str,
        file: &str,
        frame_width: u32,
        frame_height: u32,
        width: u32,
        height: u32,
    ) -> &mut Self {
        self.push(key, file, AssetKind::SpriteSheet { frame_width, frame_height }, width, height)
    }

    fn push(&mut self, key: &str, file: &str, kind: AssetKind, width: u32, height: u32) -> &mut Self {
        let placeholder = PLACEHOLDER_COLORS[self.decls.len() % PLACEHOLDER_COLORS.len()];
        self.decls.push(AssetDecl {
            key: key.to_string(),
            file: file.to_string(),
            kind,
            width,
            height,
            placeholder,
        });
        self
    }

    pub fn declarations(&self) -> &[AssetDecl] {
        &self.decls
    }
}
