//! Asset loading
//!
//! Two phases:
//! - a scene's `preload` fills a [`LoadQueue`] with images and spritesheets
//!   keyed by name, each with a nominal size
//! - the [`AssetCache`] takes the declarations (sizes are usable right
//!   away, without a GPU) and later loads the textures
//!
//! A file that fails to load is replaced by a flat placeholder of the
//! nominal size, so the game stays playable with a missing asset.

mod cache;
mod queue;

pub use cache::AssetCache;
pub use queue::LoadQueue;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AssetError {
    #[error("asset '{0}' was never declared")]
    UnknownKey(String),
    #[error("asset '{0}' is declared twice")]
    DuplicateKey(String),
    #[error("spritesheet '{key}': {width}x{height} is not a whole number of {frame_width}x{frame_height} frames")]
    BadSheet {
        key: String,
        width: u32,
        height: u32,
        frame_width: u32,
        frame_height: u32,
    },
    #[error("failed to load '{key}' from {path}: {message}")]
    Load {
        key: String,
        path: String,
        message: String,
    },
}
