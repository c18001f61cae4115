//! Star Catcher: a single-screen 2D platformer
//!
//! Run and jump across four platforms, catch the twelve falling stars,
//! keep away from the bombs every catch drops.
//! - Arrow keys / D-pad: move and jump
//! - R / Start: restart
//! - F1 / Select: physics outlines

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod asset;
mod config;
mod game;
mod input;
mod scene;
mod scenes;
mod ui;

use log::{error, info, warn};
use macroquad::prelude::*;

use game::{draw_message, draw_world, Runtime, WORLD_HEIGHT, WORLD_WIDTH};
use input::InputState;
use scene::SceneError;
use scenes::GameScene;

fn window_conf() -> Conf {
    let config = config::load_or_default();
    Conf {
        window_title: format!("{} v{}", config.window.title, VERSION),
        window_width: WORLD_WIDTH as i32,
        window_height: WORLD_HEIGHT as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Star Catcher v{}", VERSION);
    let config = config::load_or_default();

    let mut runtime = match Runtime::new(GameScene::new(), config) {
        Ok(runtime) => runtime,
        Err(e) => return show_error(&e).await,
    };

    let failures = runtime.assets_mut().load_textures().await;
    if !failures.is_empty() {
        warn!("{} assets missing, drawing placeholders", failures.len());
    }

    if let Err(e) = runtime.start() {
        return show_error(&e).await;
    }

    let mut input = InputState::new();
    if input.has_gamepad() {
        info!("Gamepad detected");
    }

    loop {
        let frame = input.poll();
        if let Err(e) = runtime.advance(get_frame_time(), &frame) {
            return show_error(&e).await;
        }

        draw_world(runtime.world(), runtime.assets(), runtime.physics());
        next_frame().await;
    }
}

/// Keep the window open with the error on screen.
async fn show_error(e: &SceneError) {
    error!("Scene failed: {}", e);
    let detail = e.to_string();
    loop {
        draw_message("Could not start the game", &detail);
        next_frame().await;
    }
}
