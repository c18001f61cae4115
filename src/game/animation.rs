//! Sprite Animation
//!
//! Named frame sequences over a spritesheet, registered once in an
//! [`AnimationLibrary`] and played per entity through an [`Animator`].
//!
//! `play(key, ignore_if_playing)`:
//! - unknown key: nothing happens, the caller gets `false`
//! - same key already running and `ignore_if_playing`: keep going
//! - otherwise: restart from the first frame

use std::collections::HashMap;
use std::ops::RangeInclusive;

use log::warn;

use super::world::World;

/// How many times an animation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Loop until another animation is played
    Forever,
    /// Play once plus `n` extra times, then hold the last frame
    Times(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationDef {
    pub key: String,
    /// Spritesheet the frames index into
    pub texture: String,
    pub frames: Vec<u32>,
    /// Frames per second
    pub frame_rate: f32,
    pub repeat: Repeat,
}

impl AnimationDef {
    /// Consecutive spritesheet frames, e.g. `0..=3`.
    pub fn frame_range(
        key: &str,
        texture: &str,
        frames: RangeInclusive<u32>,
        frame_rate: f32,
        repeat: Repeat,
    ) -> Self {
        Self {
            key: key.to_string(),
            texture: texture.to_string(),
            frames: frames.collect(),
            frame_rate,
            repeat,
        }
    }

    /// Seconds each frame stays on screen.
    fn frame_duration(&self) -> f32 {
        if self.frame_rate > 0.0 {
            1.0 / self.frame_rate
        } else {
            f32::INFINITY
        }
    }
}

/// Global registry of animations, keyed by name.
#[derive(Debug, Default)]
pub struct AnimationLibrary {
    defs: HashMap<String, AnimationDef>,
}

impl AnimationLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an animation. Re-registering a key replaces it (scene restarts
    /// recreate the same set).
    pub fn create(&mut self, def: AnimationDef) {
        if def.frames.is_empty() {
            warn!("Animation '{}' has no frames, ignoring", def.key);
            return;
        }
        self.defs.insert(def.key.clone(), def);
    }

    pub fn get(&self, key: &str) -> Option<&AnimationDef> {
        self.defs.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.defs.contains_key(key)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn clear(&mut self) {
        self.defs.clear();
    }
}

/// Playback state for one sprite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Animator {
    current: Option<String>,
    frame_index: usize,
    elapsed: f32,
    repeats_done: u32,
    playing: bool,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_key(&self) -> Option<&str> {
        self.current.as_deref()
    }

    #[cfg(test)]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Position within the current animation's frame list.
    #[cfg(test)]
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Start (or keep) an animation. Returns false for an unknown key.
    pub fn play(&mut self, library: &AnimationLibrary, key: &str, ignore_if_playing: bool) -> bool {
        if !library.contains(key) {
            return false;
        }
        if ignore_if_playing && self.playing && self.current_key() == Some(key) {
            return true;
        }

        self.current = Some(key.to_string());
        self.frame_index = 0;
        self.elapsed = 0.0;
        self.repeats_done = 0;
        self.playing = true;
        true
    }

    /// Step the clock by `dt` seconds and return the spritesheet frame to
    /// display, if an animation is set.
    pub fn advance(&mut self, library: &AnimationLibrary, dt: f32) -> Option<u32> {
        let def = library.get(self.current.as_deref()?)?;

        if self.playing {
            self.elapsed += dt;
            let duration = def.frame_duration();
            while self.playing && self.elapsed >= duration {
                self.elapsed -= duration;
                self.step_frame(def);
            }
        }

        def.frames.get(self.frame_index).copied()
    }

    fn step_frame(&mut self, def: &AnimationDef) {
        if self.frame_index + 1 < def.frames.len() {
            self.frame_index += 1;
            return;
        }

        match def.repeat {
            Repeat::Forever => self.frame_index = 0,
            Repeat::Times(n) if self.repeats_done < n => {
                self.repeats_done += 1;
                self.frame_index = 0;
            }
            Repeat::Times(_) => {
                // Hold the last frame
                self.playing = false;
                self.elapsed = 0.0;
            }
        }
    }
}

/// Advance every animator and copy the resulting frame into its sprite.
pub fn advance_all(world: &mut World, dt: f32) {
    let World { animators, sprites, anims, .. } = world;
    for (index, animator) in animators.iter_mut() {
        if let Some(frame) = animator.advance(anims, dt) {
            if let Some(sprite) = sprites.get_mut_by_index(index) {
                sprite.frame = frame;
            }
        }
    }
}
