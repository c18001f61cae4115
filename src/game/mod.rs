//! Game Foundation Module
//!
//! A small entity store and arcade-physics runtime for single-screen 2D
//! platformers.
//!
//! Key concepts:
//! - Entity: Slot index tagged with the world epoch, so handles die on restart
//! - Component: Plain data structs attached to entities
//! - World: Container for all entities, components and groups
//! - Physics: Gravity, static platforms, collider and overlap rules
//! - Event: Overlaps recorded by the physics step for the scene to handle
//!
//! Design philosophy:
//! - Simple over flexible (we know what game we're making)
//! - No runtime type registration (compile-time known components)
//! - Scenes get explicit context, no callbacks into the simulation

pub mod entity;
pub mod component;
pub mod world;
pub mod event;
pub mod transform;
pub mod components;
pub mod group;
pub mod animation;
pub mod physics;
pub mod runtime;
pub mod renderer;

// Re-export main types
pub use entity::Entity;
pub use world::World;
pub use event::{Events, OverlapEvent};
pub use components::{Body, Text};
pub use group::GroupId;
pub use animation::{AnimationDef, Repeat};
pub use physics::{OverlapId, Physics};
pub use runtime::{Runtime, WORLD_HEIGHT, WORLD_WIDTH};
pub use renderer::{draw_message, draw_world};
