//! Event System
//!
//! The physics step does not call into the scene. It records what happened
//! (overlaps) in queues that the runtime drains right after the step and
//! hands to the scene together with an explicit context.

use super::entity::Entity;
use super::physics::OverlapId;

/// A queue for events of a single type.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Drain all events in send order.
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// All event queues of the runtime.
#[derive(Debug, Default)]
pub struct Events {
    /// Overlap rule matches from the last physics step
    pub overlap: EventQueue<OverlapEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_all(&mut self) {
        self.overlap.clear();
    }
}

/// Two enabled bodies covered by an overlap rule intersect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapEvent {
    /// Rule that matched (as returned by `Physics::add_overlap`)
    pub rule: OverlapId,
    /// Member of the rule's first target
    pub a: Entity,
    /// Member of the rule's second target
    pub b: Entity,
}
