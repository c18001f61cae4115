//! Entity Ids
//!
//! Every game object in the scene (player, star, platform, bomb, label) is
//! an `Entity`. Objects are never removed one at a time: stars are disabled
//! and re-enabled, bombs stay until the scene restarts. A restart drops the
//! whole world at once, so an entity is a slot index plus the epoch it was
//! minted in, and a restart just starts a new epoch.

/// Handle to a game object owned by the [`World`](super::World).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    index: u32,
    epoch: u32,
}

impl Entity {
    /// Only the allocator mints entities.
    pub(crate) fn new(index: u32, epoch: u32) -> Self {
        Self { index, epoch }
    }

    /// Slot index (used to address component storage).
    pub fn index(&self) -> u32 {
        self.index
    }
}

/// Hands out slots in spawn order for the current epoch.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    epoch: u32,
    next_index: u32,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> Entity {
        let entity = Entity::new(self.next_index, self.epoch);
        self.next_index += 1;
        entity
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        entity.epoch == self.epoch && entity.index < self.next_index
    }

    pub fn alive_count(&self) -> u32 {
        self.next_index
    }

    /// Invalidate every handle at once (scene restart).
    pub fn clear(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.next_index = 0;
    }
}
