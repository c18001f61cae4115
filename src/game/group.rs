//! Groups
//!
//! Ordered collections of entities (the platform set, the stars, the
//! bombs). Groups are what collider and overlap rules point at, so a group
//! that grows later (bombs) is picked up by rules registered earlier.

use super::entity::Entity;

/// Index of a group inside the [`World`](super::World).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(pub(crate) u32);

#[derive(Debug, Clone, Default)]
pub struct Group {
    members: Vec<Entity>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity; adding a member twice is a no-op.
    pub fn add(&mut self, entity: Entity) {
        if !self.members.contains(&entity) {
            self.members.push(entity);
        }
    }

    /// Members in insertion order.
    pub fn members(&self) -> &[Entity] {
        &self.members
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_idempotent_and_ordered() {
        let mut group = Group::new();
        let a = Entity::new(3, 0);
        let b = Entity::new(1, 0);

        group.add(a);
        group.add(b);
        group.add(a);
        assert_eq!(group.members(), &[a, b]);

    }
}
