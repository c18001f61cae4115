//! Component Storage
//!
//! `ComponentStorage<T>` is a sparse array indexed by entity slot. The
//! scene holds a few dozen objects at most, so a flat `Vec<Option<T>>` per
//! component type is all the structure we need.

use super::entity::Entity;

/// Sparse per-slot storage for one component type.
///
/// Lookups go by `entity.index()` only; liveness (epoch) is checked by
/// the [`World`](super::World), which clears every storage on restart.
pub struct ComponentStorage<T> {
    data: Vec<Option<T>>,
}

impl<T> ComponentStorage<T> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    fn ensure_capacity(&mut self, index: usize) {
        if index >= self.data.len() {
            self.data.resize_with(index + 1, || None);
        }
    }

    /// Insert (or replace) the component for an entity.
    pub fn insert(&mut self, entity: Entity, component: T) {
        let idx = entity.index() as usize;
        self.ensure_capacity(idx);
        self.data[idx] = Some(component);
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        let idx = entity.index() as usize;
        self.data.get(idx).and_then(|opt| opt.as_ref())
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let idx = entity.index() as usize;
        self.data.get_mut(idx).and_then(|opt| opt.as_mut())
    }

    /// Slot access for joins driven by another storage's `iter_mut()`.
    pub fn get_mut_by_index(&mut self, index: u32) -> Option<&mut T> {
        self.data.get_mut(index as usize).and_then(|opt| opt.as_mut())
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.get(entity).is_some()
    }

    /// Iterate over `(slot index, component)` pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (u32, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .filter_map(|(idx, opt)| opt.as_mut().map(|c| (idx as u32, c)))
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl<T> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replace_and_get() {
        let mut storage: ComponentStorage<f32> = ComponentStorage::new();
        let star = Entity::new(4, 0);

        storage.insert(star, 0.4);
        storage.insert(star, 0.7);
        assert_eq!(storage.get(star), Some(&0.7));
        assert!(!storage.contains(Entity::new(3, 0)));
        assert_eq!(storage.get(Entity::new(50, 0)), None);
    }

    #[test]
    fn test_sparse_iteration_skips_holes() {
        let mut storage: ComponentStorage<u32> = ComponentStorage::new();
        storage.insert(Entity::new(1, 0), 10);
        storage.insert(Entity::new(6, 0), 60);

        let mut seen = Vec::new();
        for (index, value) in storage.iter_mut() {
            *value += 1;
            seen.push(index);
        }
        assert_eq!(seen, vec![1, 6]);
        assert_eq!(storage.get(Entity::new(6, 0)), Some(&61));
        assert_eq!(storage.get_mut_by_index(1).copied(), Some(11));
    }

    #[test]
    fn test_clear_empties_every_slot() {
        let mut storage: ComponentStorage<&str> = ComponentStorage::new();
        let sky = Entity::new(0, 0);
        storage.insert(sky, "sky");

        storage.clear();
        assert!(!storage.contains(sky));
    }
}
