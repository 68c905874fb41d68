//! Dense entity storage with liveness flags
//!
//! Entities are marked inactive during a tick and only removed by `compact`,
//! which the tick calls once after all updates and collisions. Indices stay
//! valid for the whole tick.

use serde::{Deserialize, Serialize};

/// Anything stored in an `EntityPool`
pub trait Entity {
    fn is_active(&self) -> bool;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityPool<T> {
    items: Vec<T>,
}

impl<T> Default for EntityPool<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> EntityPool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Total slots, including entities deactivated this tick
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of entities still alive
    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|e| e.is_active()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }

    /// Only the live entities
    pub fn active(&self) -> impl Iterator<Item = &T> {
        self.items.iter().filter(|e| e.is_active())
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    /// Drop inactive entities. Order of survivors is not preserved.
    pub fn compact(&mut self) -> usize {
        let before = self.items.len();
        let mut i = 0;
        while i < self.items.len() {
            if self.items[i].is_active() {
                i += 1;
            } else {
                self.items.swap_remove(i);
            }
        }
        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
