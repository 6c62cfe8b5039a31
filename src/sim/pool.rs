//! Fixed-capacity entity pools
//!
//! Slots are allocated by scanning for the first inactive one. A full pool
//! reports `PoolExhausted`; simulation callers treat that as "drop the spawn".

use serde::{Deserialize, Serialize};

use crate::error::PoolExhausted;

/// An entity that has an off-screen resting state for released slots
pub trait Parked {
    /// Value a slot holds while inactive
    fn parked() -> Self;
}

/// One pool slot with its active flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot<T> {
    pub active: bool,
    pub entity: T,
}

/// Bounded arena of entities with per-slot active flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pool<T> {
    slots: Vec<Slot<T>>,
}

impl<T: Parked> Pool<T> {
    /// Create a pool of `capacity` parked, inactive slots
    pub fn new(capacity: usize) -> Self {
        let slots = (0..capacity)
            .map(|_| Slot {
                active: false,
                entity: T::parked(),
            })
            .collect();
        Self { slots }
    }

    /// Claim the lowest-index inactive slot and mark it active
    ///
    /// The slot still holds its parked value; the caller initializes it.
    pub fn allocate(&mut self) -> Result<usize, PoolExhausted> {
        let capacity = self.capacity();
        let index = self
            .slots
            .iter()
            .position(|slot| !slot.active)
            .ok_or(PoolExhausted { capacity })?;
        self.slots[index].active = true;
        Ok(index)
    }

    /// Allocate a slot and fill it with `entity`
    pub fn spawn(&mut self, entity: T) -> Result<usize, PoolExhausted> {
        let index = self.allocate()?;
        self.slots[index].entity = entity;
        Ok(index)
    }

    /// Deactivate a slot and park its entity. Out-of-range or inactive slots are ignored.
    pub fn release(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            if slot.active {
                slot.active = false;
                slot.entity = T::parked();
            }
        }
    }

    /// Release every active slot
    pub fn clear(&mut self) {
        for index in 0..self.slots.len() {
            self.release(index);
        }
    }
}

impl<T> Pool<T> {
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.active).count()
    }

    pub fn free_count(&self) -> usize {
        self.capacity() - self.active_count()
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|slot| slot.active)
    }

    /// Entity in an active slot
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots
            .get(index)
            .filter(|slot| slot.active)
            .map(|slot| &slot.entity)
    }

    /// Active entities in slot order
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.active)
            .map(|(index, slot)| (index, &slot.entity))
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, slot)| slot.active)
            .map(|(index, slot)| (index, &mut slot.entity))
    }

    /// Every slot, active or not
    pub fn slots(&self) -> &[Slot<T>] {
        &self.slots
    }
}
