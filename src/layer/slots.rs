use crate::foundation::core::{LayerId, MAX_LAYERS};

/// Fixed 20-slot arena keyed by [`LayerId`]. Iteration runs in z-order.
#[derive(Debug, Clone)]
pub struct LayerSlots<T> {
    slots: [Option<T>; MAX_LAYERS],
    len: usize,
}

impl<T> Default for LayerSlots<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LayerSlots<T> {
    /// Empty arena.
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
            len: 0,
        }
    }

    /// Occupied slot count.
    pub fn len(&self) -> usize {
        self.len
    }

    /// No slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `id` holds a value.
    pub fn contains(&self, id: LayerId) -> bool {
        self.slots[id.slot()].is_some()
    }

    /// Value at `id`.
    pub fn get(&self, id: LayerId) -> Option<&T> {
        self.slots[id.slot()].as_ref()
    }

    /// Mutable value at `id`.
    pub fn get_mut(&mut self, id: LayerId) -> Option<&mut T> {
        self.slots[id.slot()].as_mut()
    }

    /// Store `value` at `id`, returning the previous occupant.
    pub fn insert(&mut self, id: LayerId, value: T) -> Option<T> {
        let prev = self.slots[id.slot()].replace(value);
        if prev.is_none() {
            self.len += 1;
        }
        prev
    }

    /// Empty the slot at `id`.
    pub fn remove(&mut self, id: LayerId) -> Option<T> {
        let prev = self.slots[id.slot()].take();
        if prev.is_some() {
            self.len -= 1;
        }
        prev
    }

    /// Empty every slot.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
        self.len = 0;
    }

    /// Occupied slots, lowest id first.
    pub fn iter(&self) -> impl Iterator<Item = (LayerId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| Some((LayerId::from_slot(i)?, s.as_ref()?)))
    }

    /// Occupied slots, lowest id first.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (LayerId, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, s)| Some((LayerId::from_slot(i)?, s.as_mut()?)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layer/slots.rs"]
mod tests;
