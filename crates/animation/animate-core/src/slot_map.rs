//! Generational slot map with dense value storage.
//!
//! Values live contiguously in `values`; `slots` maps a stable slot index to the
//! value's current dense position. Removal swaps the last value into the hole, so
//! iteration by position stays cache-friendly and O(1) removal never shifts more
//! than one element. Every removal bumps the slot's generation, which makes any
//! handle issued before the removal resolve to `None` from then on.

use serde::{Deserialize, Serialize};

/// Generation-checked key into a [`SlotMap`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Handle {
    index: u32,
    generation: u32,
}

impl Handle {
    /// A handle that never resolves (for default initialization).
    pub const fn dangling() -> Self {
        Self {
            index: u32::MAX,
            generation: 0,
        }
    }

    #[inline]
    pub fn is_dangling(&self) -> bool {
        self.index == u32::MAX
    }

    /// Slot index (for debugging and display).
    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Generation the slot had when this handle was issued.
    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl Default for Handle {
    fn default() -> Self {
        Self::dangling()
    }
}

impl std::fmt::Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

#[derive(Clone, Debug)]
struct Slot {
    /// Position of the value in the dense array while active.
    dense: u32,
    generation: u32,
    active: bool,
}

/// Dense storage addressed by generational handles.
#[derive(Clone, Debug)]
pub struct SlotMap<V> {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    values: Vec<V>,
    /// Slot index owning each dense position (parallel to `values`).
    owners: Vec<u32>,
}

impl<V> Default for SlotMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> SlotMap<V> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            values: Vec::with_capacity(capacity),
            owners: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.values.capacity()
    }

    /// Store `value`, reusing a freed slot index when one is available.
    pub fn insert(&mut self, value: V) -> Handle {
        let dense = self.values.len() as u32;
        let index = match self.free_list.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.dense = dense;
                slot.active = true;
                index
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    dense,
                    generation: 0,
                    active: true,
                });
                index
            }
        };
        self.values.push(value);
        self.owners.push(index);
        Handle {
            index,
            generation: self.slots[index as usize].generation,
        }
    }

    /// True iff `handle` refers to a value that has not been removed.
    #[inline]
    pub fn is_valid(&self, handle: Handle) -> bool {
        self.live_slot(handle).is_some()
    }

    pub fn get(&self, handle: Handle) -> Option<&V> {
        let dense = self.live_slot(handle)?.dense as usize;
        self.values.get(dense)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut V> {
        let dense = self.live_slot(handle)?.dense as usize;
        self.values.get_mut(dense)
    }

    /// Remove the value behind `handle`. Stale handles are a no-op and return `None`.
    pub fn remove(&mut self, handle: Handle) -> Option<V> {
        let dense = self.live_slot(handle)?.dense as usize;

        let slot = &mut self.slots[handle.index as usize];
        slot.active = false;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(handle.index);

        // The last value moves into `dense`; repoint its slot before the swap.
        let last = self.values.len() - 1;
        if dense != last {
            let moved = self.owners[last];
            self.slots[moved as usize].dense = dense as u32;
        }
        self.owners.swap_remove(dense);
        Some(self.values.swap_remove(dense))
    }

    /// Remove every value and invalidate every outstanding handle.
    pub fn clear(&mut self) {
        for &index in &self.owners {
            let slot = &mut self.slots[index as usize];
            slot.active = false;
            slot.generation = slot.generation.wrapping_add(1);
            self.free_list.push(index);
        }
        self.owners.clear();
        self.values.clear();
    }

    /// Handle of the value stored at dense `position`.
    pub fn handle_at(&self, position: usize) -> Option<Handle> {
        let index = *self.owners.get(position)?;
        Some(Handle {
            index,
            generation: self.slots[index as usize].generation,
        })
    }

    #[inline]
    pub fn get_at(&self, position: usize) -> Option<&V> {
        self.values.get(position)
    }

    #[inline]
    pub fn get_at_mut(&mut self, position: usize) -> Option<&mut V> {
        self.values.get_mut(position)
    }

    /// Iterate `(handle, value)` pairs in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &V)> {
        let slots = &self.slots;
        self.owners
            .iter()
            .zip(self.values.iter())
            .map(move |(&index, value)| {
                let generation = slots[index as usize].generation;
                (Handle { index, generation }, value)
            })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle, &mut V)> {
        let slots = &self.slots;
        self.owners
            .iter()
            .zip(self.values.iter_mut())
            .map(move |(&index, value)| {
                let generation = slots[index as usize].generation;
                (Handle { index, generation }, value)
            })
    }

    #[inline]
    fn live_slot(&self, handle: Handle) -> Option<&Slot> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.active && slot.generation == handle.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut map = SlotMap::new();
        let a = map.insert("a");
        let b = map.insert("b");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(a), Some(&"a"));
        assert_eq!(map.get(b), Some(&"b"));
        assert_ne!(a, b);
    }

    #[test]
    fn removed_handle_stays_stale_after_slot_reuse() {
        let mut map = SlotMap::new();
        let a = map.insert(1);
        assert_eq!(map.remove(a), Some(1));
        assert!(!map.is_valid(a));

        let b = map.insert(2);
        assert_eq!(b.index(), a.index(), "freed slot index should be reused");
        assert_ne!(b.generation(), a.generation());
        assert_eq!(map.get(a), None);
        assert_eq!(map.get(b), Some(&2));
    }

    #[test]
    fn double_remove_is_a_noop() {
        let mut map = SlotMap::new();
        let a = map.insert(1);
        let b = map.insert(2);
        assert_eq!(map.remove(a), Some(1));
        assert_eq!(map.remove(a), None);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(b), Some(&2));
    }

    #[test]
    fn swap_remove_repoints_displaced_value() {
        let mut map = SlotMap::new();
        let a = map.insert('a');
        let b = map.insert('b');
        let c = map.insert('c');

        map.remove(a);
        // 'c' was last and now occupies position 0.
        assert_eq!(map.get_at(0), Some(&'c'));
        assert_eq!(map.handle_at(0), Some(c));
        assert_eq!(map.get(c), Some(&'c'));
        assert_eq!(map.get(b), Some(&'b'));
    }

    #[test]
    fn removing_last_value_does_not_swap() {
        let mut map = SlotMap::new();
        let a = map.insert(10);
        let b = map.insert(20);
        assert_eq!(map.remove(b), Some(20));
        assert_eq!(map.handle_at(0), Some(a));
        assert_eq!(map.handle_at(1), None);

        assert_eq!(map.remove(a), Some(10));
        assert!(map.is_empty());
    }

    #[test]
    fn dangling_never_resolves() {
        let mut map = SlotMap::new();
        map.insert(());
        assert!(!map.is_valid(Handle::dangling()));
        assert!(Handle::default().is_dangling());
    }

    #[test]
    fn clear_invalidates_everything() {
        let mut map = SlotMap::new();
        let handles: Vec<_> = (0..4).map(|i| map.insert(i)).collect();
        map.clear();
        assert!(map.is_empty());
        assert!(handles.iter().all(|h| !map.is_valid(*h)));

        let fresh = map.insert(99);
        assert_eq!(map.get(fresh), Some(&99));
        assert!(handles.iter().all(|h| *h != fresh));
    }

    #[test]
    fn iter_pairs_handles_with_values() {
        let mut map = SlotMap::new();
        let a = map.insert(1);
        let b = map.insert(2);
        let c = map.insert(3);
        map.remove(b);

        for (_, value) in map.iter_mut() {
            *value *= 10;
        }
        let seen: Vec<_> = map.iter().map(|(h, v)| (h, *v)).collect();
        assert_eq!(seen, vec![(a, 10), (c, 30)]);
    }

    #[test]
    fn random_insert_remove_sequences_keep_handles_consistent() {
        // Small LCG so the sequence is deterministic.
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move || {
            seed = seed
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            (seed >> 33) as usize
        };

        let mut map = SlotMap::new();
        let mut live: Vec<(Handle, usize)> = Vec::new();
        let mut dead: Vec<Handle> = Vec::new();

        for step in 0..2_000 {
            if live.is_empty() || next() % 3 != 0 {
                let h = map.insert(step);
                live.push((h, step));
            } else {
                let victim = next() % live.len();
                let (h, value) = live.swap_remove(victim);
                assert_eq!(map.remove(h), Some(value));
                dead.push(h);
            }

            assert_eq!(map.len(), live.len());
            for (h, value) in &live {
                assert_eq!(map.get(*h), Some(value), "live handle {h} lost its value");
            }
        }
        for h in &dead {
            assert!(!map.is_valid(*h), "removed handle {h} resolved again");
        }
    }
}
