use std::fmt;

use log::{debug, trace};

use crate::{
    config::TableConfig,
    error::Result,
    iter::{Iter, IterMut, Keys, Values, ValuesMut},
    merge::Merge,
    prime::next_prime,
    probe::ProbeSeq,
    slot::Slot,
};

/// Result of [`KeyedSlotTable::insert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The key was new and took a slot
    Inserted,
    /// The key was present and the incoming record was merged into it
    Updated,
}

/// Where an insert should land
enum Placement {
    Existing(usize),
    Vacant(usize),
}

/// An open-addressed table keyed by `u64`, using double hashing over a
/// prime-sized slot array
///
/// Removed records leave tombstones that keep other keys' probe sequences
/// intact until the next rehash. The table grows to the next prime past
/// twice its size when occupancy exceeds the grow threshold, and halves
/// when it falls below the shrink threshold.
///
/// The table is not synchronized; wrap it in a lock to share it.
pub struct KeyedSlotTable<V> {
    slots: Vec<Slot<V>>,

    /// Occupied slots (tombstones excluded)
    len: usize,

    /// Tombstones since the last rehash
    tombstones: usize,

    config: TableConfig,
}

fn empty_slots<V>(capacity: usize) -> Vec<Slot<V>> {
    (0..capacity).map(|_| Slot::Empty).collect()
}

#[inline]
fn ratio(len: usize, capacity: usize) -> f64 {
    len as f64 / capacity as f64
}

impl<V> KeyedSlotTable<V> {
    /// Create an empty table with the default policy (11 slots, grow above
    /// 70%, shrink below 20%)
    #[inline]
    pub fn new() -> Self {
        Self::from_config(TableConfig::default())
    }

    /// Create an empty table with at least `capacity` slots
    ///
    /// The capacity is rounded up to a prime no smaller than 11 and becomes
    /// the floor: the table never shrinks below it.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_config(TableConfig::default().with_initial_capacity(capacity))
    }

    /// Create an empty table with a custom policy
    pub fn with_config(config: TableConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: TableConfig) -> Self {
        Self {
            slots: empty_slots(config.floor_capacity()),
            len: 0,
            tombstones: 0,
            config,
        }
    }

    /// Returns the number of records in the table
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table holds no records
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots (always prime)
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of tombstones left by removals since the last rehash
    #[inline]
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Occupied slots over capacity
    #[inline]
    pub fn load_factor(&self) -> f64 {
        ratio(self.len, self.capacity())
    }

    /// Smallest capacity the table will shrink to (its starting capacity)
    #[inline]
    pub fn floor_capacity(&self) -> usize {
        self.config.floor_capacity()
    }

    /// Returns the sizing policy
    #[inline]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Iterate over `(key, record)` pairs in slot order
    ///
    /// The order depends on capacity and history and changes across resizes.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self.slots.iter())
    }

    /// Iterate over `(key, record)` pairs with mutable records
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut::new(self.slots.iter_mut())
    }

    /// Iterate over keys in slot order
    pub fn keys(&self) -> Keys<'_, V> {
        Keys::new(self.iter())
    }

    /// Iterate over records in slot order
    pub fn values(&self) -> Values<'_, V> {
        Values::new(self.iter())
    }

    /// Iterate over mutable records in slot order
    pub fn values_mut(&mut self) -> ValuesMut<'_, V> {
        ValuesMut::new(self.iter_mut())
    }

    /// Collect every record, in slot order
    pub fn list_all(&self) -> Vec<&V> {
        self.values().collect()
    }

    /// Returns a reference to the record stored under `key`
    pub fn find(&self, key: u64) -> Option<&V> {
        let idx = self.find_index(key)?;
        self.slots[idx].entry().map(|(_, v)| v)
    }

    /// Returns a mutable reference to the record stored under `key`
    pub fn find_mut(&mut self, key: u64) -> Option<&mut V> {
        let idx = self.find_index(key)?;
        self.slots[idx].entry_mut().map(|(_, v)| v)
    }

    /// Returns `true` if the table holds a record for `key`
    #[inline]
    pub fn contains_key(&self, key: u64) -> bool {
        self.find_index(key).is_some()
    }

    /// Remove the record under `key`
    ///
    /// Returns `false` if the key was absent.
    #[inline]
    pub fn remove(&mut self, key: u64) -> bool {
        self.take(key).is_some()
    }

    /// Remove the record under `key` and return it
    pub fn take(&mut self, key: u64) -> Option<V> {
        let idx = self.find_index(key)?;
        let (_, value) = self.slots[idx].bury()?;
        self.len -= 1;
        self.tombstones += 1;

        if ratio(self.len, self.capacity()) < self.config.shrink_threshold {
            self.shrink();
        }

        Some(value)
    }

    /// Remove every record and fall back to the starting capacity
    pub fn clear(&mut self) {
        self.slots = empty_slots(self.floor_capacity());
        self.len = 0;
        self.tombstones = 0;
    }

    /// Walk the probe sequence for `key`
    ///
    /// Tombstones are skipped; an empty slot ends the search because an
    /// insert never walks past one.
    fn find_index(&self, key: u64) -> Option<usize> {
        for idx in ProbeSeq::new(key, self.capacity()) {
            match &self.slots[idx] {
                Slot::Empty => return None,
                slot if slot.holds(key) => return Some(idx),
                _ => {}
            }
        }
        // every slot is occupied or a tombstone and none holds the key
        None
    }

    /// Find the slot an insert of `key` should use
    ///
    /// Keeps walking past tombstones until the key or an empty slot shows
    /// up, so an existing record further along is never duplicated. A new
    /// key reuses the first tombstone seen.
    fn placement(&self, key: u64) -> Placement {
        let mut first_tombstone = None;

        for idx in ProbeSeq::new(key, self.capacity()) {
            match &self.slots[idx] {
                Slot::Empty => return Placement::Vacant(first_tombstone.unwrap_or(idx)),
                Slot::Tombstone => {
                    first_tombstone.get_or_insert(idx);
                }
                slot if slot.holds(key) => return Placement::Existing(idx),
                Slot::Occupied { .. } => {}
            }
        }

        match first_tombstone {
            Some(idx) => Placement::Vacant(idx),
            None => unreachable!(
                "probe for key {key} exhausted {} slots holding {} records",
                self.capacity(),
                self.len
            ),
        }
    }

    /// Store a new key at `idx`
    fn fill(&mut self, idx: usize, key: u64, value: V) {
        if self.slots[idx].is_tombstone() {
            trace!("key {key} reuses tombstone at slot {idx}");
            self.tombstones -= 1;
        }
        self.slots[idx] = Slot::Occupied { key, value };
        self.len += 1;
    }

    #[inline]
    fn over_grow_threshold(&self) -> bool {
        ratio(self.len, self.capacity()) > self.config.grow_threshold
    }

    /// Rehash into the next prime at or above twice the capacity
    fn grow(&mut self) {
        let new_capacity = next_prime(self.capacity() * 2);
        self.rehash(new_capacity);
    }

    /// Rehash into a smaller prime capacity
    ///
    /// Halves repeatedly until occupancy reaches the shrink threshold or the
    /// floor is hit, never past the grow threshold. Nothing happens if
    /// already at the floor.
    fn shrink(&mut self) {
        let floor = self.floor_capacity();
        let mut target = self.capacity();

        while target > floor && ratio(self.len, target) < self.config.shrink_threshold {
            let next = next_prime((target / 2).max(floor));
            if next >= target || ratio(self.len, next) > self.config.grow_threshold {
                break;
            }
            target = next;
        }

        if target == self.capacity() {
            trace!(
                "shrink skipped: capacity {} with {} records, floor {floor}",
                self.capacity(),
                self.len
            );
            return;
        }

        self.rehash(target);
    }

    /// Rebuild the slot array at `new_capacity`
    ///
    /// Tombstones are dropped and every record is placed again, since probe
    /// sequences depend on the capacity.
    fn rehash(&mut self, new_capacity: usize) {
        let old_capacity = self.capacity();
        let old_slots = std::mem::replace(&mut self.slots, empty_slots(new_capacity));
        let dropped_tombstones = self.tombstones;
        self.len = 0;
        self.tombstones = 0;

        for slot in old_slots {
            if let Some((key, value)) = slot.into_entry() {
                self.place(key, value);
            }
        }

        debug!(
            "rehash {old_capacity} -> {new_capacity} slots, {} records, {dropped_tombstones} tombstones dropped",
            self.len
        );
    }

    /// Insert a key known to be absent into a table without tombstones
    ///
    /// Used while rehashing; performs no resize checks.
    fn place(&mut self, key: u64, value: V) {
        let capacity = self.capacity();
        let idx = match ProbeSeq::new(key, capacity).find(|&idx| self.slots[idx].is_empty()) {
            Some(idx) => idx,
            None => unreachable!("rehash into {capacity} slots ran out of room at key {key}"),
        };
        self.slots[idx] = Slot::Occupied { key, value };
        self.len += 1;
    }
}

impl<V> KeyedSlotTable<V>
where
    V: Merge,
{
    /// Insert a record under `key`
    ///
    /// If the key is already present the incoming record is merged into the
    /// stored one and no slot is consumed.
    pub fn insert(&mut self, key: u64, value: V) -> InsertOutcome {
        // resizing moves every record, so it must come before locating a slot
        if self.over_grow_threshold() {
            self.grow();
        }

        match self.placement(key) {
            Placement::Existing(idx) => {
                if let Some((_, stored)) = self.slots[idx].entry_mut() {
                    stored.merge(value);
                }
                InsertOutcome::Updated
            }
            Placement::Vacant(idx) => {
                self.fill(idx, key, value);
                if self.over_grow_threshold() {
                    self.grow();
                }
                InsertOutcome::Inserted
            }
        }
    }

    /// Merge `value` into the record under `key`, only if it exists
    ///
    /// Returns `false` and drops `value` if the key is absent.
    pub fn update(&mut self, key: u64, value: V) -> bool {
        match self.find_mut(key) {
            Some(stored) => {
                stored.merge(value);
                true
            }
            None => false,
        }
    }
}

impl<V> Default for KeyedSlotTable<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for KeyedSlotTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V: Merge> Extend<(u64, V)> for KeyedSlotTable<V> {
    fn extend<I: IntoIterator<Item = (u64, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<V: Merge> FromIterator<(u64, V)> for KeyedSlotTable<V> {
    fn from_iter<I: IntoIterator<Item = (u64, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}
