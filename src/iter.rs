//! Iterators for `KeyedSlotTable`
//!
//! All of them walk the slot array in index order and yield occupied slots
//! only.

use std::{iter::FusedIterator, slice};

use crate::{slot::Slot, table::KeyedSlotTable};

/// An iterator over the `(key, record)` pairs of a `KeyedSlotTable`
pub struct Iter<'a, V> {
    inner: slice::Iter<'a, Slot<V>>,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(slots: slice::Iter<'a, Slot<V>>) -> Self {
        Self { inner: slots }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a u64, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(Slot::entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

impl<V> FusedIterator for Iter<'_, V> {}

/// A mutable iterator over the `(key, record)` pairs of a `KeyedSlotTable`
pub struct IterMut<'a, V> {
    inner: slice::IterMut<'a, Slot<V>>,
}

impl<'a, V> IterMut<'a, V> {
    pub(crate) fn new(slots: slice::IterMut<'a, Slot<V>>) -> Self {
        Self { inner: slots }
    }
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (&'a u64, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(Slot::entry_mut)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

impl<V> FusedIterator for IterMut<'_, V> {}

/// An iterator over the keys of a `KeyedSlotTable`
pub struct Keys<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Keys<'a, V> {
    pub(crate) fn new(iter: Iter<'a, V>) -> Self {
        Self { inner: iter }
    }
}

impl<'a, V> Iterator for Keys<'a, V> {
    type Item = &'a u64;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

/// An iterator over the records of a `KeyedSlotTable`
pub struct Values<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Values<'a, V> {
    pub(crate) fn new(iter: Iter<'a, V>) -> Self {
        Self { inner: iter }
    }
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

/// A mutable iterator over the records of a `KeyedSlotTable`
pub struct ValuesMut<'a, V> {
    inner: IterMut<'a, V>,
}

impl<'a, V> ValuesMut<'a, V> {
    pub(crate) fn new(iter: IterMut<'a, V>) -> Self {
        Self { inner: iter }
    }
}

impl<'a, V> Iterator for ValuesMut<'a, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

impl<'a, V> IntoIterator for &'a KeyedSlotTable<V> {
    type Item = (&'a u64, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, V> IntoIterator for &'a mut KeyedSlotTable<V> {
    type Item = (&'a u64, &'a mut V);
    type IntoIter = IterMut<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use crate::table::KeyedSlotTable;

    #[test]
    fn test_iter_skips_empty_and_tombstones() {
        let mut table = KeyedSlotTable::new();
        for key in 0..6u64 {
            table.insert(key, key * 10);
        }
        table.remove(2);
        table.remove(4);

        let mut pairs: Vec<(u64, u64)> = table.iter().map(|(k, v)| (*k, *v)).collect();
        pairs.sort_unstable();
        assert_eq!(pairs, vec![(0, 0), (1, 10), (3, 30), (5, 50)]);
    }

    #[test]
    fn test_into_iter_refs() {
        let mut table = KeyedSlotTable::new();
        table.insert(1, 1u32);
        table.insert(2, 2u32);

        for (_, v) in &mut table {
            *v *= 100;
        }

        let mut total = 0;
        for (_, v) in &table {
            total += *v;
        }
        assert_eq!(total, 300);
    }

    #[test]
    fn test_iter_follows_slot_order() {
        let mut table = KeyedSlotTable::new();
        for key in [3u64, 1, 2] {
            table.insert(key, ());
        }
        let keys: Vec<u64> = table.keys().copied().collect();
        let values = table.values().count();
        assert_eq!(keys.len(), values);

        // slot order is the order of h1 here: no collisions among these keys
        let mut by_home = keys.clone();
        by_home.sort_by_key(|&k| crate::probe::h1(k, table.capacity()));
        assert_eq!(keys, by_home);
    }
}
