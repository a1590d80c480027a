//! Slot of the backing array.
//!
//! - `Empty`: never used since the last rehash, terminates lookups
//! - `Occupied`: holds a key and its record
//! - `Tombstone`: record was removed, lookups continue past it and
//!   inserts may reuse it

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Slot<V> {
    #[default]
    Empty,
    Occupied { key: u64, value: V },
    Tombstone,
}

impl<V> Slot<V> {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    #[inline]
    pub fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied { .. })
    }

    /// Key stored in the slot, if occupied
    #[inline]
    pub fn key(&self) -> Option<u64> {
        match self {
            Slot::Occupied { key, .. } => Some(*key),
            _ => None,
        }
    }

    /// Returns `true` if the slot holds exactly `key`
    #[inline]
    pub fn holds(&self, key: u64) -> bool {
        self.key() == Some(key)
    }

    #[inline]
    pub fn entry(&self) -> Option<(&u64, &V)> {
        match self {
            Slot::Occupied { key, value } => Some((key, value)),
            _ => None,
        }
    }

    #[inline]
    pub fn entry_mut(&mut self) -> Option<(&u64, &mut V)> {
        match self {
            Slot::Occupied { key, value } => Some((&*key, value)),
            _ => None,
        }
    }

    /// Turn an occupied slot into a tombstone, returning the evicted pair
    ///
    /// Empty slots and tombstones are left untouched.
    pub fn bury(&mut self) -> Option<(u64, V)> {
        if !self.is_occupied() {
            return None;
        }
        match std::mem::replace(self, Slot::Tombstone) {
            Slot::Occupied { key, value } => Some((key, value)),
            _ => None,
        }
    }

    /// Consume the slot, yielding its pair if occupied
    pub fn into_entry(self) -> Option<(u64, V)> {
        match self {
            Slot::Occupied { key, value } => Some((key, value)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let slot: Slot<u32> = Slot::default();
        assert!(slot.is_empty());
        assert!(!slot.is_occupied());
        assert!(!slot.is_tombstone());
        assert_eq!(slot.key(), None);
    }

    #[test]
    fn test_occupied_accessors() {
        let mut slot = Slot::Occupied { key: 7, value: "seven" };
        assert!(slot.is_occupied());
        assert!(slot.holds(7));
        assert!(!slot.holds(8));
        assert_eq!(slot.entry(), Some((&7, &"seven")));

        if let Some((_, v)) = slot.entry_mut() {
            *v = "SEVEN";
        }
        assert_eq!(slot.entry(), Some((&7, &"SEVEN")));
    }

    #[test]
    fn test_bury() {
        let mut slot = Slot::Occupied { key: 3, value: 30u32 };
        assert_eq!(slot.bury(), Some((3, 30)));
        assert!(slot.is_tombstone());
        assert!(!slot.holds(3));

        // burying twice is a no-op
        assert_eq!(slot.bury(), None);
        assert!(slot.is_tombstone());

        let mut empty: Slot<u32> = Slot::Empty;
        assert_eq!(empty.bury(), None);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_into_entry() {
        let slot = Slot::Occupied { key: 1, value: 10u32 };
        assert_eq!(slot.into_entry(), Some((1, 10)));

        let tomb: Slot<u32> = Slot::Tombstone;
        assert_eq!(tomb.into_entry(), None);
        assert_eq!(Slot::<u32>::Empty.into_entry(), None);
    }
}
