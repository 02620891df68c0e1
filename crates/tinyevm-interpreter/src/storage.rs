//! Run-local contract storage

use std::collections::BTreeMap;
use tinyevm_primitives::Word;

/// Word-to-word storage with an implicit zero default.
///
/// Slots holding zero are never materialized, so two storages with the same
/// observable contents compare equal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Storage {
    slots: BTreeMap<Word, Word>,
}

impl Storage {
    /// Creates a new empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets storage value (zero when unset)
    pub fn get(&self, key: &Word) -> Word {
        self.slots.get(key).copied().unwrap_or_default()
    }

    /// Sets storage value; storing zero clears the slot
    pub fn set(&mut self, key: Word, value: Word) {
        if value.is_zero() {
            self.slots.remove(&key);
        } else {
            self.slots.insert(key, value);
        }
    }

    /// Number of non-zero slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether every slot is zero
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Non-zero slots in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (&Word, &Word)> + '_ {
        self.slots.iter()
    }
}

impl FromIterator<(Word, Word)> for Storage {
    fn from_iter<I: IntoIterator<Item = (Word, Word)>>(iter: I) -> Self {
        let mut storage = Storage::new();
        for (key, value) in iter {
            storage.set(key, value);
        }
        storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_default_zero() {
        let storage = Storage::new();
        assert_eq!(storage.get(&Word::from(7u64)), Word::zero());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_storage_set_get() {
        let mut storage = Storage::new();
        storage.set(Word::from(1u64), Word::from(42u64));
        assert_eq!(storage.get(&Word::from(1u64)), Word::from(42u64));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_storage_zero_clears_slot() {
        let mut storage = Storage::new();
        storage.set(Word::from(1u64), Word::from(42u64));
        storage.set(Word::from(1u64), Word::zero());
        assert!(storage.is_empty());
        assert_eq!(storage, Storage::new());
    }

    #[test]
    fn test_storage_iterates_in_key_order() {
        let storage: Storage = [(Word::from(9u64), Word::one()), (Word::from(2u64), Word::one())]
            .into_iter()
            .collect();
        let keys: Vec<Word> = storage.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![Word::from(2u64), Word::from(9u64)]);
    }
}
