//! RAM-backed storage
//!
//! Implements [`FlashStorage`] without hardware, for host builds and tests.
//! Counts successful writes so callers can observe persistence behaviour.

use heapless::Vec;

use crate::flash::{FlashError, FlashStorage, StorageKey};

/// Maximum number of distinct keys held at once
pub const MEMORY_SLOTS: usize = 4;

/// Maximum value size per key
pub const MEMORY_VALUE_SIZE: usize = 1024;

struct Slot {
    key: StorageKey,
    data: Vec<u8, MEMORY_VALUE_SIZE>,
}

/// Volatile key-value store
pub struct MemoryStorage {
    slots: Vec<Slot, MEMORY_SLOTS>,
    writes: usize,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    /// Create an empty store
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            writes: 0,
        }
    }

    /// Number of successful writes since creation
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Raw bytes stored under `key`
    pub fn get(&self, key: StorageKey) -> Option<&[u8]> {
        self.slots
            .iter()
            .find(|slot| slot.key == key)
            .map(|slot| slot.data.as_slice())
    }
}

impl FlashStorage for MemoryStorage {
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
        let data = self.get(key).ok_or(FlashError::NotFound)?;
        let target = buffer
            .get_mut(..data.len())
            .ok_or(FlashError::BufferTooSmall)?;
        target.copy_from_slice(data);
        Ok(data.len())
    }

    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
        let value = Vec::from_slice(data).map_err(|_| FlashError::Full)?;

        match self.slots.iter_mut().find(|slot| slot.key == key) {
            Some(slot) => slot.data = value,
            None => self
                .slots
                .push(Slot { key, data: value })
                .map_err(|_| FlashError::Full)?,
        }

        self.writes += 1;
        Ok(())
    }
}
