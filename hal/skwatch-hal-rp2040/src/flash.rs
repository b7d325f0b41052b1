//! Flash storage driver for RP2040
//!
//! Uses sequential-storage for wear-leveled key-value storage
//! in the last 64KB of flash. Flash access is blocking; the async
//! sequential-storage API is driven to completion in place.

use embassy_embedded_hal::adapter::BlockingAsync;
use embassy_futures::block_on;
use embassy_rp::flash::{Blocking, Flash};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

pub use skwatch_hal::flash::{FlashError, StorageKey};

/// Flash storage configuration
pub const FLASH_SIZE: usize = 2 * 1024 * 1024; // 2MB on the Pico module
pub const CONFIG_PARTITION_SIZE: usize = 64 * 1024;
pub const CONFIG_PARTITION_START: usize = FLASH_SIZE - CONFIG_PARTITION_SIZE;

/// Flash range for the config partition
pub const CONFIG_RANGE: core::ops::Range<u32> =
    (CONFIG_PARTITION_START as u32)..(FLASH_SIZE as u32);

/// Largest record the partition holds (the TOML override)
const ITEM_BUFFER_SIZE: usize = 2048;

type BlockingFlash<'d> = BlockingAsync<Flash<'d, FLASH, Blocking, FLASH_SIZE>>;

/// RP2040 Flash storage implementation
pub struct Rp2040FlashStorage<'d> {
    flash: BlockingFlash<'d>,
}

impl<'d> Rp2040FlashStorage<'d> {
    /// Create a new flash storage instance
    pub fn new(flash: Peri<'d, FLASH>) -> Self {
        Self {
            flash: BlockingAsync::new(Flash::new_blocking(flash)),
        }
    }

    fn fetch<'b>(
        &mut self,
        key: StorageKey,
        item_buffer: &'b mut [u8],
    ) -> Result<Option<&'b [u8]>, FlashError> {
        block_on(map::fetch_item::<StorageKey, &[u8], _>(
            &mut self.flash,
            CONFIG_RANGE,
            &mut NoCache::new(),
            item_buffer,
            &key,
        ))
        .map_err(|_| FlashError::Storage)
    }
}

impl<'d> skwatch_hal::FlashStorage for Rp2040FlashStorage<'d> {
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
        let mut item_buffer = [0u8; ITEM_BUFFER_SIZE];
        let data = self
            .fetch(key, &mut item_buffer)?
            .ok_or(FlashError::NotFound)?;

        let target = buffer
            .get_mut(..data.len())
            .ok_or(FlashError::BufferTooSmall)?;
        target.copy_from_slice(data);
        Ok(data.len())
    }

    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
        if data.len() > ITEM_BUFFER_SIZE / 2 {
            return Err(FlashError::Full);
        }
        let mut item_buffer = [0u8; ITEM_BUFFER_SIZE];

        block_on(map::store_item(
            &mut self.flash,
            CONFIG_RANGE,
            &mut NoCache::new(),
            &mut item_buffer,
            &key,
            &data,
        ))
        .map_err(|e| match e {
            sequential_storage::Error::FullStorage => FlashError::Full,
            _ => FlashError::Storage,
        })
    }
}

/// Type alias used by the firmware
pub type FlashStorage<'d> = Rp2040FlashStorage<'d>;
