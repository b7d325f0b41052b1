//! Durable user preferences
//!
//! One postcard blob under [`StorageKey::Settings`]. The in-memory copy is
//! authoritative between saves; every save writes the whole record.

use serde::{Deserialize, Serialize};
use skwatch_display::Color;
use skwatch_hal::{FlashError, FlashStorage, StorageKey};

/// Upper bound on the encoded record (two varints and a bool)
pub const SETTINGS_BLOB_SIZE: usize = 16;

/// User preferences that survive a reboot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    pub background_color: Color,
    pub twenty_four_hour: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            background_color: Color::BLACK,
            twenty_four_hour: false,
        }
    }
}

/// Settings persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsError {
    Flash(FlashError),
    /// Stored blob is not a valid record
    Decode,
    Encode,
}

impl From<FlashError> for SettingsError {
    fn from(e: FlashError) -> Self {
        SettingsError::Flash(e)
    }
}

/// Where the settings in use came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsSource {
    /// Read back from flash
    Stored,
    /// First run, nothing stored yet
    Defaults,
    /// A record exists but could not be used
    Fallback(SettingsError),
}

/// Result of [`SettingsStore::load`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LoadOutcome {
    pub settings: Settings,
    pub source: SettingsSource,
}

/// Owns the settings record and the storage behind it
pub struct SettingsStore<S> {
    storage: S,
    current: Settings,
}

impl<S: FlashStorage> SettingsStore<S> {
    /// Wrap `storage`, starting from defaults until [`load`](Self::load)
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            current: Settings::default(),
        }
    }

    /// Read the stored record, falling back to defaults
    ///
    /// Never fails: any problem leaves the defaults in place and is
    /// reported through [`LoadOutcome::source`].
    pub fn load(&mut self) -> LoadOutcome {
        let source = match self.read_stored() {
            Ok(settings) => {
                self.current = settings;
                SettingsSource::Stored
            }
            Err(SettingsError::Flash(FlashError::NotFound)) => {
                self.current = Settings::default();
                SettingsSource::Defaults
            }
            Err(e) => {
                self.current = Settings::default();
                SettingsSource::Fallback(e)
            }
        };
        LoadOutcome {
            settings: self.current,
            source,
        }
    }

    fn read_stored(&mut self) -> Result<Settings, SettingsError> {
        let mut buf = [0u8; SETTINGS_BLOB_SIZE];
        let len = self.storage.read(StorageKey::Settings, &mut buf)?;
        postcard::from_bytes(&buf[..len]).map_err(|_| SettingsError::Decode)
    }

    /// Adopt `settings` and write the full record
    ///
    /// The in-memory copy is updated even if the write fails, so the
    /// display keeps following the latest preference.
    pub fn save(&mut self, settings: Settings) -> Result<(), SettingsError> {
        self.current = settings;
        let mut buf = [0u8; SETTINGS_BLOB_SIZE];
        let used = postcard::to_slice(&settings, &mut buf).map_err(|_| SettingsError::Encode)?;
        self.storage.write(StorageKey::Settings, used)?;
        Ok(())
    }

    pub fn current(&self) -> &Settings {
        &self.current
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use skwatch_hal::MemoryStorage;

    #[test]
    fn test_first_run_defaults() {
        let mut store = SettingsStore::new(MemoryStorage::new());
        let outcome = store.load();
        assert_eq!(outcome.source, SettingsSource::Defaults);
        assert_eq!(outcome.settings, Settings::default());
        assert_eq!(store.current().background_color, Color::BLACK);
        assert!(!store.current().twenty_four_hour);
    }

    #[test]
    fn test_save_then_load() {
        let mut storage = MemoryStorage::new();
        let saved = Settings {
            background_color: Color::from_hex(0x0055AA),
            twenty_four_hour: true,
        };
        {
            let mut store = SettingsStore::new(&mut storage);
            store.save(saved).unwrap();
        }
        assert_eq!(storage.writes(), 1);

        let mut store = SettingsStore::new(&mut storage);
        let outcome = store.load();
        assert_eq!(outcome.source, SettingsSource::Stored);
        assert_eq!(outcome.settings, saved);
    }

    #[test]
    fn test_garbled_blob_falls_back() {
        let mut storage = MemoryStorage::new();
        storage.write(StorageKey::Settings, &[0xFF]).unwrap();

        let mut store = SettingsStore::new(&mut storage);
        let outcome = store.load();
        assert_eq!(outcome.source, SettingsSource::Fallback(SettingsError::Decode));
        assert_eq!(outcome.settings, Settings::default());
    }

    #[test]
    fn test_save_updates_current() {
        let mut store = SettingsStore::new(MemoryStorage::new());
        let next = Settings {
            background_color: Color::WHITE,
            twenty_four_hour: false,
        };
        store.save(next).unwrap();
        assert_eq!(*store.current(), next);
        assert!(store.storage().get(StorageKey::Settings).is_some());
    }

    proptest! {
        #[test]
        fn save_load_round_trip(hex in any::<i32>(), twenty_four_hour in any::<bool>()) {
            let settings = Settings {
                background_color: Color::from_hex(hex),
                twenty_four_hour,
            };
            let mut store = SettingsStore::new(MemoryStorage::new());
            store.save(settings).unwrap();

            let mut reloaded = SettingsStore::new(store.storage_mut());
            prop_assert_eq!(reloaded.load().settings, settings);
        }
    }
}
