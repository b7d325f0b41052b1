//! Inbound companion update reconciliation
//!
//! Applies one [`InboundUpdate`] to settings and display state. Each field
//! is handled independently; absent fields leave their state untouched.
//! Settings-bearing updates end with exactly one save, no matter how many
//! settings fields they carry.

use chrono::NaiveDateTime;
use skwatch_display::{Color, DisplayBackend, LayerSet};
use skwatch_hal::FlashStorage;
use skwatch_protocol::InboundUpdate;

use super::display_state::DisplayState;
use super::weather::format_weather;
use crate::config::WeatherConfig;
use crate::settings::{SettingsError, SettingsStore};

/// What happened to durable settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Persistence {
    /// Update carried no settings fields; nothing written
    NotNeeded,
    Saved,
    /// Settings changed in memory but the write failed
    Failed(SettingsError),
}

/// Outcome of [`MessageDecoder::apply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Decoded {
    pub changes: LayerSet,
    pub persisted: Persistence,
}

/// Borrowed view of everything an inbound update may touch
pub struct MessageDecoder<'a, S, L: ?Sized> {
    settings: &'a mut SettingsStore<S>,
    display: &'a mut DisplayState,
    legibility: &'a L,
    weather: &'a WeatherConfig,
}

impl<'a, S: FlashStorage, L: DisplayBackend + ?Sized> MessageDecoder<'a, S, L> {
    /// `legibility` answers which foreground reads on a given background
    pub fn new(
        settings: &'a mut SettingsStore<S>,
        display: &'a mut DisplayState,
        legibility: &'a L,
        weather: &'a WeatherConfig,
    ) -> Self {
        Self {
            settings,
            display,
            legibility,
            weather,
        }
    }

    pub fn apply(&mut self, update: &InboundUpdate, now: &NaiveDateTime) -> Decoded {
        let mut changes = LayerSet::EMPTY;

        // Weather needs both halves; a lone field changes nothing
        if let (Some(temperature), Some(conditions)) = (update.temperature, &update.conditions) {
            if let Ok(text) = format_weather(temperature, conditions, self.weather) {
                changes |= self.display.set_weather(text);
            }
        }

        let mut next = *self.settings.current();

        if let Some(hex) = update.background_color {
            let background = Color::from_hex(hex);
            next.background_color = background;
            changes |= self
                .display
                .set_background(background, self.legibility.legible_over(background));
        }

        if let Some(twenty_four_hour) = update.twenty_four_hour {
            next.twenty_four_hour = twenty_four_hour;
            changes |= self.display.set_time(now, twenty_four_hour);
        }

        let persisted = if update.carries_settings() {
            match self.settings.save(next) {
                Ok(()) => Persistence::Saved,
                Err(e) => Persistence::Failed(e),
            }
        } else {
            Persistence::NotNeeded
        };

        Decoded { changes, persisted }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use heapless::String;
    use skwatch_display::{Layer, Screen};
    use skwatch_hal::{FlashError, MemoryStorage, StorageKey};
    use skwatch_protocol::Conditions;

    use crate::settings::Settings;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(13, 5, 0)
            .unwrap()
    }

    struct Fixture {
        settings: SettingsStore<MemoryStorage>,
        display: DisplayState,
        screen: Screen,
        weather: WeatherConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let mut display = DisplayState::placeholder();
            display.set_time(&now(), false);
            display.set_date(&now());
            Self {
                settings: SettingsStore::new(MemoryStorage::new()),
                display,
                screen: Screen::new(),
                weather: WeatherConfig::default(),
            }
        }

        fn apply(&mut self, update: &InboundUpdate) -> Decoded {
            MessageDecoder::new(&mut self.settings, &mut self.display, &self.screen, &self.weather)
                .apply(update, &now())
        }

        fn writes(&self) -> usize {
            self.settings.storage().writes()
        }
    }

    #[test]
    fn test_empty_update_is_noop() {
        let mut fx = Fixture::new();
        let before = fx.display.clone();
        let decoded = fx.apply(&InboundUpdate::default());
        assert_eq!(decoded.changes, LayerSet::EMPTY);
        assert_eq!(decoded.persisted, Persistence::NotNeeded);
        assert_eq!(fx.display, before);
        assert_eq!(fx.writes(), 0);
    }

    #[test]
    fn test_weather_scenario() {
        let mut fx = Fixture::new();
        let before = fx.display.clone();
        let decoded = fx.apply(&InboundUpdate {
            temperature: Some(72),
            conditions: Some(Conditions::Code(800)),
            ..InboundUpdate::default()
        });

        assert_eq!(decoded.changes, LayerSet::of(Layer::Weather));
        assert_eq!(decoded.persisted, Persistence::NotNeeded);
        assert_eq!(fx.display.text(Layer::Weather), "72°F\u{1F323}");
        for layer in Layer::ALL.into_iter().filter(|l| *l != Layer::Weather) {
            assert_eq!(fx.display.text(layer), before.text(layer));
        }
        assert_eq!(fx.writes(), 0);
    }

    #[test]
    fn test_half_weather_ignored() {
        let mut fx = Fixture::new();
        let decoded = fx.apply(&InboundUpdate {
            temperature: Some(72),
            ..InboundUpdate::default()
        });
        assert_eq!(decoded.changes, LayerSet::EMPTY);

        let decoded = fx.apply(&InboundUpdate {
            conditions: Some(Conditions::Text(String::try_from("Fog").unwrap())),
            ..InboundUpdate::default()
        });
        assert_eq!(decoded.changes, LayerSet::EMPTY);
        assert_eq!(fx.display.text(Layer::Weather), "Loading...");
    }

    #[test]
    fn test_background_only() {
        let mut fx = Fixture::new();
        let before = fx.display.clone();
        let decoded = fx.apply(&InboundUpdate {
            background_color: Some(0xFFFFFF),
            ..InboundUpdate::default()
        });

        assert!(decoded.changes.has_background());
        assert_eq!(decoded.persisted, Persistence::Saved);
        assert_eq!(fx.display.background(), Color::WHITE);
        assert_eq!(fx.display.color(Layer::Time), Color::BLACK);
        for layer in Layer::ALL {
            assert_eq!(fx.display.text(layer), before.text(layer));
        }
        assert_eq!(fx.settings.current().background_color, Color::WHITE);
        assert_eq!(fx.writes(), 1);
    }

    #[test]
    fn test_clock_format_rerenders_time() {
        let mut fx = Fixture::new();
        assert_eq!(fx.display.text(Layer::Time), "01:05");

        let decoded = fx.apply(&InboundUpdate {
            twenty_four_hour: Some(true),
            ..InboundUpdate::default()
        });
        assert_eq!(decoded.changes, LayerSet::of(Layer::Time).with(Layer::Meridiem));
        assert_eq!(fx.display.text(Layer::Time), "13:05");
        assert_eq!(fx.display.text(Layer::Meridiem), "");
        assert!(fx.settings.current().twenty_four_hour);
    }

    #[test]
    fn test_one_write_per_message() {
        let mut fx = Fixture::new();
        fx.apply(&InboundUpdate {
            temperature: Some(50),
            conditions: Some(Conditions::Code(501)),
            background_color: Some(0x0000AA),
            twenty_four_hour: Some(true),
        });
        assert_eq!(fx.writes(), 1);
        assert_eq!(
            *fx.settings.current(),
            Settings {
                background_color: Color::from_hex(0x0000AA),
                twenty_four_hour: true,
            }
        );
    }

    #[test]
    fn test_idempotent() {
        let update = InboundUpdate {
            temperature: Some(-3),
            conditions: Some(Conditions::Code(611)),
            background_color: Some(0x55AAFF),
            twenty_four_hour: Some(true),
        };
        let mut fx = Fixture::new();
        fx.apply(&update);
        let display = fx.display.clone();
        let stored = fx.settings.storage().get(StorageKey::Settings).map(|b| b.to_vec());

        let decoded = fx.apply(&update);
        assert_eq!(decoded.changes, LayerSet::EMPTY);
        assert_eq!(fx.display, display);
        assert_eq!(
            fx.settings.storage().get(StorageKey::Settings).map(|b| b.to_vec()),
            stored
        );
    }

    struct FullStorage;

    impl FlashStorage for FullStorage {
        fn read(&mut self, _: StorageKey, _: &mut [u8]) -> Result<usize, FlashError> {
            Err(FlashError::NotFound)
        }
        fn write(&mut self, _: StorageKey, _: &[u8]) -> Result<(), FlashError> {
            Err(FlashError::Full)
        }
    }

    #[test]
    fn test_failed_save_still_applies() {
        let mut settings = SettingsStore::new(FullStorage);
        let mut display = DisplayState::placeholder();
        let screen = Screen::new();
        let weather = WeatherConfig::default();

        let decoded = MessageDecoder::new(&mut settings, &mut display, &screen, &weather).apply(
            &InboundUpdate {
                background_color: Some(0xFFFFFF),
                ..InboundUpdate::default()
            },
            &now(),
        );
        assert_eq!(
            decoded.persisted,
            Persistence::Failed(SettingsError::Flash(FlashError::Full))
        );
        assert_eq!(display.background(), Color::WHITE);
    }
}
