//! Minute tick handling

use chrono::{NaiveDateTime, Timelike};
use skwatch_display::LayerSet;
use skwatch_protocol::WeatherRequest;

use super::display_state::DisplayState;
use crate::config::WeatherConfig;
use crate::settings::Settings;

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Refresh {
    pub changes: LayerSet,
    /// Fire-and-forget weather poke for the companion
    pub weather_request: Option<WeatherRequest>,
}

/// Re-renders the clock each minute and polls for weather on a cadence
#[derive(Debug, Clone, Copy)]
pub struct PeriodicRefresher {
    refresh_minutes: u8,
}

impl PeriodicRefresher {
    pub fn new(config: &WeatherConfig) -> Self {
        Self {
            refresh_minutes: config.refresh_minutes.max(1),
        }
    }

    /// Whether a tick at `now` should request weather
    pub fn weather_due(&self, now: &NaiveDateTime) -> bool {
        now.minute() % self.refresh_minutes as u32 == 0
    }

    pub fn on_tick(
        &self,
        now: &NaiveDateTime,
        settings: &Settings,
        display: &mut DisplayState,
    ) -> Refresh {
        let changes = display
            .set_time(now, settings.twenty_four_hour)
            .union(display.set_date(now));
        Refresh {
            changes,
            weather_request: self.weather_due(now).then_some(WeatherRequest),
        }
    }
}
