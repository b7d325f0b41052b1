//! Configuration types

use crate::watchface::battery::ChargeCurve;

/// Minutes between weather requests by default
pub const DEFAULT_WEATHER_REFRESH_MINUTES: u8 = 30;

/// Seconds between battery samples by default
pub const DEFAULT_BATTERY_SAMPLE_SECS: u16 = 30;

/// Complete watchface configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WatchfaceConfig {
    pub weather: WeatherConfig,
    pub steps: StepConfig,
    pub battery: BatteryConfig,
}

/// `[weather]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WeatherConfig {
    /// A weather request goes out on every tick where
    /// `minute % refresh_minutes == 0`
    pub refresh_minutes: u8,
    /// Render `72°F` rather than `72F`
    pub degree_glyph: bool,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            refresh_minutes: DEFAULT_WEATHER_REFRESH_MINUTES,
            degree_glyph: true,
        }
    }
}

/// What today's step count is compared against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepBaseline {
    /// Typical full-day total
    #[default]
    DailyGoal,
    /// Typical total by this time of day
    TypicalByNow,
}

/// `[steps]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepConfig {
    pub baseline: StepBaseline,
    /// Board has a step detector wired up
    pub sensor: bool,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            baseline: StepBaseline::DailyGoal,
            sensor: true,
        }
    }
}

/// `[battery]` section
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryConfig {
    pub sample_secs: u16,
    pub curve: ChargeCurve,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            sample_secs: DEFAULT_BATTERY_SAMPLE_SECS,
            curve: ChargeCurve::default(),
        }
    }
}
