//! Watchface components
//!
//! Formatting helpers (clock, weather, battery, steps) feed a
//! [`DisplayState`]; the decoder, refresher and telemetry observers are the
//! three ways that state changes.

pub mod battery;
pub mod clock;
pub mod decoder;
pub mod display_state;
pub mod refresher;
pub mod steps;
pub mod telemetry;
pub mod weather;

pub use battery::{format_battery, BatteryState, ChargeCurve};
pub use clock::{format_date, format_time};
pub use decoder::{Decoded, MessageDecoder, Persistence};
pub use display_state::DisplayState;
pub use refresher::{PeriodicRefresher, Refresh};
pub use steps::{format_steps, StepMetrics, StepMood};
pub use telemetry::TelemetryObservers;
pub use weather::{classify, format_weather, WeatherClass};
