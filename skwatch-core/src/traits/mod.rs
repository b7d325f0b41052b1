//! Service traits
//!
//! Interfaces the watchface consumes from the host. The display backend
//! lives in `skwatch-display` and flash storage in `skwatch-hal`.

pub mod health;

pub use health::{AverageScope, HealthEvent, HealthMetric, HealthService};
