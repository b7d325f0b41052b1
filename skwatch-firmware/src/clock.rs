//! Wall clock
//!
//! No RTC is fitted: local time is a reference point plus the monotonic
//! time elapsed since it was taken.

use chrono::{DateTime, NaiveDateTime, Timelike};
use embassy_time::{Duration, Instant};

include!(concat!(env!("OUT_DIR"), "/build_time.rs"));

/// A known local time and the instant it was observed
#[derive(Debug, Clone, Copy)]
pub struct TimeReference {
    epoch_secs: i64,
    instant: Instant,
}

impl TimeReference {
    /// Local build time, taken as observed at boot
    pub const fn build_time() -> Self {
        Self {
            epoch_secs: BUILD_LOCAL_EPOCH,
            instant: Instant::from_ticks(0),
        }
    }

    /// Local time now
    pub fn now(&self) -> NaiveDateTime {
        let elapsed = Instant::now().duration_since(self.instant).as_secs() as i64;
        DateTime::from_timestamp(self.epoch_secs + elapsed, 0)
            .map(|dt| dt.naive_utc())
            .unwrap_or_default()
    }

    /// Time until the next minute boundary
    pub fn until_next_minute(&self) -> Duration {
        let second = self.now().second() as u64;
        Duration::from_secs(60 - second.min(59))
    }
}

/// Clock shared by every task
pub static CLOCK: TimeReference = TimeReference::build_time();
