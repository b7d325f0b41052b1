//! Health data service

use chrono::NaiveDateTime;

/// Metrics a health service may track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HealthMetric {
    StepCount,
}

/// Notification pushed by the health service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HealthEvent {
    /// Day rollover or history rewrite; goals should be recomputed
    SignificantUpdate,
    /// New movement data
    MovementUpdate,
    /// New sleep data; irrelevant to steps
    SleepUpdate,
}

/// Which past days an average draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AverageScope {
    /// Every recent day
    Daily,
    /// Only the same weekday
    Weekly,
}

/// Read side of a health data store
pub trait HealthService {
    /// Whether `metric` has data covering `start..end`
    fn metric_accessible(&self, metric: HealthMetric, start: NaiveDateTime, end: NaiveDateTime)
        -> bool;

    /// Total of `metric` since midnight of `now`'s day
    fn sum_today(&self, metric: HealthMetric, now: NaiveDateTime) -> u32;

    /// Typical total of `metric` over the time-of-day window `start..end`,
    /// averaged across past days selected by `scope`
    fn sum_averaged(
        &self,
        metric: HealthMetric,
        start: NaiveDateTime,
        end: NaiveDateTime,
        scope: AverageScope,
    ) -> u32;
}
