//! On-device step history
//!
//! Steps land in 15-minute buckets. A ring of day records keeps today plus
//! the previous week, which is enough for same-time-of-day and whole-day
//! averages.

use chrono::{Datelike, Days, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::traits::health::{AverageScope, HealthMetric, HealthService};

/// Minutes per bucket
pub const BUCKET_MINUTES: i64 = 15;

/// Buckets in one day
pub const BUCKETS_PER_DAY: usize = (24 * 60 / BUCKET_MINUTES) as usize;

/// Today plus seven past days
pub const HISTORY_DAYS: usize = 8;

#[derive(Clone, Copy)]
struct Day {
    date: Option<NaiveDate>,
    buckets: [u16; BUCKETS_PER_DAY],
}

impl Day {
    const EMPTY: Day = Day {
        date: None,
        buckets: [0; BUCKETS_PER_DAY],
    };

    fn window_sum(&self, from: usize, to: usize) -> u32 {
        self.buckets[from..to].iter().map(|&b| b as u32).sum()
    }
}

/// Step counts bucketed by time of day
pub struct StepHistory {
    days: [Day; HISTORY_DAYS],
    available: bool,
}

impl Default for StepHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl StepHistory {
    pub const fn new() -> Self {
        Self {
            days: [Day::EMPTY; HISTORY_DAYS],
            available: true,
        }
    }

    /// History on a board without a step detector
    ///
    /// Reports the step metric as inaccessible so no observer registers.
    pub const fn unavailable() -> Self {
        Self {
            days: [Day::EMPTY; HISTORY_DAYS],
            available: false,
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Add `steps` taken at `now`
    pub fn record(&mut self, now: NaiveDateTime, steps: u32) {
        let date = now.date();
        let day = &mut self.days[slot(date)];
        if day.date != Some(date) {
            *day = Day {
                date: Some(date),
                ..Day::EMPTY
            };
        }
        let bucket = (now.time().num_seconds_from_midnight() as i64 / (BUCKET_MINUTES * 60)) as usize;
        let count = &mut day.buckets[bucket.min(BUCKETS_PER_DAY - 1)];
        *count = count.saturating_add(steps.min(u16::MAX as u32) as u16);
    }

    /// Add `steps` counted somewhere between `last` and `now`
    ///
    /// Steps pending across midnight belong to the day they were counted
    /// in, so they land in the final bucket of `last`'s day.
    pub fn record_since(&mut self, last: NaiveDateTime, now: NaiveDateTime, steps: u32) {
        let at = if now.date() > last.date() {
            last.date().and_time(NaiveTime::MIN) + Duration::seconds(86_399)
        } else {
            now
        };
        self.record(at, steps);
    }

    fn day(&self, date: NaiveDate) -> Option<&Day> {
        let day = &self.days[slot(date)];
        (day.date == Some(date)).then_some(day)
    }
}

fn slot(date: NaiveDate) -> usize {
    date.num_days_from_ce().rem_euclid(HISTORY_DAYS as i32) as usize
}

/// Bucket range covered by `start..end`, relative to `start`'s midnight
///
/// A partly covered final bucket counts in full.
fn window(start: NaiveDateTime, end: NaiveDateTime) -> (usize, usize) {
    let midnight = start.date().and_time(NaiveTime::MIN);
    let clamp = |b: i64| b.clamp(0, BUCKETS_PER_DAY as i64) as usize;
    let from = clamp((start - midnight).num_minutes() / BUCKET_MINUTES);
    let to = clamp(((end - midnight).num_minutes() + BUCKET_MINUTES - 1) / BUCKET_MINUTES);
    (from, to.max(from))
}

impl HealthService for StepHistory {
    fn metric_accessible(
        &self,
        metric: HealthMetric,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> bool {
        match metric {
            HealthMetric::StepCount => self.available && start <= end,
        }
    }

    fn sum_today(&self, _metric: HealthMetric, now: NaiveDateTime) -> u32 {
        self.day(now.date())
            .map(|day| day.window_sum(0, BUCKETS_PER_DAY))
            .unwrap_or(0)
    }

    fn sum_averaged(
        &self,
        _metric: HealthMetric,
        start: NaiveDateTime,
        end: NaiveDateTime,
        scope: AverageScope,
    ) -> u32 {
        let (from, to) = window(start, end);
        let today = start.date();
        let back: &[u64] = match scope {
            AverageScope::Daily => &[1, 2, 3, 4, 5, 6, 7],
            AverageScope::Weekly => &[7],
        };

        let (total, days) = back
            .iter()
            .filter_map(|&n| today.checked_sub_days(Days::new(n)))
            .filter_map(|date| self.day(date))
            .fold((0u32, 0u32), |(total, days), day| {
                (total + day.window_sum(from, to), days + 1)
            });

        if days == 0 {
            0
        } else {
            total / days
        }
    }
}
