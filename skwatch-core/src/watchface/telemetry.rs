//! Battery and step observers

use chrono::{Duration, NaiveDateTime, NaiveTime};
use skwatch_display::LayerSet;

use super::battery::BatteryState;
use super::display_state::DisplayState;
use super::steps::{StepMetrics, StepMood};
use crate::config::StepBaseline;
use crate::traits::health::{AverageScope, HealthEvent, HealthMetric, HealthService};

/// Holds step figures between health events
#[derive(Debug, Clone)]
pub struct TelemetryObservers {
    metrics: StepMetrics,
    baseline: StepBaseline,
    steps_registered: bool,
}

fn start_of_day(now: &NaiveDateTime) -> NaiveDateTime {
    now.date().and_time(NaiveTime::MIN)
}

impl TelemetryObservers {
    pub fn new(baseline: StepBaseline) -> Self {
        Self {
            metrics: StepMetrics::default(),
            baseline,
            steps_registered: false,
        }
    }

    /// Capability check, run once at startup
    ///
    /// Without step data the observer stays unregistered and the step
    /// layer keeps its placeholder.
    pub fn register<H: HealthService>(&mut self, health: &H, now: &NaiveDateTime) -> bool {
        self.steps_registered =
            health.metric_accessible(HealthMetric::StepCount, start_of_day(now), *now);
        self.steps_registered
    }

    pub fn steps_registered(&self) -> bool {
        self.steps_registered
    }

    pub fn metrics(&self) -> &StepMetrics {
        &self.metrics
    }

    pub fn on_battery(&self, state: &BatteryState, display: &mut DisplayState) -> LayerSet {
        display.set_battery(state)
    }

    pub fn on_health<H: HealthService>(
        &mut self,
        event: HealthEvent,
        health: &H,
        now: &NaiveDateTime,
        display: &mut DisplayState,
    ) -> LayerSet {
        if !self.steps_registered {
            return LayerSet::EMPTY;
        }

        let midnight = start_of_day(now);
        if event == HealthEvent::SignificantUpdate {
            self.metrics.goal = health.sum_averaged(
                HealthMetric::StepCount,
                midnight,
                midnight + Duration::days(1),
                AverageScope::Daily,
            );
        }
        if event == HealthEvent::SleepUpdate {
            return LayerSet::EMPTY;
        }

        self.metrics.count = health.sum_today(HealthMetric::StepCount, *now);
        let threshold = match self.baseline {
            StepBaseline::DailyGoal => self.metrics.goal,
            StepBaseline::TypicalByNow => {
                self.metrics.average = health.sum_averaged(
                    HealthMetric::StepCount,
                    midnight,
                    *now,
                    AverageScope::Daily,
                );
                self.metrics.average
            }
        };

        display.set_steps(
            self.metrics.count,
            StepMood::select(self.metrics.count, threshold),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::StepHistory;
    use chrono::NaiveDate;
    use skwatch_display::{Color, Layer};

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn history() -> StepHistory {
        let mut history = StepHistory::new();
        // Yesterday: 1000 by 9am, 6000 total
        history.record(at(9, 8, 0), 1000);
        history.record(at(9, 18, 0), 5000);
        history
    }

    #[test]
    fn test_battery_text() {
        let observers = TelemetryObservers::new(StepBaseline::DailyGoal);
        let mut display = DisplayState::placeholder();
        let changes = observers.on_battery(
            &BatteryState {
                percent: 80,
                charging: true,
            },
            &mut display,
        );
        assert_eq!(changes, LayerSet::of(Layer::Battery));
        assert_eq!(display.text(Layer::Battery), "charging");
    }

    #[test]
    fn test_unregistered_ignores_health() {
        let mut observers = TelemetryObservers::new(StepBaseline::DailyGoal);
        let health = StepHistory::unavailable();
        let mut display = DisplayState::placeholder();
        assert!(!observers.register(&health, &at(10, 9, 0)));
        let changes =
            observers.on_health(HealthEvent::MovementUpdate, &health, &at(10, 9, 0), &mut display);
        assert_eq!(changes, LayerSet::EMPTY);
        assert_eq!(display.text(Layer::Steps), "");
    }

    #[test]
    fn test_goal_baseline() {
        let mut health = history();
        let mut observers = TelemetryObservers::new(StepBaseline::DailyGoal);
        let mut display = DisplayState::placeholder();
        let now = at(10, 9, 0);
        assert!(observers.register(&health, &now));

        health.record(at(10, 8, 30), 2500);
        observers.on_health(HealthEvent::SignificantUpdate, &health, &now, &mut display);
        assert_eq!(observers.metrics().goal, 6000);
        assert_eq!(observers.metrics().count, 2500);
        assert_eq!(display.mood(), Some(StepMood::NotYet));
        assert_eq!(display.text(Layer::Steps), "2,500 ");
        assert_eq!(display.color(Layer::Steps), Color::PICTON_BLUE);

        health.record(at(10, 12, 0), 3500);
        let changes =
            observers.on_health(HealthEvent::MovementUpdate, &health, &at(10, 12, 0), &mut display);
        assert!(changes.contains(Layer::Mood));
        assert_eq!(display.mood(), Some(StepMood::Achieved));
    }

    #[test]
    fn test_average_baseline() {
        let mut health = history();
        let mut observers = TelemetryObservers::new(StepBaseline::TypicalByNow);
        let mut display = DisplayState::placeholder();
        let now = at(10, 9, 0);
        observers.register(&health, &now);

        // 1200 beats the 1000 typical by 9am, though far from the 6000 goal
        health.record(at(10, 8, 30), 1200);
        observers.on_health(HealthEvent::SignificantUpdate, &health, &now, &mut display);
        assert_eq!(observers.metrics().average, 1000);
        assert_eq!(display.mood(), Some(StepMood::Achieved));
    }

    #[test]
    fn test_sleep_update_skips_steps() {
        let mut health = history();
        let mut observers = TelemetryObservers::new(StepBaseline::DailyGoal);
        let mut display = DisplayState::placeholder();
        let now = at(10, 9, 0);
        observers.register(&health, &now);
        health.record(at(10, 8, 30), 100);

        let changes = observers.on_health(HealthEvent::SleepUpdate, &health, &now, &mut display);
        assert_eq!(changes, LayerSet::EMPTY);
        assert_eq!(observers.metrics().count, 0);
    }

    #[test]
    fn test_goal_only_on_significant_update() {
        let mut health = history();
        let mut observers = TelemetryObservers::new(StepBaseline::DailyGoal);
        let mut display = DisplayState::placeholder();
        let now = at(10, 9, 0);
        observers.register(&health, &now);

        observers.on_health(HealthEvent::MovementUpdate, &health, &now, &mut display);
        assert_eq!(observers.metrics().goal, 0);

        health.record(at(10, 8, 0), 10);
        observers.on_health(HealthEvent::SignificantUpdate, &health, &now, &mut display);
        assert_eq!(observers.metrics().goal, 6000);
    }
}
