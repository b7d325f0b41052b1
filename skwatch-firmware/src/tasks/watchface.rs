//! Watchface task
//!
//! Sole consumer of `EVENTS`. Owns the watchface state, records counted
//! steps, and forwards weather requests to the companion.

use chrono::{NaiveDate, NaiveDateTime};
use defmt::*;
use portable_atomic::Ordering;

use skwatch_core::config::WatchfaceConfig;
use skwatch_core::traits::health::HealthEvent;
use skwatch_core::watchface::{BatteryState, Persistence};
use skwatch_core::{Event, Reaction, StepHistory, Watchface};
use skwatch_hal_rp2040::flash::FlashStorage;

use crate::channels::{Outgoing, COMPANION_OUTBOX, EVENTS, PENDING_STEPS};
use crate::clock::CLOCK;
use crate::display::SharedScreen;

type Face = Watchface<FlashStorage<'static>, SharedScreen, StepHistory>;

/// Watchface task - dispatches events in arrival order
#[embassy_executor::task]
pub async fn watchface_task(
    config: WatchfaceConfig,
    storage: FlashStorage<'static>,
    battery: Option<BatteryState>,
) {
    info!("Watchface task started");

    let history = if config.steps.sensor {
        StepHistory::new()
    } else {
        StepHistory::unavailable()
    };
    let mut face: Face = Watchface::new(config, storage, SharedScreen, history);

    let now = CLOCK.now();
    let startup = face.start(&now, battery);
    info!(
        "Watchface up: settings {:?}, step tracking {}",
        startup.settings_source, startup.step_tracking
    );
    if let Err(e) = startup.render {
        warn!("Initial render failed: {:?}", e);
    }

    let mut today = now.date();
    let mut last = now;

    loop {
        let event = EVENTS.receive().await;
        let now = CLOCK.now();

        match &event {
            Event::Health(_) => record_pending_steps(&mut face, last, now),
            Event::InboxDropped(e) => warn!("Inbox dropped: {:?}", e),
            Event::OutboxFailed { seq } => warn!("Outbox failed: seq={}", seq),
            Event::OutboxSent { seq } => debug!("Outbox sent: seq={}", seq),
            _ => trace!("Event: {:?}", event),
        }

        let rollover = matches!(event, Event::Tick) && new_day(&mut today, now.date());
        if rollover {
            // Steps pending at midnight belong to yesterday
            record_pending_steps(&mut face, last, now);
        }
        last = now;

        let reaction = face.handle(&now, event);
        report(&reaction);

        if rollover {
            info!("New day, refreshing step goal");
            let reaction = face.handle(&now, Event::Health(HealthEvent::SignificantUpdate));
            report(&reaction);
        }
    }
}

fn record_pending_steps(face: &mut Face, last: NaiveDateTime, now: NaiveDateTime) {
    let steps = PENDING_STEPS.swap(0, Ordering::Relaxed);
    if steps > 0 {
        face.health_mut().record_since(last, now, steps);
    }
}

fn new_day(today: &mut NaiveDate, date: NaiveDate) -> bool {
    if *today == date {
        return false;
    }
    *today = date;
    true
}

fn report(reaction: &Reaction) {
    match reaction.persisted {
        Persistence::NotNeeded => {}
        Persistence::Saved => info!("Settings saved"),
        Persistence::Failed(e) => warn!("Settings not saved: {:?}", e),
    }
    if let Err(e) = reaction.render {
        warn!("Render failed: {:?}", e);
    }
    if reaction.weather_request.is_some() {
        debug!("Requesting weather");
        if COMPANION_OUTBOX.try_send(Outgoing::WeatherRequest).is_err() {
            warn!("Companion outbox full, weather request dropped");
        }
    }
}
