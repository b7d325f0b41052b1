//! Watchface dispatcher
//!
//! Owns all watchface state and routes each [`Event`] to the component
//! that handles it. Handlers run to completion; the caller gets a
//! [`Reaction`] describing what changed and what to send.

use chrono::NaiveDateTime;
use skwatch_display::{DisplayBackend, DisplayError, LayerSet};
use skwatch_hal::FlashStorage;
use skwatch_protocol::WeatherRequest;

use crate::config::WatchfaceConfig;
use crate::event::Event;
use crate::settings::{Settings, SettingsSource, SettingsStore};
use crate::traits::health::{HealthEvent, HealthService};
use crate::watchface::{
    BatteryState, DisplayState, MessageDecoder, PeriodicRefresher, Persistence,
    TelemetryObservers,
};

/// Outcome of [`Watchface::start`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Startup {
    pub settings_source: SettingsSource,
    /// Step observer registered
    pub step_tracking: bool,
    pub render: Result<(), DisplayError>,
}

/// Outcome of one [`Watchface::handle`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reaction {
    /// Layers repainted
    pub changes: LayerSet,
    pub persisted: Persistence,
    /// Send this to the companion
    pub weather_request: Option<WeatherRequest>,
    pub render: Result<(), DisplayError>,
}

impl Reaction {
    fn quiet() -> Self {
        Self {
            changes: LayerSet::EMPTY,
            persisted: Persistence::NotNeeded,
            weather_request: None,
            render: Ok(()),
        }
    }
}

/// Application state, passed explicitly into every handler
pub struct Watchface<S, D, H> {
    config: WatchfaceConfig,
    settings: SettingsStore<S>,
    display: DisplayState,
    backend: D,
    health: H,
    refresher: PeriodicRefresher,
    telemetry: TelemetryObservers,
}

impl<S, D, H> Watchface<S, D, H>
where
    S: FlashStorage,
    D: DisplayBackend,
    H: HealthService,
{
    pub fn new(config: WatchfaceConfig, storage: S, backend: D, health: H) -> Self {
        Self {
            refresher: PeriodicRefresher::new(&config.weather),
            telemetry: TelemetryObservers::new(config.steps.baseline),
            settings: SettingsStore::new(storage),
            display: DisplayState::placeholder(),
            config,
            backend,
            health,
        }
    }

    /// Load settings and paint the first frame
    ///
    /// `battery` is the charge state at boot, if already known.
    pub fn start(&mut self, now: &NaiveDateTime, battery: Option<BatteryState>) -> Startup {
        let loaded = self.settings.load();
        let background = loaded.settings.background_color;

        self.display = DisplayState::placeholder();
        self.display
            .set_background(background, self.backend.legible_over(background));
        self.display.set_time(now, loaded.settings.twenty_four_hour);
        self.display.set_date(now);
        if let Some(state) = battery {
            self.telemetry.on_battery(&state, &mut self.display);
        }

        let step_tracking = self.telemetry.register(&self.health, now);
        if step_tracking {
            self.telemetry.on_health(
                HealthEvent::SignificantUpdate,
                &self.health,
                now,
                &mut self.display,
            );
        }

        Startup {
            settings_source: loaded.source,
            step_tracking,
            render: self.display.present(LayerSet::ALL, &mut self.backend),
        }
    }

    /// Dispatch one event
    pub fn handle(&mut self, now: &NaiveDateTime, event: Event) -> Reaction {
        let mut reaction = Reaction::quiet();

        match event {
            Event::Tick => {
                let refresh = self
                    .refresher
                    .on_tick(now, self.settings.current(), &mut self.display);
                reaction.changes = refresh.changes;
                reaction.weather_request = refresh.weather_request;
            }
            Event::Battery(state) => {
                reaction.changes = self.telemetry.on_battery(&state, &mut self.display);
            }
            Event::Health(health_event) => {
                reaction.changes = self.telemetry.on_health(
                    health_event,
                    &self.health,
                    now,
                    &mut self.display,
                );
            }
            Event::Inbox(update) => {
                let decoded = MessageDecoder::new(
                    &mut self.settings,
                    &mut self.display,
                    &self.backend,
                    &self.config.weather,
                )
                .apply(&update, now);
                reaction.changes = decoded.changes;
                reaction.persisted = decoded.persisted;
            }
            Event::InboxDropped(_) | Event::OutboxSent { .. } | Event::OutboxFailed { .. } => {}
        }

        if !reaction.changes.is_empty() {
            reaction.render = self.display.present(reaction.changes, &mut self.backend);
        }
        reaction
    }

    pub fn config(&self) -> &WatchfaceConfig {
        &self.config
    }

    pub fn settings(&self) -> &Settings {
        self.settings.current()
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn telemetry(&self) -> &TelemetryObservers {
        &self.telemetry
    }

    pub fn storage(&self) -> &S {
        self.settings.storage()
    }

    pub fn backend(&self) -> &D {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut D {
        &mut self.backend
    }

    pub fn health_mut(&mut self) -> &mut H {
        &mut self.health
    }
}
