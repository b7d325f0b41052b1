//! Board-agnostic watchface logic
//!
//! Everything here reacts to one event at a time and runs to completion:
//!
//! - Configuration types and the embedded TOML parser
//! - Durable settings and their storage
//! - Display state derivation (time, date, battery, steps, weather)
//! - The inbound message decoder, periodic refresher and telemetry observers
//! - An on-device step history backing the health service trait
//! - The [`Watchface`](app::Watchface) dispatcher tying them together
//!
//! Nothing in this crate logs; outcomes are returned to the caller.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod app;
pub mod config;
pub mod event;
pub mod history;
pub mod settings;
pub mod traits;
pub mod watchface;

pub use app::{Reaction, Startup, Watchface};
pub use event::Event;
pub use history::StepHistory;
pub use settings::{LoadOutcome, Settings, SettingsError, SettingsSource, SettingsStore};
