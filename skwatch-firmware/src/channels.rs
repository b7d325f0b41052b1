//! Inter-task communication channels
//!
//! Producers (tick, companion rx, battery, pedometer) feed one event
//! channel; the watchface task is its only consumer, so events are handled
//! strictly in arrival order.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use portable_atomic::AtomicU32;

use skwatch_core::Event;
use skwatch_display::Screen;

/// Queued events for the watchface task
const EVENT_CHANNEL_SIZE: usize = 8;

/// Queued outbound companion messages
const OUTBOX_CHANNEL_SIZE: usize = 4;

/// Something the companion tx task should send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outgoing {
    /// Poke the companion for fresh weather
    WeatherRequest,
    /// Inbound AppMessage decoded
    Ack(u8),
    /// Inbound AppMessage rejected
    Nack(u8),
}

/// Events for the watchface, in delivery order
pub static EVENTS: Channel<CriticalSectionRawMutex, Event, EVENT_CHANNEL_SIZE> = Channel::new();

/// Messages for the companion link
pub static COMPANION_OUTBOX: Channel<CriticalSectionRawMutex, Outgoing, OUTBOX_CHANNEL_SIZE> =
    Channel::new();

/// Screen contents shared between the watchface and panel tx tasks
///
/// Only touched inside short critical sections; never held across an await.
pub static SCREEN: Mutex<CriticalSectionRawMutex, RefCell<Screen>> =
    Mutex::new(RefCell::new(Screen::new()));

/// Screen has dirty layers to push to the panel
pub static PANEL_UPDATE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Steps counted by the pedometer and not yet recorded in history
pub static PENDING_STEPS: AtomicU32 = AtomicU32::new(0);
