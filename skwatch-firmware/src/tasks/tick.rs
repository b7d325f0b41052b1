//! Minute tick task
//!
//! Wakes on every wall-clock minute boundary and tells the watchface.

use defmt::*;
use embassy_time::Timer;

use skwatch_core::Event;

use crate::channels::EVENTS;
use crate::clock::CLOCK;

/// Tick task - one `Event::Tick` per minute, aligned to :00 seconds
#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started");

    loop {
        Timer::after(CLOCK.until_next_minute()).await;
        trace!("Minute tick");
        EVENTS.send(Event::Tick).await;
    }
}
