//! Step detector task
//!
//! The accelerometer's step-detect output pulses once per step. Steps are
//! counted into `PENDING_STEPS` and a burst is reported as one movement
//! update once it goes quiet.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{with_timeout, Duration};
use portable_atomic::Ordering;

use skwatch_core::traits::health::HealthEvent;
use skwatch_core::Event;

use crate::channels::{EVENTS, PENDING_STEPS};

/// Quiet time that ends a burst of steps
const BURST_GAP: Duration = Duration::from_secs(5);

/// Pedometer task - counts step pulses on the detector pin
#[embassy_executor::task]
pub async fn pedometer_task(mut detector: Input<'static>) {
    info!("Pedometer task started");

    loop {
        detector.wait_for_rising_edge().await;
        let mut burst: u32 = 1;
        PENDING_STEPS.fetch_add(1, Ordering::Relaxed);

        while with_timeout(BURST_GAP, detector.wait_for_rising_edge())
            .await
            .is_ok()
        {
            burst += 1;
            PENDING_STEPS.fetch_add(1, Ordering::Relaxed);
        }

        trace!("Step burst: {}", burst);
        EVENTS
            .send(Event::Health(HealthEvent::MovementUpdate))
            .await;
    }
}
