//! Battery sampling task

use defmt::*;
use embassy_futures::select::select;
use embassy_time::{Duration, Timer};

use skwatch_core::watchface::{BatteryState, ChargeCurve};
use skwatch_core::Event;
use skwatch_hal_rp2040::battery::BatterySense;

use crate::channels::EVENTS;

/// Battery task - samples on a fixed period or when the charger changes,
/// and reports only when the displayed state would change
#[embassy_executor::task]
pub async fn battery_task(
    mut sense: BatterySense<'static>,
    curve: ChargeCurve,
    sample_secs: u16,
    mut last: Option<BatteryState>,
) {
    info!("Battery task started ({}s period)", sample_secs);

    let period = Duration::from_secs(sample_secs.max(1) as u64);

    loop {
        select(Timer::after(period), sense.wait_for_charger_change()).await;

        match sense.sample().await {
            Ok(sample) => {
                let state = BatteryState {
                    percent: curve.percent(sample.millivolts),
                    charging: sample.charging,
                };
                trace!("VSYS {}mV -> {}%", sample.millivolts, state.percent);
                if last != Some(state) {
                    last = Some(state);
                    EVENTS.send(Event::Battery(state)).await;
                }
            }
            Err(e) => {
                warn!("Battery sample failed: {:?}", e);
            }
        }
    }
}

/// One reading for the startup screen
pub async fn read_once(sense: &mut BatterySense<'static>, curve: &ChargeCurve) -> Option<BatteryState> {
    match sense.sample().await {
        Ok(sample) => Some(BatteryState {
            percent: curve.percent(sample.millivolts),
            charging: sample.charging,
        }),
        Err(e) => {
            warn!("Initial battery sample failed: {:?}", e);
            None
        }
    }
}
