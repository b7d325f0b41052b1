//! Battery sensing
//!
//! On the Pico module VSYS reaches ADC3 (GPIO29) through a 3:1 divider and
//! VBUS presence is reported on GPIO24. A present VBUS means the charger is
//! running.

use embassy_rp::adc::{Adc, Async, Channel, Error as AdcError};
use embassy_rp::gpio::Input;

/// ADC reference voltage in millivolts
pub const ADC_REFERENCE_MV: u32 = 3300;

/// Full-scale ADC reading (12-bit)
pub const ADC_FULL_SCALE: u32 = 4096;

/// VSYS divider ratio on the Pico module
pub const VSYS_DIVIDER: u32 = 3;

/// Convert a raw ADC3 sample to VSYS millivolts
pub fn vsys_millivolts(raw: u16) -> u16 {
    let mv = raw as u32 * ADC_REFERENCE_MV * VSYS_DIVIDER / ADC_FULL_SCALE;
    mv.min(u16::MAX as u32) as u16
}

/// One battery measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatterySample {
    /// Battery voltage in millivolts
    pub millivolts: u16,
    /// External power present
    pub charging: bool,
}

/// VSYS sense channel plus VBUS detect pin
pub struct BatterySense<'d> {
    adc: Adc<'d, Async>,
    vsys: Channel<'d>,
    vbus: Input<'d>,
}

impl<'d> BatterySense<'d> {
    pub fn new(adc: Adc<'d, Async>, vsys: Channel<'d>, vbus: Input<'d>) -> Self {
        Self { adc, vsys, vbus }
    }

    /// Charging state from the VBUS detect pin
    pub fn is_charging(&self) -> bool {
        self.vbus.is_high()
    }

    /// Sample battery voltage and charging state
    pub async fn sample(&mut self) -> Result<BatterySample, AdcError> {
        let raw = self.adc.read(&mut self.vsys).await?;
        Ok(BatterySample {
            millivolts: vsys_millivolts(raw),
            charging: self.is_charging(),
        })
    }

    /// Wait until VBUS is connected or removed
    pub async fn wait_for_charger_change(&mut self) {
        self.vbus.wait_for_any_edge().await;
    }
}
