//! RP2040-specific HAL for the watchface firmware
//!
//! - Flash storage driver (implements `skwatch_hal::FlashStorage`)
//! - Battery sensing over the VSYS divider and VBUS detect pin

#![no_std]

pub mod battery;
pub mod flash;

// Re-export shared traits from skwatch-hal for convenience
pub use skwatch_hal::{FlashStorage as FlashStorageTrait, StorageKey};
