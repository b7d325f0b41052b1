//! Skwatch Hardware Abstraction Layer
//!
//! Traits the watchface logic needs from the board, implemented by
//! chip-specific HALs. Only durable storage crosses this boundary today;
//! display and companion links are byte streams owned by the firmware.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  skwatch-core / skwatch-firmware        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  skwatch-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ skwatch-hal-  │       │ MemoryStorage │
//! │    rp2040     │       │ (host, tests) │
//! └───────────────┘       └───────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod flash;
pub mod memory;

pub use flash::{FlashError, FlashStorage, StorageKey};
pub use memory::MemoryStorage;
