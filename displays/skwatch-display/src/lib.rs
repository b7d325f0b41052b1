//! Display abstraction for the watchface
//!
//! The screen is a fixed set of text layers over a solid background:
//!
//! ```text
//! ┌──────────────────────────┐
//! │ 72°F🌣            Weather │
//! │        13:05        Time  │
//! │          PM     Meridiem  │
//! │      Tue 03/04      Date  │
//! │ 80%               Battery │
//! │ 4,210 😌     Steps, Mood  │
//! └──────────────────────────┘
//! ```
//!
//! - [`DisplayBackend`]: "set text on a layer" interface the core writes to
//! - [`Screen`]: in-memory layer buffer with per-layer dirty tracking
//! - [`PanelEncoder`]: turns dirty layers into panel link frames

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod backend;
pub mod color;
pub mod encoder;
pub mod layer;
pub mod screen;

pub use backend::{DisplayBackend, DisplayError};
pub use color::Color;
pub use encoder::PanelEncoder;
pub use layer::{Layer, LayerSet, LAYER_COUNT};
pub use screen::{Screen, LAYER_TEXT_LEN};
