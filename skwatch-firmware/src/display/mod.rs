//! Display backend for the watchface task
//!
//! Writes land in the shared [`Screen`](skwatch_display::Screen); the
//! panel tx task turns its dirty layers into frames.

pub mod shared;

pub use shared::SharedScreen;
