//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod battery;
pub mod companion_rx;
pub mod companion_tx;
pub mod panel_tx;
pub mod pedometer;
pub mod tick;
pub mod watchface;

pub use battery::battery_task;
pub use companion_rx::companion_rx_task;
pub use companion_tx::companion_tx_task;
pub use panel_tx::panel_tx_task;
pub use pedometer::pedometer_task;
pub use tick::tick_task;
pub use watchface::watchface_task;
