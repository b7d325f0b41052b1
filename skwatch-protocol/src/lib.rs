//! Skwatch link protocols
//!
//! The watch talks to two peers over UART:
//!
//! - the **companion** (phone bridge), which pushes weather and preference
//!   updates as AppMessage dictionaries and receives weather requests
//! - the **panel**, a display co-processor that paints text layers
//!
//! Both links share one binary frame format:
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 1B     │ 1B   │ 0–250B      │ 1B       │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod companion;
pub mod dictionary;
pub mod frame;
pub mod messages;
pub mod panel;

pub use companion::{CompanionMessage, LinkError};
pub use dictionary::{Dictionary, DictionaryError, Tuple, TupleType};
pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE};
pub use messages::{Conditions, InboundUpdate, WeatherRequest};
pub use panel::PanelMessage;
