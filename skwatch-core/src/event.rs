//! Events delivered to the watchface dispatcher

use skwatch_protocol::{InboundUpdate, LinkError};

use crate::traits::health::HealthEvent;
use crate::watchface::battery::BatteryState;

/// Everything the watchface reacts to, in arrival order
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Clock
    /// Minute boundary passed
    Tick,

    // Telemetry
    /// Charge level or charger state changed
    Battery(BatteryState),
    /// Health service pushed an update
    Health(HealthEvent),

    // Companion transport
    /// Decoded update from the companion
    Inbox(InboundUpdate),
    /// Companion frame arrived but could not be decoded
    InboxDropped(LinkError),
    /// Companion acknowledged an outbound message
    OutboxSent { seq: u8 },
    /// Companion rejected an outbound message
    OutboxFailed { seq: u8 },
}

impl Event {
    /// Transport bookkeeping that never touches watchface state
    pub fn is_transport_only(&self) -> bool {
        matches!(
            self,
            Event::InboxDropped(_) | Event::OutboxSent { .. } | Event::OutboxFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skwatch_protocol::FrameError;

    #[test]
    fn test_transport_only() {
        assert!(Event::OutboxSent { seq: 1 }.is_transport_only());
        assert!(Event::InboxDropped(LinkError::Frame(FrameError::InvalidChecksum)).is_transport_only());
        assert!(!Event::Tick.is_transport_only());
        assert!(!Event::Inbox(InboundUpdate::default()).is_transport_only());
    }
}
