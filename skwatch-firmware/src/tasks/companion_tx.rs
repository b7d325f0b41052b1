//! Companion UART transmit task
//!
//! Sends ACK/NACK replies and weather requests to the phone.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use skwatch_core::Event;
use skwatch_protocol::{CompanionMessage, WeatherRequest};

use crate::channels::{Outgoing, COMPANION_OUTBOX, EVENTS};

/// Companion TX task - drains the outbox onto the UART
#[embassy_executor::task]
pub async fn companion_tx_task(mut tx: BufferedUartTx) {
    info!("Companion TX task started");

    let mut next_seq: u8 = 0;

    loop {
        let outgoing = COMPANION_OUTBOX.receive().await;

        let message = match outgoing {
            Outgoing::WeatherRequest => {
                next_seq = next_seq.wrapping_add(1);
                CompanionMessage::AppMessage {
                    seq: next_seq,
                    dictionary: WeatherRequest.to_dictionary(),
                }
            }
            Outgoing::Ack(seq) => CompanionMessage::Ack { seq },
            Outgoing::Nack(seq) => CompanionMessage::Nack { seq },
        };

        let sent = match message.to_frame() {
            Ok(frame) => match frame.encode_to_vec() {
                Ok(bytes) => match tx.write_all(&bytes).await {
                    Ok(()) => true,
                    Err(e) => {
                        warn!("UART write error: {:?}", e);
                        false
                    }
                },
                Err(e) => {
                    warn!("Failed to encode frame: {:?}", e);
                    false
                }
            },
            Err(e) => {
                warn!("Failed to build {:?}: {:?}", outgoing, e);
                false
            }
        };

        match outgoing {
            Outgoing::WeatherRequest if sent => debug!("Weather request seq={} sent", next_seq),
            Outgoing::WeatherRequest => {
                // Never wait on the watchface here, it may be waiting on us
                if EVENTS.try_send(Event::OutboxFailed { seq: next_seq }).is_err() {
                    warn!("Event queue full, outbox failure seq={} not reported", next_seq);
                }
            }
            _ => {}
        }
    }
}
