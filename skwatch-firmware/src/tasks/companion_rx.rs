//! Companion UART receive task
//!
//! Parses frames from the phone companion, acknowledges AppMessages and
//! forwards decoded updates to the watchface.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use skwatch_core::Event;
use skwatch_protocol::companion::MSG_APP_MESSAGE;
use skwatch_protocol::{CompanionMessage, Frame, FrameParser, LinkError};

use crate::channels::{Outgoing, COMPANION_OUTBOX, EVENTS};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Companion RX task - receives and parses frames from the phone
#[embassy_executor::task]
pub async fn companion_rx_task(mut rx: BufferedUartRx) {
    info!("Companion RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => handle_frame(&frame).await,
                        Ok(None) => {}
                        Err(e) => {
                            warn!("Frame parse error: {:?}", e);
                            EVENTS.send(Event::InboxDropped(LinkError::Frame(e))).await;
                        }
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

async fn handle_frame(frame: &Frame) {
    if frame.msg_type == MSG_APP_MESSAGE {
        handle_app_message(frame).await;
        return;
    }

    match CompanionMessage::from_frame(frame) {
        Ok(CompanionMessage::Ack { seq }) => {
            EVENTS.send(Event::OutboxSent { seq }).await;
        }
        Ok(CompanionMessage::Nack { seq }) => {
            EVENTS.send(Event::OutboxFailed { seq }).await;
        }
        Ok(CompanionMessage::AppMessage { .. }) => {}
        Err(e) => {
            warn!("Dropping companion frame: {:?}", e);
            EVENTS.send(Event::InboxDropped(e)).await;
        }
    }
}

async fn handle_app_message(frame: &Frame) {
    match CompanionMessage::decode_update(frame) {
        Ok((seq, update)) => {
            debug!("AppMessage seq={}", seq);
            COMPANION_OUTBOX.send(Outgoing::Ack(seq)).await;
            if update.is_empty() {
                debug!("AppMessage seq={} carried no known keys", seq);
            }
            EVENTS.send(Event::Inbox(update)).await;
        }
        Err(e) => {
            warn!("Dropping companion frame: {:?}", e);
            if let Some(seq) = CompanionMessage::sequence_of(frame) {
                COMPANION_OUTBOX.send(Outgoing::Nack(seq)).await;
            }
            EVENTS.send(Event::InboxDropped(e)).await;
        }
    }
}
