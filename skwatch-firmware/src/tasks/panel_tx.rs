//! Panel UART transmit task
//!
//! Pushes changed layers to the display panel whenever the screen buffer
//! is marked dirty.

use defmt::*;
use embassy_rp::uart::{Async, UartTx};

use skwatch_display::{PanelEncoder, Screen};

use crate::channels::{PANEL_UPDATE, SCREEN};

/// Panel TX task - repaints everything once, then sends only dirty layers
#[embassy_executor::task]
pub async fn panel_tx_task(mut tx: UartTx<'static, Async>) {
    info!("Panel TX task started");

    let screen = take_snapshot();
    send_frames(&mut tx, PanelEncoder::full(&screen)).await;

    loop {
        PANEL_UPDATE.wait().await;
        let screen = take_snapshot();
        send_frames(&mut tx, PanelEncoder::dirty(&screen)).await;
    }
}

/// Copy the screen out and clear its dirty flags in one critical section
fn take_snapshot() -> Screen {
    SCREEN.lock(|cell| {
        let mut screen = cell.borrow_mut();
        let snapshot = screen.clone();
        screen.mark_clean();
        snapshot
    })
}

async fn send_frames(tx: &mut UartTx<'static, Async>, frames: PanelEncoder<'_>) {
    let mut count = 0usize;
    for frame in frames {
        let bytes = match frame.encode_to_vec() {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to encode panel frame: {:?}", e);
                continue;
            }
        };
        if let Err(e) = tx.write(&bytes).await {
            warn!("Failed to send panel frame: {:?}", e);
            // Resend everything on the next update
            SCREEN.lock(|cell| cell.borrow_mut().mark_all_dirty());
            return;
        }
        count += 1;
    }
    trace!("Panel update sent ({} frames)", count);
}
