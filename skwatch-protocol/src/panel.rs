//! Display panel link messages
//!
//! The panel is a dumb terminal holding one text box per layer. The watch
//! sends only what changed: background fills, layer text and layer colors.

use heapless::Vec;

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};

pub const MSG_CLEAR: u8 = 0x20;
pub const MSG_BACKGROUND: u8 = 0x21;
pub const MSG_TEXT: u8 = 0x22;
pub const MSG_TEXT_COLOR: u8 = 0x23;

/// Messages from the watch to the panel
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelMessage<'a> {
    /// Blank every layer
    Clear,
    /// Fill the background, color packed as `0xRRGGBB`
    Background { color: u32 },
    /// Replace the text of a layer (UTF-8)
    Text { layer: u8, text: &'a str },
    /// Set the text color of a layer
    TextColor { layer: u8, color: u32 },
}

fn rgb_bytes(color: u32) -> [u8; 3] {
    let [_, r, g, b] = color.to_be_bytes();
    [r, g, b]
}

/// Longest prefix of `text` that fits in `max` bytes without splitting a char
fn clip(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

impl<'a> PanelMessage<'a> {
    /// Encode this message into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            PanelMessage::Clear => Ok(Frame::empty(MSG_CLEAR)),
            PanelMessage::Background { color } => Frame::new(MSG_BACKGROUND, &rgb_bytes(*color)),
            PanelMessage::Text { layer, text } => {
                // Payload: [layer][len][utf8...]
                let text = clip(text, MAX_PAYLOAD_SIZE - 2);
                let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
                payload
                    .extend_from_slice(&[*layer, text.len() as u8])
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                payload
                    .extend_from_slice(text.as_bytes())
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                Frame::new(MSG_TEXT, &payload)
            }
            PanelMessage::TextColor { layer, color } => {
                let [r, g, b] = rgb_bytes(*color);
                Frame::new(MSG_TEXT_COLOR, &[*layer, r, g, b])
            }
        }
    }
}
