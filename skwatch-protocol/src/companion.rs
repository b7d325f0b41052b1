//! Companion link messages
//!
//! Either side may send an AppMessage; the receiver answers with ACK when
//! the dictionary decoded and NACK when it did not. Sequence numbers only
//! pair answers with messages for logging; nothing is retransmitted.

use crate::dictionary::{Dictionary, DictionaryError};
use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};
use crate::messages::InboundUpdate;

pub const MSG_APP_MESSAGE: u8 = 0x10;
pub const MSG_ACK: u8 = 0x11;
pub const MSG_NACK: u8 = 0x12;

/// Errors turning frames into companion messages and back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    Frame(FrameError),
    Dictionary(DictionaryError),
    /// Frame type not used on this link
    UnknownType(u8),
    /// Frame too short for its type
    MissingPayload,
}

impl From<FrameError> for LinkError {
    fn from(e: FrameError) -> Self {
        LinkError::Frame(e)
    }
}

impl From<DictionaryError> for LinkError {
    fn from(e: DictionaryError) -> Self {
        LinkError::Dictionary(e)
    }
}

/// One message on the companion link
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompanionMessage {
    AppMessage { seq: u8, dictionary: Dictionary },
    Ack { seq: u8 },
    Nack { seq: u8 },
}

impl CompanionMessage {
    /// Parse a message from a frame
    ///
    /// An AppMessage whose dictionary fails to decode reports
    /// `LinkError::Dictionary`; the sequence number is still available
    /// through [`CompanionMessage::sequence_of`] for the NACK.
    pub fn from_frame(frame: &Frame) -> Result<Self, LinkError> {
        let (&seq, body) = frame
            .payload
            .split_first()
            .ok_or(LinkError::MissingPayload)?;

        match frame.msg_type {
            MSG_APP_MESSAGE => Ok(CompanionMessage::AppMessage {
                seq,
                dictionary: Dictionary::decode(body)?,
            }),
            MSG_ACK => Ok(CompanionMessage::Ack { seq }),
            MSG_NACK => Ok(CompanionMessage::Nack { seq }),
            other => Err(LinkError::UnknownType(other)),
        }
    }

    /// Parse an inbound AppMessage straight into its update
    ///
    /// Returns the sequence number with the update. Unknown keys are
    /// dropped while decoding and never crowd out recognized ones.
    pub fn decode_update(frame: &Frame) -> Result<(u8, InboundUpdate), LinkError> {
        if frame.msg_type != MSG_APP_MESSAGE {
            return Err(LinkError::UnknownType(frame.msg_type));
        }
        let (&seq, body) = frame
            .payload
            .split_first()
            .ok_or(LinkError::MissingPayload)?;
        Ok((seq, InboundUpdate::decode(body)?))
    }

    /// Sequence number of a frame, if it has one
    pub fn sequence_of(frame: &Frame) -> Option<u8> {
        frame.payload.first().copied()
    }

    /// Encode this message into a frame
    pub fn to_frame(&self) -> Result<Frame, LinkError> {
        match self {
            CompanionMessage::AppMessage { seq, dictionary } => {
                let mut payload = [0u8; MAX_PAYLOAD_SIZE];
                payload[0] = *seq;
                let len = dictionary
                    .encode(&mut payload[1..])
                    .map_err(|_| LinkError::Frame(FrameError::PayloadTooLarge))?;
                Ok(Frame::new(MSG_APP_MESSAGE, &payload[..1 + len])?)
            }
            CompanionMessage::Ack { seq } => Ok(Frame::new(MSG_ACK, &[*seq])?),
            CompanionMessage::Nack { seq } => Ok(Frame::new(MSG_NACK, &[*seq])?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::WeatherRequest;

    #[test]
    fn test_weather_request_frame() {
        let msg = CompanionMessage::AppMessage {
            seq: 5,
            dictionary: WeatherRequest.to_dictionary(),
        };
        let frame = msg.to_frame().unwrap();
        assert_eq!(frame.msg_type, MSG_APP_MESSAGE);
        assert_eq!(frame.payload.as_slice(), &[5, 1, 0, 0, 0, 0, 2, 1, 0, 0]);
    }

    #[test]
    fn test_parse_app_message() {
        let mut dict = Dictionary::new();
        dict.push_i32(0, 61).unwrap();
        dict.push_i32(1, 500).unwrap();
        let frame = CompanionMessage::AppMessage { seq: 9, dictionary: dict }
            .to_frame()
            .unwrap();

        match CompanionMessage::from_frame(&frame).unwrap() {
            CompanionMessage::AppMessage { seq, dictionary } => {
                assert_eq!(seq, 9);
                let update = InboundUpdate::from_dictionary(&dictionary);
                assert_eq!(update.temperature, Some(61));
            }
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn test_parse_ack_and_nack() {
        let ack = Frame::new(MSG_ACK, &[3]).unwrap();
        let nack = Frame::new(MSG_NACK, &[4]).unwrap();
        assert_eq!(
            CompanionMessage::from_frame(&ack),
            Ok(CompanionMessage::Ack { seq: 3 })
        );
        assert_eq!(
            CompanionMessage::from_frame(&nack),
            Ok(CompanionMessage::Nack { seq: 4 })
        );
    }

    #[test]
    fn test_broken_dictionary_keeps_sequence() {
        let frame = Frame::new(MSG_APP_MESSAGE, &[7, 2, 0]).unwrap();
        assert_eq!(
            CompanionMessage::from_frame(&frame),
            Err(LinkError::Dictionary(DictionaryError::Truncated))
        );
        assert_eq!(CompanionMessage::sequence_of(&frame), Some(7));
    }

    #[test]
    fn test_unknown_type_and_empty_payload() {
        let unknown = Frame::new(0x55, &[1]).unwrap();
        assert_eq!(
            CompanionMessage::from_frame(&unknown),
            Err(LinkError::UnknownType(0x55))
        );

        let empty = Frame::empty(MSG_ACK);
        assert_eq!(
            CompanionMessage::from_frame(&empty),
            Err(LinkError::MissingPayload)
        );
    }

    #[test]
    fn test_decode_update_with_crowded_dictionary() {
        let mut payload = std::vec![21, 10];
        for key in [200u32, 201, 202, 203, 204, 205, 206, 207, 0, 1] {
            payload.extend_from_slice(&key.to_le_bytes());
            payload.extend_from_slice(&[3, 4, 0]);
            payload.extend_from_slice(&(key as i32 + 50).to_le_bytes());
        }
        let frame = Frame::new(MSG_APP_MESSAGE, &payload).unwrap();

        let (seq, update) = CompanionMessage::decode_update(&frame).unwrap();
        assert_eq!(seq, 21);
        assert_eq!(update.temperature, Some(50));
        assert_eq!(update.conditions, Some(crate::messages::Conditions::Code(51)));
    }

    #[test]
    fn test_decode_update_rejects_other_types() {
        let ack = Frame::new(MSG_ACK, &[3]).unwrap();
        assert_eq!(
            CompanionMessage::decode_update(&ack),
            Err(LinkError::UnknownType(MSG_ACK))
        );
        let empty = Frame::empty(MSG_APP_MESSAGE);
        assert_eq!(
            CompanionMessage::decode_update(&empty),
            Err(LinkError::MissingPayload)
        );
    }
}
