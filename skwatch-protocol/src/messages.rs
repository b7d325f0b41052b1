//! Companion message schema
//!
//! Inbound dictionaries carry any subset of:
//!
//! | key | field              | shape                          |
//! |-----|--------------------|--------------------------------|
//! | 0   | temperature        | integer                        |
//! | 1   | conditions         | integer code or string         |
//! | 2   | background color   | integer, packed `0xRRGGBB`     |
//! | 3   | twenty-four hour   | integer flag                   |
//!
//! The only outbound message is the weather request `{0: uint8 0}`.

use heapless::String;

use crate::dictionary::{Dictionary, DictionaryError, Tuple};

pub const KEY_TEMPERATURE: u32 = 0;
pub const KEY_CONDITIONS: u32 = 1;
pub const KEY_BACKGROUND_COLOR: u32 = 2;
pub const KEY_TWENTY_FOUR_HOUR: u32 = 3;

/// Key of the weather request sentinel
pub const KEY_REQUEST_WEATHER: u32 = 0;

/// Longest condition text kept
pub const MAX_CONDITIONS_LEN: usize = 32;

fn is_recognized(key: u32) -> bool {
    matches!(
        key,
        KEY_TEMPERATURE | KEY_CONDITIONS | KEY_BACKGROUND_COLOR | KEY_TWENTY_FOUR_HOUR
    )
}

/// Weather conditions as sent by the companion
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Conditions {
    /// OpenWeatherMap-style condition code
    Code(i32),
    /// Free-text description
    Text(String<MAX_CONDITIONS_LEN>),
}

impl Conditions {
    fn from_tuple(tuple: &Tuple) -> Option<Self> {
        if let Some(code) = tuple.as_i32() {
            return Some(Conditions::Code(code));
        }
        let mut text = String::new();
        text.push_str(tuple.as_str()?).ok()?;
        Some(Conditions::Text(text))
    }
}

/// Typed view of one inbound companion message
///
/// Each field is `Some` only when the key was present with a usable shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InboundUpdate {
    pub temperature: Option<i32>,
    pub conditions: Option<Conditions>,
    pub background_color: Option<i32>,
    pub twenty_four_hour: Option<bool>,
}

impl InboundUpdate {
    /// Pick the recognized fields out of a dictionary
    ///
    /// Unknown keys are ignored; a recognized key with the wrong shape is
    /// left as `None` without affecting the other fields.
    pub fn from_dictionary(dictionary: &Dictionary) -> Self {
        Self {
            temperature: dictionary.get(KEY_TEMPERATURE).and_then(Tuple::as_i32),
            conditions: dictionary
                .get(KEY_CONDITIONS)
                .and_then(Conditions::from_tuple),
            background_color: dictionary.get(KEY_BACKGROUND_COLOR).and_then(Tuple::as_i32),
            twenty_four_hour: dictionary.get(KEY_TWENTY_FOUR_HOUR).and_then(Tuple::as_bool),
        }
    }

    /// Decode straight from dictionary bytes
    ///
    /// Only recognized keys are kept, so any number of unknown tuples
    /// alongside them is harmless.
    pub fn decode(bytes: &[u8]) -> Result<Self, DictionaryError> {
        Dictionary::decode_keys(bytes, is_recognized).map(|d| Self::from_dictionary(&d))
    }

    /// No recognized field present
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Carries at least one durable preference
    pub fn carries_settings(&self) -> bool {
        self.background_color.is_some() || self.twenty_four_hour.is_some()
    }
}

/// "Please send weather" poke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WeatherRequest;

impl WeatherRequest {
    pub fn to_dictionary(self) -> Dictionary {
        let mut dict = Dictionary::new();
        // An empty dictionary always has room for one small tuple
        let _ = dict.push_u8(KEY_REQUEST_WEATHER, 0);
        dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::TupleType;

    #[test]
    fn test_decode_full_update() {
        let mut dict = Dictionary::new();
        dict.push_i32(KEY_TEMPERATURE, 72).unwrap();
        dict.push_i32(KEY_CONDITIONS, 800).unwrap();
        dict.push_i32(KEY_BACKGROUND_COLOR, 0x0055AA).unwrap();
        dict.push_u8(KEY_TWENTY_FOUR_HOUR, 1).unwrap();

        let update = InboundUpdate::from_dictionary(&dict);
        assert_eq!(update.temperature, Some(72));
        assert_eq!(update.conditions, Some(Conditions::Code(800)));
        assert_eq!(update.background_color, Some(0x0055AA));
        assert_eq!(update.twenty_four_hour, Some(true));
        assert!(update.carries_settings());
    }

    #[test]
    fn test_text_conditions() {
        let mut dict = Dictionary::new();
        dict.push_cstring(KEY_CONDITIONS, "Overcast").unwrap();

        let update = InboundUpdate::from_dictionary(&dict);
        assert_eq!(
            update.conditions,
            Some(Conditions::Text(String::try_from("Overcast").unwrap()))
        );
    }

    #[test]
    fn test_text_conditions_too_long_is_absent() {
        let mut dict = Dictionary::new();
        dict.push_cstring(KEY_CONDITIONS, "a description far longer than thirty-two bytes")
            .unwrap();
        assert_eq!(InboundUpdate::from_dictionary(&dict).conditions, None);
    }

    #[test]
    fn test_wrong_shape_is_absent() {
        let mut dict = Dictionary::new();
        dict.push_cstring(KEY_TEMPERATURE, "hot").unwrap();
        dict.push(Tuple::integer(KEY_BACKGROUND_COLOR, TupleType::Int, &[1, 2, 3]).unwrap())
            .unwrap();
        dict.push_u8(KEY_TWENTY_FOUR_HOUR, 0).unwrap();

        let update = InboundUpdate::from_dictionary(&dict);
        assert_eq!(update.temperature, None);
        assert_eq!(update.background_color, None);
        assert_eq!(update.twenty_four_hour, Some(false));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut dict = Dictionary::new();
        dict.push_i32(42, 7).unwrap();
        let update = InboundUpdate::from_dictionary(&dict);
        assert!(update.is_empty());
        assert!(!update.carries_settings());
    }

    #[test]
    fn test_weather_request_bytes() {
        let mut buf = [0u8; 16];
        let len = WeatherRequest.to_dictionary().encode(&mut buf).unwrap();
        assert_eq!(&buf[..len], &[1, 0, 0, 0, 0, 2, 1, 0, 0]);
    }

    fn raw_uint(out: &mut std::vec::Vec<u8>, key: u32, value: u16) {
        out.extend_from_slice(&key.to_le_bytes());
        out.push(2);
        out.extend_from_slice(&2u16.to_le_bytes());
        out.extend_from_slice(&value.to_le_bytes());
    }

    #[test]
    fn test_decode_with_many_unknown_keys() {
        let mut raw = std::vec![9];
        raw_uint(&mut raw, KEY_TEMPERATURE, 72);
        raw_uint(&mut raw, KEY_CONDITIONS, 800);
        for key in 100..107 {
            raw_uint(&mut raw, key, 1);
        }

        let update = InboundUpdate::decode(&raw).unwrap();
        assert_eq!(update.temperature, Some(72));
        assert_eq!(update.conditions, Some(Conditions::Code(800)));
    }

    #[test]
    fn test_decode_recognized_keys_after_padding() {
        let mut raw = std::vec![12];
        for key in 100..110 {
            raw_uint(&mut raw, key, 1);
        }
        raw_uint(&mut raw, KEY_TEMPERATURE, 65);
        raw_uint(&mut raw, KEY_TWENTY_FOUR_HOUR, 1);

        let update = InboundUpdate::decode(&raw).unwrap();
        assert_eq!(update.temperature, Some(65));
        assert_eq!(update.twenty_four_hour, Some(true));
        assert!(update.carries_settings());
    }

    #[test]
    fn test_decode_only_unknown_keys_is_empty() {
        let mut raw = std::vec![2];
        raw_uint(&mut raw, 40, 1);
        raw_uint(&mut raw, 41, 2);
        assert!(InboundUpdate::decode(&raw).unwrap().is_empty());
    }
}
