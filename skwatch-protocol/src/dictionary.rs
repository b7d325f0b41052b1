//! AppMessage dictionary codec
//!
//! A dictionary is a tuple count followed by that many tuples:
//! ```text
//! ┌───────┬──────────────────────────────────────────────┐
//! │ COUNT │ TUPLE × COUNT                                │
//! │ 1B    │ KEY u32le │ TYPE 1B │ LEN u16le │ VALUE LEN B │
//! └───────┴──────────────────────────────────────────────┘
//! ```
//!
//! Tuples keep their raw bytes. Typed access goes through the `as_*`
//! accessors, which return `None` when the tuple has the wrong shape.
//! Tuples of an unknown type, too large to hold, or beyond `MAX_TUPLES`
//! are skipped during decoding; only a structurally broken buffer fails
//! the whole dictionary.

use heapless::Vec;

/// Maximum tuples kept per dictionary
pub const MAX_TUPLES: usize = 8;

/// Maximum value size per tuple
pub const MAX_VALUE_LEN: usize = 64;

const TUPLE_HEADER_LEN: usize = 7;

/// Errors from dictionary encoding or decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DictionaryError {
    /// Buffer ended inside a tuple or before the count byte
    Truncated,
    /// Bytes left over after the declared tuples
    TrailingBytes,
    /// More tuples than the dictionary holds
    TooManyTuples,
    /// Value longer than `MAX_VALUE_LEN`
    ValueTooLarge,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// Tuple value type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TupleType {
    ByteArray = 0,
    CString = 1,
    UInt = 2,
    Int = 3,
}

impl TupleType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(TupleType::ByteArray),
            1 => Some(TupleType::CString),
            2 => Some(TupleType::UInt),
            3 => Some(TupleType::Int),
            _ => None,
        }
    }
}

/// One key/value entry
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tuple {
    pub key: u32,
    pub kind: TupleType,
    pub data: Vec<u8, MAX_VALUE_LEN>,
}

impl Tuple {
    /// Little-endian integer tuple of width 1, 2 or 4
    pub fn integer(key: u32, kind: TupleType, bytes: &[u8]) -> Result<Self, DictionaryError> {
        Ok(Self {
            key,
            kind,
            data: Vec::from_slice(bytes).map_err(|_| DictionaryError::ValueTooLarge)?,
        })
    }

    /// Value as a signed integer
    ///
    /// `Int` tuples are sign-extended, `UInt` tuples zero-extended. Widths
    /// other than 1, 2 or 4 bytes are not integers.
    pub fn as_i32(&self) -> Option<i32> {
        let signed = match self.kind {
            TupleType::Int => true,
            TupleType::UInt => false,
            _ => return None,
        };
        let value = match (self.data.as_slice(), signed) {
            (&[b], true) => b as i8 as i32,
            (&[b], false) => b as i32,
            (&[b0, b1], true) => i16::from_le_bytes([b0, b1]) as i32,
            (&[b0, b1], false) => u16::from_le_bytes([b0, b1]) as i32,
            (&[b0, b1, b2, b3], _) => i32::from_le_bytes([b0, b1, b2, b3]),
            _ => return None,
        };
        Some(value)
    }

    /// Value as a flag (any nonzero integer is true)
    pub fn as_bool(&self) -> Option<bool> {
        self.as_i32().map(|v| v != 0)
    }

    /// Value as text, without the trailing NUL
    pub fn as_str(&self) -> Option<&str> {
        if self.kind != TupleType::CString {
            return None;
        }
        let bytes = self.data.as_slice();
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        core::str::from_utf8(&bytes[..end]).ok()
    }
}

/// A decoded or outgoing AppMessage dictionary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dictionary {
    tuples: Vec<Tuple, MAX_TUPLES>,
}

impl Dictionary {
    pub const fn new() -> Self {
        Self { tuples: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    /// First tuple with `key`
    pub fn get(&self, key: u32) -> Option<&Tuple> {
        self.tuples.iter().find(|t| t.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tuple> {
        self.tuples.iter()
    }

    pub fn push(&mut self, tuple: Tuple) -> Result<(), DictionaryError> {
        self.tuples
            .push(tuple)
            .map_err(|_| DictionaryError::TooManyTuples)
    }

    pub fn push_u8(&mut self, key: u32, value: u8) -> Result<(), DictionaryError> {
        self.push(Tuple::integer(key, TupleType::UInt, &[value])?)
    }

    pub fn push_i32(&mut self, key: u32, value: i32) -> Result<(), DictionaryError> {
        self.push(Tuple::integer(key, TupleType::Int, &value.to_le_bytes())?)
    }

    /// Append a NUL-terminated string
    pub fn push_cstring(&mut self, key: u32, value: &str) -> Result<(), DictionaryError> {
        let mut data = Vec::from_slice(value.as_bytes()).map_err(|_| DictionaryError::ValueTooLarge)?;
        data.push(0).map_err(|_| DictionaryError::ValueTooLarge)?;
        self.push(Tuple {
            key,
            kind: TupleType::CString,
            data,
        })
    }

    /// Decode a dictionary from `bytes`
    ///
    /// Keeps the first `MAX_TUPLES` usable tuples.
    pub fn decode(bytes: &[u8]) -> Result<Self, DictionaryError> {
        Self::decode_keys(bytes, |_| true)
    }

    /// Decode keeping only tuples whose key passes `keep`
    ///
    /// Skipped tuples never take up room, so a message padded with
    /// unrelated keys still yields the wanted ones.
    pub fn decode_keys(bytes: &[u8], keep: impl Fn(u32) -> bool) -> Result<Self, DictionaryError> {
        let (&count, mut rest) = bytes.split_first().ok_or(DictionaryError::Truncated)?;
        let mut dictionary = Self::new();

        for _ in 0..count {
            if rest.len() < TUPLE_HEADER_LEN {
                return Err(DictionaryError::Truncated);
            }
            let key = u32::from_le_bytes([rest[0], rest[1], rest[2], rest[3]]);
            let kind = rest[4];
            let len = u16::from_le_bytes([rest[5], rest[6]]) as usize;
            let value = rest
                .get(TUPLE_HEADER_LEN..TUPLE_HEADER_LEN + len)
                .ok_or(DictionaryError::Truncated)?;
            rest = &rest[TUPLE_HEADER_LEN + len..];

            if !keep(key) || dictionary.tuples.is_full() {
                continue;
            }
            let (Some(kind), Ok(data)) = (TupleType::from_u8(kind), Vec::from_slice(value)) else {
                continue;
            };
            dictionary.push(Tuple { key, kind, data })?;
        }

        if !rest.is_empty() {
            return Err(DictionaryError::TrailingBytes);
        }
        Ok(dictionary)
    }

    /// Encode into `buffer`, returning the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, DictionaryError> {
        let count = buffer.first_mut().ok_or(DictionaryError::BufferTooSmall)?;
        *count = self.tuples.len() as u8;
        let mut pos = 1;

        for tuple in &self.tuples {
            let len = tuple.data.len();
            let out = buffer
                .get_mut(pos..pos + TUPLE_HEADER_LEN + len)
                .ok_or(DictionaryError::BufferTooSmall)?;
            out[..4].copy_from_slice(&tuple.key.to_le_bytes());
            out[4] = tuple.kind as u8;
            out[5..7].copy_from_slice(&(len as u16).to_le_bytes());
            out[TUPLE_HEADER_LEN..].copy_from_slice(&tuple.data);
            pos += TUPLE_HEADER_LEN + len;
        }

        Ok(pos)
    }
}
