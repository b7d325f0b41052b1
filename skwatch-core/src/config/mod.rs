//! Watchface configuration
//!
//! Compiled in from `watchface.toml`, optionally overridden by a TOML
//! copy in flash. Parsed without allocation by [`parse_config`].

pub mod toml;
pub mod types;

pub use toml::{parse_config, ParseError};
pub use types::*;
