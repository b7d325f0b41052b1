//! Configuration loading
//!
//! The embedded `watchface.toml` is the baseline; a TOML copy in flash
//! takes precedence when it parses.

pub mod loader;

pub use loader::{load_config, log_config};
