//! Flash override and embedded fallback

use core::str;
use defmt::*;

use skwatch_core::config::{parse_config, ParseError, WatchfaceConfig};
use skwatch_hal_rp2040::flash::{FlashError, StorageKey};
use skwatch_hal_rp2040::FlashStorageTrait;

/// Embedded configuration, validated by build.rs
const EMBEDDED_CONFIG: &str = include_str!("../../watchface.toml");

/// Largest TOML override accepted from flash
const MAX_TOML_SIZE: usize = 1024;

/// Why the flash override was not used
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    Flash(FlashError),
    InvalidUtf8,
    Parse(ParseError),
}

impl From<FlashError> for ConfigError {
    fn from(e: FlashError) -> Self {
        ConfigError::Flash(e)
    }
}

impl From<ParseError> for ConfigError {
    fn from(e: ParseError) -> Self {
        ConfigError::Parse(e)
    }
}

/// Resolve the configuration to run with
pub fn load_config<S: FlashStorageTrait>(storage: &mut S) -> WatchfaceConfig {
    match load_override(storage) {
        Ok(config) => {
            info!("Loaded configuration override from flash");
            return config;
        }
        Err(ConfigError::Flash(FlashError::NotFound)) => {
            debug!("No configuration override in flash");
        }
        Err(e) => {
            warn!("Ignoring flash configuration: {:?}", e);
        }
    }

    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            // build.rs validates the file, so this only trips on parser gaps
            error!("Embedded configuration rejected: {:?}", e);
            WatchfaceConfig::default()
        }
    }
}

fn load_override<S: FlashStorageTrait>(storage: &mut S) -> Result<WatchfaceConfig, ConfigError> {
    let mut buffer = [0u8; MAX_TOML_SIZE];
    let len = storage.read(StorageKey::WatchfaceConfigToml, &mut buffer)?;
    debug!("Read {} bytes of TOML from flash", len);

    let text = str::from_utf8(&buffer[..len]).map_err(|_| ConfigError::InvalidUtf8)?;
    Ok(parse_config(text)?)
}

/// Log the settings that shape behavior
pub fn log_config(config: &WatchfaceConfig) {
    info!(
        "Weather every {} min, degree glyph {}",
        config.weather.refresh_minutes, config.weather.degree_glyph
    );
    info!(
        "Steps: baseline {:?}, sensor {}",
        config.steps.baseline, config.steps.sensor
    );
    info!(
        "Battery: sample every {} s, {} curve points",
        config.battery.sample_secs,
        config.battery.curve.points().len()
    );
}
