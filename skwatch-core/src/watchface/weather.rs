//! Weather classification and text

use core::fmt::Write;

use heapless::String;
use skwatch_protocol::Conditions;

use crate::config::WeatherConfig;

/// Weather layer text buffer
pub type WeatherText = String<48>;

/// Icon class for a numeric condition code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WeatherClass {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Atmosphere,
    Clear,
    Clouds,
    DenseClouds,
    Tornado,
    Extreme,
}

/// Map a condition code to its class
///
/// Total over `i32`: ranges are tried in ascending order and anything
/// below 300 is a thunderstorm, anything from 910 up is extreme.
pub fn classify(code: i32) -> WeatherClass {
    match code {
        i32::MIN..=299 => WeatherClass::Thunderstorm,
        300..=399 => WeatherClass::Drizzle,
        400..=599 => WeatherClass::Rain,
        600..=699 => WeatherClass::Snow,
        700..=799 => WeatherClass::Atmosphere,
        800 => WeatherClass::Clear,
        801..=803 => WeatherClass::Clouds,
        804..=899 => WeatherClass::DenseClouds,
        900..=909 => WeatherClass::Tornado,
        910..=i32::MAX => WeatherClass::Extreme,
    }
}

impl WeatherClass {
    /// Emoji drawn after the temperature
    pub const fn glyph(self) -> &'static str {
        match self {
            WeatherClass::Thunderstorm => "\u{1F329}",
            WeatherClass::Drizzle => "\u{1F326}",
            WeatherClass::Rain => "\u{1F327}",
            WeatherClass::Snow => "\u{1F328}",
            WeatherClass::Atmosphere => "\u{1F32B}",
            WeatherClass::Clear => "\u{1F323}",
            WeatherClass::Clouds => "\u{1F324}",
            WeatherClass::DenseClouds => "\u{1F325}",
            WeatherClass::Tornado => "\u{1F32A}",
            WeatherClass::Extreme => "\u{1F321}",
        }
    }
}

/// Weather layer text
///
/// Codes render as `72°F🌣`, text conditions as `72°F, Overcast`.
pub fn format_weather(
    temperature: i32,
    conditions: &Conditions,
    config: &WeatherConfig,
) -> Result<WeatherText, core::fmt::Error> {
    let unit = if config.degree_glyph { "°F" } else { "F" };
    let mut text = WeatherText::new();
    match conditions {
        Conditions::Code(code) => write!(text, "{}{}{}", temperature, unit, classify(*code).glyph())?,
        Conditions::Text(description) => write!(text, "{}{}, {}", temperature, unit, description)?,
    }
    Ok(text)
}
