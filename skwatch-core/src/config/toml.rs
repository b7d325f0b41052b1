//! Minimal TOML reader for watchface configuration
//!
//! Handles only what `watchface.toml` uses:
//! - `[section]` headers
//! - `key = value` pairs (string, integer, boolean)
//! - Integer pair arrays: `curve = [[3450, 0], [4200, 100]]`
//! - Comments (`# ...`)
//!
//! Unknown keys are skipped so older firmware tolerates newer files.

use heapless::Vec;

use super::types::{StepBaseline, WatchfaceConfig};
use crate::watchface::battery::{ChargeCurve, MAX_CURVE_POINTS};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Charge curve has more points than fit
    TooManyItems,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Weather,
    Steps,
    Battery,
}

/// Parse TOML text into a [`WatchfaceConfig`]
///
/// Keys that are absent keep their defaults.
pub fn parse_config(input: &str) -> Result<WatchfaceConfig, ParseError> {
    let mut config = WatchfaceConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && !line.contains('=') {
            let header = line
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
                .ok_or(ParseError::InvalidSection)?;
            section = parse_section_header(header)?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "weather" => Ok(Section::Weather),
        "steps" => Ok(Section::Steps),
        "battery" => Ok(Section::Battery),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut WatchfaceConfig,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Weather, "refresh_minutes") => {
            let minutes: u8 = parse_int(value)?;
            if !(1..=60).contains(&minutes) {
                return Err(ParseError::InvalidValue);
            }
            config.weather.refresh_minutes = minutes;
        }
        (Section::Weather, "degree_glyph") => config.weather.degree_glyph = parse_bool(value)?,
        (Section::Steps, "baseline") => config.steps.baseline = parse_baseline(value)?,
        (Section::Steps, "sensor") => config.steps.sensor = parse_bool(value)?,
        (Section::Battery, "sample_secs") => {
            let secs: u16 = parse_int(value)?;
            if secs == 0 {
                return Err(ParseError::InvalidValue);
            }
            config.battery.sample_secs = secs;
        }
        (Section::Battery, "curve") => config.battery.curve = parse_curve(value)?,
        _ => {}
    }
    Ok(())
}

/// Split `key = value`, dropping a trailing comment outside quotes
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let mut value = value.trim();

    if let Some(hash) = value.find('#') {
        if value[..hash].matches('"').count() % 2 == 0 {
            value = value[..hash].trim();
        }
    }

    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

fn parse_string(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.trim().parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_baseline(value: &str) -> Result<StepBaseline, ParseError> {
    match parse_string(value) {
        "goal" => Ok(StepBaseline::DailyGoal),
        "average" => Ok(StepBaseline::TypicalByNow),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse `[[mv, pct], [mv, pct], ...]`
fn parse_curve(value: &str) -> Result<ChargeCurve, ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    let mut points: Vec<(u16, u8), MAX_CURVE_POINTS> = Vec::new();
    for pair in inner.split(']') {
        let pair = pair.trim().trim_start_matches(',').trim();
        if pair.is_empty() {
            continue;
        }
        let pair = pair.strip_prefix('[').ok_or(ParseError::InvalidValue)?;
        let (mv, pct) = pair.split_once(',').ok_or(ParseError::InvalidValue)?;
        points
            .push((parse_int(mv)?, parse_int(pct)?))
            .map_err(|_| ParseError::TooManyItems)?;
    }

    ChargeCurve::from_points(&points).ok_or(ParseError::InvalidValue)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
# Skwatch watchface
[weather]
refresh_minutes = 15   # poll more often
degree_glyph = false

[steps]
baseline = "average"
sensor = false

[battery]
sample_secs = 60
curve = [[3300, 0], [3600, 20], [4100, 100]]
"#;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.weather.refresh_minutes, 15);
        assert!(!config.weather.degree_glyph);
        assert_eq!(config.steps.baseline, StepBaseline::TypicalByNow);
        assert!(!config.steps.sensor);
        assert_eq!(config.battery.sample_secs, 60);
        assert_eq!(
            config.battery.curve.points(),
            &[(3300, 0), (3600, 20), (4100, 100)]
        );
    }

    #[test]
    fn test_empty_input_is_default() {
        assert_eq!(parse_config("").unwrap(), WatchfaceConfig::default());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config = parse_config("[weather]\nunits = \"metric\"\nrefresh_minutes = 5\n").unwrap();
        assert_eq!(config.weather.refresh_minutes, 5);
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert_eq!(parse_config("[alarms]\n"), Err(ParseError::InvalidSection));
    }

    #[test]
    fn test_refresh_out_of_range() {
        assert_eq!(
            parse_config("[weather]\nrefresh_minutes = 0\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[weather]\nrefresh_minutes = 61\n"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_bad_baseline() {
        assert_eq!(
            parse_config("[steps]\nbaseline = \"weekly\"\n"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_descending_curve_rejected() {
        assert_eq!(
            parse_config("[battery]\ncurve = [[4200, 100], [3400, 0]]\n"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_oversized_curve() {
        let curve = "[battery]\ncurve = [[1,0],[2,1],[3,2],[4,3],[5,4],[6,5],[7,6],[8,7],[9,8]]\n";
        assert_eq!(parse_config(curve), Err(ParseError::TooManyItems));
    }

    #[test]
    fn test_key_value_comment_inside_string() {
        assert_eq!(
            parse_key_value("name = \"a # b\""),
            Some(("name", "\"a # b\""))
        );
        assert_eq!(parse_key_value("sensor = true # wired"), Some(("sensor", "true")));
        assert_eq!(parse_key_value("novalue ="), None);
    }
}
