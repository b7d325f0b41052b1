//! Step count text and goal mood

use core::fmt::Write;

use heapless::String;
use skwatch_display::Color;

/// Step layer text
pub type StepText = String<12>;

/// Step figures held by the telemetry observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepMetrics {
    /// Steps so far today
    pub count: u32,
    /// Typical full-day total
    pub goal: u32,
    /// Typical total by this time of day
    pub average: u32,
}

/// Whether today's steps have reached the threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepMood {
    Achieved,
    NotYet,
}

impl StepMood {
    /// Reaching the threshold exactly counts as achieved
    pub const fn select(count: u32, threshold: u32) -> Self {
        if count >= threshold {
            StepMood::Achieved
        } else {
            StepMood::NotYet
        }
    }

    pub const fn glyph(self) -> &'static str {
        match self {
            StepMood::Achieved => "\u{1F60C}",
            StepMood::NotYet => "\u{1F620}",
        }
    }

    pub const fn color(self) -> Color {
        match self {
            StepMood::Achieved => Color::JAEGER_GREEN,
            StepMood::NotYet => Color::PICTON_BLUE,
        }
    }
}

/// Step count with a thousands separator and a trailing space
///
/// `12345` renders as `12,345 `, `999` as `999 `.
pub fn format_steps(count: u32) -> StepText {
    let mut text = StepText::new();
    let thousands = count / 1000;
    let rest = count % 1000;
    let _ = if thousands > 0 {
        write!(text, "{},{:03} ", thousands, rest)
    } else {
        write!(text, "{} ", rest)
    };
    text
}
