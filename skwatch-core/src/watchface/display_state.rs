//! Derived display strings and colors
//!
//! Every setter returns the layers whose text or color actually changed,
//! so callers only repaint what moved.

use chrono::NaiveDateTime;
use heapless::String;
use skwatch_display::{Color, DisplayBackend, DisplayError, Layer, LayerSet};

use super::battery::{format_battery, BatteryState};
use super::clock::{format_date, format_time, DateText, MeridiemText, TimeText};
use super::steps::{format_steps, StepMood, StepText};
use super::weather::WeatherText;

/// Weather text shown until the companion first answers
pub const WEATHER_PLACEHOLDER: &str = "Loading...";

/// Everything the watchface paints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    background: Color,
    time_color: Color,
    time: TimeText,
    meridiem: MeridiemText,
    date: DateText,
    battery: String<12>,
    steps: StepText,
    mood: Option<StepMood>,
    weather: WeatherText,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::placeholder()
    }
}

fn text<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    let _ = out.push_str(s);
    out
}

impl DisplayState {
    /// Startup contents before any event has arrived
    pub fn placeholder() -> Self {
        Self {
            background: Color::BLACK,
            time_color: Color::WHITE,
            time: text("00:00"),
            meridiem: String::new(),
            date: String::new(),
            battery: text("100%"),
            steps: String::new(),
            mood: None,
            weather: text(WEATHER_PLACEHOLDER),
        }
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn mood(&self) -> Option<StepMood> {
        self.mood
    }

    /// Text currently assigned to `layer`
    pub fn text(&self, layer: Layer) -> &str {
        match layer {
            Layer::Weather => self.weather.as_str(),
            Layer::Time => self.time.as_str(),
            Layer::Meridiem => self.meridiem.as_str(),
            Layer::Date => self.date.as_str(),
            Layer::Battery => self.battery.as_str(),
            Layer::Steps => self.steps.as_str(),
            Layer::Mood => self.mood.map(StepMood::glyph).unwrap_or(""),
        }
    }

    /// Text color of `layer`
    pub fn color(&self, layer: Layer) -> Color {
        match layer {
            Layer::Weather => Color::SUNSET_ORANGE,
            Layer::Time | Layer::Meridiem => self.time_color,
            Layer::Date | Layer::Battery => Color::LIGHT_GRAY,
            Layer::Steps | Layer::Mood => {
                self.mood.map(StepMood::color).unwrap_or(Color::LIGHT_GRAY)
            }
        }
    }

    /// Background plus the foreground that stays readable on it
    pub fn set_background(&mut self, background: Color, time_color: Color) -> LayerSet {
        let mut changed = LayerSet::EMPTY;
        if self.background != background {
            self.background = background;
            changed.insert_background();
        }
        if self.time_color != time_color {
            self.time_color = time_color;
            changed |= LayerSet::of(Layer::Time).with(Layer::Meridiem);
        }
        changed
    }

    pub fn set_time(&mut self, now: &NaiveDateTime, twenty_four_hour: bool) -> LayerSet {
        let (time, meridiem) = format_time(now, twenty_four_hour);
        let mut changed = LayerSet::EMPTY;
        if self.time != time {
            self.time = time;
            changed.insert(Layer::Time);
        }
        if self.meridiem != meridiem {
            self.meridiem = meridiem;
            changed.insert(Layer::Meridiem);
        }
        changed
    }

    pub fn set_date(&mut self, now: &NaiveDateTime) -> LayerSet {
        replace(&mut self.date, format_date(now), Layer::Date)
    }

    pub fn set_battery(&mut self, state: &BatteryState) -> LayerSet {
        replace(&mut self.battery, format_battery(state), Layer::Battery)
    }

    pub fn set_steps(&mut self, count: u32, mood: StepMood) -> LayerSet {
        let mut changed = replace(&mut self.steps, format_steps(count), Layer::Steps);
        if self.mood != Some(mood) {
            self.mood = Some(mood);
            // Count and glyph share the mood color
            changed |= LayerSet::of(Layer::Steps).with(Layer::Mood);
        }
        changed
    }

    pub fn set_weather(&mut self, weather: WeatherText) -> LayerSet {
        replace(&mut self.weather, weather, Layer::Weather)
    }

    /// Push `changes` to `backend`
    ///
    /// Every requested layer is attempted; the first error is returned.
    pub fn present<D: DisplayBackend + ?Sized>(
        &self,
        changes: LayerSet,
        backend: &mut D,
    ) -> Result<(), DisplayError> {
        let mut result = Ok(());
        if changes.has_background() {
            result = result.and(backend.set_background(self.background));
        }
        for layer in changes.layers() {
            let color = backend.set_text_color(layer, self.color(layer));
            let text = backend.set_text(layer, self.text(layer));
            result = result.and(color).and(text);
        }
        result
    }
}

fn replace<const N: usize>(slot: &mut String<N>, next: String<N>, layer: Layer) -> LayerSet {
    if *slot == next {
        LayerSet::EMPTY
    } else {
        *slot = next;
        LayerSet::of(layer)
    }
}
