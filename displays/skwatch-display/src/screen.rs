//! Layer screen buffer
//!
//! Holds what each layer currently shows and which layers changed since
//! the panel was last refreshed.

use heapless::String;

use crate::backend::{DisplayBackend, DisplayError};
use crate::color::Color;
use crate::layer::{Layer, LayerSet, LAYER_COUNT};

/// Maximum bytes of text per layer
pub const LAYER_TEXT_LEN: usize = 48;

/// In-memory copy of the panel
#[derive(Debug, Clone)]
pub struct Screen {
    texts: [String<LAYER_TEXT_LEN>; LAYER_COUNT],
    colors: [Color; LAYER_COUNT],
    background: Color,
    dirty: LayerSet,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Blank screen: black background, white empty layers, all dirty
    pub const fn new() -> Self {
        Self {
            texts: [const { String::new() }; LAYER_COUNT],
            colors: [Color::WHITE; LAYER_COUNT],
            background: Color::BLACK,
            dirty: LayerSet::ALL,
        }
    }

    pub fn text(&self, layer: Layer) -> &str {
        self.texts[layer.index()].as_str()
    }

    pub fn text_color(&self, layer: Layer) -> Color {
        self.colors[layer.index()]
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Layers changed since the last [`Screen::mark_clean`]
    pub fn dirty(&self) -> LayerSet {
        self.dirty
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn mark_clean(&mut self) {
        self.dirty = LayerSet::EMPTY;
    }

    /// Force a full repaint on the next refresh
    pub fn mark_all_dirty(&mut self) {
        self.dirty = LayerSet::ALL;
    }
}

impl DisplayBackend for Screen {
    fn set_text(&mut self, layer: Layer, text: &str) -> Result<(), DisplayError> {
        let slot = &mut self.texts[layer.index()];
        if slot.as_str() == text {
            return Ok(());
        }
        let mut next = String::new();
        next.push_str(text).map_err(|_| DisplayError::BufferOverflow)?;
        *slot = next;
        self.dirty.insert(layer);
        Ok(())
    }

    fn set_text_color(&mut self, layer: Layer, color: Color) -> Result<(), DisplayError> {
        let slot = &mut self.colors[layer.index()];
        if *slot != color {
            *slot = color;
            self.dirty.insert(layer);
        }
        Ok(())
    }

    fn set_background(&mut self, color: Color) -> Result<(), DisplayError> {
        if self.background != color {
            self.background = color;
            self.dirty.insert_background();
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[bg={=u32:x}", self.background.to_hex());
        for layer in Layer::ALL {
            defmt::write!(f, ", {}={}", layer, self.text(layer));
        }
        defmt::write!(f, "]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_screen_is_fully_dirty() {
        let screen = Screen::new();
        assert_eq!(screen.dirty(), LayerSet::ALL);
        assert_eq!(screen.background(), Color::BLACK);
        assert_eq!(screen.text(Layer::Time), "");
    }

    #[test]
    fn test_set_text_marks_layer() {
        let mut screen = Screen::new();
        screen.mark_clean();

        screen.set_text(Layer::Time, "13:05").unwrap();
        assert_eq!(screen.text(Layer::Time), "13:05");
        assert_eq!(screen.dirty(), LayerSet::of(Layer::Time));
    }

    #[test]
    fn test_unchanged_writes_stay_clean() {
        let mut screen = Screen::new();
        screen.set_text(Layer::Date, "Tue 03/04").unwrap();
        screen.set_text_color(Layer::Date, Color::WHITE).unwrap();
        screen.mark_clean();

        screen.set_text(Layer::Date, "Tue 03/04").unwrap();
        screen.set_text_color(Layer::Date, Color::WHITE).unwrap();
        screen.set_background(Color::BLACK).unwrap();
        assert!(!screen.is_dirty());
    }

    #[test]
    fn test_background_tracked_separately() {
        let mut screen = Screen::new();
        screen.mark_clean();
        screen.set_background(Color::PICTON_BLUE).unwrap();

        assert!(screen.dirty().has_background());
        assert_eq!(screen.dirty().layers().count(), 0);
    }

    #[test]
    fn test_overflow_keeps_previous_text() {
        let mut screen = Screen::new();
        screen.set_text(Layer::Weather, "Loading...").unwrap();

        let long = "x".repeat(LAYER_TEXT_LEN + 1);
        assert_eq!(
            screen.set_text(Layer::Weather, &long),
            Err(DisplayError::BufferOverflow)
        );
        assert_eq!(screen.text(Layer::Weather), "Loading...");
    }
}
