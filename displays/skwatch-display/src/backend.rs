//! Display backend trait
//!
//! The watchface core never draws. It hands finished strings and colors
//! to a backend, which owns the actual layers.

use crate::color::Color;
use crate::layer::Layer;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Text does not fit the layer
    BufferOverflow,
}

/// Layered text display
pub trait DisplayBackend {
    /// Replace the text shown in `layer`
    fn set_text(&mut self, layer: Layer, text: &str) -> Result<(), DisplayError>;

    /// Set the text color of `layer`
    fn set_text_color(&mut self, layer: Layer, color: Color) -> Result<(), DisplayError>;

    /// Fill the background behind all layers
    fn set_background(&mut self, color: Color) -> Result<(), DisplayError>;

    /// Foreground color that stays readable on `background`
    ///
    /// Backends with a restricted palette override this.
    fn legible_over(&self, background: Color) -> Color {
        background.legible_over()
    }
}
