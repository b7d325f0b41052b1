//! Backend over the shared screen buffer

use skwatch_display::{Color, DisplayBackend, DisplayError, Layer};

use crate::channels::{PANEL_UPDATE, SCREEN};

/// Handle to the screen buffer in [`SCREEN`]
///
/// Every write that leaves layers dirty wakes the panel tx task.
pub struct SharedScreen;

impl SharedScreen {
    fn with<R>(&self, f: impl FnOnce(&mut skwatch_display::Screen) -> R) -> R {
        let (result, dirty) = SCREEN.lock(|cell| {
            let mut screen = cell.borrow_mut();
            let result = f(&mut screen);
            (result, screen.is_dirty())
        });
        if dirty {
            PANEL_UPDATE.signal(());
        }
        result
    }
}

impl DisplayBackend for SharedScreen {
    fn set_text(&mut self, layer: Layer, text: &str) -> Result<(), DisplayError> {
        self.with(|screen| screen.set_text(layer, text))
    }

    fn set_text_color(&mut self, layer: Layer, color: Color) -> Result<(), DisplayError> {
        self.with(|screen| screen.set_text_color(layer, color))
    }

    fn set_background(&mut self, color: Color) -> Result<(), DisplayError> {
        self.with(|screen| screen.set_background(color))
    }
}
