//! Screen to panel frame encoding

use skwatch_protocol::{Frame, PanelMessage};

use crate::layer::{Layer, LayerSet, LAYER_COUNT};
use crate::screen::Screen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Clear,
    Background,
    Color(usize),
    Text(usize),
    Done,
}

/// Iterator over the frames that bring the panel up to date
///
/// Order: optional clear, background, then color and text for each
/// selected layer.
pub struct PanelEncoder<'a> {
    screen: &'a Screen,
    layers: LayerSet,
    step: Step,
}

impl<'a> PanelEncoder<'a> {
    /// Frames for the layers marked dirty in `screen`
    pub fn dirty(screen: &'a Screen) -> Self {
        Self {
            screen,
            layers: screen.dirty(),
            step: Step::Background,
        }
    }

    /// Frames that repaint the whole panel from scratch
    pub fn full(screen: &'a Screen) -> Self {
        Self {
            screen,
            layers: LayerSet::ALL,
            step: Step::Clear,
        }
    }

    /// Next selected layer at or after `from`
    fn next_layer(&self, from: usize) -> Step {
        (from..LAYER_COUNT)
            .find(|&i| self.layers.contains(Layer::ALL[i]))
            .map_or(Step::Done, Step::Color)
    }
}

impl<'a> Iterator for PanelEncoder<'a> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        loop {
            let message = match self.step {
                Step::Clear => {
                    self.step = Step::Background;
                    PanelMessage::Clear
                }
                Step::Background => {
                    self.step = self.next_layer(0);
                    if !self.layers.has_background() {
                        continue;
                    }
                    PanelMessage::Background {
                        color: self.screen.background().to_hex(),
                    }
                }
                Step::Color(i) => {
                    self.step = Step::Text(i);
                    let layer = Layer::ALL[i];
                    PanelMessage::TextColor {
                        layer: layer.as_u8(),
                        color: self.screen.text_color(layer).to_hex(),
                    }
                }
                Step::Text(i) => {
                    self.step = self.next_layer(i + 1);
                    let layer = Layer::ALL[i];
                    PanelMessage::Text {
                        layer: layer.as_u8(),
                        text: self.screen.text(layer),
                    }
                }
                Step::Done => return None,
            };

            // Frames that fail to encode are skipped rather than ending the refresh
            if let Ok(frame) = message.to_frame() {
                return Some(frame);
            }
        }
    }
}
