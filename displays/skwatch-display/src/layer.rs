//! Text layers and layer sets

/// Number of text layers
pub const LAYER_COUNT: usize = 7;

/// Fixed text regions of the watchface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Layer {
    Weather = 0,
    Time = 1,
    /// AM/PM indicator, empty in 24-hour mode
    Meridiem = 2,
    Date = 3,
    Battery = 4,
    Steps = 5,
    /// Step goal glyph next to the count
    Mood = 6,
}

impl Layer {
    pub const ALL: [Layer; LAYER_COUNT] = [
        Layer::Weather,
        Layer::Time,
        Layer::Meridiem,
        Layer::Date,
        Layer::Battery,
        Layer::Steps,
        Layer::Mood,
    ];

    /// Layer id on the panel link
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

const BACKGROUND_BIT: u8 = 1 << 7;

/// Set of layers plus the background
///
/// Used both for "what changed" reports and for dirty tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayerSet(u8);

impl LayerSet {
    pub const EMPTY: LayerSet = LayerSet(0);
    pub const ALL: LayerSet = LayerSet(BACKGROUND_BIT | ((1 << LAYER_COUNT) - 1));

    pub const fn of(layer: Layer) -> Self {
        LayerSet(1 << layer as u8)
    }

    pub const fn background() -> Self {
        LayerSet(BACKGROUND_BIT)
    }

    pub const fn with(self, layer: Layer) -> Self {
        LayerSet(self.0 | (1 << layer as u8))
    }

    pub const fn union(self, other: LayerSet) -> Self {
        LayerSet(self.0 | other.0)
    }

    pub fn insert(&mut self, layer: Layer) {
        self.0 |= 1 << layer as u8;
    }

    pub fn insert_background(&mut self) {
        self.0 |= BACKGROUND_BIT;
    }

    pub const fn contains(self, layer: Layer) -> bool {
        self.0 & (1 << layer as u8) != 0
    }

    pub const fn has_background(self) -> bool {
        self.0 & BACKGROUND_BIT != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Layers in the set, in panel order
    pub fn layers(self) -> impl Iterator<Item = Layer> {
        Layer::ALL.into_iter().filter(move |l| self.contains(*l))
    }
}

impl core::ops::BitOrAssign for LayerSet {
    fn bitor_assign(&mut self, rhs: LayerSet) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_ids() {
        for layer in Layer::ALL {
            assert_eq!(Layer::from_u8(layer.as_u8()), Some(layer));
        }
        assert_eq!(Layer::from_u8(LAYER_COUNT as u8), None);
    }

    #[test]
    fn test_set_membership() {
        let set = LayerSet::of(Layer::Time).with(Layer::Meridiem);
        assert!(set.contains(Layer::Time));
        assert!(set.contains(Layer::Meridiem));
        assert!(!set.contains(Layer::Date));
        assert!(!set.has_background());

        let layers: std::vec::Vec<Layer> = set.layers().collect();
        assert_eq!(layers, std::vec![Layer::Time, Layer::Meridiem]);
    }

    #[test]
    fn test_background_bit() {
        let mut set = LayerSet::EMPTY;
        assert!(set.is_empty());
        set.insert_background();
        assert!(set.has_background());
        assert_eq!(set.layers().count(), 0);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_all_contains_everything() {
        assert!(LayerSet::ALL.has_background());
        assert_eq!(LayerSet::ALL.layers().count(), LAYER_COUNT);
    }

    #[test]
    fn test_union() {
        let mut set = LayerSet::of(Layer::Battery);
        set |= LayerSet::background();
        assert_eq!(set, LayerSet::background().union(LayerSet::of(Layer::Battery)));
    }
}
