//! Color representation for layers and entities
//!
//! Colors use the classic CAD color index scheme; entities normally defer
//! to their layer's color.

use std::fmt;

/// Entity/layer color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Color by layer (index 256)
    #[default]
    ByLayer,
    /// Color by block (index 0)
    ByBlock,
    /// Color index (1-255)
    Index(u8),
}

impl Color {
    /// White/black foreground color (index 7)
    pub const WHITE: Color = Color::Index(7);

    /// Create a color from a raw color index
    pub fn from_index(index: i16) -> Self {
        match index {
            0 => Color::ByBlock,
            256 => Color::ByLayer,
            1..=255 => Color::Index(index as u8),
            _ => Color::Index(7),
        }
    }

    /// Get the raw color index
    pub fn index(&self) -> i16 {
        match self {
            Color::ByLayer => 256,
            Color::ByBlock => 0,
            Color::Index(i) => *i as i16,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::ByLayer => write!(f, "ByLayer"),
            Color::ByBlock => write!(f, "ByBlock"),
            Color::Index(i) => write!(f, "Index({})", i),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index() {
        assert_eq!(Color::from_index(0), Color::ByBlock);
        assert_eq!(Color::from_index(256), Color::ByLayer);
        assert_eq!(Color::from_index(7), Color::WHITE);
        assert_eq!(Color::from_index(300), Color::Index(7));
    }

    #[test]
    fn test_index_roundtrip() {
        assert_eq!(Color::ByLayer.index(), 256);
        assert_eq!(Color::ByBlock.index(), 0);
        assert_eq!(Color::Index(42).index(), 42);
    }
}
