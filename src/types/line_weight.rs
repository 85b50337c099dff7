//! Line weight representation
//!
//! Weights are stored in 1/100 mm as in the DXF group code 370 encoding.
//! Standard definitions specify weights in plain millimeters; `from_mm`
//! bridges the two.

use std::fmt;

/// Line weight of an entity or layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LineWeight {
    /// Use the layer's line weight
    #[default]
    ByLayer,
    /// Use the block's line weight
    ByBlock,
    /// Specific line weight in 1/100 mm
    Value(i16),
}

impl LineWeight {
    /// Create a line weight from a raw 1/100 mm value
    pub fn from_value(value: i16) -> Self {
        match value {
            -1 => LineWeight::ByLayer,
            -2 => LineWeight::ByBlock,
            v => LineWeight::Value(v),
        }
    }

    /// Create a line weight from millimeters, rounding to 1/100 mm
    pub fn from_mm(mm: f64) -> Self {
        LineWeight::Value((mm * 100.0).round() as i16)
    }

    /// Get the raw 1/100 mm value
    pub fn value(&self) -> i16 {
        match self {
            LineWeight::ByLayer => -1,
            LineWeight::ByBlock => -2,
            LineWeight::Value(v) => *v,
        }
    }

    /// Get the line weight in millimeters
    pub fn millimeters(&self) -> Option<f64> {
        match self {
            LineWeight::Value(v) => Some(*v as f64 / 100.0),
            _ => None,
        }
    }

    /// Common drafting weights (in 1/100 mm)
    pub const W0_25: LineWeight = LineWeight::Value(25);
    pub const W0_35: LineWeight = LineWeight::Value(35);
    pub const W0_50: LineWeight = LineWeight::Value(50);
    pub const W0_70: LineWeight = LineWeight::Value(70);
    pub const W1_00: LineWeight = LineWeight::Value(100);
}

impl fmt::Display for LineWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineWeight::ByLayer => write!(f, "ByLayer"),
            LineWeight::ByBlock => write!(f, "ByBlock"),
            LineWeight::Value(v) => write!(f, "{:.2}mm", *v as f64 / 100.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_value() {
        assert_eq!(LineWeight::from_value(-1), LineWeight::ByLayer);
        assert_eq!(LineWeight::from_value(-2), LineWeight::ByBlock);
        assert_eq!(LineWeight::from_value(25), LineWeight::W0_25);
    }

    #[test]
    fn test_from_mm() {
        assert_eq!(LineWeight::from_mm(0.25), LineWeight::Value(25));
        assert_eq!(LineWeight::from_mm(0.7), LineWeight::Value(70));
        assert_eq!(LineWeight::from_mm(1.0), LineWeight::W1_00);
    }

    #[test]
    fn test_millimeters() {
        assert_eq!(LineWeight::Value(50).millimeters(), Some(0.5));
        assert_eq!(LineWeight::ByLayer.millimeters(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(LineWeight::W0_50.to_string(), "0.50mm");
        assert_eq!(LineWeight::ByLayer.to_string(), "ByLayer");
    }
}
