//! Logical layer roles and sizing tiers
//!
//! Strategies never name physical layers, weights or heights directly; they
//! reference these keys and the loaded standard resolves them. The key
//! strings double as the lookup keys in the definition tables.

use std::fmt;

/// Logical layer role resolved through the standard's layer mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerRole {
    /// Visible contour lines
    Visible,
    /// Hidden contour lines
    Hidden,
    /// Center lines
    Centerline,
    /// Phantom (double-dash) lines
    Phantom,
    /// Drawing boundary lines
    Border,
    /// Dimension lines and dimension text
    Dimensions,
    /// Free-standing text
    Text,
    /// Part outlines
    Parts,
    /// Hatch patterns
    Hatch,
    /// Detail view marks
    Detail,
    /// Annotations
    Annotation,
    /// Table lines
    Table,
    /// Axis lines
    Axis,
    /// Section outlines
    Section,
    /// Cutting plane traces
    CuttingPlane,
    /// Tolerance frames
    Tolerance,
    /// Surface finish symbols
    SurfaceFinish,
    /// Welding symbols
    WeldSymbol,
    /// Auxiliary construction lines
    Auxiliary,
    /// Coordinate grid lines
    Coordinate,
    /// Title block lines and fields
    TitleBlock,
}

impl LayerRole {
    /// Every role any built-in strategy may resolve
    pub const ALL: [LayerRole; 21] = [
        LayerRole::Visible,
        LayerRole::Hidden,
        LayerRole::Centerline,
        LayerRole::Phantom,
        LayerRole::Border,
        LayerRole::Dimensions,
        LayerRole::Text,
        LayerRole::Parts,
        LayerRole::Hatch,
        LayerRole::Detail,
        LayerRole::Annotation,
        LayerRole::Table,
        LayerRole::Axis,
        LayerRole::Section,
        LayerRole::CuttingPlane,
        LayerRole::Tolerance,
        LayerRole::SurfaceFinish,
        LayerRole::WeldSymbol,
        LayerRole::Auxiliary,
        LayerRole::Coordinate,
        LayerRole::TitleBlock,
    ];

    /// The lookup key this role uses in `layer_mapping`
    pub const fn key(&self) -> &'static str {
        match self {
            LayerRole::Visible => "VISIBLE",
            LayerRole::Hidden => "HIDDEN",
            LayerRole::Centerline => "CENTERLINE",
            LayerRole::Phantom => "PHANTOM",
            LayerRole::Border => "BORDER",
            LayerRole::Dimensions => "DIMENSIONS",
            LayerRole::Text => "TEXT",
            LayerRole::Parts => "PARTS",
            LayerRole::Hatch => "HATCH",
            LayerRole::Detail => "DETAIL",
            LayerRole::Annotation => "ANNOTATION",
            LayerRole::Table => "TABLE",
            LayerRole::Axis => "AXIS",
            LayerRole::Section => "SECTION",
            LayerRole::CuttingPlane => "CUTTING_PLANE",
            LayerRole::Tolerance => "TOLERANCE",
            LayerRole::SurfaceFinish => "SURFACE_FINISH",
            LayerRole::WeldSymbol => "WELD_SYMBOL",
            LayerRole::Auxiliary => "AUXILIARY",
            LayerRole::Coordinate => "COORDINATE",
            LayerRole::TitleBlock => "TITLE_BLOCK",
        }
    }
}

impl fmt::Display for LayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Text height tier resolved through the standard's text height table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextHeightTier {
    /// Drawing and view titles
    Title,
    /// Secondary captions
    Subtitle,
    /// Regular annotation text
    Normal,
    /// Small annotation text
    Small,
    /// Smallest permissible text
    Tiny,
}

impl TextHeightTier {
    /// All defined tiers
    pub const ALL: [TextHeightTier; 5] = [
        TextHeightTier::Title,
        TextHeightTier::Subtitle,
        TextHeightTier::Normal,
        TextHeightTier::Small,
        TextHeightTier::Tiny,
    ];

    /// The lookup key this tier uses in `text_heights`
    pub const fn key(&self) -> &'static str {
        match self {
            TextHeightTier::Title => "TITLE",
            TextHeightTier::Subtitle => "SUBTITLE",
            TextHeightTier::Normal => "NORMAL",
            TextHeightTier::Small => "SMALL",
            TextHeightTier::Tiny => "TINY",
        }
    }
}

impl fmt::Display for TextHeightTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Line weight tier resolved through the standard's line weight table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineWeightTier {
    /// Thin lines (dimensions, hatching, center lines)
    Thin,
    /// Medium lines
    Medium,
    /// Thick lines (visible contours)
    Thick,
    /// Extra thick lines
    ExtraThick,
}

impl LineWeightTier {
    /// All defined tiers
    pub const ALL: [LineWeightTier; 4] = [
        LineWeightTier::Thin,
        LineWeightTier::Medium,
        LineWeightTier::Thick,
        LineWeightTier::ExtraThick,
    ];

    /// The lookup key this tier uses in `line_weights`
    pub const fn key(&self) -> &'static str {
        match self {
            LineWeightTier::Thin => "THIN",
            LineWeightTier::Medium => "MEDIUM",
            LineWeightTier::Thick => "THICK",
            LineWeightTier::ExtraThick => "EXTRA_THICK",
        }
    }
}

impl fmt::Display for LineWeightTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_keys_unique() {
        let mut keys: Vec<&str> = LayerRole::ALL.iter().map(|r| r.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), LayerRole::ALL.len());
    }

    #[test]
    fn test_tier_keys() {
        assert_eq!(TextHeightTier::Normal.key(), "NORMAL");
        assert_eq!(LineWeightTier::ExtraThick.key(), "EXTRA_THICK");
        assert_eq!(LayerRole::CuttingPlane.key(), "CUTTING_PLANE");
    }

    #[test]
    fn test_display_matches_key() {
        assert_eq!(LayerRole::Visible.to_string(), "VISIBLE");
        assert_eq!(TextHeightTier::Tiny.to_string(), "TINY");
        assert_eq!(LineWeightTier::Thin.to_string(), "THIN");
    }
}
