//! Drawing entities
//!
//! The entity set is the small one a 2D drafting surface needs: lines,
//! circles, arcs, text and lightweight polylines. Every entity carries the
//! same common header (handle, layer, line type, weight, color).

use crate::types::{Color, Handle, LineWeight, Vector2};

/// Properties shared by all entities
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCommon {
    /// Unique handle, assigned when the entity is added to a drawing
    pub handle: Handle,
    /// Layer name
    pub layer: String,
    /// Line type name
    pub line_type: String,
    /// Line weight
    pub line_weight: LineWeight,
    /// Color
    pub color: Color,
}

impl EntityCommon {
    /// Create common properties on the given layer, everything else ByLayer
    pub fn on_layer(layer: impl Into<String>) -> Self {
        EntityCommon {
            handle: Handle::NULL,
            layer: layer.into(),
            line_type: "ByLayer".to_string(),
            line_weight: LineWeight::ByLayer,
            color: Color::ByLayer,
        }
    }

    /// Set an explicit line type, builder style
    pub fn with_line_type(mut self, line_type: impl Into<String>) -> Self {
        self.line_type = line_type.into();
        self
    }

    /// Set an explicit line weight, builder style
    pub fn with_line_weight(mut self, weight: LineWeight) -> Self {
        self.line_weight = weight;
        self
    }
}

impl Default for EntityCommon {
    fn default() -> Self {
        EntityCommon::on_layer("0")
    }
}

/// A line segment
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub common: EntityCommon,
    pub start: Vector2,
    pub end: Vector2,
}

impl Line {
    pub fn new(common: EntityCommon, start: Vector2, end: Vector2) -> Self {
        Line { common, start, end }
    }

    /// Segment length
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }
}

/// A full circle
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub common: EntityCommon,
    pub center: Vector2,
    pub radius: f64,
}

impl Circle {
    pub fn new(common: EntityCommon, center: Vector2, radius: f64) -> Self {
        Circle {
            common,
            center,
            radius,
        }
    }
}

/// A circular arc
///
/// Angles are in degrees, counter-clockwise from the positive X axis,
/// sweeping from `start_angle` to `end_angle`.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    pub common: EntityCommon,
    pub center: Vector2,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Arc {
    pub fn new(
        common: EntityCommon,
        center: Vector2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> Self {
        Arc {
            common,
            center,
            radius,
            start_angle,
            end_angle,
        }
    }
}

/// Horizontal text justification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextHAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextHAlign {
    /// Numeric justification flag used by the writer
    pub fn flag(&self) -> i16 {
        match self {
            TextHAlign::Left => 0,
            TextHAlign::Center => 1,
            TextHAlign::Right => 2,
        }
    }
}

/// Vertical text justification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextVAlign {
    #[default]
    Baseline,
    Bottom,
    Middle,
    Top,
}

impl TextVAlign {
    /// Numeric justification flag used by the writer
    pub fn flag(&self) -> i16 {
        match self {
            TextVAlign::Baseline => 0,
            TextVAlign::Bottom => 1,
            TextVAlign::Middle => 2,
            TextVAlign::Top => 3,
        }
    }
}

/// A single-line text entity
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub common: EntityCommon,
    /// Text content, control codes (%%c, %%d) included verbatim
    pub value: String,
    /// Insertion point
    pub position: Vector2,
    /// Text height
    pub height: f64,
    /// Rotation in degrees
    pub rotation: f64,
    /// Text style name
    pub style: String,
    pub halign: TextHAlign,
    pub valign: TextVAlign,
}

impl Text {
    pub fn new(
        common: EntityCommon,
        value: impl Into<String>,
        position: Vector2,
        height: f64,
    ) -> Self {
        Text {
            common,
            value: value.into(),
            position,
            height,
            rotation: 0.0,
            style: "Standard".to_string(),
            halign: TextHAlign::Left,
            valign: TextVAlign::Baseline,
        }
    }

    /// Set the rotation in degrees, builder style
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    /// Set the style name, builder style
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// Center the text on its insertion point, builder style
    pub fn centered(mut self) -> Self {
        self.halign = TextHAlign::Center;
        self.valign = TextVAlign::Middle;
        self
    }

    /// Whether the text uses non-default justification
    pub fn is_aligned(&self) -> bool {
        self.halign != TextHAlign::Left || self.valign != TextVAlign::Baseline
    }
}

/// A lightweight polyline
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub common: EntityCommon,
    pub points: Vec<Vector2>,
    pub closed: bool,
}

impl Polyline {
    pub fn new(common: EntityCommon, points: Vec<Vector2>, closed: bool) -> Self {
        Polyline {
            common,
            points,
            closed,
        }
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }
}

/// All entity types that can be stored in a drawing
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    Line(Line),
    Circle(Circle),
    Arc(Arc),
    Text(Text),
    Polyline(Polyline),
}

impl EntityKind {
    /// Get the common properties
    pub fn common(&self) -> &EntityCommon {
        match self {
            EntityKind::Line(e) => &e.common,
            EntityKind::Circle(e) => &e.common,
            EntityKind::Arc(e) => &e.common,
            EntityKind::Text(e) => &e.common,
            EntityKind::Polyline(e) => &e.common,
        }
    }

    /// Get the common properties mutably
    pub fn common_mut(&mut self) -> &mut EntityCommon {
        match self {
            EntityKind::Line(e) => &mut e.common,
            EntityKind::Circle(e) => &mut e.common,
            EntityKind::Arc(e) => &mut e.common,
            EntityKind::Text(e) => &mut e.common,
            EntityKind::Polyline(e) => &mut e.common,
        }
    }

    /// Name used in the serialized output
    pub fn type_name(&self) -> &'static str {
        match self {
            EntityKind::Line(_) => "LINE",
            EntityKind::Circle(_) => "CIRCLE",
            EntityKind::Arc(_) => "ARC",
            EntityKind::Text(_) => "TEXT",
            EntityKind::Polyline(_) => "LWPOLYLINE",
        }
    }

    /// Bounding box of the entity geometry, if it has one
    pub fn bounds(&self) -> Option<(Vector2, Vector2)> {
        match self {
            EntityKind::Line(e) => Some(bounds_of(&[e.start, e.end])),
            EntityKind::Circle(e) => Some(circle_bounds(e.center, e.radius)),
            // Conservative: the full circle box, not the swept segment
            EntityKind::Arc(e) => Some(circle_bounds(e.center, e.radius)),
            EntityKind::Text(e) => Some((e.position, e.position)),
            EntityKind::Polyline(e) => {
                if e.points.is_empty() {
                    None
                } else {
                    Some(bounds_of(&e.points))
                }
            }
        }
    }
}

fn bounds_of(points: &[Vector2]) -> (Vector2, Vector2) {
    let mut min = points[0];
    let mut max = points[0];
    for p in points {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    (min, max)
}

fn circle_bounds(center: Vector2, radius: f64) -> (Vector2, Vector2) {
    (
        Vector2::new(center.x - radius, center.y - radius),
        Vector2::new(center.x + radius, center.y + radius),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_on_layer() {
        let common = EntityCommon::on_layer("4centers");
        assert_eq!(common.layer, "4centers");
        assert_eq!(common.line_type, "ByLayer");
        assert!(common.handle.is_null());
    }

    #[test]
    fn test_line_length() {
        let line = Line::new(
            EntityCommon::default(),
            Vector2::new(0.0, 0.0),
            Vector2::new(3.0, 4.0),
        );
        assert_eq!(line.length(), 5.0);
    }

    #[test]
    fn test_text_centered() {
        let text = Text::new(
            EntityCommon::default(),
            "%%c20",
            Vector2::new(10.0, 5.0),
            2.5,
        )
        .centered();
        assert!(text.is_aligned());
        assert_eq!(text.halign.flag(), 1);
        assert_eq!(text.valign.flag(), 2);
    }

    #[test]
    fn test_entity_kind_dispatch() {
        let circle = EntityKind::Circle(Circle::new(
            EntityCommon::on_layer("2det"),
            Vector2::new(1.0, 2.0),
            5.0,
        ));
        assert_eq!(circle.type_name(), "CIRCLE");
        assert_eq!(circle.common().layer, "2det");
        let (min, max) = circle.bounds().unwrap();
        assert_eq!(min, Vector2::new(-4.0, -3.0));
        assert_eq!(max, Vector2::new(6.0, 7.0));
    }

    #[test]
    fn test_polyline_bounds() {
        let pl = Polyline::new(
            EntityCommon::default(),
            vec![
                Vector2::new(0.0, 0.0),
                Vector2::new(10.0, -2.0),
                Vector2::new(4.0, 8.0),
            ],
            true,
        );
        let (min, max) = EntityKind::Polyline(pl).bounds().unwrap();
        assert_eq!(min, Vector2::new(0.0, -2.0));
        assert_eq!(max, Vector2::new(10.0, 8.0));
    }
}
