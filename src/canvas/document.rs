//! Document-backed canvas

use tracing::debug;

use super::{CanvasPort, EntityAttrs, TextAttrs};
use crate::drawing::{
    Arc, Circle, Drawing, EntityCommon, EntityKind, Layer, Line, LineTypeRecord, Polyline, Text,
    TextStyleRecord,
};
use crate::error::Result;
use crate::standard::StandardDefinition;
use crate::types::{Handle, LineWeight, Vector2};

/// Font file backing CJK-capable text styles
const CJK_FONT_FILE: &str = "simsun.ttf";

/// Canvas that renders onto a [`Drawing`] document
#[derive(Debug, Default)]
pub struct DocumentCanvas {
    drawing: Drawing,
}

impl DocumentCanvas {
    /// Create a canvas over a fresh drawing
    pub fn new() -> Self {
        DocumentCanvas {
            drawing: Drawing::new(),
        }
    }

    /// Borrow the underlying drawing
    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    /// Take the finished drawing out of the canvas
    pub fn into_drawing(self) -> Drawing {
        self.drawing
    }

    fn common_from(attrs: &EntityAttrs) -> EntityCommon {
        let mut common = EntityCommon::on_layer(&attrs.layer);
        if let Some(line_type) = &attrs.line_type {
            common = common.with_line_type(line_type.clone());
        }
        if let Some(millimeters) = attrs.line_weight {
            common = common.with_line_weight(LineWeight::from_mm(millimeters));
        }
        common
    }

    /// Line type a layer inherits, by the role it serves
    fn line_type_for_role(role_key: &str) -> &'static str {
        match role_key {
            "CENTERLINE" | "AXIS" | "CUTTING_PLANE" => "CENTER",
            "HIDDEN" => "HIDDEN",
            "PHANTOM" => "PHANTOM",
            "BORDER" => "BORDER",
            _ => "Continuous",
        }
    }
}

impl CanvasPort for DocumentCanvas {
    fn bootstrap(&mut self, standard: &StandardDefinition) -> Result<()> {
        let font_style = standard.font_style();
        if !self.drawing.text_styles.contains(font_style) {
            self.drawing
                .add_text_style(TextStyleRecord::with_font(font_style, CJK_FONT_FILE))?;
        }

        for (name, def) in standard.line_types() {
            if !self.drawing.line_types.contains(name) {
                self.drawing
                    .add_line_type(LineTypeRecord::from_def(name, def))?;
            }
        }

        for (role_key, layer_name) in standard.layer_mapping() {
            if !self.drawing.layers.contains(layer_name) {
                let layer =
                    Layer::new(layer_name).with_line_type(Self::line_type_for_role(role_key));
                self.drawing.add_layer(layer)?;
            }
        }

        debug!(
            layers = self.drawing.layers.len(),
            line_types = self.drawing.line_types.len(),
            "canvas bootstrapped"
        );
        Ok(())
    }

    fn add_line(&mut self, start: Vector2, end: Vector2, attrs: &EntityAttrs) -> Result<Handle> {
        let line = Line::new(Self::common_from(attrs), start, end);
        Ok(self.drawing.add_entity(EntityKind::Line(line)))
    }

    fn add_circle(&mut self, center: Vector2, radius: f64, attrs: &EntityAttrs) -> Result<Handle> {
        let circle = Circle::new(Self::common_from(attrs), center, radius);
        Ok(self.drawing.add_entity(EntityKind::Circle(circle)))
    }

    fn add_arc(
        &mut self,
        center: Vector2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        attrs: &EntityAttrs,
    ) -> Result<Handle> {
        let arc = Arc::new(
            Self::common_from(attrs),
            center,
            radius,
            start_angle,
            end_angle,
        );
        Ok(self.drawing.add_entity(EntityKind::Arc(arc)))
    }

    fn add_text(&mut self, value: &str, position: Vector2, attrs: &TextAttrs) -> Result<Handle> {
        let mut text = Text::new(
            EntityCommon::on_layer(&attrs.layer),
            value,
            position,
            attrs.height,
        )
        .with_rotation(attrs.rotation)
        .with_style(attrs.style.clone());
        if attrs.centered {
            text = text.centered();
        }
        Ok(self.drawing.add_entity(EntityKind::Text(text)))
    }

    fn add_polyline(
        &mut self,
        points: &[Vector2],
        closed: bool,
        attrs: &EntityAttrs,
    ) -> Result<Handle> {
        let polyline = Polyline::new(Self::common_from(attrs), points.to_vec(), closed);
        Ok(self.drawing.add_entity(EntityKind::Polyline(polyline)))
    }
}
