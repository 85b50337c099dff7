//! Canvas port
//!
//! Strategies draw through [`CanvasPort`] instead of talking to the document
//! model directly. The production implementation targets a [`Drawing`]
//! document; tests use [`RecordingCanvas`] to assert on emitted primitives.
//!
//! [`Drawing`]: crate::drawing::Drawing

mod document;
mod recording;

pub use document::DocumentCanvas;
pub use recording::{CanvasCall, RecordingCanvas};

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Result;
use crate::standard::StandardDefinition;
use crate::types::{Handle, Vector2};

/// Attributes for geometric primitives
#[derive(Debug, Clone, PartialEq)]
pub struct EntityAttrs {
    /// Target layer name (physical, already resolved through the standard)
    pub layer: String,
    /// Explicit line type, None means ByLayer
    pub line_type: Option<String>,
    /// Explicit line weight in millimeters, None means ByLayer
    pub line_weight: Option<f64>,
}

impl EntityAttrs {
    /// Attributes targeting a layer, everything else ByLayer
    pub fn on_layer(layer: impl Into<String>) -> Self {
        EntityAttrs {
            layer: layer.into(),
            line_type: None,
            line_weight: None,
        }
    }

    /// Set an explicit line type, builder style
    pub fn with_line_type(mut self, line_type: impl Into<String>) -> Self {
        self.line_type = Some(line_type.into());
        self
    }

    /// Set an explicit line weight in millimeters, builder style
    pub fn with_line_weight(mut self, millimeters: f64) -> Self {
        self.line_weight = Some(millimeters);
        self
    }
}

/// Attributes for text primitives
#[derive(Debug, Clone, PartialEq)]
pub struct TextAttrs {
    /// Target layer name
    pub layer: String,
    /// Text height
    pub height: f64,
    /// Rotation in degrees
    pub rotation: f64,
    /// Text style name
    pub style: String,
    /// Center the text on its insertion point
    pub centered: bool,
}

impl TextAttrs {
    /// Text attributes on a layer with the given height
    pub fn new(layer: impl Into<String>, height: f64) -> Self {
        TextAttrs {
            layer: layer.into(),
            height,
            rotation: 0.0,
            style: "Standard".to_string(),
            centered: false,
        }
    }

    /// Set the rotation in degrees, builder style
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    /// Set the text style name, builder style
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// Center the text on its insertion point, builder style
    pub fn centered(mut self) -> Self {
        self.centered = true;
        self
    }
}

/// Drawing surface the strategies render onto
pub trait CanvasPort {
    /// Prepare the surface for a standard: text style, line types, layers
    fn bootstrap(&mut self, standard: &StandardDefinition) -> Result<()>;

    /// Add a line segment
    fn add_line(&mut self, start: Vector2, end: Vector2, attrs: &EntityAttrs) -> Result<Handle>;

    /// Add a full circle
    fn add_circle(&mut self, center: Vector2, radius: f64, attrs: &EntityAttrs) -> Result<Handle>;

    /// Add a circular arc, angles in degrees counter-clockwise
    fn add_arc(
        &mut self,
        center: Vector2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        attrs: &EntityAttrs,
    ) -> Result<Handle>;

    /// Add a single-line text
    fn add_text(&mut self, value: &str, position: Vector2, attrs: &TextAttrs) -> Result<Handle>;

    /// Add a polyline
    fn add_polyline(
        &mut self,
        points: &[Vector2],
        closed: bool,
        attrs: &EntityAttrs,
    ) -> Result<Handle>;
}

/// Shared, interior-mutable canvas handle
pub type SharedCanvas = Rc<RefCell<dyn CanvasPort>>;

/// Wrap a port for shared use
pub fn share<P: CanvasPort + 'static>(port: P) -> SharedCanvas {
    Rc::new(RefCell::new(port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_attrs_builders() {
        let attrs = EntityAttrs::on_layer("4centers")
            .with_line_type("CENTER")
            .with_line_weight(0.25);
        assert_eq!(attrs.layer, "4centers");
        assert_eq!(attrs.line_type.as_deref(), Some("CENTER"));
        assert_eq!(attrs.line_weight, Some(0.25));
    }

    #[test]
    fn test_text_attrs_defaults() {
        let attrs = TextAttrs::new("3text", 2.5);
        assert_eq!(attrs.height, 2.5);
        assert_eq!(attrs.rotation, 0.0);
        assert!(!attrs.centered);
        assert!(TextAttrs::new("3text", 2.5).centered().centered);
    }
}
