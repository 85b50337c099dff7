//! Recording canvas for tests
//!
//! Captures every port call instead of rendering, so strategy output can be
//! asserted primitive by primitive.

use super::{CanvasPort, EntityAttrs, TextAttrs};
use crate::error::Result;
use crate::standard::StandardDefinition;
use crate::types::{Handle, Vector2};

/// One recorded port call
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasCall {
    Line {
        start: Vector2,
        end: Vector2,
        attrs: EntityAttrs,
    },
    Circle {
        center: Vector2,
        radius: f64,
        attrs: EntityAttrs,
    },
    Arc {
        center: Vector2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        attrs: EntityAttrs,
    },
    Text {
        value: String,
        position: Vector2,
        attrs: TextAttrs,
    },
    Polyline {
        points: Vec<Vector2>,
        closed: bool,
        attrs: EntityAttrs,
    },
}

/// Canvas that records calls without rendering anything
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    calls: Vec<CanvasCall>,
    bootstraps: usize,
    next_handle: u64,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        RecordingCanvas::default()
    }

    /// All recorded calls in order
    pub fn calls(&self) -> &[CanvasCall] {
        &self.calls
    }

    /// Number of recorded calls
    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    /// How many times bootstrap ran
    pub fn bootstrap_count(&self) -> usize {
        self.bootstraps
    }

    pub fn count_lines(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, CanvasCall::Line { .. }))
            .count()
    }

    pub fn count_circles(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, CanvasCall::Circle { .. }))
            .count()
    }

    pub fn count_arcs(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, CanvasCall::Arc { .. }))
            .count()
    }

    pub fn count_texts(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, CanvasCall::Text { .. }))
            .count()
    }

    pub fn count_polylines(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, CanvasCall::Polyline { .. }))
            .count()
    }

    /// Contents of all recorded texts, in call order
    pub fn text_contents(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                CanvasCall::Text { value, .. } => Some(value.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Distinct layers touched by recorded calls, in first-use order
    pub fn layers_used(&self) -> Vec<&str> {
        let mut layers: Vec<&str> = Vec::new();
        for call in &self.calls {
            let layer = match call {
                CanvasCall::Line { attrs, .. }
                | CanvasCall::Circle { attrs, .. }
                | CanvasCall::Arc { attrs, .. }
                | CanvasCall::Polyline { attrs, .. } => attrs.layer.as_str(),
                CanvasCall::Text { attrs, .. } => attrs.layer.as_str(),
            };
            if !layers.contains(&layer) {
                layers.push(layer);
            }
        }
        layers
    }

    fn record(&mut self, call: CanvasCall) -> Handle {
        self.calls.push(call);
        self.next_handle += 1;
        Handle::new(self.next_handle)
    }
}

impl CanvasPort for RecordingCanvas {
    fn bootstrap(&mut self, _standard: &StandardDefinition) -> Result<()> {
        self.bootstraps += 1;
        Ok(())
    }

    fn add_line(&mut self, start: Vector2, end: Vector2, attrs: &EntityAttrs) -> Result<Handle> {
        Ok(self.record(CanvasCall::Line {
            start,
            end,
            attrs: attrs.clone(),
        }))
    }

    fn add_circle(&mut self, center: Vector2, radius: f64, attrs: &EntityAttrs) -> Result<Handle> {
        Ok(self.record(CanvasCall::Circle {
            center,
            radius,
            attrs: attrs.clone(),
        }))
    }

    fn add_arc(
        &mut self,
        center: Vector2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        attrs: &EntityAttrs,
    ) -> Result<Handle> {
        Ok(self.record(CanvasCall::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            attrs: attrs.clone(),
        }))
    }

    fn add_text(&mut self, value: &str, position: Vector2, attrs: &TextAttrs) -> Result<Handle> {
        Ok(self.record(CanvasCall::Text {
            value: value.to_string(),
            position,
            attrs: attrs.clone(),
        }))
    }

    fn add_polyline(
        &mut self,
        points: &[Vector2],
        closed: bool,
        attrs: &EntityAttrs,
    ) -> Result<Handle> {
        Ok(self.record(CanvasCall::Polyline {
            points: points.to_vec(),
            closed,
            attrs: attrs.clone(),
        }))
    }
}
