//! Engineering symbol strategy
//!
//! Surface roughness, geometric tolerance frames and welding symbols.
//! Glyphs are built from lines and polylines at fixed offsets relative to
//! the anchor position; each symbol family resolves its own layer role.

use std::sync::Arc;

use super::{reject_foreign, DrawingIntent, DrawingStrategy};
use crate::canvas::{EntityAttrs, SharedCanvas, TextAttrs};
use crate::error::{DraftError, Result};
use crate::standard::{LayerRole, LineWeightTier, StandardDefinition};
use crate::types::{Handle, Vector2};

/// Tolerance frame cell width
const FRAME_WIDTH: f64 = 14.0;

/// Tolerance frame height
const FRAME_HEIGHT: f64 = 7.0;

/// Datum cell width appended to the tolerance frame
const DATUM_WIDTH: f64 = 7.0;

/// Welding reference line length
const REFERENCE_LENGTH: f64 = 30.0;

/// Field weld flag pole height
const FLAG_HEIGHT: f64 = 5.0;

/// Engineering symbol operations
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolOp {
    /// Basic roughness mark with an `Ra` value
    Roughness {
        position: Vector2,
        value: String,
        height: f64,
    },
    /// GB/T 131 surface finish symbol with optional parameters
    SurfaceFinish {
        position: Vector2,
        ra_value: String,
        machining_method: Option<String>,
        waviness: Option<String>,
        lay: Option<String>,
        cutoff: Option<String>,
        height: f64,
    },
    /// Geometric tolerance frame: characteristic, value, optional datum
    GeomTolerance {
        position: Vector2,
        symbol: String,
        tolerance: String,
        datum: Option<String>,
        height: f64,
    },
    /// Welding symbol on a reference line with an arrow
    WeldingSymbol {
        position: Vector2,
        weld_type: String,
        size: Option<String>,
        length: Option<String>,
        process: Option<String>,
        finish: Option<String>,
        field_weld: bool,
        height: f64,
    },
}

/// Strategy for roughness, tolerance and welding symbols
pub struct SymbolDrawer {
    canvas: SharedCanvas,
    standard: Arc<StandardDefinition>,
}

impl SymbolDrawer {
    pub fn new(canvas: SharedCanvas, standard: Arc<StandardDefinition>) -> Self {
        SymbolDrawer { canvas, standard }
    }

    fn line_attrs(&self, role: LayerRole) -> Result<EntityAttrs> {
        let layer = self.standard.layer(role)?;
        let weight = self.standard.line_weight(LineWeightTier::Thin)?;
        Ok(EntityAttrs::on_layer(layer).with_line_weight(weight))
    }

    fn text_attrs(&self, role: LayerRole, height: f64) -> Result<TextAttrs> {
        let layer = self.standard.layer(role)?;
        Ok(TextAttrs::new(layer, height).with_style(self.standard.font_style()))
    }

    /// Execute one symbol operation
    pub fn draw(&mut self, op: SymbolOp) -> Result<Vec<Handle>> {
        match op {
            SymbolOp::Roughness {
                position,
                value,
                height,
            } => {
                check_height(height)?;
                let attrs = self.line_attrs(LayerRole::SurfaceFinish)?;
                let text_attrs = self.text_attrs(LayerRole::SurfaceFinish, height)?;
                let p = position;

                let mut canvas = self.canvas.borrow_mut();
                let mut handles = Vec::with_capacity(4);
                handles.push(canvas.add_line(p, p + Vector2::new(0.0, 6.0), &attrs)?);
                handles.push(canvas.add_line(
                    p + Vector2::new(0.0, 6.0),
                    p + Vector2::new(4.0, 10.0),
                    &attrs,
                )?);
                handles.push(canvas.add_line(
                    p + Vector2::new(4.0, 10.0),
                    p + Vector2::new(10.0, 10.0),
                    &attrs,
                )?);
                handles.push(canvas.add_text(
                    &format!("Ra{value}"),
                    p + Vector2::new(15.0, 10.0),
                    &text_attrs,
                )?);
                Ok(handles)
            }
            SymbolOp::SurfaceFinish {
                position,
                ra_value,
                machining_method,
                waviness,
                lay,
                cutoff,
                height,
            } => {
                check_height(height)?;
                let attrs = self.line_attrs(LayerRole::SurfaceFinish)?;
                let text_attrs = self.text_attrs(LayerRole::SurfaceFinish, height)?;
                let small_attrs =
                    self.text_attrs(LayerRole::SurfaceFinish, height * 0.8)?;
                let p = position;

                let mut canvas = self.canvas.borrow_mut();
                let mut handles = Vec::new();
                handles.push(canvas.add_line(p, p + Vector2::new(0.0, 6.0), &attrs)?);
                handles.push(canvas.add_line(
                    p + Vector2::new(0.0, 6.0),
                    p + Vector2::new(4.0, 10.0),
                    &attrs,
                )?);
                handles.push(canvas.add_line(
                    p + Vector2::new(4.0, 10.0),
                    p + Vector2::new(10.0, 10.0),
                    &attrs,
                )?);
                if let Some(method) = machining_method {
                    // Closed symbol: bar over the vee plus the method text
                    handles.push(canvas.add_line(
                        p + Vector2::new(0.0, 6.0),
                        p + Vector2::new(10.0, 6.0),
                        &attrs,
                    )?);
                    handles.push(canvas.add_text(
                        &method,
                        p + Vector2::new(5.0, 8.0),
                        &text_attrs,
                    )?);
                }
                handles.push(canvas.add_text(
                    &format!("Ra{ra_value}"),
                    p + Vector2::new(12.0, 5.0),
                    &text_attrs,
                )?);

                let mut extras = Vec::new();
                if let Some(w) = waviness {
                    extras.push(format!("W{w}"));
                }
                if let Some(l) = lay {
                    extras.push(format!("Lay {l}"));
                }
                if let Some(c) = cutoff {
                    extras.push(format!("λc {c}"));
                }
                if !extras.is_empty() {
                    handles.push(canvas.add_text(
                        &extras.join(", "),
                        p + Vector2::new(12.0, 2.0),
                        &small_attrs,
                    )?);
                }
                Ok(handles)
            }
            SymbolOp::GeomTolerance {
                position,
                symbol,
                tolerance,
                datum,
                height,
            } => {
                check_height(height)?;
                let attrs = self.line_attrs(LayerRole::Tolerance)?;
                let text_attrs = self.text_attrs(LayerRole::Tolerance, height)?;
                let p = position;
                let mid_y = FRAME_HEIGHT / 2.0;

                let mut canvas = self.canvas.borrow_mut();
                let mut handles = Vec::new();
                let frame = [
                    p,
                    p + Vector2::new(FRAME_WIDTH, 0.0),
                    p + Vector2::new(FRAME_WIDTH, FRAME_HEIGHT),
                    p + Vector2::new(0.0, FRAME_HEIGHT),
                ];
                handles.push(canvas.add_polyline(&frame, true, &attrs)?);
                if let Some(datum) = datum {
                    // Datum cell shares the frame's right edge
                    let cell = [
                        p + Vector2::new(FRAME_WIDTH, 0.0),
                        p + Vector2::new(FRAME_WIDTH + DATUM_WIDTH, 0.0),
                        p + Vector2::new(FRAME_WIDTH + DATUM_WIDTH, FRAME_HEIGHT),
                        p + Vector2::new(FRAME_WIDTH, FRAME_HEIGHT),
                    ];
                    handles.push(canvas.add_polyline(&cell, false, &attrs)?);
                    handles.push(canvas.add_text(
                        &datum,
                        p + Vector2::new(FRAME_WIDTH + DATUM_WIDTH / 2.0, mid_y),
                        &text_attrs,
                    )?);
                }
                handles.push(canvas.add_text(
                    &symbol,
                    p + Vector2::new(3.0, mid_y),
                    &text_attrs,
                )?);
                handles.push(canvas.add_text(
                    &tolerance,
                    p + Vector2::new(10.0, mid_y),
                    &text_attrs,
                )?);
                Ok(handles)
            }
            SymbolOp::WeldingSymbol {
                position,
                weld_type,
                size,
                length,
                process,
                finish,
                field_weld,
                height,
            } => {
                check_height(height)?;
                let attrs = self.line_attrs(LayerRole::WeldSymbol)?;
                let text_attrs = self.text_attrs(LayerRole::WeldSymbol, height)?;
                let small_attrs = self.text_attrs(LayerRole::WeldSymbol, height * 0.8)?;
                let arrow = self.standard.arrow_size();
                let p = position;
                let mid_x = REFERENCE_LENGTH * 0.5;

                let mut canvas = self.canvas.borrow_mut();
                let mut handles = Vec::new();
                handles.push(canvas.add_line(
                    p,
                    p + Vector2::new(REFERENCE_LENGTH, 0.0),
                    &attrs,
                )?);
                handles.push(canvas.add_line(p, p + Vector2::new(arrow, arrow), &attrs)?);
                handles.push(canvas.add_line(p, p + Vector2::new(arrow, -arrow), &attrs)?);
                if field_weld {
                    let pole = p + Vector2::new(REFERENCE_LENGTH * 0.8, 0.0);
                    handles.push(canvas.add_line(
                        pole,
                        pole + Vector2::new(0.0, FLAG_HEIGHT),
                        &attrs,
                    )?);
                    handles.push(canvas.add_circle(
                        pole + Vector2::new(0.0, FLAG_HEIGHT + 1.0),
                        1.0,
                        &attrs,
                    )?);
                }
                handles.push(canvas.add_text(
                    &weld_type,
                    p + Vector2::new(mid_x, 3.0),
                    &text_attrs,
                )?);

                let info = match (size, length) {
                    (Some(s), Some(l)) => Some(format!("{s}-{l}")),
                    (Some(s), None) => Some(s),
                    (None, Some(l)) => Some(l),
                    (None, None) => None,
                };
                if let Some(info) = info {
                    handles.push(canvas.add_text(
                        &info,
                        p + Vector2::new(mid_x, -3.0),
                        &text_attrs,
                    )?);
                }
                let proc = match (process, finish) {
                    (Some(pr), Some(f)) => Some(format!("{pr}, {f}")),
                    (Some(pr), None) => Some(pr),
                    (None, Some(f)) => Some(f),
                    (None, None) => None,
                };
                if let Some(proc) = proc {
                    handles.push(canvas.add_text(
                        &proc,
                        p + Vector2::new(mid_x, -6.0),
                        &small_attrs,
                    )?);
                }
                Ok(handles)
            }
        }
    }
}

impl DrawingStrategy for SymbolDrawer {
    fn name(&self) -> &'static str {
        "symbols"
    }

    fn dispatch(&mut self, intent: DrawingIntent) -> Result<Vec<Handle>> {
        match intent {
            DrawingIntent::Symbol(op) => self.draw(op),
            other => Err(reject_foreign(self.name(), &other)),
        }
    }
}

fn check_height(height: f64) -> Result<()> {
    if height > 0.0 {
        Ok(())
    } else {
        Err(DraftError::invalid_parameter(
            "height",
            "must be greater than 0",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{CanvasCall, RecordingCanvas};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn drawer() -> (Rc<RefCell<RecordingCanvas>>, SymbolDrawer) {
        let recorder = Rc::new(RefCell::new(RecordingCanvas::new()));
        let canvas: SharedCanvas = recorder.clone();
        (
            recorder,
            SymbolDrawer::new(canvas, StandardDefinition::gb()),
        )
    }

    #[test]
    fn test_roughness_glyph() {
        let (recorder, mut drawer) = drawer();
        let handles = drawer
            .draw(SymbolOp::Roughness {
                position: Vector2::new(10.0, 20.0),
                value: "3.2".to_string(),
                height: 3.0,
            })
            .unwrap();
        assert_eq!(handles.len(), 4);

        let recorder = recorder.borrow();
        assert_eq!(recorder.count_lines(), 3);
        match &recorder.calls()[1] {
            CanvasCall::Line { start, end, attrs } => {
                assert_eq!(*start, Vector2::new(10.0, 26.0));
                assert_eq!(*end, Vector2::new(14.0, 30.0));
                assert_eq!(attrs.layer, "3文字");
                assert_eq!(attrs.line_weight, Some(0.25));
            }
            other => panic!("expected line, got {other:?}"),
        }
        match &recorder.calls()[3] {
            CanvasCall::Text {
                value,
                position,
                attrs,
            } => {
                assert_eq!(value, "Ra3.2");
                assert_eq!(*position, Vector2::new(25.0, 30.0));
                assert_eq!(attrs.height, 3.0);
                assert!(!attrs.centered);
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_surface_finish_full() {
        let (recorder, mut drawer) = drawer();
        drawer
            .draw(SymbolOp::SurfaceFinish {
                position: Vector2::ZERO,
                ra_value: "1.6".to_string(),
                machining_method: Some("车".to_string()),
                waviness: Some("0.8".to_string()),
                lay: Some("C".to_string()),
                cutoff: Some("0.8".to_string()),
                height: 2.5,
            })
            .unwrap();

        let recorder = recorder.borrow();
        assert_eq!(recorder.count_lines(), 4);
        assert_eq!(
            recorder.text_contents(),
            ["车", "Ra1.6", "W0.8, Lay C, λc 0.8"]
        );
        match recorder.calls().last().unwrap() {
            CanvasCall::Text { attrs, .. } => assert_eq!(attrs.height, 2.0),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_surface_finish_minimal() {
        let (recorder, mut drawer) = drawer();
        drawer
            .draw(SymbolOp::SurfaceFinish {
                position: Vector2::ZERO,
                ra_value: "6.3".to_string(),
                machining_method: None,
                waviness: None,
                lay: None,
                cutoff: None,
                height: 2.5,
            })
            .unwrap();

        let recorder = recorder.borrow();
        assert_eq!(recorder.count_lines(), 3);
        assert_eq!(recorder.text_contents(), ["Ra6.3"]);
    }

    #[test]
    fn test_tolerance_frame_with_datum() {
        let (recorder, mut drawer) = drawer();
        drawer
            .draw(SymbolOp::GeomTolerance {
                position: Vector2::new(5.0, 5.0),
                symbol: "⌖".to_string(),
                tolerance: "0.05".to_string(),
                datum: Some("A".to_string()),
                height: 2.5,
            })
            .unwrap();

        let recorder = recorder.borrow();
        assert_eq!(recorder.count_polylines(), 2);
        assert_eq!(recorder.text_contents(), ["A", "⌖", "0.05"]);
        match &recorder.calls()[0] {
            CanvasCall::Polyline { points, closed, .. } => {
                assert!(*closed);
                assert_eq!(points[2], Vector2::new(19.0, 12.0));
            }
            other => panic!("expected polyline, got {other:?}"),
        }
        // The datum cell reuses the frame edge, so it stays open
        match &recorder.calls()[1] {
            CanvasCall::Polyline { points, closed, .. } => {
                assert!(!*closed);
                assert_eq!(points[0], Vector2::new(19.0, 5.0));
                assert_eq!(points[1], Vector2::new(26.0, 5.0));
            }
            other => panic!("expected polyline, got {other:?}"),
        }
    }

    #[test]
    fn test_welding_symbol_field_weld() {
        let (recorder, mut drawer) = drawer();
        drawer
            .draw(SymbolOp::WeldingSymbol {
                position: Vector2::ZERO,
                weld_type: "△".to_string(),
                size: Some("5".to_string()),
                length: Some("50".to_string()),
                process: Some("111".to_string()),
                finish: None,
                field_weld: true,
                height: 2.5,
            })
            .unwrap();

        let recorder = recorder.borrow();
        assert_eq!(recorder.count_lines(), 4);
        assert_eq!(recorder.count_circles(), 1);
        assert_eq!(recorder.text_contents(), ["△", "5-50", "111"]);
        match &recorder.calls()[1] {
            CanvasCall::Line { start, end, .. } => {
                assert_eq!(*start, Vector2::ZERO);
                assert_eq!(*end, Vector2::new(3.0, 3.0));
            }
            other => panic!("expected line, got {other:?}"),
        }
        match &recorder.calls()[4] {
            CanvasCall::Circle { center, radius, .. } => {
                assert_eq!(*center, Vector2::new(24.0, 6.0));
                assert_eq!(*radius, 1.0);
            }
            other => panic!("expected circle, got {other:?}"),
        }
    }

    #[test]
    fn test_height_validated() {
        let (_, mut drawer) = drawer();
        let err = drawer
            .draw(SymbolOp::Roughness {
                position: Vector2::ZERO,
                value: "3.2".to_string(),
                height: 0.0,
            })
            .unwrap_err();
        match err {
            DraftError::InvalidParameter { parameter, .. } => assert_eq!(parameter, "height"),
            other => panic!("expected invalid parameter, got {other:?}"),
        }
    }

    #[test]
    fn test_foreign_intent_rejected() {
        let (_, mut drawer) = drawer();
        let err = drawer
            .dispatch(DrawingIntent::Dimension(
                crate::strategy::DimensionOp::ResetBaseline,
            ))
            .unwrap_err();
        assert!(matches!(err, DraftError::InvalidParameter { .. }));
    }
}
