//! Dimension strategy
//!
//! Dimensions are composed from port primitives: extension lines, a
//! dimension line with triangular arrowheads, and a centered value text.
//! All parts land on the DIMENSIONS layer with thin weight; values are
//! formatted without trailing zeros.
//!
//! Baseline chains are explicit state: an operation with an origin starts
//! a chain, later operations without one stack below it, and
//! [`DimensionOp::ResetBaseline`] drops the chain.

use std::sync::Arc;

use super::{reject_foreign, DrawingIntent, DrawingStrategy};
use crate::canvas::{EntityAttrs, SharedCanvas, TextAttrs};
use crate::error::{DraftError, Result};
use crate::standard::{LayerRole, LineWeightTier, StandardDefinition, TextHeightTier};
use crate::types::{Handle, Vector2};

/// Extension lines run this far past the dimension line
const EXTENSION_OVERSHOOT: f64 = 0.5;

/// Dimension lines run this far past the extension lines
const DIM_LINE_OVERRUN: f64 = 0.5;

/// Clearance between the dimension line and the value text box
const TEXT_GAP: f64 = 1.0;

/// Dimension operations
#[derive(Debug, Clone, PartialEq)]
pub enum DimensionOp {
    /// Horizontal measurement between two points
    Linear {
        p1: Vector2,
        p2: Vector2,
        /// How far below the lower point the dimension line sits
        distance: f64,
        /// Replacement label, measured value when `None`
        text: Option<String>,
    },
    /// Measurement along the direction of the two points
    Aligned {
        p1: Vector2,
        p2: Vector2,
        distance: f64,
        text: Option<String>,
    },
    /// Radius leader from center to rim, label prefixed `R`
    Radius {
        center: Vector2,
        radius: f64,
        /// Leader direction in degrees
        angle: f64,
        text: Option<String>,
    },
    /// Full chord through the center, label prefixed `%%c`
    Diameter {
        center: Vector2,
        radius: f64,
        angle: f64,
        text: Option<String>,
    },
    /// Angle between the rays vertex->p1 and vertex->p2, label suffixed `%%d`
    Angular {
        vertex: Vector2,
        p1: Vector2,
        p2: Vector2,
        text: Option<String>,
    },
    /// Stacked measurements from a common origin
    ///
    /// `origin: Some` starts a new chain with the given `spacing` and
    /// `direction`; `origin: None` continues the active chain and ignores
    /// both fields.
    Baseline {
        origin: Option<Vector2>,
        targets: Vec<Vector2>,
        spacing: f64,
        direction: Vector2,
    },
    /// Horizontal measurement labelled `nominal+upper/lower`
    Tolerance {
        p1: Vector2,
        p2: Vector2,
        distance: f64,
        nominal: f64,
        upper: f64,
        lower: f64,
    },
    /// Drop the active baseline chain without drawing
    ResetBaseline,
}

#[derive(Debug, Clone, Copy)]
struct BaselineChain {
    origin: Vector2,
    /// Unit measurement direction
    direction: Vector2,
    spacing: f64,
    emitted: usize,
}

/// Strategy for linear, radial, angular, baseline and tolerance dimensions
pub struct DimensionDrawer {
    canvas: SharedCanvas,
    standard: Arc<StandardDefinition>,
    baseline: Option<BaselineChain>,
}

impl DimensionDrawer {
    pub fn new(canvas: SharedCanvas, standard: Arc<StandardDefinition>) -> Self {
        DimensionDrawer {
            canvas,
            standard,
            baseline: None,
        }
    }

    fn line_attrs(&self) -> Result<EntityAttrs> {
        let layer = self.standard.layer(LayerRole::Dimensions)?;
        let weight = self.standard.line_weight(LineWeightTier::Thin)?;
        Ok(EntityAttrs::on_layer(layer).with_line_weight(weight))
    }

    fn text_attrs(&self) -> Result<TextAttrs> {
        let layer = self.standard.layer(LayerRole::Dimensions)?;
        let height = self.standard.text_height(TextHeightTier::Normal)?;
        Ok(TextAttrs::new(layer, height)
            .with_style(self.standard.font_style())
            .centered())
    }

    /// Extension lines, dimension line, two arrowheads and the value text
    ///
    /// `foot1`/`foot2` are the dimension line endpoints; the text sits on
    /// the side of the measured points.
    fn draw_span(
        &mut self,
        p1: Vector2,
        p2: Vector2,
        foot1: Vector2,
        foot2: Vector2,
        label: String,
    ) -> Result<Vec<Handle>> {
        let attrs = self.line_attrs()?;
        let text_attrs = self.text_attrs()?;
        let size = self.standard.arrow_size();
        let u = (foot2 - foot1).normalize();
        let out = (foot1 - p1).normalize();

        let mut canvas = self.canvas.borrow_mut();
        let mut handles = Vec::with_capacity(6);
        handles.push(canvas.add_line(p1, foot1 + out * EXTENSION_OVERSHOOT, &attrs)?);
        handles.push(canvas.add_line(p2, foot2 + out * EXTENSION_OVERSHOOT, &attrs)?);
        handles.push(canvas.add_line(
            foot1 - u * DIM_LINE_OVERRUN,
            foot2 + u * DIM_LINE_OVERRUN,
            &attrs,
        )?);
        handles.push(canvas.add_polyline(&arrowhead_points(foot1, u, size), true, &attrs)?);
        handles.push(canvas.add_polyline(&arrowhead_points(foot2, -u, size), true, &attrs)?);
        let text_pos =
            foot1.midpoint(&foot2) - out * (text_attrs.height / 2.0 + TEXT_GAP);
        handles.push(canvas.add_text(&label, text_pos, &text_attrs)?);
        Ok(handles)
    }

    fn draw_linear(
        &mut self,
        p1: Vector2,
        p2: Vector2,
        distance: f64,
        label: String,
    ) -> Result<Vec<Handle>> {
        if p1.x == p2.x {
            return Err(DraftError::invalid_parameter(
                "p2",
                "must differ from p1 along X",
            ));
        }
        if !(distance > 0.0) {
            return Err(DraftError::invalid_parameter(
                "distance",
                "must be greater than 0",
            ));
        }
        let dim_y = p1.y.min(p2.y) - distance;
        let foot1 = Vector2::new(p1.x, dim_y);
        let foot2 = Vector2::new(p2.x, dim_y);
        self.draw_span(p1, p2, foot1, foot2, label)
    }

    /// Execute one dimension operation
    pub fn draw(&mut self, op: DimensionOp) -> Result<Vec<Handle>> {
        match op {
            DimensionOp::Linear {
                p1,
                p2,
                distance,
                text,
            } => {
                let label = text.unwrap_or_else(|| fmt_value((p2.x - p1.x).abs()));
                self.draw_linear(p1, p2, distance, label)
            }
            DimensionOp::Aligned {
                p1,
                p2,
                distance,
                text,
            } => {
                if p1 == p2 {
                    return Err(DraftError::invalid_parameter("p2", "must differ from p1"));
                }
                if !(distance > 0.0) {
                    return Err(DraftError::invalid_parameter(
                        "distance",
                        "must be greater than 0",
                    ));
                }
                let u = (p2 - p1).normalize();
                let n = -u.perpendicular();
                let label = text.unwrap_or_else(|| fmt_value((p2 - p1).length()));
                self.draw_span(p1, p2, p1 + n * distance, p2 + n * distance, label)
            }
            DimensionOp::Radius {
                center,
                radius,
                angle,
                text,
            } => {
                if !(radius > 0.0) {
                    return Err(DraftError::invalid_parameter(
                        "radius",
                        "must be greater than 0",
                    ));
                }
                let attrs = self.line_attrs()?;
                let text_attrs = self.text_attrs()?;
                let size = self.standard.arrow_size();
                let radial = Vector2::from_angle(angle.to_radians());
                let rim = center + radial * radius;
                let label = text.unwrap_or_else(|| format!("R{}", fmt_value(radius)));
                let text_pos = center.midpoint(&rim)
                    + radial.perpendicular() * (text_attrs.height / 2.0 + TEXT_GAP);

                let mut canvas = self.canvas.borrow_mut();
                let mut handles = Vec::with_capacity(3);
                handles.push(canvas.add_line(center, rim, &attrs)?);
                handles.push(canvas.add_polyline(
                    &arrowhead_points(rim, -radial, size),
                    true,
                    &attrs,
                )?);
                handles.push(canvas.add_text(&label, text_pos, &text_attrs)?);
                Ok(handles)
            }
            DimensionOp::Diameter {
                center,
                radius,
                angle,
                text,
            } => {
                if !(radius > 0.0) {
                    return Err(DraftError::invalid_parameter(
                        "radius",
                        "must be greater than 0",
                    ));
                }
                let attrs = self.line_attrs()?;
                let text_attrs = self.text_attrs()?;
                let size = self.standard.arrow_size();
                let radial = Vector2::from_angle(angle.to_radians());
                let rim1 = center + radial * radius;
                let rim2 = center - radial * radius;
                let label =
                    text.unwrap_or_else(|| format!("%%c{}", fmt_value(radius * 2.0)));
                let text_pos =
                    center + radial.perpendicular() * (text_attrs.height / 2.0 + TEXT_GAP);

                let mut canvas = self.canvas.borrow_mut();
                let mut handles = Vec::with_capacity(4);
                handles.push(canvas.add_line(rim1, rim2, &attrs)?);
                handles.push(canvas.add_polyline(
                    &arrowhead_points(rim1, -radial, size),
                    true,
                    &attrs,
                )?);
                handles.push(canvas.add_polyline(
                    &arrowhead_points(rim2, radial, size),
                    true,
                    &attrs,
                )?);
                handles.push(canvas.add_text(&label, text_pos, &text_attrs)?);
                Ok(handles)
            }
            DimensionOp::Angular {
                vertex,
                p1,
                p2,
                text,
            } => {
                let v1 = p1 - vertex;
                let v2 = p2 - vertex;
                if v1.length_squared() == 0.0 {
                    return Err(DraftError::invalid_parameter(
                        "p1",
                        "must not coincide with vertex",
                    ));
                }
                if v2.length_squared() == 0.0 {
                    return Err(DraftError::invalid_parameter(
                        "p2",
                        "must not coincide with vertex",
                    ));
                }
                let start_angle = v1.angle().to_degrees();
                let sweep = (v2.angle().to_degrees() - start_angle).rem_euclid(360.0);
                if sweep == 0.0 {
                    return Err(DraftError::invalid_parameter(
                        "p2",
                        "rays must span a non-zero angle",
                    ));
                }
                let radius = v1.length().min(v2.length());
                let end_angle = start_angle + sweep;
                let attrs = self.line_attrs()?;
                let text_attrs = self.text_attrs()?;
                let size = self.standard.arrow_size();
                let start_radial = Vector2::from_angle(start_angle.to_radians());
                let end_radial = Vector2::from_angle(end_angle.to_radians());
                let arc_start = vertex + start_radial * radius;
                let arc_end = vertex + end_radial * radius;
                let bisector = Vector2::from_angle((start_angle + sweep / 2.0).to_radians());
                let text_pos = vertex + bisector * (radius + text_attrs.height);
                let label = text.unwrap_or_else(|| format!("{}%%d", fmt_value(sweep)));

                let mut canvas = self.canvas.borrow_mut();
                let mut handles = Vec::with_capacity(4);
                handles.push(canvas.add_arc(vertex, radius, start_angle, end_angle, &attrs)?);
                // Arrowheads run along the arc tangents
                handles.push(canvas.add_polyline(
                    &arrowhead_points(arc_start, start_radial.perpendicular(), size),
                    true,
                    &attrs,
                )?);
                handles.push(canvas.add_polyline(
                    &arrowhead_points(arc_end, -end_radial.perpendicular(), size),
                    true,
                    &attrs,
                )?);
                handles.push(canvas.add_text(&label, text_pos, &text_attrs)?);
                Ok(handles)
            }
            DimensionOp::Baseline {
                origin,
                targets,
                spacing,
                direction,
            } => {
                let mut chain = match (origin, self.baseline) {
                    (Some(base), _) => {
                        if !(spacing > 0.0) {
                            return Err(DraftError::invalid_parameter(
                                "spacing",
                                "must be greater than 0",
                            ));
                        }
                        if direction.length_squared() == 0.0 {
                            return Err(DraftError::invalid_parameter(
                                "direction",
                                "must be a non-zero vector",
                            ));
                        }
                        BaselineChain {
                            origin: base,
                            direction: direction.normalize(),
                            spacing,
                            emitted: 0,
                        }
                    }
                    (None, Some(existing)) => existing,
                    (None, None) => {
                        return Err(DraftError::invalid_parameter(
                            "origin",
                            "no active baseline chain to continue",
                        ));
                    }
                };
                for target in &targets {
                    if (*target - chain.origin).dot(&chain.direction) == 0.0 {
                        return Err(DraftError::invalid_parameter(
                            "targets",
                            "target projects onto the chain origin",
                        ));
                    }
                }
                let below = -chain.direction.perpendicular();
                let mut handles = Vec::new();
                for target in targets {
                    let along = (target - chain.origin).dot(&chain.direction);
                    let offset = below * (chain.spacing * (chain.emitted as f64 + 1.0));
                    let foot_origin = chain.origin + offset;
                    let foot_target = chain.origin + chain.direction * along + offset;
                    handles.extend(self.draw_span(
                        chain.origin,
                        target,
                        foot_origin,
                        foot_target,
                        fmt_value(along.abs()),
                    )?);
                    chain.emitted += 1;
                }
                self.baseline = Some(chain);
                Ok(handles)
            }
            DimensionOp::Tolerance {
                p1,
                p2,
                distance,
                nominal,
                upper,
                lower,
            } => {
                let label = format!(
                    "{}{}/{}",
                    fmt_value(nominal),
                    fmt_signed(upper),
                    fmt_signed(lower)
                );
                self.draw_linear(p1, p2, distance, label)
            }
            DimensionOp::ResetBaseline => {
                self.baseline = None;
                Ok(Vec::new())
            }
        }
    }
}

impl DrawingStrategy for DimensionDrawer {
    fn name(&self) -> &'static str {
        "dimensions"
    }

    fn dispatch(&mut self, intent: DrawingIntent) -> Result<Vec<Handle>> {
        match intent {
            DrawingIntent::Dimension(op) => self.draw(op),
            other => Err(reject_foreign(self.name(), &other)),
        }
    }
}

/// Closed triangle with the tip at `tip`, extending along `direction`
fn arrowhead_points(tip: Vector2, direction: Vector2, size: f64) -> [Vector2; 3] {
    let back = tip + direction * size;
    let half = direction.perpendicular() * (size / 4.0);
    [tip, back + half, back - half]
}

/// Format a measured value: three decimals, trailing zeros dropped
fn fmt_value(value: f64) -> String {
    let mut rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        // Collapse -0.0
        rounded = 0.0;
    }
    rounded.to_string()
}

/// Like [`fmt_value`] with an explicit leading sign
fn fmt_signed(value: f64) -> String {
    let text = fmt_value(value);
    if text.starts_with('-') {
        text
    } else {
        format!("+{text}")
    }
}
