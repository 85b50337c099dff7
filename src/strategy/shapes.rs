//! Basic shape strategy
//!
//! Every operation maps to exactly one canvas primitive; rectangles,
//! ellipses and splines are emitted as single polylines so topology and
//! layer stay consistent. Curve flattening happens here because the port
//! capability is fixed at five primitives.

use std::f64::consts::TAU;
use std::sync::Arc;

use super::{reject_foreign, DrawingIntent, DrawingStrategy};
use crate::canvas::{EntityAttrs, SharedCanvas};
use crate::error::{DraftError, Result};
use crate::standard::{LayerRole, LineWeightTier, StandardDefinition};
use crate::types::{Handle, Vector2};

/// Segments per full turn when flattening an ellipse
const ELLIPSE_SEGMENTS_PER_TURN: usize = 64;

/// Subdivisions per control segment when flattening a spline
const SPLINE_SUBDIVISIONS: usize = 8;

/// Role a line plays in the drawing
///
/// The role selects the layer, the line type and the weight tier in one
/// step; shapes never pick presentation attributes directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineRole {
    #[default]
    Visible,
    Hidden,
    Center,
    Phantom,
    Border,
}

impl LineRole {
    fn layer_role(&self) -> LayerRole {
        match self {
            LineRole::Visible => LayerRole::Visible,
            LineRole::Hidden => LayerRole::Hidden,
            LineRole::Center => LayerRole::Centerline,
            LineRole::Phantom => LayerRole::Phantom,
            LineRole::Border => LayerRole::Border,
        }
    }

    fn line_type(&self) -> Option<&'static str> {
        match self {
            LineRole::Visible => None,
            LineRole::Hidden => Some("HIDDEN"),
            LineRole::Center => Some("CENTER"),
            LineRole::Phantom => Some("PHANTOM"),
            LineRole::Border => Some("BORDER"),
        }
    }

    fn weight_tier(&self) -> LineWeightTier {
        match self {
            LineRole::Visible => LineWeightTier::Thick,
            _ => LineWeightTier::Thin,
        }
    }
}

/// Basic shape operations
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeOp {
    Circle {
        center: Vector2,
        radius: f64,
        role: LineRole,
    },
    Rectangle {
        lower_left: Vector2,
        width: f64,
        height: f64,
        role: LineRole,
    },
    Line {
        start: Vector2,
        end: Vector2,
        role: LineRole,
    },
    Polyline {
        points: Vec<Vector2>,
        closed: bool,
        role: LineRole,
    },
    Arc {
        center: Vector2,
        radius: f64,
        /// Degrees, counter-clockwise
        start_angle: f64,
        end_angle: f64,
        role: LineRole,
    },
    Ellipse {
        center: Vector2,
        /// Vector from center to the major axis endpoint
        major_axis: Vector2,
        /// Minor/major ratio, in (0, 1]
        ratio: f64,
        /// Parameter range in radians, full turn by default
        start_param: f64,
        end_param: f64,
        role: LineRole,
    },
    Spline {
        /// Control points the curve interpolates through
        points: Vec<Vector2>,
        role: LineRole,
    },
}

/// Strategy for circles, rectangles, lines, polylines, arcs and curves
pub struct ShapeDrawer {
    canvas: SharedCanvas,
    standard: Arc<StandardDefinition>,
}

impl ShapeDrawer {
    pub fn new(canvas: SharedCanvas, standard: Arc<StandardDefinition>) -> Self {
        ShapeDrawer { canvas, standard }
    }

    fn attrs(&self, role: LineRole) -> Result<EntityAttrs> {
        let layer = self.standard.layer(role.layer_role())?;
        let weight = self.standard.line_weight(role.weight_tier())?;
        let mut attrs = EntityAttrs::on_layer(layer).with_line_weight(weight);
        if let Some(line_type) = role.line_type() {
            attrs = attrs.with_line_type(line_type);
        }
        Ok(attrs)
    }

    /// Execute one shape operation
    pub fn draw(&mut self, op: ShapeOp) -> Result<Vec<Handle>> {
        match op {
            ShapeOp::Circle {
                center,
                radius,
                role,
            } => {
                if radius <= 0.0 {
                    return Err(DraftError::invalid_parameter(
                        "radius",
                        "must be greater than 0",
                    ));
                }
                let attrs = self.attrs(role)?;
                let handle = self.canvas.borrow_mut().add_circle(center, radius, &attrs)?;
                Ok(vec![handle])
            }
            ShapeOp::Rectangle {
                lower_left,
                width,
                height,
                role,
            } => {
                if width <= 0.0 {
                    return Err(DraftError::invalid_parameter(
                        "width",
                        "must be greater than 0",
                    ));
                }
                if height <= 0.0 {
                    return Err(DraftError::invalid_parameter(
                        "height",
                        "must be greater than 0",
                    ));
                }
                let attrs = self.attrs(role)?;
                let corners = [
                    lower_left,
                    lower_left + Vector2::new(width, 0.0),
                    lower_left + Vector2::new(width, height),
                    lower_left + Vector2::new(0.0, height),
                ];
                let handle = self.canvas.borrow_mut().add_polyline(&corners, true, &attrs)?;
                Ok(vec![handle])
            }
            ShapeOp::Line { start, end, role } => {
                let attrs = self.attrs(role)?;
                let handle = self.canvas.borrow_mut().add_line(start, end, &attrs)?;
                Ok(vec![handle])
            }
            ShapeOp::Polyline {
                points,
                closed,
                role,
            } => {
                if points.len() < 2 {
                    return Err(DraftError::invalid_parameter(
                        "points",
                        "at least 2 points required",
                    ));
                }
                let attrs = self.attrs(role)?;
                let handle = self
                    .canvas
                    .borrow_mut()
                    .add_polyline(&points, closed, &attrs)?;
                Ok(vec![handle])
            }
            ShapeOp::Arc {
                center,
                radius,
                start_angle,
                end_angle,
                role,
            } => {
                if radius <= 0.0 {
                    return Err(DraftError::invalid_parameter(
                        "radius",
                        "must be greater than 0",
                    ));
                }
                if !start_angle.is_finite() || !end_angle.is_finite() {
                    return Err(DraftError::invalid_parameter(
                        "start_angle",
                        "angles must be finite",
                    ));
                }
                let attrs = self.attrs(role)?;
                let handle = self
                    .canvas
                    .borrow_mut()
                    .add_arc(center, radius, start_angle, end_angle, &attrs)?;
                Ok(vec![handle])
            }
            ShapeOp::Ellipse {
                center,
                major_axis,
                ratio,
                start_param,
                end_param,
                role,
            } => {
                if major_axis.length_squared() == 0.0 {
                    return Err(DraftError::invalid_parameter(
                        "major_axis",
                        "must be a non-zero vector",
                    ));
                }
                if !(ratio > 0.0 && ratio <= 1.0) {
                    return Err(DraftError::invalid_parameter(
                        "ratio",
                        "must be within (0, 1]",
                    ));
                }
                let sweep = end_param - start_param;
                if !sweep.is_finite() || sweep == 0.0 {
                    return Err(DraftError::invalid_parameter(
                        "end_param",
                        "must differ from start_param",
                    ));
                }
                let closed = (sweep.abs() - TAU).abs() < 1e-9;
                let points = sample_ellipse(center, major_axis, ratio, start_param, sweep, closed);
                let attrs = self.attrs(role)?;
                let handle = self
                    .canvas
                    .borrow_mut()
                    .add_polyline(&points, closed, &attrs)?;
                Ok(vec![handle])
            }
            ShapeOp::Spline { points, role } => {
                if points.len() < 2 {
                    return Err(DraftError::invalid_parameter(
                        "points",
                        "at least 2 control points required",
                    ));
                }
                let flattened = catmull_rom(&points, SPLINE_SUBDIVISIONS);
                let attrs = self.attrs(role)?;
                let handle = self
                    .canvas
                    .borrow_mut()
                    .add_polyline(&flattened, false, &attrs)?;
                Ok(vec![handle])
            }
        }
    }
}

impl DrawingStrategy for ShapeDrawer {
    fn name(&self) -> &'static str {
        "basic_shapes"
    }

    fn dispatch(&mut self, intent: DrawingIntent) -> Result<Vec<Handle>> {
        match intent {
            DrawingIntent::Shape(op) => self.draw(op),
            other => Err(reject_foreign(self.name(), &other)),
        }
    }
}

/// Sample an ellipse parametrically into polyline points
fn sample_ellipse(
    center: Vector2,
    major: Vector2,
    ratio: f64,
    start: f64,
    sweep: f64,
    closed: bool,
) -> Vec<Vector2> {
    let segments = ((sweep.abs() / TAU) * ELLIPSE_SEGMENTS_PER_TURN as f64)
        .ceil()
        .max(8.0) as usize;
    let minor = major.perpendicular() * ratio;
    // A closed sweep drops the duplicate end point
    let last = if closed { segments - 1 } else { segments };
    (0..=last)
        .map(|i| {
            let t = start + sweep * (i as f64) / (segments as f64);
            center + major * t.cos() + minor * t.sin()
        })
        .collect()
}

/// Flatten a Catmull-Rom curve through the control points
fn catmull_rom(points: &[Vector2], subdivisions: usize) -> Vec<Vector2> {
    if points.len() == 2 {
        return points.to_vec();
    }
    let last = points.len() - 1;
    let mut result = Vec::with_capacity(last * subdivisions + 1);
    result.push(points[0]);
    for i in 0..last {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(last)];
        for step in 1..=subdivisions {
            let t = step as f64 / subdivisions as f64;
            result.push(catmull_rom_point(p0, p1, p2, p3, t));
        }
    }
    result
}

fn catmull_rom_point(p0: Vector2, p1: Vector2, p2: Vector2, p3: Vector2, t: f64) -> Vector2 {
    let t2 = t * t;
    let t3 = t2 * t;
    (p1 * 2.0
        + (p2 - p0) * t
        + (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * t2
        + (p3 - p0 + (p1 - p2) * 3.0) * t3)
        * 0.5
}
