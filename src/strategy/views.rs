//! View handling strategy
//!
//! Section indication lines, section view labels, detail view marks,
//! leader arrows and free notes. The drawer keeps a ledger of the views
//! it has marked so callers can resolve a label back to its anchor.

use std::sync::Arc;

use indexmap::IndexMap;

use super::{reject_foreign, DrawingIntent, DrawingStrategy};
use crate::canvas::{EntityAttrs, SharedCanvas, TextAttrs};
use crate::error::{DraftError, Result};
use crate::standard::{LayerRole, LineWeightTier, StandardDefinition, TextHeightTier};
use crate::types::{Handle, Vector2};

/// Section arrows sit this far inside the trace endpoints
const SECTION_ARROW_INSET: f64 = 5.0;

/// Section labels sit this far outside the trace endpoints
const SECTION_LABEL_OFFSET: f64 = 8.0;

/// Leaders extend behind their start point by this fraction of their length
const LEADER_BACK_EXTENSION: f64 = 0.2;

/// Elbow segment length for non-horizontal leaders
const LEADER_ELBOW_LENGTH: f64 = 10.0;

/// Gap between the elbow end and the leader text
const LEADER_TEXT_OFFSET: f64 = 5.0;

/// A leader with a unit Y component below this counts as horizontal
const HORIZONTAL_EPS: f64 = 0.05;

/// Estimated glyph width per character, as a fraction of text height
const UNDERLINE_CHAR_WIDTH: f64 = 0.6;

/// Detail labels sit at this multiple of the circle radius
const DETAIL_LABEL_FACTOR: f64 = 1.2;

/// View operations
#[derive(Debug, Clone, PartialEq)]
pub enum ViewOp {
    /// Cutting plane trace with direction arrows and end labels
    SectionLine {
        start: Vector2,
        end: Vector2,
        label: String,
    },
    /// Underlined caption for a section view
    SectionViewLabel {
        position: Vector2,
        label: String,
        height: f64,
    },
    /// Circle marking a detail region, with label and scale
    DetailView {
        center: Vector2,
        radius: f64,
        label: String,
        scale: String,
    },
    /// Leader line with arrowhead, elbow and annotation text
    LeaderArrow {
        start: Vector2,
        end: Vector2,
        text: String,
    },
    /// Free text note on the layer of the given role
    Note {
        text: String,
        position: Vector2,
        height: f64,
        role: LayerRole,
    },
}

/// What kind of derived view a label refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Section,
    Detail,
}

/// Where a labelled view was marked on the drawing
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRecord {
    pub kind: ViewKind,
    pub anchor: Vector2,
    pub scale: Option<String>,
}

/// Strategy for section marks, detail marks, leaders and notes
pub struct ViewDrawer {
    canvas: SharedCanvas,
    standard: Arc<StandardDefinition>,
    views: IndexMap<String, ViewRecord>,
}

impl ViewDrawer {
    pub fn new(canvas: SharedCanvas, standard: Arc<StandardDefinition>) -> Self {
        ViewDrawer {
            canvas,
            standard,
            views: IndexMap::new(),
        }
    }

    /// Look up a previously marked view by its label
    pub fn view_record(&self, label: &str) -> Option<&ViewRecord> {
        self.views.get(label)
    }

    /// All marked views in mark order
    pub fn views(&self) -> impl Iterator<Item = (&str, &ViewRecord)> {
        self.views.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn line_attrs(&self, role: LayerRole) -> Result<EntityAttrs> {
        let layer = self.standard.layer(role)?;
        let weight = self.standard.line_weight(LineWeightTier::Thin)?;
        Ok(EntityAttrs::on_layer(layer).with_line_weight(weight))
    }

    fn text_attrs(&self, role: LayerRole, tier: TextHeightTier) -> Result<TextAttrs> {
        let layer = self.standard.layer(role)?;
        let height = self.standard.text_height(tier)?;
        Ok(TextAttrs::new(layer, height).with_style(self.standard.font_style()))
    }

    /// Execute one view operation
    pub fn draw(&mut self, op: ViewOp) -> Result<Vec<Handle>> {
        match op {
            ViewOp::SectionLine { start, end, label } => {
                let delta = end - start;
                if delta.length_squared() == 0.0 {
                    return Err(DraftError::invalid_parameter(
                        "end",
                        "must differ from start",
                    ));
                }
                let attrs = self.line_attrs(LayerRole::CuttingPlane)?;
                let trace_attrs = attrs.clone().with_line_type("CENTER");
                let text_attrs =
                    self.text_attrs(LayerRole::CuttingPlane, TextHeightTier::Title)?;
                let size = self.standard.arrow_size();
                let u = delta.normalize();
                let n = u.perpendicular();
                let arrow1 = start + u * SECTION_ARROW_INSET;
                let arrow2 = end - u * SECTION_ARROW_INSET;
                let caption = format!("{label}-{label}");

                let mut canvas = self.canvas.borrow_mut();
                let mut handles = Vec::with_capacity(7);
                handles.push(canvas.add_line(start, end, &trace_attrs)?);
                // Viewing direction arrows, open vees pointing along the trace
                handles.push(canvas.add_line(arrow1 - u * size + n * size, arrow1, &attrs)?);
                handles.push(canvas.add_line(arrow1 - u * size - n * size, arrow1, &attrs)?);
                handles.push(canvas.add_line(arrow2 + u * size + n * size, arrow2, &attrs)?);
                handles.push(canvas.add_line(arrow2 + u * size - n * size, arrow2, &attrs)?);
                handles.push(canvas.add_text(
                    &caption,
                    start - u * SECTION_LABEL_OFFSET,
                    &text_attrs,
                )?);
                handles.push(canvas.add_text(
                    &caption,
                    end + u * SECTION_LABEL_OFFSET,
                    &text_attrs,
                )?);
                drop(canvas);

                self.views.insert(
                    label,
                    ViewRecord {
                        kind: ViewKind::Section,
                        anchor: start,
                        scale: None,
                    },
                );
                Ok(handles)
            }
            ViewOp::SectionViewLabel {
                position,
                label,
                height,
            } => {
                if !(height > 0.0) {
                    return Err(DraftError::invalid_parameter(
                        "height",
                        "must be greater than 0",
                    ));
                }
                let layer = self.standard.layer(LayerRole::Text)?.to_string();
                let text_attrs = TextAttrs::new(&layer, height)
                    .with_style(self.standard.font_style())
                    .centered();
                let attrs = EntityAttrs::on_layer(&layer)
                    .with_line_weight(self.standard.line_weight(LineWeightTier::Thin)?);
                let caption = format!("剖视图 {label}");
                let half = caption.chars().count() as f64 * height * UNDERLINE_CHAR_WIDTH / 2.0;
                let underline_y = position.y - height * 0.8;

                let mut canvas = self.canvas.borrow_mut();
                let mut handles = Vec::with_capacity(2);
                handles.push(canvas.add_text(&caption, position, &text_attrs)?);
                handles.push(canvas.add_line(
                    Vector2::new(position.x - half, underline_y),
                    Vector2::new(position.x + half, underline_y),
                    &attrs,
                )?);
                Ok(handles)
            }
            ViewOp::DetailView {
                center,
                radius,
                label,
                scale,
            } => {
                if !(radius > 0.0) {
                    return Err(DraftError::invalid_parameter(
                        "radius",
                        "must be greater than 0",
                    ));
                }
                let attrs = self.line_attrs(LayerRole::Detail)?;
                let label_attrs = self.text_attrs(LayerRole::Detail, TextHeightTier::Title)?;
                let scale_attrs =
                    self.text_attrs(LayerRole::Detail, TextHeightTier::Subtitle)?;
                let label_pos = center + Vector2::new(0.0, radius * DETAIL_LABEL_FACTOR);
                let scale_pos = center - Vector2::new(0.0, radius * DETAIL_LABEL_FACTOR);

                let mut canvas = self.canvas.borrow_mut();
                let mut handles = Vec::with_capacity(3);
                handles.push(canvas.add_circle(center, radius, &attrs)?);
                handles.push(canvas.add_text(&label, label_pos, &label_attrs)?);
                handles.push(canvas.add_text(&scale, scale_pos, &scale_attrs)?);
                drop(canvas);

                self.views.insert(
                    label,
                    ViewRecord {
                        kind: ViewKind::Detail,
                        anchor: center,
                        scale: Some(scale),
                    },
                );
                Ok(handles)
            }
            ViewOp::LeaderArrow { start, end, text } => {
                let delta = end - start;
                if delta.length_squared() == 0.0 {
                    return Err(DraftError::invalid_parameter(
                        "end",
                        "must differ from start",
                    ));
                }
                let attrs = self.line_attrs(LayerRole::Dimensions)?;
                let text_attrs = self
                    .text_attrs(LayerRole::Text, TextHeightTier::Subtitle)?
                    .centered();
                let size = self.standard.arrow_size();
                let u = delta.normalize();
                let perp = u.perpendicular();
                let extended_start = start - delta * LEADER_BACK_EXTENSION;

                // Elbow runs horizontally toward free paper
                let (elbow_end, dir) = if u.y.abs() < HORIZONTAL_EPS {
                    let dir = if start.x < end.x { 1.0 } else { -1.0 };
                    (extended_start + Vector2::new(dir, 0.0), dir)
                } else {
                    let view_dx = start.x - end.x;
                    let dir = if view_dx.abs() > LEADER_ELBOW_LENGTH {
                        view_dx.signum()
                    } else if u.x > 0.0 {
                        -1.0
                    } else {
                        1.0
                    };
                    (
                        extended_start + Vector2::new(LEADER_ELBOW_LENGTH * dir, 0.0),
                        dir,
                    )
                };
                let text_pos = elbow_end + Vector2::new(LEADER_TEXT_OFFSET * dir, 0.0);

                let mut canvas = self.canvas.borrow_mut();
                let mut handles = Vec::with_capacity(5);
                handles.push(canvas.add_line(end, extended_start, &attrs)?);
                handles.push(canvas.add_line(extended_start, elbow_end, &attrs)?);
                handles.push(canvas.add_line(end, end - u * size + perp * size, &attrs)?);
                handles.push(canvas.add_line(end, end - u * size - perp * size, &attrs)?);
                handles.push(canvas.add_text(&text, text_pos, &text_attrs)?);
                Ok(handles)
            }
            ViewOp::Note {
                text,
                position,
                height,
                role,
            } => {
                if !(height > 0.0) {
                    return Err(DraftError::invalid_parameter(
                        "height",
                        "must be greater than 0",
                    ));
                }
                let layer = self.standard.layer(role)?;
                let text_attrs = TextAttrs::new(layer, height)
                    .with_style(self.standard.font_style())
                    .centered();
                let handle = self.canvas.borrow_mut().add_text(&text, position, &text_attrs)?;
                Ok(vec![handle])
            }
        }
    }
}

impl DrawingStrategy for ViewDrawer {
    fn name(&self) -> &'static str {
        "views"
    }

    fn dispatch(&mut self, intent: DrawingIntent) -> Result<Vec<Handle>> {
        match intent {
            DrawingIntent::View(op) => self.draw(op),
            other => Err(reject_foreign(self.name(), &other)),
        }
    }
}
