//! Flat drawing facade
//!
//! [`DrawingTools`] keeps the legacy call surface alive: one method per
//! drawing operation, forwarding 1:1 to the strategy dispatch of an owned
//! [`DrawingSession`]. No drawing logic lives here.

use std::sync::Arc;

use crate::canvas::SharedCanvas;
use crate::error::Result;
use crate::session::DrawingSession;
use crate::standard::{LayerRole, StandardDefinition};
use crate::strategy::{DimensionOp, LineRole, ShapeOp, SymbolOp, ViewOp};
use crate::types::{Handle, Vector2};

/// Legacy-compatible drawing surface over one session
///
/// ```
/// use mechdraw::canvas::{share, RecordingCanvas};
/// use mechdraw::facade::DrawingTools;
/// use mechdraw::standard::StandardDefinition;
/// use mechdraw::types::Vector2;
///
/// let mut tools = DrawingTools::new(
///     share(RecordingCanvas::new()),
///     StandardDefinition::gb(),
/// )?;
/// tools.draw_centerline(Vector2::new(0.0, 50.0), Vector2::new(120.0, 50.0))?;
/// tools.add_dimension(Vector2::new(10.0, 40.0), Vector2::new(110.0, 40.0), 12.0, None)?;
/// # Ok::<(), mechdraw::DraftError>(())
/// ```
#[derive(Debug)]
pub struct DrawingTools {
    session: DrawingSession,
}

impl DrawingTools {
    /// Build the session graph and bootstrap the canvas for the standard
    pub fn new(canvas: SharedCanvas, standard: Arc<StandardDefinition>) -> Result<DrawingTools> {
        let mut session = DrawingSession::new(canvas, standard);
        session.bootstrap()?;
        Ok(DrawingTools { session })
    }

    /// Wrap an already prepared session without bootstrapping again
    pub fn from_session(session: DrawingSession) -> DrawingTools {
        DrawingTools { session }
    }

    /// The underlying session
    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    /// Mutable access to the session, e.g. for template generation
    pub fn session_mut(&mut self) -> &mut DrawingSession {
        &mut self.session
    }

    /// Give up the facade and keep the session
    pub fn into_session(self) -> DrawingSession {
        self.session
    }

    // Basic shapes

    /// Draw a center line
    pub fn draw_centerline(&mut self, start: Vector2, end: Vector2) -> Result<Vec<Handle>> {
        self.session.dispatch(ShapeOp::Line {
            start,
            end,
            role: LineRole::Center,
        })
    }

    /// Draw a hidden contour line
    pub fn draw_hiddenline(&mut self, start: Vector2, end: Vector2) -> Result<Vec<Handle>> {
        self.session.dispatch(ShapeOp::Line {
            start,
            end,
            role: LineRole::Hidden,
        })
    }

    /// Draw a visible contour line
    pub fn draw_visibleline(&mut self, start: Vector2, end: Vector2) -> Result<Vec<Handle>> {
        self.session.dispatch(ShapeOp::Line {
            start,
            end,
            role: LineRole::Visible,
        })
    }

    /// Draw a phantom (double-dash) line
    pub fn draw_phantomline(&mut self, start: Vector2, end: Vector2) -> Result<Vec<Handle>> {
        self.session.dispatch(ShapeOp::Line {
            start,
            end,
            role: LineRole::Phantom,
        })
    }

    /// Draw a border line
    pub fn draw_borderline(&mut self, start: Vector2, end: Vector2) -> Result<Vec<Handle>> {
        self.session.dispatch(ShapeOp::Line {
            start,
            end,
            role: LineRole::Border,
        })
    }

    /// Draw a full circle
    pub fn draw_circle(
        &mut self,
        center: Vector2,
        radius: f64,
        role: LineRole,
    ) -> Result<Vec<Handle>> {
        self.session.dispatch(ShapeOp::Circle {
            center,
            radius,
            role,
        })
    }

    /// Draw an axis-aligned rectangle
    pub fn draw_rectangle(
        &mut self,
        lower_left: Vector2,
        width: f64,
        height: f64,
        role: LineRole,
    ) -> Result<Vec<Handle>> {
        self.session.dispatch(ShapeOp::Rectangle {
            lower_left,
            width,
            height,
            role,
        })
    }

    /// Draw a circular arc, angles in degrees counter-clockwise
    pub fn draw_arc(
        &mut self,
        center: Vector2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        role: LineRole,
    ) -> Result<Vec<Handle>> {
        self.session.dispatch(ShapeOp::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            role,
        })
    }

    /// Draw an ellipse segment, parameters in radians
    pub fn draw_ellipse(
        &mut self,
        center: Vector2,
        major_axis: Vector2,
        ratio: f64,
        start_param: f64,
        end_param: f64,
        role: LineRole,
    ) -> Result<Vec<Handle>> {
        self.session.dispatch(ShapeOp::Ellipse {
            center,
            major_axis,
            ratio,
            start_param,
            end_param,
            role,
        })
    }

    /// Draw a polyline through the given points
    pub fn draw_polyline(
        &mut self,
        points: Vec<Vector2>,
        closed: bool,
        role: LineRole,
    ) -> Result<Vec<Handle>> {
        self.session.dispatch(ShapeOp::Polyline {
            points,
            closed,
            role,
        })
    }

    /// Draw a smooth curve through the given control points
    pub fn draw_spline(&mut self, points: Vec<Vector2>, role: LineRole) -> Result<Vec<Handle>> {
        self.session.dispatch(ShapeOp::Spline { points, role })
    }

    /// Add free-standing text
    pub fn add_text(
        &mut self,
        text: impl Into<String>,
        position: Vector2,
        height: f64,
        role: LayerRole,
    ) -> Result<Vec<Handle>> {
        self.session.dispatch(ViewOp::Note {
            text: text.into(),
            position,
            height,
            role,
        })
    }

    // Dimensions

    /// Add a horizontal linear dimension
    pub fn add_dimension(
        &mut self,
        p1: Vector2,
        p2: Vector2,
        distance: f64,
        text: Option<String>,
    ) -> Result<Vec<Handle>> {
        self.session.dispatch(DimensionOp::Linear {
            p1,
            p2,
            distance,
            text,
        })
    }

    /// Add a radius dimension, leader direction in degrees
    pub fn add_radius_dimension(
        &mut self,
        center: Vector2,
        radius: f64,
        angle: f64,
        text: Option<String>,
    ) -> Result<Vec<Handle>> {
        self.session.dispatch(DimensionOp::Radius {
            center,
            radius,
            angle,
            text,
        })
    }

    /// Add a diameter dimension, chord direction in degrees
    pub fn add_diameter_dimension(
        &mut self,
        center: Vector2,
        radius: f64,
        angle: f64,
        text: Option<String>,
    ) -> Result<Vec<Handle>> {
        self.session.dispatch(DimensionOp::Diameter {
            center,
            radius,
            angle,
            text,
        })
    }

    /// Add an angular dimension between the rays vertex->p1 and vertex->p2
    pub fn add_angular_dimension(
        &mut self,
        vertex: Vector2,
        p1: Vector2,
        p2: Vector2,
        text: Option<String>,
    ) -> Result<Vec<Handle>> {
        self.session.dispatch(DimensionOp::Angular {
            vertex,
            p1,
            p2,
            text,
        })
    }

    /// Add a dimension measured along the direction of the two points
    pub fn add_aligned_dimension(
        &mut self,
        p1: Vector2,
        p2: Vector2,
        distance: f64,
        text: Option<String>,
    ) -> Result<Vec<Handle>> {
        self.session.dispatch(DimensionOp::Aligned {
            p1,
            p2,
            distance,
            text,
        })
    }

    /// Add stacked dimensions measured from a common origin
    ///
    /// `origin: Some` starts a new chain, `origin: None` continues the
    /// active one.
    pub fn add_baseline_dimensions(
        &mut self,
        origin: Option<Vector2>,
        targets: Vec<Vector2>,
        spacing: f64,
        direction: Vector2,
    ) -> Result<Vec<Handle>> {
        self.session.dispatch(DimensionOp::Baseline {
            origin,
            targets,
            spacing,
            direction,
        })
    }

    /// Drop the active baseline chain without drawing
    pub fn reset_baseline(&mut self) -> Result<Vec<Handle>> {
        self.session.dispatch(DimensionOp::ResetBaseline)
    }

    /// Add a linear dimension labelled `nominal+upper/lower`
    pub fn add_dimension_with_tolerance(
        &mut self,
        p1: Vector2,
        p2: Vector2,
        distance: f64,
        nominal: f64,
        upper: f64,
        lower: f64,
    ) -> Result<Vec<Handle>> {
        self.session.dispatch(DimensionOp::Tolerance {
            p1,
            p2,
            distance,
            nominal,
            upper,
            lower,
        })
    }

    // Symbols

    /// Add a basic roughness mark with an `Ra` value
    pub fn add_roughness(
        &mut self,
        position: Vector2,
        value: impl Into<String>,
        height: f64,
    ) -> Result<Vec<Handle>> {
        self.session.dispatch(SymbolOp::Roughness {
            position,
            value: value.into(),
            height,
        })
    }

    /// Add a full surface finish symbol with optional process annotations
    #[allow(clippy::too_many_arguments)]
    pub fn add_advanced_surface_finish(
        &mut self,
        position: Vector2,
        ra_value: impl Into<String>,
        machining_method: Option<String>,
        waviness: Option<String>,
        lay: Option<String>,
        cutoff: Option<String>,
        height: f64,
    ) -> Result<Vec<Handle>> {
        self.session.dispatch(SymbolOp::SurfaceFinish {
            position,
            ra_value: ra_value.into(),
            machining_method,
            waviness,
            lay,
            cutoff,
            height,
        })
    }

    /// Add a geometric tolerance frame
    pub fn add_geometric_tolerance(
        &mut self,
        position: Vector2,
        symbol: impl Into<String>,
        tolerance: impl Into<String>,
        datum: Option<String>,
        height: f64,
    ) -> Result<Vec<Handle>> {
        self.session.dispatch(SymbolOp::GeomTolerance {
            position,
            symbol: symbol.into(),
            tolerance: tolerance.into(),
            datum,
            height,
        })
    }

    /// Add a welding symbol on a reference line
    #[allow(clippy::too_many_arguments)]
    pub fn add_welding_symbol(
        &mut self,
        position: Vector2,
        weld_type: impl Into<String>,
        size: Option<String>,
        length: Option<String>,
        process: Option<String>,
        finish: Option<String>,
        field_weld: bool,
        height: f64,
    ) -> Result<Vec<Handle>> {
        self.session.dispatch(SymbolOp::WeldingSymbol {
            position,
            weld_type: weld_type.into(),
            size,
            length,
            process,
            finish,
            field_weld,
            height,
        })
    }

    // Views

    /// Add a cutting-plane line with direction arrows and end labels
    pub fn add_section_line(
        &mut self,
        start: Vector2,
        end: Vector2,
        label: impl Into<String>,
    ) -> Result<Vec<Handle>> {
        self.session.dispatch(ViewOp::SectionLine {
            start,
            end,
            label: label.into(),
        })
    }

    /// Add a section view caption such as `A-A`
    pub fn add_section_view_label(
        &mut self,
        position: Vector2,
        label: impl Into<String>,
        height: f64,
    ) -> Result<Vec<Handle>> {
        self.session.dispatch(ViewOp::SectionViewLabel {
            position,
            label: label.into(),
            height,
        })
    }

    /// Add a detail view circle with label and scale note
    pub fn add_detail_view(
        &mut self,
        center: Vector2,
        radius: f64,
        label: impl Into<String>,
        scale: impl Into<String>,
    ) -> Result<Vec<Handle>> {
        self.session.dispatch(ViewOp::DetailView {
            center,
            radius,
            label: label.into(),
            scale: scale.into(),
        })
    }

    /// Add a leader with arrowhead, elbow and note text
    pub fn add_leader_arrow(
        &mut self,
        start: Vector2,
        end: Vector2,
        text: impl Into<String>,
    ) -> Result<Vec<Handle>> {
        self.session.dispatch(ViewOp::LeaderArrow {
            start,
            end,
            text: text.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{CanvasCall, RecordingCanvas};
    use crate::error::DraftError;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn tools() -> (Rc<RefCell<RecordingCanvas>>, DrawingTools) {
        let recorder = Rc::new(RefCell::new(RecordingCanvas::new()));
        let canvas: SharedCanvas = recorder.clone();
        let tools = DrawingTools::new(canvas, StandardDefinition::gb()).unwrap();
        (recorder, tools)
    }

    #[test]
    fn test_new_bootstraps_canvas() {
        let (recorder, _tools) = tools();
        assert_eq!(recorder.borrow().bootstrap_count(), 1);
    }

    #[test]
    fn test_circle_forwards_to_canvas() {
        let (recorder, mut tools) = tools();
        tools
            .draw_circle(Vector2::new(50.0, 50.0), 20.0, LineRole::Visible)
            .unwrap();
        let recorder = recorder.borrow();
        assert_eq!(recorder.count_circles(), 1);
        match &recorder.calls()[0] {
            CanvasCall::Circle {
                center,
                radius,
                attrs,
            } => {
                assert_eq!(*center, Vector2::new(50.0, 50.0));
                assert_eq!(*radius, 20.0);
                assert_eq!(attrs.layer, "1细实线");
            }
            other => panic!("expected a circle, got {other:?}"),
        }
    }

    #[test]
    fn test_line_methods_pick_their_roles() {
        let (recorder, mut tools) = tools();
        let a = Vector2::ZERO;
        let b = Vector2::new(40.0, 0.0);
        tools.draw_centerline(a, b).unwrap();
        tools.draw_hiddenline(a, b).unwrap();
        tools.draw_visibleline(a, b).unwrap();
        tools.draw_phantomline(a, b).unwrap();
        tools.draw_borderline(a, b).unwrap();
        let recorder = recorder.borrow();
        let line_types: Vec<Option<String>> = recorder
            .calls()
            .iter()
            .map(|call| match call {
                CanvasCall::Line { attrs, .. } => attrs.line_type.clone(),
                other => panic!("expected only lines, got {other:?}"),
            })
            .collect();
        assert_eq!(
            line_types,
            vec![
                Some("CENTER".to_string()),
                Some("HIDDEN".to_string()),
                None,
                Some("PHANTOM".to_string()),
                Some("BORDER".to_string()),
            ]
        );
    }

    #[test]
    fn test_dimension_composes_primitives() {
        let (recorder, mut tools) = tools();
        tools
            .add_dimension(Vector2::new(10.0, 40.0), Vector2::new(110.0, 40.0), 12.0, None)
            .unwrap();
        let recorder = recorder.borrow();
        // Two extension lines, the dimension line, two arrowheads, the value
        assert_eq!(recorder.count_lines(), 3);
        assert_eq!(recorder.count_polylines(), 2);
        assert_eq!(recorder.text_contents(), vec!["100"]);
    }

    #[test]
    fn test_baseline_reset_drops_chain() {
        let (_, mut tools) = tools();
        tools
            .add_baseline_dimensions(
                Some(Vector2::ZERO),
                vec![Vector2::new(50.0, 0.0)],
                8.0,
                Vector2::UNIT_X,
            )
            .unwrap();
        tools.reset_baseline().unwrap();
        let err = tools
            .add_baseline_dimensions(None, vec![Vector2::new(80.0, 0.0)], 8.0, Vector2::UNIT_X)
            .unwrap_err();
        assert!(matches!(
            err,
            DraftError::InvalidParameter {
                parameter: "origin",
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_radius_propagates() {
        let (recorder, mut tools) = tools();
        let err = tools
            .draw_circle(Vector2::ZERO, -5.0, LineRole::Visible)
            .unwrap_err();
        assert!(matches!(
            err,
            DraftError::InvalidParameter {
                parameter: "radius",
                ..
            }
        ));
        assert_eq!(recorder.borrow().call_count(), 0);
    }

    #[test]
    fn test_symbol_and_view_methods_forward() {
        let (recorder, mut tools) = tools();
        tools
            .add_roughness(Vector2::new(60.0, 60.0), "3.2", 3.0)
            .unwrap();
        tools
            .add_section_line(Vector2::new(0.0, 80.0), Vector2::new(100.0, 80.0), "A")
            .unwrap();
        let recorder = recorder.borrow();
        let texts = recorder.text_contents();
        assert!(texts.contains(&"Ra3.2"));
        assert!(texts.contains(&"A-A"));
    }

    #[test]
    fn test_session_survives_facade() {
        let (recorder, mut tools) = tools();
        tools
            .add_baseline_dimensions(
                Some(Vector2::ZERO),
                vec![Vector2::new(50.0, 0.0)],
                8.0,
                Vector2::UNIT_X,
            )
            .unwrap();
        let mut session = tools.into_session();
        // The chain keeps going in the recovered session
        session
            .dispatch(DimensionOp::Baseline {
                origin: None,
                targets: vec![Vector2::new(120.0, 0.0)],
                spacing: 8.0,
                direction: Vector2::UNIT_X,
            })
            .unwrap();
        let texts_owned: Vec<String> = recorder
            .borrow()
            .text_contents()
            .iter()
            .map(|t| t.to_string())
            .collect();
        assert!(texts_owned.contains(&"50".to_string()));
        assert!(texts_owned.contains(&"120".to_string()));
    }
}
