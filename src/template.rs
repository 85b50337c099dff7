//! Template-driven drawing generation
//!
//! A complete part drawing is produced by a fixed eight-phase pipeline:
//! document setup, title block, viewports, main view, auxiliary views,
//! dimensions, annotations, finalize. [`PartTemplate`] implementations
//! supply the part-specific phases; [`generate_drawing`] owns the phase
//! order and stops at the first failure.

use std::rc::Rc;
use std::sync::Arc;

use tracing::debug;

use crate::canvas::{EntityAttrs, TextAttrs};
use crate::error::{DraftError, Result};
use crate::session::DrawingSession;
use crate::standard::{LayerRole, LineWeightTier, TextHeightTier};
use crate::strategy::{DimensionOp, LineRole, ShapeOp};
use crate::types::Vector2;

/// How far center lines run past the contour they mark, in mm
const CENTERLINE_OVERSHOOT: f64 = 10.0;

/// Overshoot for the small crosshair in a side view, in mm
const CROSSHAIR_OVERSHOOT: f64 = 5.0;

/// Horizontal offset from the main view to its side view, in mm
const SIDE_VIEW_OFFSET: f64 = 80.0;

/// Distance between a contour and its dimension line, in mm
const DIMENSION_OFFSET: f64 = 15.0;

/// Title block outline width, in mm
const TITLE_BLOCK_WIDTH: f64 = 140.0;

/// Title block outline height, in mm
const TITLE_BLOCK_HEIGHT: f64 = 32.0;

/// Width of the part-name column inside the title block, in mm
const TITLE_BLOCK_NAME_WIDTH: f64 = 80.0;

/// The eight generation phases, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    SetupDocument,
    TitleBlock,
    Viewports,
    MainView,
    AuxiliaryViews,
    Dimensions,
    Annotations,
    Finalize,
}

impl Phase {
    /// All phases in execution order
    pub const ALL: [Phase; 8] = [
        Phase::SetupDocument,
        Phase::TitleBlock,
        Phase::Viewports,
        Phase::MainView,
        Phase::AuxiliaryViews,
        Phase::Dimensions,
        Phase::Annotations,
        Phase::Finalize,
    ];

    /// The phase name reported inside template errors
    pub const fn name(&self) -> &'static str {
        match self {
            Phase::SetupDocument => "setup_document",
            Phase::TitleBlock => "title_block",
            Phase::Viewports => "viewports",
            Phase::MainView => "main_view",
            Phase::AuxiliaryViews => "auxiliary_views",
            Phase::Dimensions => "dimensions",
            Phase::Annotations => "annotations",
            Phase::Finalize => "finalize",
        }
    }
}

/// Standard sheet sizes, dimensions in mm
///
/// A0 through A3 are landscape, the usual orientation for part drawings;
/// A4 is portrait with an explicit landscape variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperSize {
    A0,
    A1,
    A2,
    A3,
    A4,
    A4Landscape,
}

impl PaperSize {
    /// Sheet width in mm
    pub const fn width(&self) -> f64 {
        match self {
            PaperSize::A0 => 1189.0,
            PaperSize::A1 => 841.0,
            PaperSize::A2 => 594.0,
            PaperSize::A3 => 420.0,
            PaperSize::A4 => 210.0,
            PaperSize::A4Landscape => 297.0,
        }
    }

    /// Sheet height in mm
    pub const fn height(&self) -> f64 {
        match self {
            PaperSize::A0 => 841.0,
            PaperSize::A1 => 594.0,
            PaperSize::A2 => 420.0,
            PaperSize::A3 => 297.0,
            PaperSize::A4 => 297.0,
            PaperSize::A4Landscape => 210.0,
        }
    }

    /// Distance between the sheet edge and the border frame, in mm
    pub const fn frame_margin(&self) -> f64 {
        match self {
            PaperSize::A0 | PaperSize::A1 | PaperSize::A2 => 10.0,
            PaperSize::A3 | PaperSize::A4 | PaperSize::A4Landscape => 5.0,
        }
    }
}

impl Default for PaperSize {
    fn default() -> Self {
        PaperSize::A3
    }
}

/// Content of the title block in the lower right corner of the frame
///
/// Empty fields are left out of the rendered block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleBlock {
    /// Part name, the large caption
    pub name: String,
    /// Drawing code or number
    pub code: String,
    /// Part material
    pub material: String,
    /// Scale text such as `1:2`
    pub scale: String,
    /// Issue date
    pub date: String,
    /// Organization or company name
    pub organization: String,
    /// Designer name
    pub designer: String,
    /// Reviewer name
    pub reviewer: String,
}

impl TitleBlock {
    /// Title block with the two mandatory entries
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        TitleBlock {
            name: name.into(),
            code: code.into(),
            ..TitleBlock::default()
        }
    }

    /// Set the material entry, builder style
    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = material.into();
        self
    }

    /// Set the scale entry, builder style
    pub fn with_scale(mut self, scale: impl Into<String>) -> Self {
        self.scale = scale.into();
        self
    }

    /// Set the date entry, builder style
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Set the organization entry, builder style
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = organization.into();
        self
    }

    /// Set the designer entry, builder style
    pub fn with_designer(mut self, designer: impl Into<String>) -> Self {
        self.designer = designer.into();
        self
    }

    /// Set the reviewer entry, builder style
    pub fn with_reviewer(mut self, reviewer: impl Into<String>) -> Self {
        self.reviewer = reviewer.into();
        self
    }
}

/// One part category's contribution to the generation pipeline
///
/// `draw_main_view` and `draw_auxiliary_views` are the part-specific hooks
/// every template must supply. The remaining phases have defaults: document
/// setup bootstraps the canvas and draws the border frame, the title block
/// phase renders [`TitleBlock`] content when the template supplies one, and
/// the rest do nothing. `skip_phase` suppresses individual phases.
pub trait PartTemplate {
    /// Sheet the drawing targets
    fn paper(&self) -> PaperSize {
        PaperSize::default()
    }

    /// Title block content, `None` leaves the corner empty
    fn title_block(&self) -> Option<TitleBlock> {
        None
    }

    /// Whether to suppress a phase entirely
    fn skip_phase(&self, _phase: Phase) -> bool {
        false
    }

    /// Prepare the document: canvas bootstrap plus the border frame
    fn setup_document(&mut self, session: &mut DrawingSession) -> Result<()> {
        session.bootstrap()?;
        let paper = self.paper();
        let margin = paper.frame_margin();
        session.dispatch(ShapeOp::Rectangle {
            lower_left: Vector2::new(margin, margin),
            width: paper.width() - 2.0 * margin,
            height: paper.height() - 2.0 * margin,
            role: LineRole::Border,
        })?;
        Ok(())
    }

    /// Render the title block into the lower right frame corner
    fn draw_title_block(&mut self, session: &mut DrawingSession) -> Result<()> {
        match self.title_block() {
            Some(block) => render_title_block(session, self.paper(), &block),
            None => Ok(()),
        }
    }

    /// Lay out viewports, nothing by default
    fn setup_viewports(&mut self, session: &mut DrawingSession) -> Result<()> {
        let _ = session;
        Ok(())
    }

    /// Draw the primary view of the part
    fn draw_main_view(&mut self, session: &mut DrawingSession) -> Result<()>;

    /// Draw side, section or detail views of the part
    fn draw_auxiliary_views(&mut self, session: &mut DrawingSession) -> Result<()>;

    /// Add dimensions, nothing by default
    fn add_dimensions(&mut self, session: &mut DrawingSession) -> Result<()> {
        let _ = session;
        Ok(())
    }

    /// Add annotations and symbols, nothing by default
    fn add_annotations(&mut self, session: &mut DrawingSession) -> Result<()> {
        let _ = session;
        Ok(())
    }

    /// Final touches before the document is handed back, nothing by default
    fn finalize(&mut self, session: &mut DrawingSession) -> Result<()> {
        let _ = session;
        Ok(())
    }
}

/// Run every generation phase of `template` against `session`, in order
///
/// The first failing phase aborts generation; the error is wrapped with the
/// phase name. Primitives emitted by earlier phases stay in the document.
pub fn generate_drawing<T: PartTemplate + ?Sized>(
    template: &mut T,
    session: &mut DrawingSession,
) -> Result<()> {
    for phase in Phase::ALL {
        if template.skip_phase(phase) {
            debug!(phase = phase.name(), "skipping phase");
            continue;
        }
        debug!(phase = phase.name(), "running phase");
        let outcome = match phase {
            Phase::SetupDocument => template.setup_document(session),
            Phase::TitleBlock => template.draw_title_block(session),
            Phase::Viewports => template.setup_viewports(session),
            Phase::MainView => template.draw_main_view(session),
            Phase::AuxiliaryViews => template.draw_auxiliary_views(session),
            Phase::Dimensions => template.add_dimensions(session),
            Phase::Annotations => template.add_annotations(session),
            Phase::Finalize => template.finalize(session),
        };
        outcome.map_err(|err| DraftError::in_phase(phase.name(), err))?;
    }
    Ok(())
}

/// Draw the title block grid and entries at the frame's lower right corner
///
/// Sheet furniture with a fixed layout, so it is rendered here rather than
/// through a strategy: outline and dividers on the title block layer, entry
/// text in the standard font. Heights come from the standard's tiers.
fn render_title_block(
    session: &mut DrawingSession,
    paper: PaperSize,
    block: &TitleBlock,
) -> Result<()> {
    let standard = Arc::clone(session.standard());
    let layer = standard.layer(LayerRole::TitleBlock)?.to_string();
    let thick = standard.line_weight(LineWeightTier::Thick)?;
    let thin = standard.line_weight(LineWeightTier::Thin)?;
    let title_height = standard.text_height(TextHeightTier::Title)?;
    let subtitle_height = standard.text_height(TextHeightTier::Subtitle)?;
    let normal_height = standard.text_height(TextHeightTier::Normal)?;
    let small_height = standard.text_height(TextHeightTier::Small)?;
    let font = standard.font_style().to_string();

    let margin = paper.frame_margin();
    let x0 = paper.width() - margin - TITLE_BLOCK_WIDTH;
    let y0 = margin;
    let x1 = x0 + TITLE_BLOCK_WIDTH;
    let y1 = y0 + TITLE_BLOCK_HEIGHT;
    let split_x = x0 + TITLE_BLOCK_NAME_WIDTH;
    let split_y = y0 + TITLE_BLOCK_HEIGHT / 2.0;

    let outline = EntityAttrs::on_layer(layer.clone()).with_line_weight(thick);
    let divider = EntityAttrs::on_layer(layer.clone()).with_line_weight(thin);
    let text_attrs = |height: f64| {
        TextAttrs::new(layer.clone(), height)
            .with_style(font.clone())
            .centered()
    };

    let canvas = Rc::clone(session.canvas());
    let mut canvas = canvas.borrow_mut();
    canvas.add_polyline(
        &[
            Vector2::new(x0, y0),
            Vector2::new(x1, y0),
            Vector2::new(x1, y1),
            Vector2::new(x0, y1),
        ],
        true,
        &outline,
    )?;
    canvas.add_line(Vector2::new(split_x, y0), Vector2::new(split_x, y1), &divider)?;
    canvas.add_line(Vector2::new(x0, split_y), Vector2::new(x1, split_y), &divider)?;

    // Cell centers: name and code in the top row, details below
    let name_center = Vector2::new((x0 + split_x) / 2.0, (split_y + y1) / 2.0);
    let code_center = Vector2::new((split_x + x1) / 2.0, (split_y + y1) / 2.0);
    let detail_x = (x0 + split_x) / 2.0;
    let org_center = Vector2::new((split_x + x1) / 2.0, (y0 + split_y) / 2.0);

    if !block.name.is_empty() {
        canvas.add_text(&block.name, name_center, &text_attrs(title_height))?;
    }
    if !block.code.is_empty() {
        canvas.add_text(&block.code, code_center, &text_attrs(subtitle_height))?;
    }

    let mut specs: Vec<String> = Vec::new();
    if !block.material.is_empty() {
        specs.push(format!("材料 {}", block.material));
    }
    if !block.scale.is_empty() {
        specs.push(format!("比例 {}", block.scale));
    }
    if !specs.is_empty() {
        let position = Vector2::new(detail_x, y0 + 11.0);
        canvas.add_text(&specs.join("  "), position, &text_attrs(small_height))?;
    }

    let mut people: Vec<String> = Vec::new();
    if !block.designer.is_empty() {
        people.push(format!("设计 {}", block.designer));
    }
    if !block.reviewer.is_empty() {
        people.push(format!("审核 {}", block.reviewer));
    }
    if !block.date.is_empty() {
        people.push(block.date.clone());
    }
    if !people.is_empty() {
        let position = Vector2::new(detail_x, y0 + 5.0);
        canvas.add_text(&people.join("  "), position, &text_attrs(small_height))?;
    }

    if !block.organization.is_empty() {
        canvas.add_text(&block.organization, org_center, &text_attrs(normal_height))?;
    }
    Ok(())
}

/// Drawing template for a plain cylindrical shaft
///
/// Main view is the side-on outline rectangle with its axis center line,
/// the auxiliary view is the end-on circle with a crosshair, and the
/// dimension phase adds the length and the shaft diameter.
#[derive(Debug, Clone)]
pub struct ShaftTemplate {
    origin: Vector2,
    length: f64,
    diameter: f64,
    paper: PaperSize,
    title_block: Option<TitleBlock>,
}

impl ShaftTemplate {
    /// Shaft template centered at `origin` in sheet coordinates
    pub fn new(origin: Vector2, length: f64, diameter: f64) -> Self {
        ShaftTemplate {
            origin,
            length,
            diameter,
            paper: PaperSize::default(),
            title_block: None,
        }
    }

    /// Select the sheet size, builder style
    pub fn with_paper(mut self, paper: PaperSize) -> Self {
        self.paper = paper;
        self
    }

    /// Attach a title block, builder style
    pub fn with_title_block(mut self, block: TitleBlock) -> Self {
        self.title_block = Some(block);
        self
    }

    fn side_view_center(&self) -> Vector2 {
        Vector2::new(self.origin.x - SIDE_VIEW_OFFSET, self.origin.y)
    }
}

impl PartTemplate for ShaftTemplate {
    fn paper(&self) -> PaperSize {
        self.paper
    }

    fn title_block(&self) -> Option<TitleBlock> {
        self.title_block.clone()
    }

    fn draw_main_view(&mut self, session: &mut DrawingSession) -> Result<()> {
        let half_length = self.length / 2.0;
        let half_diameter = self.diameter / 2.0;
        session.dispatch(ShapeOp::Rectangle {
            lower_left: Vector2::new(self.origin.x - half_length, self.origin.y - half_diameter),
            width: self.length,
            height: self.diameter,
            role: LineRole::Visible,
        })?;
        session.dispatch(ShapeOp::Line {
            start: Vector2::new(self.origin.x - half_length - CENTERLINE_OVERSHOOT, self.origin.y),
            end: Vector2::new(self.origin.x + half_length + CENTERLINE_OVERSHOOT, self.origin.y),
            role: LineRole::Center,
        })?;
        Ok(())
    }

    fn draw_auxiliary_views(&mut self, session: &mut DrawingSession) -> Result<()> {
        let center = self.side_view_center();
        let radius = self.diameter / 2.0;
        let reach = radius + CROSSHAIR_OVERSHOOT;
        session.dispatch(ShapeOp::Circle {
            center,
            radius,
            role: LineRole::Visible,
        })?;
        session.dispatch(ShapeOp::Line {
            start: Vector2::new(center.x - reach, center.y),
            end: Vector2::new(center.x + reach, center.y),
            role: LineRole::Center,
        })?;
        session.dispatch(ShapeOp::Line {
            start: Vector2::new(center.x, center.y - reach),
            end: Vector2::new(center.x, center.y + reach),
            role: LineRole::Center,
        })?;
        Ok(())
    }

    fn add_dimensions(&mut self, session: &mut DrawingSession) -> Result<()> {
        let half_length = self.length / 2.0;
        let bottom = self.origin.y - self.diameter / 2.0;
        session.dispatch(DimensionOp::Linear {
            p1: Vector2::new(self.origin.x - half_length, bottom),
            p2: Vector2::new(self.origin.x + half_length, bottom),
            distance: DIMENSION_OFFSET,
            text: None,
        })?;
        session.dispatch(DimensionOp::Diameter {
            center: self.side_view_center(),
            radius: self.diameter / 2.0,
            angle: 45.0,
            text: None,
        })?;
        Ok(())
    }
}

/// Drawing template for a gear blank
///
/// Main view is the end-on pair of concentric circles (tip circle and bore)
/// with a crosshair, the auxiliary view is the side-on blank rectangle, and
/// the dimension phase adds both diameters.
#[derive(Debug, Clone)]
pub struct GearTemplate {
    origin: Vector2,
    outer_diameter: f64,
    inner_diameter: f64,
    thickness: f64,
    paper: PaperSize,
    title_block: Option<TitleBlock>,
}

impl GearTemplate {
    /// Gear template centered at `origin` in sheet coordinates
    pub fn new(origin: Vector2, outer_diameter: f64, inner_diameter: f64, thickness: f64) -> Self {
        GearTemplate {
            origin,
            outer_diameter,
            inner_diameter,
            thickness,
            paper: PaperSize::default(),
            title_block: None,
        }
    }

    /// Select the sheet size, builder style
    pub fn with_paper(mut self, paper: PaperSize) -> Self {
        self.paper = paper;
        self
    }

    /// Attach a title block, builder style
    pub fn with_title_block(mut self, block: TitleBlock) -> Self {
        self.title_block = Some(block);
        self
    }

    fn side_view_center_x(&self) -> f64 {
        self.origin.x + SIDE_VIEW_OFFSET
    }
}

impl PartTemplate for GearTemplate {
    fn paper(&self) -> PaperSize {
        self.paper
    }

    fn title_block(&self) -> Option<TitleBlock> {
        self.title_block.clone()
    }

    fn draw_main_view(&mut self, session: &mut DrawingSession) -> Result<()> {
        let outer_radius = self.outer_diameter / 2.0;
        let reach = outer_radius + CENTERLINE_OVERSHOOT;
        session.dispatch(ShapeOp::Circle {
            center: self.origin,
            radius: outer_radius,
            role: LineRole::Visible,
        })?;
        session.dispatch(ShapeOp::Circle {
            center: self.origin,
            radius: self.inner_diameter / 2.0,
            role: LineRole::Visible,
        })?;
        session.dispatch(ShapeOp::Line {
            start: Vector2::new(self.origin.x - reach, self.origin.y),
            end: Vector2::new(self.origin.x + reach, self.origin.y),
            role: LineRole::Center,
        })?;
        session.dispatch(ShapeOp::Line {
            start: Vector2::new(self.origin.x, self.origin.y - reach),
            end: Vector2::new(self.origin.x, self.origin.y + reach),
            role: LineRole::Center,
        })?;
        Ok(())
    }

    fn draw_auxiliary_views(&mut self, session: &mut DrawingSession) -> Result<()> {
        let outer_radius = self.outer_diameter / 2.0;
        let center_x = self.side_view_center_x();
        session.dispatch(ShapeOp::Rectangle {
            lower_left: Vector2::new(center_x - self.thickness / 2.0, self.origin.y - outer_radius),
            width: self.thickness,
            height: self.outer_diameter,
            role: LineRole::Visible,
        })?;
        session.dispatch(ShapeOp::Line {
            start: Vector2::new(center_x, self.origin.y - outer_radius - CENTERLINE_OVERSHOOT),
            end: Vector2::new(center_x, self.origin.y + outer_radius + CENTERLINE_OVERSHOOT),
            role: LineRole::Center,
        })?;
        Ok(())
    }

    fn add_dimensions(&mut self, session: &mut DrawingSession) -> Result<()> {
        session.dispatch(DimensionOp::Diameter {
            center: self.origin,
            radius: self.outer_diameter / 2.0,
            angle: 45.0,
            text: None,
        })?;
        session.dispatch(DimensionOp::Diameter {
            center: self.origin,
            radius: self.inner_diameter / 2.0,
            angle: 135.0,
            text: None,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{CanvasCall, RecordingCanvas, SharedCanvas};
    use crate::standard::StandardDefinition;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn session() -> (Rc<RefCell<RecordingCanvas>>, DrawingSession) {
        let recorder = Rc::new(RefCell::new(RecordingCanvas::new()));
        let canvas: SharedCanvas = recorder.clone();
        (
            recorder,
            DrawingSession::new(canvas, StandardDefinition::gb()),
        )
    }

    /// Records which phases ran; optionally fails or skips some of them
    #[derive(Default)]
    struct ProbeTemplate {
        ran: Vec<&'static str>,
        fail_main_view: bool,
        skipped: Vec<Phase>,
    }

    impl PartTemplate for ProbeTemplate {
        fn skip_phase(&self, phase: Phase) -> bool {
            self.skipped.contains(&phase)
        }

        fn setup_document(&mut self, _session: &mut DrawingSession) -> Result<()> {
            self.ran.push("setup_document");
            Ok(())
        }

        fn draw_title_block(&mut self, _session: &mut DrawingSession) -> Result<()> {
            self.ran.push("title_block");
            Ok(())
        }

        fn setup_viewports(&mut self, _session: &mut DrawingSession) -> Result<()> {
            self.ran.push("viewports");
            Ok(())
        }

        fn draw_main_view(&mut self, _session: &mut DrawingSession) -> Result<()> {
            self.ran.push("main_view");
            if self.fail_main_view {
                return Err(DraftError::invalid_parameter("length", "must be > 0"));
            }
            Ok(())
        }

        fn draw_auxiliary_views(&mut self, _session: &mut DrawingSession) -> Result<()> {
            self.ran.push("auxiliary_views");
            Ok(())
        }

        fn add_dimensions(&mut self, _session: &mut DrawingSession) -> Result<()> {
            self.ran.push("dimensions");
            Ok(())
        }

        fn add_annotations(&mut self, _session: &mut DrawingSession) -> Result<()> {
            self.ran.push("annotations");
            Ok(())
        }

        fn finalize(&mut self, _session: &mut DrawingSession) -> Result<()> {
            self.ran.push("finalize");
            Ok(())
        }
    }

    /// Only the two required hooks, everything else on defaults
    struct BareTemplate;

    impl PartTemplate for BareTemplate {
        fn draw_main_view(&mut self, session: &mut DrawingSession) -> Result<()> {
            session.dispatch(ShapeOp::Circle {
                center: Vector2::new(100.0, 100.0),
                radius: 30.0,
                role: LineRole::Visible,
            })?;
            Ok(())
        }

        fn draw_auxiliary_views(&mut self, _session: &mut DrawingSession) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_phases_run_in_order() {
        let (_, mut session) = session();
        let mut template = ProbeTemplate::default();
        generate_drawing(&mut template, &mut session).unwrap();
        assert_eq!(
            template.ran,
            vec![
                "setup_document",
                "title_block",
                "viewports",
                "main_view",
                "auxiliary_views",
                "dimensions",
                "annotations",
                "finalize",
            ]
        );
    }

    #[test]
    fn test_failing_phase_aborts_and_names_itself() {
        let (_, mut session) = session();
        let mut template = ProbeTemplate {
            fail_main_view: true,
            ..ProbeTemplate::default()
        };
        let err = generate_drawing(&mut template, &mut session).unwrap_err();
        match err {
            DraftError::Template { phase, source } => {
                assert_eq!(phase, "main_view");
                assert!(matches!(*source, DraftError::InvalidParameter { .. }));
            }
            other => panic!("expected template error, got {other:?}"),
        }
        // Nothing after the failing phase ran
        assert_eq!(
            template.ran,
            vec!["setup_document", "title_block", "viewports", "main_view"]
        );
    }

    #[test]
    fn test_skip_phase_suppresses_named_phases() {
        let (_, mut session) = session();
        let mut template = ProbeTemplate {
            skipped: vec![Phase::TitleBlock, Phase::Dimensions],
            ..ProbeTemplate::default()
        };
        generate_drawing(&mut template, &mut session).unwrap();
        assert!(!template.ran.contains(&"title_block"));
        assert!(!template.ran.contains(&"dimensions"));
        assert!(template.ran.contains(&"main_view"));
    }

    #[test]
    fn test_default_setup_bootstraps_and_frames() {
        let (recorder, mut session) = session();
        generate_drawing(&mut BareTemplate, &mut session).unwrap();
        let recorder = recorder.borrow();
        assert_eq!(recorder.bootstrap_count(), 1);
        // Border frame plus nothing else from the default phases
        assert_eq!(recorder.count_polylines(), 1);
        assert_eq!(recorder.count_circles(), 1);
        match &recorder.calls()[0] {
            CanvasCall::Polyline {
                points,
                closed,
                attrs,
            } => {
                assert!(*closed);
                assert_eq!(points[0], Vector2::new(5.0, 5.0));
                assert_eq!(points[2], Vector2::new(415.0, 292.0));
                assert_eq!(attrs.layer, "8边界线");
            }
            other => panic!("expected the border frame first, got {other:?}"),
        }
    }

    #[test]
    fn test_shaft_template_emits_views_and_dimensions() {
        let (recorder, mut session) = session();
        let mut template = ShaftTemplate::new(Vector2::new(210.0, 150.0), 100.0, 40.0);
        generate_drawing(&mut template, &mut session).unwrap();
        let recorder = recorder.borrow();
        // End view circle only
        assert_eq!(recorder.count_circles(), 1);
        // Border, outline rectangle, and four dimension arrowheads
        assert_eq!(recorder.count_polylines(), 6);
        let texts = recorder.text_contents();
        assert!(texts.contains(&"100"));
        assert!(texts.contains(&"%%c40"));
    }

    #[test]
    fn test_shaft_centerline_overshoots_outline() {
        let (recorder, mut session) = session();
        let mut template = ShaftTemplate::new(Vector2::new(210.0, 150.0), 100.0, 40.0);
        generate_drawing(&mut template, &mut session).unwrap();
        let recorder = recorder.borrow();
        let axis = recorder
            .calls()
            .iter()
            .find_map(|call| match call {
                CanvasCall::Line { start, end, attrs }
                    if attrs.line_type.as_deref() == Some("CENTER") =>
                {
                    Some((*start, *end))
                }
                _ => None,
            })
            .expect("shaft axis center line");
        assert_eq!(axis.0, Vector2::new(150.0, 150.0));
        assert_eq!(axis.1, Vector2::new(270.0, 150.0));
    }

    #[test]
    fn test_gear_template_emits_views_and_dimensions() {
        let (recorder, mut session) = session();
        let mut template = GearTemplate::new(Vector2::new(180.0, 150.0), 80.0, 30.0, 20.0);
        generate_drawing(&mut template, &mut session).unwrap();
        let recorder = recorder.borrow();
        // Tip circle and bore
        assert_eq!(recorder.count_circles(), 2);
        let texts = recorder.text_contents();
        assert!(texts.contains(&"%%c80"));
        assert!(texts.contains(&"%%c30"));
    }

    #[test]
    fn test_title_block_renders_entries() {
        let (recorder, mut session) = session();
        let block = TitleBlock::new("传动轴", "MD-001")
            .with_material("45 钢")
            .with_scale("1:2")
            .with_designer("张三");
        let mut template =
            ShaftTemplate::new(Vector2::new(210.0, 150.0), 100.0, 40.0).with_title_block(block);
        generate_drawing(&mut template, &mut session).unwrap();
        let recorder = recorder.borrow();
        assert!(recorder.layers_used().contains(&"2粗实线"));
        let texts = recorder.text_contents();
        assert!(texts.contains(&"传动轴"));
        assert!(texts.contains(&"MD-001"));
        assert!(texts.contains(&"材料 45 钢  比例 1:2"));
        assert!(texts.contains(&"设计 张三"));
    }

    #[test]
    fn test_paper_size_table() {
        assert_eq!(PaperSize::A0.width(), 1189.0);
        assert_eq!(PaperSize::A0.height(), 841.0);
        assert_eq!(PaperSize::A4.width(), 210.0);
        assert_eq!(PaperSize::A4Landscape.width(), 297.0);
        assert_eq!(PaperSize::A2.frame_margin(), 10.0);
        assert_eq!(PaperSize::A4.frame_margin(), 5.0);
    }

    #[test]
    fn test_phase_names_match_order() {
        let names: Vec<&str> = Phase::ALL.iter().map(|p| p.name()).collect();
        assert_eq!(
            names,
            vec![
                "setup_document",
                "title_block",
                "viewports",
                "main_view",
                "auxiliary_views",
                "dimensions",
                "annotations",
                "finalize",
            ]
        );
    }
}
