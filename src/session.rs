//! Drawing session: one canvas, one standard, one strategy cache
//!
//! A session owns everything that must not leak across documents. The
//! strategies it caches hold mutable drawing state (baseline chains, view
//! records), so sessions are single-threaded and never shared; generate
//! concurrent documents with one session each. The standard definition is
//! immutable and may be shared between sessions freely.

use std::sync::Arc;

use crate::canvas::SharedCanvas;
use crate::error::Result;
use crate::registry::{SharedStrategy, StrategyRegistry};
use crate::standard::StandardDefinition;
use crate::strategy::DrawingIntent;
use crate::types::Handle;

/// Binding of a canvas and a standard to a set of cached strategies
pub struct DrawingSession {
    canvas: SharedCanvas,
    standard: Arc<StandardDefinition>,
    registry: StrategyRegistry,
}

impl std::fmt::Debug for DrawingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawingSession")
            .field("standard", &self.standard)
            .finish_non_exhaustive()
    }
}

impl DrawingSession {
    /// A session with the built-in strategies registered
    pub fn new(canvas: SharedCanvas, standard: Arc<StandardDefinition>) -> DrawingSession {
        DrawingSession::with_registry(canvas, standard, StrategyRegistry::with_defaults())
    }

    /// A session with a caller-assembled registry
    pub fn with_registry(
        canvas: SharedCanvas,
        standard: Arc<StandardDefinition>,
        registry: StrategyRegistry,
    ) -> DrawingSession {
        DrawingSession {
            canvas,
            standard,
            registry,
        }
    }

    /// Prepare the canvas for this session's standard
    ///
    /// Safe to call more than once; ports only add what is missing.
    pub fn bootstrap(&mut self) -> Result<()> {
        self.canvas.borrow_mut().bootstrap(&self.standard)
    }

    /// Route an intent to the strategy owning its family
    pub fn dispatch(&mut self, intent: impl Into<DrawingIntent>) -> Result<Vec<Handle>> {
        self.registry
            .dispatch(intent.into(), &self.canvas, &self.standard)
    }

    /// Resolve a strategy instance by registry name
    pub fn strategy(&mut self, name: &str) -> Result<SharedStrategy> {
        self.registry.create(name, &self.canvas, &self.standard)
    }

    pub fn canvas(&self) -> &SharedCanvas {
        &self.canvas
    }

    pub fn standard(&self) -> &Arc<StandardDefinition> {
        &self.standard
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    /// Mutable registry access, for overrides and test isolation
    pub fn registry_mut(&mut self) -> &mut StrategyRegistry {
        &mut self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RecordingCanvas;
    use crate::strategy::{DimensionOp, ShapeOp};
    use crate::types::Vector2;
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

    #[test]
    fn test_dispatch_reaches_canvas() {
        let (recorder, mut session) = session();
        let handles = session
            .dispatch(ShapeOp::Circle {
                center: Vector2::new(50.0, 50.0),
                radius: 20.0,
                role: Default::default(),
            })
            .unwrap();
        assert_eq!(handles.len(), 1);
        assert_eq!(recorder.borrow().count_circles(), 1);
    }

    #[test]
    fn test_strategies_cached_per_session() {
        let (_, mut session) = session();
        let first = session.strategy("dimensions").unwrap();
        let second = session.strategy("dimensions").unwrap();
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_sessions_do_not_share_state() {
        let (_, mut a) = session();
        let (_, mut b) = session();
        a.dispatch(DimensionOp::Baseline {
            origin: Some(Vector2::ZERO),
            targets: vec![Vector2::new(50.0, 0.0)],
            spacing: 8.0,
            direction: Vector2::UNIT_X,
        })
        .unwrap();

        // The chain lives in session a only
        let err = b
            .dispatch(DimensionOp::Baseline {
                origin: None,
                targets: vec![Vector2::new(80.0, 0.0)],
                spacing: 8.0,
                direction: Vector2::UNIT_X,
            })
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::DraftError::InvalidParameter { .. }
        ));
    }

    #[test]
    fn test_bootstrap_delegates_to_port() {
        let (recorder, mut session) = session();
        session.bootstrap().unwrap();
        session.bootstrap().unwrap();
        assert_eq!(recorder.borrow().bootstrap_count(), 2);
    }
}
