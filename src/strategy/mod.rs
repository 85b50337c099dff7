//! Drawing strategies
//!
//! Four peer strategies each own one family of semantic operations and
//! resolve them into canvas primitives. Presentation attributes (layer, line
//! type, weight, text height, arrow size) always come from the
//! [`StandardDefinition`] through fixed per-strategy rule tables.
//!
//! Operations are typed: each strategy has its own operation enum, and
//! [`DrawingIntent`] is the sum over the four families for registry-level
//! dispatch.
//!
//! [`StandardDefinition`]: crate::standard::StandardDefinition

mod dimensions;
mod shapes;
mod symbols;
mod views;

pub use dimensions::{DimensionDrawer, DimensionOp};
pub use shapes::{LineRole, ShapeDrawer, ShapeOp};
pub use symbols::{SymbolDrawer, SymbolOp};
pub use views::{ViewDrawer, ViewKind, ViewOp, ViewRecord};

use crate::error::{DraftError, Result};
use crate::types::Handle;

/// One semantic drawing intent, dispatched to the strategy owning its family
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingIntent {
    Shape(ShapeOp),
    Dimension(DimensionOp),
    Symbol(SymbolOp),
    View(ViewOp),
}

impl DrawingIntent {
    /// Registry name of the strategy that owns this intent
    pub fn strategy_name(&self) -> &'static str {
        match self {
            DrawingIntent::Shape(_) => "basic_shapes",
            DrawingIntent::Dimension(_) => "dimensions",
            DrawingIntent::Symbol(_) => "symbols",
            DrawingIntent::View(_) => "views",
        }
    }
}

impl From<ShapeOp> for DrawingIntent {
    fn from(op: ShapeOp) -> Self {
        DrawingIntent::Shape(op)
    }
}

impl From<DimensionOp> for DrawingIntent {
    fn from(op: DimensionOp) -> Self {
        DrawingIntent::Dimension(op)
    }
}

impl From<SymbolOp> for DrawingIntent {
    fn from(op: SymbolOp) -> Self {
        DrawingIntent::Symbol(op)
    }
}

impl From<ViewOp> for DrawingIntent {
    fn from(op: ViewOp) -> Self {
        DrawingIntent::View(op)
    }
}

/// A drawing strategy resolves intents of its family into canvas calls
pub trait DrawingStrategy {
    /// Registry name of this strategy
    fn name(&self) -> &'static str;

    /// Execute one intent, returning the handles of emitted primitives
    fn dispatch(&mut self, intent: DrawingIntent) -> Result<Vec<Handle>>;
}

impl std::fmt::Debug for dyn DrawingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawingStrategy")
            .field("name", &self.name())
            .finish()
    }
}

/// Error for an intent handed to a strategy of the wrong family
pub(crate) fn reject_foreign(strategy: &'static str, intent: &DrawingIntent) -> DraftError {
    DraftError::invalid_parameter(
        "intent",
        format!(
            "operation belongs to strategy '{}', not '{}'",
            intent.strategy_name(),
            strategy
        ),
    )
}
