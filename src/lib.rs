//! # mechdraw
//!
//! A pure Rust library for generating standards-compliant mechanical
//! engineering drawings as DXF.
//!
//! The hard part of drawing generation is not geometry but compliance: a
//! national drafting standard dictates which layer, line type, line weight
//! and text height every mark must use. mechdraw keeps that knowledge in one
//! place — an externally loadable [`StandardDefinition`] — and routes every
//! drawing operation through strategies that resolve semantic intents
//! ("center line", "radius dimension", "roughness mark") into concrete
//! primitives on a narrow canvas port.
//!
//! ## Features
//!
//! - Configuration-driven GB standard: layers, line types, weights, text
//!   heights loaded from JSON, with an embedded default
//! - Four drawing strategies: basic shapes, dimensions, symbols, views
//! - Registry with lazy, cached strategy instances per session
//! - Fixed eight-phase template pipeline with ready-made shaft and gear
//!   templates
//! - Legacy-compatible flat facade ([`DrawingTools`])
//! - In-crate document model and ASCII DXF writer
//!
//! ## Quick Start
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use mechdraw::canvas::{DocumentCanvas, SharedCanvas};
//! use mechdraw::facade::DrawingTools;
//! use mechdraw::standard::StandardDefinition;
//! use mechdraw::strategy::LineRole;
//! use mechdraw::types::Vector2;
//!
//! let document = Rc::new(RefCell::new(DocumentCanvas::new()));
//! let canvas: SharedCanvas = document.clone();
//! let mut tools = DrawingTools::new(canvas, StandardDefinition::gb())?;
//!
//! tools.draw_circle(Vector2::new(100.0, 100.0), 30.0, LineRole::Visible)?;
//! tools.draw_centerline(Vector2::new(60.0, 100.0), Vector2::new(140.0, 100.0))?;
//! tools.add_diameter_dimension(Vector2::new(100.0, 100.0), 30.0, 45.0, None)?;
//!
//! let dxf = document.borrow().drawing().to_dxf_string()?;
//! assert!(dxf.contains("ENTITIES"));
//! # Ok::<(), mechdraw::DraftError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`standard`] — the [`StandardDefinition`] lookup tables and role enums
//! - [`canvas`] — the [`CanvasPort`] capability trait and its adapters
//! - [`strategy`] — typed operation enums and the four strategies
//! - [`registry`] — name to constructor table with cached instances
//! - [`session`] — one canvas + one standard + one registry per document
//! - [`template`] — the phase pipeline and concrete part templates
//! - [`facade`] — the flat legacy method surface
//! - [`drawing`] / [`io`] — document model and DXF serialization
//!
//! [`StandardDefinition`]: standard::StandardDefinition
//! [`CanvasPort`]: canvas::CanvasPort
//! [`DrawingTools`]: facade::DrawingTools

pub mod canvas;
pub mod drawing;
pub mod error;
pub mod facade;
pub mod io;
pub mod registry;
pub mod session;
pub mod standard;
pub mod strategy;
pub mod template;
pub mod types;

// Re-export commonly used types
pub use error::{DraftError, Result};
pub use types::{Handle, Vector2};

pub use canvas::{share, CanvasPort, DocumentCanvas, RecordingCanvas, SharedCanvas};
pub use drawing::Drawing;
pub use facade::DrawingTools;
pub use registry::StrategyRegistry;
pub use session::DrawingSession;
pub use standard::{LayerRole, LineWeightTier, StandardDefinition, TextHeightTier};
pub use strategy::{
    DimensionOp, DrawingIntent, DrawingStrategy, LineRole, ShapeOp, SymbolOp, ViewOp,
};
pub use template::{
    generate_drawing, GearTemplate, PaperSize, PartTemplate, Phase, ShaftTemplate, TitleBlock,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
