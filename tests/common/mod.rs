//! Shared test utilities for mechdraw integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use mechdraw::canvas::{DocumentCanvas, RecordingCanvas, SharedCanvas};
use mechdraw::session::DrawingSession;
use mechdraw::standard::StandardDefinition;

/// Resolve path into the `test_output/` directory, creating it if needed.
pub fn test_output_path(filename: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_output");
    let _ = std::fs::create_dir_all(&dir);
    dir.join(filename)
}

/// GB session over a recording canvas, for call-level assertions.
pub fn recording_session() -> (Rc<RefCell<RecordingCanvas>>, DrawingSession) {
    let recorder = Rc::new(RefCell::new(RecordingCanvas::new()));
    let canvas: SharedCanvas = recorder.clone();
    (
        recorder,
        DrawingSession::new(canvas, StandardDefinition::gb()),
    )
}

/// GB session over a document canvas, for DXF-level assertions.
pub fn document_session() -> (Rc<RefCell<DocumentCanvas>>, DrawingSession) {
    let document = Rc::new(RefCell::new(DocumentCanvas::new()));
    let canvas: SharedCanvas = document.clone();
    (
        document,
        DrawingSession::new(canvas, StandardDefinition::gb()),
    )
}

/// Owned copies of all recorded text contents, in call order.
pub fn recorded_texts(recorder: &Rc<RefCell<RecordingCanvas>>) -> Vec<String> {
    recorder
        .borrow()
        .text_contents()
        .iter()
        .map(|t| t.to_string())
        .collect()
}
