//! File format output

pub mod dxf;

pub use dxf::DxfTextWriter;
