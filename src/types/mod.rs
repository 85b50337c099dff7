//! Core value types shared across the crate

mod color;
mod handle;
mod line_weight;
mod vector;

pub use color::Color;
pub use handle::Handle;
pub use line_weight::LineWeight;
pub use vector::Vector2;
