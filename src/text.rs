/// Single-line layout of item labels.
pub mod layout;

pub use layout::{GlyphPosition, LineLayout, TextStyle};
