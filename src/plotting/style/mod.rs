//! Styling module.
//!
//! Colors, icon fills and caption text styles used by the SVG scene.

pub mod color;
pub mod fill_style;
pub mod text_style;

pub use color::Color;
pub use fill_style::FillStyle;
pub use text_style::{TextAnchor, TextStyle};
