//! Minimal SVG plotting support for waffle charts.
//!
//! Provides colors and styles, an SVG document builder, and a retained
//! [`SvgSurface`] that turns surface commands into SVG snapshots.

pub mod backend;
pub mod element;
pub mod scene;
pub mod style;

pub use backend::SvgBackend;
pub use element::{escape_xml, xml_id};
pub use scene::SvgSurface;
pub use style::{Color, FillStyle, TextAnchor, TextStyle};
