//! Rendering backends.

pub mod svg;

pub use svg::SvgBackend;
