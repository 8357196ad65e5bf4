//! Shared element helpers.

pub mod text;

pub use text::{escape_xml, xml_id};
