//! Color definitions and utilities.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A fill or text color.
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    /// RGB color with values 0-255
    Rgb(u8, u8, u8),
    /// RGBA color with alpha 0.0-1.0
    Rgba(u8, u8, u8, f64),
    /// Named CSS color (e.g., "red", "steelblue")
    Named(String),
}

impl Color {
    /// Create a color from a hex string: `#rgb`, `#rrggbb` or `#rrggbbaa`
    /// (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                // Shorthand: each digit is doubled ("c" -> "cc").
                let mut rgb = [0u8; 3];
                for (slot, c) in rgb.iter_mut().zip(hex.chars()) {
                    let d = c.to_digit(16)? as u8;
                    *slot = d * 16 + d;
                }
                Some(Color::Rgb(rgb[0], rgb[1], rgb[2]))
            }
            6 => Some(Color::Rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            8 => Some(Color::Rgba(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])? as f64 / 255.0,
            )),
            _ => None,
        }
    }

    /// Parse a color string, rejecting strings that are neither hex nor a
    /// known color name.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            return Color::from_hex(s);
        }
        let lower = s.to_lowercase();
        if is_named_color(&lower) {
            Some(Color::Named(lower))
        } else {
            None
        }
    }

    /// Convert the color to an SVG-compatible string.
    pub fn to_svg_string(&self) -> String {
        match self {
            Color::Rgb(r, g, b) => format!("#{:02x}{:02x}{:02x}", r, g, b),
            Color::Rgba(r, g, b, a) => format!("rgba({},{},{},{})", r, g, b, a),
            Color::Named(name) => name.clone(),
        }
    }

    // Predefined colors
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    /// Highlight color for the "no" subcategory.
    pub const ALERT_RED: Color = Color::Rgb(0xec, 0x1e, 0x25);
    /// Base color for the "yes" subcategory.
    pub const SILVER_GRAY: Color = Color::Rgb(0xcc, 0xcc, 0xcc);
    /// Caption text color.
    pub const CAPTION_GRAY: Color = Color::Rgb(0x66, 0x66, 0x66);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_svg_string())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_svg_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid color '{}'", s)))
    }
}

/// Whether `name` (lowercase) is a CSS color name accepted in configs.
fn is_named_color(name: &str) -> bool {
    matches!(
        name,
        "black"
            | "white"
            | "red"
            | "green"
            | "blue"
            | "yellow"
            | "orange"
            | "purple"
            | "gray"
            | "grey"
            | "lightgray"
            | "lightgrey"
            | "darkgray"
            | "darkgrey"
            | "silver"
            | "crimson"
            | "firebrick"
            | "steelblue"
            | "navy"
            | "teal"
    )
}
