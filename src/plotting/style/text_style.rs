//! Caption text styling.

use super::color::Color;

/// Text anchor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    /// Anchor at the start (left for LTR text)
    #[default]
    Start,
    /// Anchor at the middle
    Middle,
}

impl TextAnchor {
    pub fn to_svg_string(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
        }
    }
}

/// Style configuration for caption text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_family: String,
    /// Font size in pixels
    pub font_size: f64,
    pub color: Color,
    pub anchor: TextAnchor,
}

impl TextStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Style used for the big guess/answer number under each grid.
    pub fn caption_number(color: Color) -> Self {
        TextStyle::new()
            .font_size(42.0)
            .color(color)
            .anchor(TextAnchor::Middle)
    }

    /// Style used for the explanatory caption lines.
    pub fn caption_text(color: Color) -> Self {
        TextStyle::new()
            .font_size(18.0)
            .color(color)
            .anchor(TextAnchor::Middle)
    }

    /// Generate SVG presentation attributes.
    pub fn to_svg_attrs(&self) -> String {
        let mut attrs = vec![
            format!("font-family=\"{}\"", self.font_family),
            format!("font-size=\"{}\"", self.font_size),
            format!("fill=\"{}\"", self.color.to_svg_string()),
        ];
        if self.anchor != TextAnchor::Start {
            attrs.push(format!("text-anchor=\"{}\"", self.anchor.to_svg_string()));
        }
        attrs.join(" ")
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle {
            font_family: "sans-serif".to_string(),
            font_size: 12.0,
            color: Color::BLACK,
            anchor: TextAnchor::Start,
        }
    }
}
