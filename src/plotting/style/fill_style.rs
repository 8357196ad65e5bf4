//! Fill styling for icons and hit areas.

use super::color::Color;

/// Style configuration for filled shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct FillStyle {
    /// Fill color (None renders `fill="none"`)
    pub color: Option<Color>,
}

impl FillStyle {
    /// Create a new fill style with the given color.
    pub fn new(color: impl Into<Color>) -> Self {
        FillStyle {
            color: Some(color.into()),
        }
    }

    /// Create a fill style with no fill. Used for invisible hit areas.
    pub fn none() -> Self {
        FillStyle { color: None }
    }

    /// Generate SVG style attributes.
    pub fn to_svg_style(&self) -> String {
        match self.color {
            Some(ref color) => format!("fill=\"{}\"", color.to_svg_string()),
            None => "fill=\"none\"".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_fill() {
        assert_eq!(FillStyle::none().to_svg_style(), "fill=\"none\"");
    }

    #[test]
    fn test_icon_fill() {
        let style = FillStyle::new(Color::SILVER_GRAY);
        assert_eq!(style.to_svg_style(), "fill=\"#cccccc\"");
    }
}
