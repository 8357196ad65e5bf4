//! SVG rendering backend.

use crate::plotting::element::text::escape_xml;
use crate::plotting::style::{FillStyle, TextStyle};

/// SVG document builder.
#[derive(Debug)]
pub struct SvgBackend {
    /// Image width in pixels
    pub width: f64,
    /// Image height in pixels
    pub height: f64,
    /// SVG content accumulated during rendering
    content: Vec<String>,
    /// SVG defs section (shared symbols, etc.)
    defs: Vec<String>,
    /// Current group nesting, used for indentation
    depth: usize,
}

impl SvgBackend {
    /// Create a new SVG backend with the given dimensions.
    pub fn new(width: f64, height: f64) -> Self {
        SvgBackend {
            width,
            height,
            content: Vec::new(),
            defs: Vec::new(),
            depth: 0,
        }
    }

    fn push(&mut self, line: String) {
        self.content.push(format!("{}{}", "  ".repeat(self.depth), line));
    }

    /// Add content to the defs section.
    pub fn add_def(&mut self, def: String) {
        self.defs.push(def);
    }

    /// Reference a symbol from the defs section.
    pub fn draw_use(&mut self, href: &str, style: &FillStyle, attrs: &str) {
        let attrs = if attrs.is_empty() { String::new() } else { format!(" {}", attrs) };
        self.push(format!(
            "<use href=\"#{}\"{} {}/>",
            href,
            attrs,
            style.to_svg_style()
        ));
    }

    /// Draw a rectangle.
    pub fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, style: &FillStyle, attrs: &str) {
        let attrs = if attrs.is_empty() { String::new() } else { format!(" {}", attrs) };
        self.push(format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{} {}/>",
            x, y, width, height,
            attrs,
            style.to_svg_style()
        ));
    }

    /// Draw single-line text.
    pub fn draw_text(&mut self, x: f64, y: f64, text: &str, style: &TextStyle, attrs: &str) {
        let attrs = if attrs.is_empty() { String::new() } else { format!(" {}", attrs) };
        self.push(format!(
            "<text x=\"{}\" y=\"{}\"{} {}>{}</text>",
            x, y,
            attrs,
            style.to_svg_attrs(),
            escape_xml(text)
        ));
    }

    /// Draw multi-line text; each line is a `<tspan>` at its own `(x, y)`.
    pub fn draw_text_lines(&mut self, lines: &[(f64, f64, String)], style: &TextStyle, attrs: &str) {
        if lines.is_empty() {
            return;
        }
        let attrs = if attrs.is_empty() { String::new() } else { format!(" {}", attrs) };
        let spans: String = lines
            .iter()
            .map(|(x, y, text)| format!("<tspan x=\"{}\" y=\"{}\">{}</tspan>", x, y, escape_xml(text)))
            .collect();
        self.push(format!("<text{} {}>{}</text>", attrs, style.to_svg_attrs(), spans));
    }

    fn start_group(&mut self, attrs: &str) {
        if attrs.is_empty() {
            self.push("<g>".to_string());
        } else {
            self.push(format!("<g {}>", attrs));
        }
        self.depth += 1;
    }

    /// Start a group translated by `(x, y)`.
    pub fn start_translated_group(&mut self, x: f64, y: f64, attrs: &str) {
        let transform = format!("transform=\"translate({}, {})\"", x, y);
        if attrs.is_empty() {
            self.start_group(&transform);
        } else {
            self.start_group(&format!("{} {}", attrs, transform));
        }
    }

    /// End the current group.
    pub fn end_group(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.push("</g>".to_string());
    }

    /// Render the final SVG string.
    pub fn render(self) -> String {
        let defs_section = if self.defs.is_empty() {
            String::new()
        } else {
            format!("  <defs>\n    {}\n  </defs>\n", self.defs.join("\n    "))
        };

        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">
{}  {}
</svg>"#,
            self.width,
            self.height,
            self.width,
            self.height,
            defs_section,
            self.content.join("\n  ")
        )
    }
}
