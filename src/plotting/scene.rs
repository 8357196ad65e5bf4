//! Retained SVG scene.
//!
//! [`SvgSurface`] keeps the latest state of every panel as commands arrive
//! and can render a full SVG snapshot at any point.

use indexmap::IndexMap;
use log::{info, warn};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::config::{PaletteConfig, WaffleConfig};
use crate::error::{WaffleError, WaffleResult};
use crate::plotting::backend::SvgBackend;
use crate::plotting::element::xml_id;
use crate::plotting::style::{Color, FillStyle, TextStyle};
use crate::waffle::layout::{
    caption_line_offset, caption_number_anchor, caption_text_anchor, CAPTION_NUMBER_SIZE,
    CELL_SIZE, ICON_PATH, ICON_SCALE,
};
use crate::waffle::surface::{Surface, SurfaceCommand};

const ICON_DEF_ID: &str = "waffle-icon";

#[derive(Debug, Clone)]
struct IconScene {
    x: f64,
    y: f64,
    fill: Color,
}

#[derive(Debug, Clone)]
struct PanelScene {
    /// Element id prefix, unique within the document
    id: String,
    origin: (f64, f64),
    icons: Vec<Option<IconScene>>,
    caption_number: String,
    caption_lines: Vec<String>,
    interactive: bool,
}

impl PanelScene {
    fn new(id: String, origin: (f64, f64)) -> Self {
        PanelScene {
            id,
            origin,
            icons: Vec::new(),
            caption_number: String::new(),
            caption_lines: Vec::new(),
            interactive: false,
        }
    }
}

/// Surface that renders the chart as an SVG document.
#[derive(Debug)]
pub struct SvgSurface {
    pub width: f64,
    pub height: f64,
    palette: PaletteConfig,
    panels: IndexMap<String, PanelScene>,
}

impl SvgSurface {
    pub fn new(config: &WaffleConfig) -> Self {
        SvgSurface {
            width: config.layout.canvas_width,
            height: config.layout.canvas_height,
            palette: config.palette.clone(),
            panels: IndexMap::new(),
        }
    }

    /// Element id for a new panel. Categories that sanitize to an id already
    /// in use get their slot number appended.
    fn panel_id(&self, category: &str) -> String {
        let id = xml_id(category);
        if !self.panels.values().any(|p| p.id == id) {
            return id;
        }
        let mut slot = self.panels.len();
        let mut unique = format!("{}-{}", id, slot);
        while self.panels.values().any(|p| p.id == unique) {
            slot += 1;
            unique = format!("{}-{}", id, slot);
        }
        warn!(
            "category '{}' maps to element id '{}' already in use; using '{}'",
            category, id, unique
        );
        unique
    }

    fn panel_mut(&mut self, category: &str) -> WaffleResult<&mut PanelScene> {
        self.panels.get_mut(category).ok_or_else(|| {
            WaffleError::RenderError(format!("panel '{}' used before it was drawn", category))
        })
    }

    /// Current fill of an icon, if drawn.
    pub fn icon_fill(&self, category: &str, index: usize) -> Option<&Color> {
        self.panels
            .get(category)?
            .icons
            .get(index)?
            .as_ref()
            .map(|icon| &icon.fill)
    }

    pub fn caption_number(&self, category: &str) -> Option<&str> {
        self.panels.get(category).map(|p| p.caption_number.as_str())
    }

    pub fn is_interactive(&self, category: &str) -> bool {
        self.panels.get(category).is_some_and(|p| p.interactive)
    }

    /// Render the current scene to an SVG string.
    pub fn render(&self) -> String {
        let mut backend = SvgBackend::new(self.width, self.height);
        backend.add_def(format!(
            "<path id=\"{}\" d=\"{}\" transform=\"scale({})\"/>",
            ICON_DEF_ID, ICON_PATH, ICON_SCALE
        ));

        let number_style = TextStyle::caption_number(self.palette.highlight.clone());
        let text_style = TextStyle::caption_text(self.palette.caption_text.clone());

        for panel in self.panels.values() {
            let id = &panel.id;
            backend.start_translated_group(panel.origin.0, panel.origin.1, &format!("id=\"{}\"", id));

            for (index, icon) in panel.icons.iter().enumerate() {
                let Some(icon) = icon else { continue };
                backend.start_translated_group(icon.x, icon.y, "");
                backend.draw_use(
                    ICON_DEF_ID,
                    &FillStyle::new(icon.fill.clone()),
                    &format!("class=\"grid-icon\" id=\"{}-icon-{}\"", id, index),
                );
                // Invisible hit area for pointer events.
                let pointer = if panel.interactive { "all" } else { "none" };
                backend.draw_rect(
                    0.0,
                    0.0,
                    CELL_SIZE,
                    CELL_SIZE,
                    &FillStyle::none(),
                    &format!("class=\"grid-rect\" pointer-events=\"{}\"", pointer),
                );
                backend.end_group();
            }

            let (nx, ny) = caption_number_anchor();
            backend.start_translated_group(nx, ny, "");
            backend.draw_text(
                0.0,
                CAPTION_NUMBER_SIZE,
                &panel.caption_number,
                &number_style,
                &format!("id=\"{}-caption-number\"", id),
            );
            backend.end_group();

            if !panel.caption_lines.is_empty() {
                let (tx, ty) = caption_text_anchor();
                let lines: Vec<(f64, f64, String)> = panel
                    .caption_lines
                    .iter()
                    .enumerate()
                    .map(|(i, line)| (0.0, caption_line_offset(i), line.clone()))
                    .collect();
                backend.start_translated_group(tx, ty, "");
                backend.draw_text_lines(&lines, &text_style, "class=\"caption-text\"");
                backend.end_group();
            }

            backend.end_group();
        }

        backend.render()
    }

    /// Save the current scene to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> WaffleResult<()> {
        let svg = self.render();
        let mut file = File::create(path.as_ref())?;
        file.write_all(svg.as_bytes())?;
        info!("Wrote SVG to {}", path.as_ref().display());
        Ok(())
    }
}

impl Surface for SvgSurface {
    fn apply(&mut self, command: &SurfaceCommand) -> WaffleResult<()> {
        match command {
            SurfaceCommand::DrawPanel { category, origin } => {
                let id = match self.panels.get(category) {
                    Some(existing) => existing.id.clone(),
                    None => self.panel_id(category),
                };
                self.panels.insert(category.clone(), PanelScene::new(id, *origin));
            }
            SurfaceCommand::DrawIcon { category, index, x, y } => {
                let base = self.palette.base.clone();
                let panel = self.panel_mut(category)?;
                if panel.icons.len() <= *index {
                    panel.icons.resize(*index + 1, None);
                }
                panel.icons[*index] = Some(IconScene {
                    x: *x,
                    y: *y,
                    fill: base,
                });
            }
            SurfaceCommand::SetIconFill { category, index, fill } => {
                let panel = self.panel_mut(category)?;
                let icon = panel
                    .icons
                    .get_mut(*index)
                    .and_then(Option::as_mut)
                    .ok_or_else(|| {
                        WaffleError::RenderError(format!(
                            "icon {} of '{}' styled before it was drawn",
                            index, category
                        ))
                    })?;
                icon.fill = fill.clone();
            }
            SurfaceCommand::SetCaptionNumber { category, text } => {
                self.panel_mut(category)?.caption_number = text.clone();
            }
            SurfaceCommand::DrawCaptionText { category, lines } => {
                self.panel_mut(category)?.caption_lines = lines.clone();
            }
            SurfaceCommand::SetInteractive { category, enabled } => {
                self.panel_mut(category)?.interactive = *enabled;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface_with_panel() -> SvgSurface {
        let mut surface = SvgSurface::new(&WaffleConfig::default());
        surface
            .apply(&SurfaceCommand::DrawPanel {
                category: "water".into(),
                origin: (20.0, 20.0),
            })
            .unwrap();
        surface
            .apply(&SurfaceCommand::DrawIcon {
                category: "water".into(),
                index: 0,
                x: 0.0,
                y: 180.0,
            })
            .unwrap();
        surface
    }

    #[test]
    fn test_icon_starts_with_base_fill() {
        let surface = surface_with_panel();
        assert_eq!(surface.icon_fill("water", 0), Some(&Color::SILVER_GRAY));
        assert_eq!(surface.icon_fill("water", 1), None);
    }

    #[test]
    fn test_commands_before_panel_fail() {
        let mut surface = SvgSurface::new(&WaffleConfig::default());
        let result = surface.apply(&SurfaceCommand::SetCaptionNumber {
            category: "water".into(),
            text: "?".into(),
        });
        assert!(matches!(result, Err(WaffleError::RenderError(_))));
    }

    #[test]
    fn test_fill_of_undrawn_icon_fails() {
        let mut surface = surface_with_panel();
        let result = surface.apply(&SurfaceCommand::SetIconFill {
            category: "water".into(),
            index: 5,
            fill: Color::ALERT_RED,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_render_snapshot() {
        let mut surface = surface_with_panel();
        for cmd in [
            SurfaceCommand::SetIconFill {
                category: "water".into(),
                index: 0,
                fill: Color::ALERT_RED,
            },
            SurfaceCommand::SetCaptionNumber {
                category: "water".into(),
                text: "1".into(),
            },
            SurfaceCommand::DrawCaptionText {
                category: "water".into(),
                lines: vec!["would have no clean,".into(), "safe water to drink".into()],
            },
            SurfaceCommand::SetInteractive {
                category: "water".into(),
                enabled: true,
            },
        ] {
            surface.apply(&cmd).unwrap();
        }

        let svg = surface.render();
        assert!(svg.contains("width=\"720\" height=\"680\""));
        assert!(svg.contains("<g id=\"water\" transform=\"translate(20, 20)\">"));
        assert!(svg.contains("id=\"water-icon-0\" fill=\"#ec1e25\""));
        assert!(svg.contains("pointer-events=\"all\""));
        assert!(svg.contains(">1</text>"));
        assert!(svg.contains("<tspan x=\"0\" y=\"40\">safe water to drink</tspan>"));
        assert!(svg.contains("transform=\"scale(0.035)\""));
    }

    #[test]
    fn test_colliding_ids_get_slot_suffix() {
        let mut surface = SvgSurface::new(&WaffleConfig::default());
        for (category, x) in [("clean water", 20.0), ("clean_water", 260.0), ("clean water", 20.0)] {
            surface
                .apply(&SurfaceCommand::DrawPanel {
                    category: category.into(),
                    origin: (x, 20.0),
                })
                .unwrap();
        }

        let svg = surface.render();
        assert_eq!(svg.matches("<g id=\"clean_water\"").count(), 1);
        assert!(svg.contains("<g id=\"clean_water-1\" transform=\"translate(260, 20)\">"));
    }
}
