//! Per-panel interaction state machine.
//!
//! ```text
//!          hover            click
//!   Idle ---------> Previewing ------> Revealing --tick--> Revealed
//!    ^  <--------- /   ^    |             (handlers detached)
//!    |    leave        +----+
//!    +---- click ------------------------^   hover
//! ```

use log::{debug, info};

use crate::config::{PaletteConfig, TimingConfig};
use crate::error::WaffleResult;

use super::grid::WaffleGrid;
use super::layout::cell_origin;
use super::reveal::RevealAnimation;
use super::surface::{Surface, SurfaceCommand};

/// Caption number shown before any guess.
pub const UNKNOWN_CAPTION: &str = "?";

/// Pointer events a panel reacts to. Cell indexes are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    Hover(usize),
    Leave(usize),
    Click(usize),
}

impl InteractionKind {
    pub fn cell(&self) -> usize {
        match *self {
            InteractionKind::Hover(c) | InteractionKind::Leave(c) | InteractionKind::Click(c) => c,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelState {
    Idle,
    Previewing { guess: usize },
    Revealing { animation: RevealAnimation },
    Revealed { guess: usize },
}

impl PanelState {
    pub fn name(&self) -> &'static str {
        match self {
            PanelState::Idle => "idle",
            PanelState::Previewing { .. } => "previewing",
            PanelState::Revealing { .. } => "revealing",
            PanelState::Revealed { .. } => "revealed",
        }
    }

    /// Cell the user committed to or is currently previewing.
    pub fn guess(&self) -> Option<usize> {
        match self {
            PanelState::Idle => None,
            PanelState::Previewing { guess } | PanelState::Revealed { guess } => Some(*guess),
            PanelState::Revealing { animation } => Some(animation.guess),
        }
    }

    /// Pointer handlers are attached only before the first click.
    pub fn accepts_pointer(&self) -> bool {
        matches!(self, PanelState::Idle | PanelState::Previewing { .. })
    }
}

/// One category's grid, captions and interaction state.
#[derive(Debug, Clone)]
pub struct Panel {
    pub grid: WaffleGrid,
    pub origin: (f64, f64),
    pub captions: Vec<String>,
    palette: PaletteConfig,
    timing: TimingConfig,
    state: PanelState,
    highlighted: Vec<bool>,
    caption_number: String,
}

impl Panel {
    pub fn new(
        grid: WaffleGrid,
        origin: (f64, f64),
        captions: Vec<String>,
        palette: PaletteConfig,
        timing: TimingConfig,
    ) -> Self {
        let len = grid.len();
        Panel {
            grid,
            origin,
            captions,
            palette,
            timing,
            state: PanelState::Idle,
            highlighted: vec![false; len],
            caption_number: UNKNOWN_CAPTION.to_string(),
        }
    }

    pub fn category(&self) -> &str {
        &self.grid.category
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    /// Currently highlighted cell indexes, ascending.
    pub fn highlighted_cells(&self) -> Vec<usize> {
        self.highlighted
            .iter()
            .enumerate()
            .filter_map(|(i, &h)| h.then_some(i))
            .collect()
    }

    pub fn caption_number(&self) -> &str {
        &self.caption_number
    }

    pub fn is_revealing(&self) -> bool {
        matches!(self.state, PanelState::Revealing { .. })
    }

    /// Emit the initial drawing of this panel.
    pub fn draw(&mut self, surface: &mut dyn Surface) -> WaffleResult<()> {
        let category = self.category().to_string();
        surface.apply(&SurfaceCommand::DrawPanel {
            category: category.clone(),
            origin: self.origin,
        })?;
        for cell in self.grid.cells() {
            let (x, y) = cell_origin(cell);
            surface.apply(&SurfaceCommand::DrawIcon {
                category: category.clone(),
                index: cell.index,
                x,
                y,
            })?;
        }
        self.set_caption(surface, UNKNOWN_CAPTION.to_string())?;
        surface.apply(&SurfaceCommand::DrawCaptionText {
            category: category.clone(),
            lines: self.captions.clone(),
        })?;
        surface.apply(&SurfaceCommand::SetInteractive {
            category,
            enabled: true,
        })
    }

    /// Handle a pointer event at clock time `now_ms`.
    ///
    /// Returns `Ok(false)` when the event does not apply in the current state.
    pub fn handle(
        &mut self,
        kind: InteractionKind,
        now_ms: u64,
        surface: &mut dyn Surface,
    ) -> WaffleResult<bool> {
        self.grid.check_index(kind.cell())?;
        if !self.state.accepts_pointer() {
            debug!(
                "{}: ignoring {:?} while {}",
                self.category(),
                kind,
                self.state.name()
            );
            return Ok(false);
        }

        match kind {
            InteractionKind::Hover(cell) => {
                self.preview(cell, surface)?;
                self.state = PanelState::Previewing { guess: cell };
                Ok(true)
            }
            InteractionKind::Leave(_) => {
                if !matches!(self.state, PanelState::Previewing { .. }) {
                    debug!("{}: leave without preview", self.category());
                    return Ok(false);
                }
                self.clear_preview(surface)?;
                self.state = PanelState::Idle;
                Ok(true)
            }
            InteractionKind::Click(cell) => {
                self.click(cell, now_ms, surface)?;
                Ok(true)
            }
        }
    }

    /// Advance a running reveal to `now_ms`.
    pub fn tick(&mut self, now_ms: u64, surface: &mut dyn Surface) -> WaffleResult<()> {
        let PanelState::Revealing { ref mut animation } = self.state else {
            return Ok(());
        };
        let steps = animation.due(now_ms).to_vec();
        let finished = animation.is_finished();
        let guess = animation.guess;

        for step in steps {
            surface.advance_clock(step.ends_at_ms);
            self.set_fill(surface, step.cell, step.highlight)?;
            self.set_caption(surface, step.caption.to_string())?;
        }
        if finished {
            info!(
                "{}: revealed answer {} (guessed {})",
                self.category(),
                self.grid.answer(),
                guess + 1
            );
            self.state = PanelState::Revealed { guess };
        }
        Ok(())
    }

    fn click(&mut self, cell: usize, now_ms: u64, surface: &mut dyn Surface) -> WaffleResult<()> {
        // A click always lands on a hovered cell; replay the preview when the
        // pointer skipped it.
        if self.state != (PanelState::Previewing { guess: cell }) {
            self.preview(cell, surface)?;
        }
        surface.apply(&SurfaceCommand::SetInteractive {
            category: self.category().to_string(),
            enabled: false,
        })?;

        let animation = RevealAnimation::plan(cell, self.grid.answer(), &self.timing, now_ms);
        debug!(
            "{}: click on cell {}, reveal {:?} finishing at {} ms",
            self.category(),
            cell,
            animation.direction(),
            animation.finish_time_ms()
        );
        self.state = PanelState::Revealing { animation };
        // Settles immediately when there is nothing to animate.
        self.tick(now_ms, surface)
    }

    fn preview(&mut self, guess: usize, surface: &mut dyn Surface) -> WaffleResult<()> {
        for index in 0..self.grid.len() {
            self.set_fill(surface, index, index <= guess)?;
        }
        self.set_caption(surface, (guess + 1).to_string())
    }

    fn clear_preview(&mut self, surface: &mut dyn Surface) -> WaffleResult<()> {
        for index in 0..self.grid.len() {
            self.set_fill(surface, index, false)?;
        }
        self.set_caption(surface, UNKNOWN_CAPTION.to_string())
    }

    fn set_fill(&mut self, surface: &mut dyn Surface, index: usize, highlight: bool) -> WaffleResult<()> {
        self.highlighted[index] = highlight;
        let fill = if highlight {
            self.palette.highlight.clone()
        } else {
            self.palette.base.clone()
        };
        surface.apply(&SurfaceCommand::SetIconFill {
            category: self.grid.category.clone(),
            index,
            fill,
        })
    }

    fn set_caption(&mut self, surface: &mut dyn Surface, text: String) -> WaffleResult<()> {
        self.caption_number = text.clone();
        surface.apply(&SurfaceCommand::SetCaptionNumber {
            category: self.grid.category.clone(),
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::CategoryRecord;
    use crate::waffle::surface::CommandLog;

    fn panel(answer: f64) -> Panel {
        let records = vec![
            CategoryRecord::new("water", "no", answer),
            CategoryRecord::new("water", "yes", 100.0 - answer),
        ];
        let grid = WaffleGrid::build("water", &records).unwrap();
        Panel::new(
            grid,
            (20.0, 20.0),
            vec!["would have no clean,".into()],
            PaletteConfig::default(),
            TimingConfig::default(),
        )
    }

    #[test]
    fn test_hover_previews_guess() {
        let mut p = panel(11.0);
        let mut log = CommandLog::new();
        assert!(p.handle(InteractionKind::Hover(4), 0, &mut log).unwrap());
        assert_eq!(p.highlighted_cells(), vec![0, 1, 2, 3, 4]);
        assert_eq!(p.caption_number(), "5");
        assert_eq!(p.state(), &PanelState::Previewing { guess: 4 });
        // One fill per cell plus the caption.
        assert_eq!(log.commands().len(), 101);
    }

    #[test]
    fn test_leave_resets_preview() {
        let mut p = panel(11.0);
        let mut log = CommandLog::new();
        p.handle(InteractionKind::Hover(30), 0, &mut log).unwrap();
        assert!(p.handle(InteractionKind::Leave(30), 5, &mut log).unwrap());
        assert!(p.highlighted_cells().is_empty());
        assert_eq!(p.caption_number(), UNKNOWN_CAPTION);
        assert_eq!(p.state(), &PanelState::Idle);
        assert!(!p.handle(InteractionKind::Leave(30), 6, &mut log).unwrap());
    }

    #[test]
    fn test_click_reveals_and_locks() {
        let mut p = panel(11.0);
        let mut log = CommandLog::new();
        p.handle(InteractionKind::Hover(14), 0, &mut log).unwrap();
        p.handle(InteractionKind::Click(14), 100, &mut log).unwrap();
        assert!(p.is_revealing());

        // Handlers are detached: later pointer events are ignored.
        assert!(!p.handle(InteractionKind::Hover(50), 120, &mut log).unwrap());
        assert!(!p.handle(InteractionKind::Leave(50), 130, &mut log).unwrap());
        assert_eq!(p.state().guess(), Some(14));

        p.tick(200, &mut log).unwrap();
        assert_eq!(p.caption_number(), "13");
        p.tick(1_000, &mut log).unwrap();
        assert_eq!(p.state(), &PanelState::Revealed { guess: 14 });
        assert_eq!(p.highlighted_cells(), (0..11).collect::<Vec<_>>());
        assert_eq!(p.caption_number(), "11");
    }

    #[test]
    fn test_click_without_hover_applies_preview() {
        let mut p = panel(40.0);
        let mut log = CommandLog::new();
        p.handle(InteractionKind::Click(9), 0, &mut log).unwrap();
        assert_eq!(p.caption_number(), "10");
        assert_eq!(p.highlighted_cells().len(), 10);
        p.tick(u64::MAX, &mut log).unwrap();
        assert_eq!(p.highlighted_cells().len(), 40);
        assert_eq!(p.caption_number(), "40");
    }

    #[test]
    fn test_exact_click_settles_immediately() {
        let mut p = panel(11.0);
        let mut log = CommandLog::new();
        p.handle(InteractionKind::Click(10), 0, &mut log).unwrap();
        assert_eq!(p.state(), &PanelState::Revealed { guess: 10 });
        assert_eq!(p.caption_number(), "11");
    }

    #[test]
    fn test_out_of_range_cell() {
        let mut p = panel(11.0);
        let mut log = CommandLog::new();
        assert!(p.handle(InteractionKind::Hover(100), 0, &mut log).is_err());
        assert!(log.commands().is_empty());
    }

    #[test]
    fn test_draw_emits_panel_commands() {
        let mut p = panel(11.0);
        let mut log = CommandLog::new();
        p.draw(&mut log).unwrap();
        let cmds = log.commands();
        assert_eq!(cmds.len(), 104);
        assert!(matches!(cmds[0].command, SurfaceCommand::DrawPanel { .. }));
        assert!(matches!(
            cmds[1].command,
            SurfaceCommand::DrawIcon { index: 0, x, y, .. } if x == 0.0 && y == 180.0
        ));
        assert!(matches!(
            cmds.last().unwrap().command,
            SurfaceCommand::SetInteractive { enabled: true, .. }
        ));
    }
}
