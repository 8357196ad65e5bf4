//! Rendering surface commands.
//!
//! The chart never draws directly; it emits [`SurfaceCommand`]s to whatever
//! [`Surface`] the caller provides.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::WaffleResult;
use crate::plotting::Color;

/// A draw or style command addressed to one panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SurfaceCommand {
    /// Create the panel group at `origin` on the canvas
    DrawPanel { category: String, origin: (f64, f64) },
    /// Draw a person icon, base colored, at `(x, y)` within the panel
    DrawIcon {
        category: String,
        index: usize,
        x: f64,
        y: f64,
    },
    /// Restyle an existing icon
    SetIconFill {
        category: String,
        index: usize,
        #[schemars(with = "String")]
        fill: Color,
    },
    /// Replace the caption number text ("?" or a count)
    SetCaptionNumber { category: String, text: String },
    /// Draw the explanatory caption lines
    DrawCaptionText { category: String, lines: Vec<String> },
    /// Attach or detach the panel's pointer handlers
    SetInteractive { category: String, enabled: bool },
}

impl SurfaceCommand {
    pub fn category(&self) -> &str {
        match self {
            SurfaceCommand::DrawPanel { category, .. }
            | SurfaceCommand::DrawIcon { category, .. }
            | SurfaceCommand::SetIconFill { category, .. }
            | SurfaceCommand::SetCaptionNumber { category, .. }
            | SurfaceCommand::DrawCaptionText { category, .. }
            | SurfaceCommand::SetInteractive { category, .. } => category,
        }
    }
}

/// Anything that can carry out surface commands.
pub trait Surface {
    fn apply(&mut self, command: &SurfaceCommand) -> WaffleResult<()>;

    /// Informs the surface of the current animation clock. Surfaces that do
    /// not care about time ignore it.
    fn advance_clock(&mut self, _now_ms: u64) {}
}

/// A command together with the clock time at which it was issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TimedCommand {
    pub at_ms: u64,
    pub command: SurfaceCommand,
}

/// Surface that records every command it receives, stamped with the clock
/// time last reported through [`Surface::advance_clock`].
#[derive(Debug, Default)]
pub struct CommandLog {
    now_ms: u64,
    commands: Vec<TimedCommand>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[TimedCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<TimedCommand> {
        self.commands
    }

    /// Commands addressed to `category`, in issue order.
    pub fn for_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a TimedCommand> {
        self.commands
            .iter()
            .filter(move |c| c.command.category() == category)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for CommandLog {
    fn apply(&mut self, command: &SurfaceCommand) -> WaffleResult<()> {
        self.commands.push(TimedCommand {
            at_ms: self.now_ms,
            command: command.clone(),
        });
        Ok(())
    }

    fn advance_clock(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
    }
}
