//! Simulation report structures.
//!
//! A report captures the final state of every panel together with the full,
//! time-stamped stream of surface commands a playback produced.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::waffle::{Panel, TimedCommand};

/// Top-level simulation report
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SimulationOutput {
    /// Tool version
    pub version: String,

    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,

    /// Data file the chart was built from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Clock time at which playback stopped
    pub ended_at_ms: u64,

    /// Per-category outcome, in panel order
    pub panels: Vec<PanelSummary>,

    /// Event counts from the script
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playback: Option<PlaybackStats>,

    /// Every surface command issued, ordered by time
    pub commands: Vec<TimedCommand>,
}

/// Final state of one panel
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PanelSummary {
    pub category: String,
    /// Number of grid cells drawn
    pub cells: usize,
    /// True highlighted count
    pub answer: usize,
    /// "idle", "previewing", "revealing" or "revealed"
    pub final_state: String,
    /// Committed or previewed guess as a count (cell index + 1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guess: Option<usize>,
    /// Caption number currently shown
    pub caption_number: String,
    /// Number of cells currently highlighted
    pub highlighted: usize,
}

impl From<&Panel> for PanelSummary {
    fn from(panel: &Panel) -> Self {
        PanelSummary {
            category: panel.category().to_string(),
            cells: panel.grid.len(),
            answer: panel.grid.answer(),
            final_state: panel.state().name().to_string(),
            guess: panel.state().guess().map(|g| g + 1),
            caption_number: panel.caption_number().to_string(),
            highlighted: panel.highlighted_cells().len(),
        }
    }
}

/// Script playback counters
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema)]
pub struct PlaybackStats {
    pub handled: usize,
    pub ignored: usize,
    pub skipped: usize,
}
