//! Builder for simulation reports.

use std::fs::File;
use std::path::Path;

use crate::error::{WaffleError, WaffleResult};
use crate::script::PlaybackSummary;
use crate::waffle::{TimedCommand, WaffleChart};

use super::types::{PanelSummary, PlaybackStats, SimulationOutput};

/// Builder for collecting a playback run into a report
pub struct OutputCollector {
    output: SimulationOutput,
}

impl OutputCollector {
    /// Create a new collector with version and timestamp
    pub fn new() -> Self {
        Self {
            output: SimulationOutput {
                version: env!("CARGO_PKG_VERSION").to_string(),
                timestamp: crate::utils::time::utc_now_iso8601(),
                ..Default::default()
            },
        }
    }

    /// Record the data file the chart was built from
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.output.source = Some(source.into());
        self
    }

    /// Summarize every panel of the chart
    pub fn with_panels(mut self, chart: &WaffleChart) -> Self {
        self.output.panels = chart.panels().map(PanelSummary::from).collect();
        self
    }

    /// Set the command stream; commands are ordered by time, keeping issue
    /// order for equal times
    pub fn with_commands(mut self, mut commands: Vec<TimedCommand>) -> Self {
        commands.sort_by_key(|c| c.at_ms);
        self.output.commands = commands;
        self
    }

    /// Set playback counters and end time
    pub fn with_playback(mut self, summary: &PlaybackSummary) -> Self {
        self.output.ended_at_ms = summary.ended_at_ms;
        self.output.playback = Some(PlaybackStats {
            handled: summary.handled,
            ignored: summary.ignored,
            skipped: summary.skipped,
        });
        self
    }

    /// Build and return the final report
    pub fn build(self) -> SimulationOutput {
        self.output
    }

    /// Get a reference to the current output (for inspection)
    pub fn output(&self) -> &SimulationOutput {
        &self.output
    }

    /// Write the report as pretty JSON
    pub fn write_json(&self, path: impl AsRef<Path>) -> WaffleResult<()> {
        self.output.write_json(path)
    }
}

impl Default for OutputCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationOutput {
    /// Write this report to a JSON file
    pub fn write_json(&self, path: impl AsRef<Path>) -> WaffleResult<()> {
        let path = path.as_ref();
        if super::schema::should_validate() {
            let value = serde_json::to_value(self)?;
            if let Err(msg) = super::schema::validate(&value) {
                log::warn!("Schema validation failed for {}: {}", path.display(), msg);
                if cfg!(debug_assertions) {
                    return Err(WaffleError::RenderError(msg));
                }
            }
        }
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        log::info!("Wrote simulation report to {}", path.display());
        Ok(())
    }

    /// Load a report from a JSON file
    pub fn load_json(path: impl AsRef<Path>) -> WaffleResult<Self> {
        let file = File::open(path)?;
        let output: Self = serde_json::from_reader(file)?;
        Ok(output)
    }
}
