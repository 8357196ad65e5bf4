//! Scripted interaction playback.
//!
//! A script is a JSON array of timed pointer events:
//!
//! ```json
//! [
//!   {"at_ms": 0,   "category": "water", "event": "hover", "cell": 14},
//!   {"at_ms": 400, "category": "water", "event": "click", "cell": 14}
//! ]
//! ```

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{WaffleError, WaffleResult};
use crate::waffle::{InteractionEvent, InteractionKind, Surface, WaffleChart};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptAction {
    Hover,
    Leave,
    Click,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptEvent {
    pub at_ms: u64,
    pub category: String,
    pub event: ScriptAction,
    pub cell: usize,
}

impl ScriptEvent {
    pub fn to_interaction(&self) -> InteractionEvent {
        let kind = match self.event {
            ScriptAction::Hover => InteractionKind::Hover(self.cell),
            ScriptAction::Leave => InteractionKind::Leave(self.cell),
            ScriptAction::Click => InteractionKind::Click(self.cell),
        };
        InteractionEvent::new(self.category.clone(), kind)
    }
}

/// Timed events, kept sorted by time. Events at the same time keep their
/// file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionScript {
    events: Vec<ScriptEvent>,
}

impl InteractionScript {
    pub fn new(mut events: Vec<ScriptEvent>) -> Self {
        events.sort_by_key(|e| e.at_ms);
        InteractionScript { events }
    }

    pub fn from_json(json: &str) -> WaffleResult<Self> {
        let events: Vec<ScriptEvent> = serde_json::from_str(json)?;
        Ok(Self::new(events))
    }

    pub fn load(path: impl AsRef<Path>) -> WaffleResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            WaffleError::Io(std::io::Error::other(format!(
                "Error opening script {}: {}",
                path.display(),
                e
            )))
        })?;
        let events: Vec<ScriptEvent> = serde_json::from_reader(BufReader::new(file))?;
        info!("Loaded {} scripted events from {}", events.len(), path.display());
        Ok(Self::new(events))
    }

    pub fn events(&self) -> &[ScriptEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Outcome of a playback run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackSummary {
    pub handled: usize,
    pub ignored: usize,
    /// Events after the cut-off time that were not played
    pub skipped: usize,
    pub ended_at_ms: u64,
}

/// Play `script` against `chart`, ticking animations up to each event.
///
/// With `until_ms` the run stops at that time, leaving later events unplayed
/// and reveals possibly mid-flight. Without it, the run continues until every
/// reveal has finished.
pub fn play(
    chart: &mut WaffleChart,
    surface: &mut dyn Surface,
    script: &InteractionScript,
    until_ms: Option<u64>,
) -> WaffleResult<PlaybackSummary> {
    let mut summary = PlaybackSummary::default();
    let mut now = 0;

    for event in script.events() {
        if until_ms.is_some_and(|until| event.at_ms > until) {
            summary.skipped += 1;
            continue;
        }
        now = event.at_ms;
        chart.tick(now, surface)?;
        if chart.dispatch(&event.to_interaction(), now, surface)? {
            summary.handled += 1;
        } else {
            summary.ignored += 1;
        }
    }

    let end = match until_ms {
        Some(until) => until,
        None => chart.pending_until_ms().unwrap_or(now).max(now),
    };
    chart.tick(end, surface)?;
    summary.ended_at_ms = end;
    debug!("playback summary: {:?}", summary);
    Ok(summary)
}
