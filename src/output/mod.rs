//! Simulation report output
//!
//! - `SimulationOutput`: final panel states plus the time-stamped command stream
//! - `OutputCollector`: builder used by the CLI after a playback run
//!
//! # Example
//!
//! ```ignore
//! use waffle_reveal::output::OutputCollector;
//!
//! let collector = OutputCollector::new()
//!     .with_source("data/data.csv")
//!     .with_panels(&chart)
//!     .with_playback(&summary)
//!     .with_commands(log.into_commands());
//! collector.write_json("report.json")?;
//! ```

pub mod collector;
pub mod schema;
pub mod types;

pub use collector::OutputCollector;
pub use types::{PanelSummary, PlaybackStats, SimulationOutput};
