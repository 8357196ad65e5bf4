//! Waffle chart core: grid assignment, interaction and reveal sequencing.
//!
//! The core only talks to the outside through [`RecordSource`] for data and
//! [`Surface`] for drawing.
//!
//! [`RecordSource`]: crate::input::RecordSource

pub mod chart;
pub mod grid;
pub mod interaction;
pub mod layout;
pub mod reveal;
pub mod surface;

pub use chart::{InteractionEvent, WaffleChart};
pub use grid::{GridCell, WaffleGrid, ANSWER_SUBCATEGORY};
pub use interaction::{InteractionKind, Panel, PanelState, UNKNOWN_CAPTION};
pub use reveal::{RevealAnimation, RevealDirection, RevealStep};
pub use surface::{CommandLog, Surface, SurfaceCommand, TimedCommand};
