//! Interactive waffle charts.
//!
//! Each statistical category becomes a 10x10 grid of people. Hovering a cell
//! previews a guess, clicking it locks the guess in and animates the reveal
//! of the true count.

pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod plotting;
pub mod script;
pub mod utils;
pub mod waffle;

pub use config::WaffleConfig;
pub use error::{WaffleError, WaffleResult};
pub use input::{CategoryRecord, CsvSource, MemorySource, RecordSource};
pub use waffle::{InteractionEvent, InteractionKind, WaffleChart};
