//! Error types for waffle chart operations.

use std::fmt;
use std::io;

/// The main error type for waffle chart operations.
#[derive(Debug)]
pub enum WaffleError {
    /// Error during IO operations (file reading/writing)
    Io(io::Error),
    /// Malformed tabular input
    Csv(csv::Error),
    /// Malformed JSON (configuration or interaction scripts)
    Json(serde_json::Error),
    /// Invalid data provided for a category
    InvalidData(String),
    /// Invalid configuration or parameters
    InvalidConfig(String),
    /// A category has no "no" record, so there is nothing to reveal
    MissingAnswer(String),
    /// A category produced more cells than the grid can hold
    GridOverflow { category: String, cells: usize },
    /// An event referenced a cell the grid does not have
    CellOutOfRange { category: String, index: usize, len: usize },
    /// An event referenced a category that has no panel
    UnknownCategory(String),
    /// Rendering error
    RenderError(String),
}

impl fmt::Display for WaffleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaffleError::Io(err) => write!(f, "IO error: {}", err),
            WaffleError::Csv(err) => write!(f, "CSV error: {}", err),
            WaffleError::Json(err) => write!(f, "JSON error: {}", err),
            WaffleError::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
            WaffleError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            WaffleError::MissingAnswer(category) => {
                write!(f, "Category '{}' has no \"no\" subcategory record", category)
            }
            WaffleError::GridOverflow { category, cells } => write!(
                f,
                "Category '{}' needs {} cells but the grid holds {}",
                category,
                cells,
                crate::waffle::layout::GRID_CAPACITY
            ),
            WaffleError::CellOutOfRange { category, index, len } => write!(
                f,
                "Cell {} is out of range for category '{}' ({} cells)",
                index, category, len
            ),
            WaffleError::UnknownCategory(category) => write!(f, "Unknown category '{}'", category),
            WaffleError::RenderError(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for WaffleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WaffleError::Io(err) => Some(err),
            WaffleError::Csv(err) => Some(err),
            WaffleError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for WaffleError {
    fn from(err: io::Error) -> Self {
        WaffleError::Io(err)
    }
}

impl From<csv::Error> for WaffleError {
    fn from(err: csv::Error) -> Self {
        WaffleError::Csv(err)
    }
}

impl From<serde_json::Error> for WaffleError {
    fn from(err: serde_json::Error) -> Self {
        WaffleError::Json(err)
    }
}

/// Result type alias for waffle chart operations.
pub type WaffleResult<T> = Result<T, WaffleError>;
