use thiserror::Error;

use crate::state::{MAX_GRID_DIM, Mode};

/// Errors reported by the grid model and its session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CrosswordError {
    /// The requested mode is not one of char, type or hint
    #[error("Invalid mode request: {0:?}")]
    InvalidModeRequest(String),

    /// Cell types can only be changed in type mode
    #[error("Operation not applicable in {mode} mode")]
    InapplicableOperation { mode: Mode },

    /// The rendering side produced an id without a numeric suffix
    #[error("Malformed cell identifier: {0:?}")]
    MalformedIdentifier(String),

    #[error("No cell with id {0}")]
    UnknownCell(usize),

    #[error(
        "Grid must have between 1 and {max} rows and columns (got {rows}x{cols})",
        max = MAX_GRID_DIM
    )]
    InvalidDimensions { rows: usize, cols: usize },
}
