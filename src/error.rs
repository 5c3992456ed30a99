//! Error types for grid search

use crate::grid::Position;
use thiserror::Error;

/// Usage and configuration errors surfaced by the search core.
///
/// An unreachable target is not an error; a run that finds no path returns
/// an empty path with the explored set populated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("position {pos} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        pos: Position,
        rows: usize,
        cols: usize,
    },

    #[error("grid has no start or no target cell")]
    MissingStartOrTarget,

    #[error("unknown algorithm '{0}' (expected BFS, DFS, UCS, DLS, IDDFS or Bidirectional)")]
    UnknownAlgorithm(String),

    #[error("a {rows}x{cols} grid cannot hold distinct start and target cells")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("invalid grid layout: {0}")]
    InvalidLayout(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
