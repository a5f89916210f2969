use thiserror::Error;

use super::config::ConfigError;
use crate::core::models::grid::GridError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid grid: {reason}")]
    InvalidGrid { reason: String },

    #[error("Cell ({x}, {y}) is supercharged but inactive")]
    ContradictoryCell { x: usize, y: usize },

    #[error("Grid references a module that is not in the catalog (cell ({x}, {y}))")]
    UnknownModule { x: usize, y: usize },

    #[error("Module '{id}' is assigned to more than one cell")]
    DuplicatePlacement { id: String },

    #[error("Invalid scoring policy: {0}")]
    InvalidPolicy(String),

    #[error("Invalid solver parameters: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Grid operation failed: {source}")]
    Grid {
        #[from]
        source: GridError,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}

impl EngineError {
    /// Distinguishes input rejection (detected before annealing starts) from
    /// invariant violations mid-run. Adapter layers surface the two
    /// differently: invalid input is the caller's problem, an internal error
    /// is a bug.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, EngineError::Internal(_))
    }
}
