use candid::{CandidType, Deserialize};
use std::fmt;

/// Full published snapshot returned to the frontend - flat row-major cells.
#[derive(CandidType, Deserialize, Clone, Debug)]
pub struct GameState {
    pub cells: Vec<bool>,
    pub width: u32,
    pub height: u32,
    pub generation: u64,
    pub is_running: bool,
    pub tick_interval_ms: u64,
}

/// Lightweight metadata for sync checks (no cells - much faster).
#[derive(CandidType, Deserialize, Clone, Debug)]
pub struct SimInfo {
    pub generation: u64,
    pub is_running: bool,
    pub tick_interval_ms: u64,
    pub live_count: u32,
}

/// Recoverable engine errors. Converted to strings at the candid boundary;
/// state is left unchanged whenever one of these is returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LifeError {
    OutOfBounds { row: usize, col: usize },
    InvalidInterval { ms: u64 },
}

impl fmt::Display for LifeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifeError::OutOfBounds { row, col } => {
                write!(f, "cell ({}, {}) is outside the grid", row, col)
            }
            LifeError::InvalidInterval { ms } => {
                write!(f, "tick interval must be positive, got {} ms", ms)
            }
        }
    }
}

impl From<LifeError> for String {
    fn from(err: LifeError) -> Self {
        err.to_string()
    }
}
