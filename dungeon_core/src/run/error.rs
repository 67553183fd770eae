use super::RunPhase;
use crate::types::FloorId;
use thiserror::Error;

/// Errors returned by run transitions
///
/// Every variant except `RetreatBlocked` means the caller broke the run
/// protocol. `RetreatBlocked` is a rule of the game: retreat is not allowed
/// with a boss fight coming up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("Run is in {actual}, expected {expected}")]
    InvalidPhase { expected: RunPhase, actual: RunPhase },

    #[error("Encounter index {index} out of range for {len} encounters")]
    EncounterOutOfRange { index: usize, len: usize },

    #[error("Run belongs to floor {expected}, got floor {actual}")]
    FloorMismatch { expected: FloorId, actual: FloorId },

    #[error("Cannot retreat with {next} ahead")]
    RetreatBlocked { next: String },

    #[error("Run has already finished")]
    RunFinished,

    #[error("No encounter left to retreat from")]
    NoEncounterAhead,

    #[error("Player is down; the run must end")]
    PlayerDown,
}

impl RunError {
    /// Whether this is a game rule rather than a protocol violation
    pub fn is_policy(&self) -> bool {
        matches!(self, RunError::RetreatBlocked { .. })
    }
}
