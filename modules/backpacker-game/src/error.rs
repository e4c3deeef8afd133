use ai_client::AiError;
use thiserror::Error;

use crate::state::GameState;

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Ai(#[from] AiError),

    #[error("Invalid action during {state}: {reason}")]
    InvalidAction { state: GameState, reason: String },

    #[error("No journey in progress")]
    NoJourney,

    #[error("No job selected")]
    NoJobSelected,
}

impl GameError {
    pub(crate) fn invalid(state: GameState, reason: impl Into<String>) -> Self {
        GameError::InvalidAction {
            state,
            reason: reason.into(),
        }
    }
}
