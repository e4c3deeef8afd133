use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GameState {
    SelectStartCity,
    LocationQuiz,
    SelectJob,
    JobQuiz,
    TravelPlanning,
    GameOver,
    Victory,
}

impl GameState {
    /// Title shown for this state.
    pub fn label(self) -> &'static str {
        match self {
            GameState::SelectStartCity => "Select a Starting City",
            GameState::LocationQuiz => "City Quiz",
            GameState::SelectJob => "Find a Job",
            GameState::JobQuiz => "Job Trial",
            GameState::TravelPlanning => "Plan Your Next Trip",
            GameState::GameOver => "Game Over",
            GameState::Victory => "You Win!",
        }
    }

    pub fn is_quiz(self) -> bool {
        matches!(self, GameState::LocationQuiz | GameState::JobQuiz)
    }

    /// Where the game goes when preparing this state fails.
    ///
    /// Quiz and job failures skip ahead to travel; a failure while
    /// planning travel ends the game.
    pub fn fallback(self) -> GameState {
        match self {
            GameState::LocationQuiz | GameState::SelectJob | GameState::JobQuiz => {
                GameState::TravelPlanning
            }
            _ => GameState::GameOver,
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything a player can ask the game to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    SelectCity(usize),
    AnswerQuiz(String),
    SelectJob(usize),
    SelectDestination(usize),
    Restart,
}
