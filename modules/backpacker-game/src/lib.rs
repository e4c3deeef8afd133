pub mod error;
pub mod game;
pub mod generator;
pub mod jobs;
pub mod journal;
pub mod map;
pub mod quiz;
pub mod rules;
pub mod state;
pub mod traits;
pub mod travel;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use error::GameError;
pub use game::{Dashboard, Game};
pub use generator::GeminiGenerator;
pub use jobs::JobFinder;
pub use journal::{JobRecord, Journal};
pub use map::{MapFocus, MapOverlay, MapPath};
pub use quiz::{validate_questions, AnswerOutcome, Quiz, QuizGenerator};
pub use state::{GameState, PlayerAction};
pub use traits::{ContentGenerator, Encyclopedia, NoopProgress, ProgressSink};
pub use travel::{price_trip, transport_mode, trip_cost, TravelPlanner};
