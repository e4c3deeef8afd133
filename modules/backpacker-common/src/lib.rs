pub mod config;
pub mod error;
pub mod geo;
pub mod types;

pub use config::Config;
pub use error::{ConfigError, MISSING_API_KEY_MESSAGE};
pub use geo::{haversine_km, normalize_longitude_delta};
pub use types::{Job, Location, QuestionDraft, QuizQuestion, TransportMode, TravelOption};
