use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geo::haversine_km;

// --- Places ---

/// A city on the globe. Used both as a starting point and as a destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Location {
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(
        city: impl Into<String>,
        country: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            city: city.into(),
            country: country.into(),
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in kilometers.
    pub fn distance_km(&self, other: &Location) -> f64 {
        haversine_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }

    /// "City, Country", the form used for encyclopedia lookups.
    pub fn label(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.city, self.country)
    }
}

// --- Travel ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportMode {
    Bus,
    Train,
    Plane,
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportMode::Bus => write!(f, "Bus"),
            TransportMode::Train => write!(f, "Train"),
            TransportMode::Plane => write!(f, "Plane"),
        }
    }
}

/// A priced destination offered on the travel planning screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelOption {
    pub destination: Location,
    pub distance_km: f64,
    pub cost: i64,
    pub mode: TransportMode,
}

// --- Work ---

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Job {
    pub title: String,
    pub description: String,
    /// A general concept likely to have its own encyclopedia article.
    #[serde(rename = "wikipediaSearchTerm")]
    pub wikipedia_search_term: String,
}

// --- Quizzes ---

/// A validated multiple-choice question: at least two distinct options, one of
/// which is the answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

impl QuizQuestion {
    pub fn is_correct(&self, answer: &str) -> bool {
        self.answer == answer
    }
}

/// A question as the model returned it. A field the model left out or sent
/// with the wrong JSON type is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    pub question: Option<String>,
    pub options: Option<Vec<String>>,
    pub answer: Option<String>,
}

impl QuestionDraft {
    /// Read one entry of the model's reply. Never fails: an entry that is not
    /// an object yields an empty draft.
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_owned);
        let options = value.get("options").and_then(Value::as_array).and_then(|items| {
            items
                .iter()
                .map(|item| item.as_str().map(str::to_owned))
                .collect::<Option<Vec<String>>>()
        });

        Self {
            question: text("question"),
            options,
            answer: text("answer"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_uses_camel_case_search_term() {
        let job: Job = serde_json::from_str(
            r#"{"title": "Dog Walker", "description": "Walk dogs", "wikipediaSearchTerm": "Dog walking"}"#,
        )
        .unwrap();
        assert_eq!(job.wikipedia_search_term, "Dog walking");

        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["wikipediaSearchTerm"], "Dog walking");
    }

    #[test]
    fn question_draft_tolerates_missing_fields() {
        let value = serde_json::json!({"question": "Q?"});
        let draft = QuestionDraft::from_value(&value);
        assert_eq!(draft.question.as_deref(), Some("Q?"));
        assert!(draft.options.is_none());
        assert!(draft.answer.is_none());

        assert_eq!(
            QuestionDraft::from_value(&serde_json::json!({})),
            QuestionDraft::default()
        );
    }

    #[test]
    fn question_draft_reads_complete_entry() {
        let value = serde_json::json!({
            "question": "Capital of Japan?",
            "options": ["Tokyo", "Kyoto"],
            "answer": "Tokyo"
        });
        let draft = QuestionDraft::from_value(&value);
        assert_eq!(draft.question.as_deref(), Some("Capital of Japan?"));
        assert_eq!(draft.options, Some(vec!["Tokyo".to_string(), "Kyoto".to_string()]));
        assert_eq!(draft.answer.as_deref(), Some("Tokyo"));
    }

    #[test]
    fn question_draft_blanks_options_given_as_string() {
        let value = serde_json::json!({
            "question": "Capital of Japan?",
            "options": "Tokyo",
            "answer": "Tokyo"
        });
        let draft = QuestionDraft::from_value(&value);
        assert!(draft.options.is_none());
        assert_eq!(draft.answer.as_deref(), Some("Tokyo"));
    }

    #[test]
    fn question_draft_blanks_options_with_non_string_items() {
        let value = serde_json::json!({
            "question": "Meiji Restoration year?",
            "options": ["1868", 1900],
            "answer": "1868"
        });
        assert!(QuestionDraft::from_value(&value).options.is_none());
    }

    #[test]
    fn question_draft_blanks_numeric_answer() {
        let value = serde_json::json!({
            "question": "Meiji Restoration year?",
            "options": ["1868", "1900"],
            "answer": 1868
        });
        let draft = QuestionDraft::from_value(&value);
        assert!(draft.answer.is_none());
        assert_eq!(draft.options.map(|o| o.len()), Some(2));
    }

    #[test]
    fn null_entry_is_an_empty_draft() {
        assert_eq!(
            QuestionDraft::from_value(&serde_json::Value::Null),
            QuestionDraft::default()
        );
        assert_eq!(
            QuestionDraft::from_value(&serde_json::json!("just text")),
            QuestionDraft::default()
        );
    }

    #[test]
    fn location_label_and_display_match() {
        let tokyo = Location::new("Tokyo", "Japan", 35.6895, 139.6917);
        assert_eq!(tokyo.label(), "Tokyo, Japan");
        assert_eq!(tokyo.to_string(), tokyo.label());
    }

    #[test]
    fn transport_mode_display() {
        assert_eq!(TransportMode::Plane.to_string(), "Plane");
        assert_eq!(TransportMode::Bus.to_string(), "Bus");
    }
}
