// Test mocks for the game.
//
// One mock per trait boundary:
// - MockGenerator (ContentGenerator): keyed canned responses, Err when unregistered
// - MockEncyclopedia (Encyclopedia): term to article text, "" when unregistered
// - RecordingProgress (ProgressSink): records every loading message
//
// Plus small constructors for locations, jobs and questions.

use std::collections::HashMap;
use std::sync::Mutex;

use ai_client::{AiError, JsonExtractError};
use async_trait::async_trait;

use backpacker_common::{Job, Location, QuestionDraft, QuizQuestion};

use crate::traits::{ContentGenerator, Encyclopedia, ProgressSink};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub fn location(city: &str, latitude: f64, longitude: f64) -> Location {
    Location::new(city, "Testland", latitude, longitude)
}

pub fn job(title: &str, search_term: &str) -> Job {
    Job {
        title: title.to_string(),
        description: format!("Work as a {title}"),
        wikipedia_search_term: search_term.to_string(),
    }
}

pub fn draft(question: &str, options: &[&str], answer: &str) -> QuestionDraft {
    QuestionDraft {
        question: Some(question.to_string()),
        options: Some(options.iter().map(|o| o.to_string()).collect()),
        answer: Some(answer.to_string()),
    }
}

pub fn question(text: &str, options: &[&str], answer: &str) -> QuizQuestion {
    QuizQuestion {
        question: text.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        answer: answer.to_string(),
    }
}

/// `count` valid questions whose answer is always "right".
pub fn easy_questions(count: usize) -> Vec<QuestionDraft> {
    (0..count)
        .map(|i| draft(&format!("Question {i}?"), &["right", "wrong"], "right"))
        .collect()
}

fn unregistered(what: &str, key: &str) -> AiError {
    AiError::InvalidResponse(JsonExtractError::Malformed(format!(
        "MockGenerator: no {what} registered for {key}"
    )))
}

// ---------------------------------------------------------------------------
// MockGenerator
// ---------------------------------------------------------------------------

/// Canned generator. Destinations and jobs are keyed by city name, quizzes
/// by topic. Unregistered keys return `Err`.
///
/// Registering several job batches for one city serves them in order, one
/// per call, repeating the last batch once exhausted.
pub struct MockGenerator {
    destinations: HashMap<String, Vec<Location>>,
    jobs: HashMap<String, Vec<Vec<Job>>>,
    quizzes: HashMap<String, Vec<QuestionDraft>>,
    job_calls: Mutex<HashMap<String, usize>>,
    quiz_contexts: Mutex<Vec<String>>,
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGenerator {
    pub fn new() -> Self {
        Self {
            destinations: HashMap::new(),
            jobs: HashMap::new(),
            quizzes: HashMap::new(),
            job_calls: Mutex::new(HashMap::new()),
            quiz_contexts: Mutex::new(Vec::new()),
        }
    }

    pub fn on_destinations(mut self, city: &str, destinations: Vec<Location>) -> Self {
        self.destinations.insert(city.to_string(), destinations);
        self
    }

    pub fn on_jobs(mut self, city: &str, batch: Vec<Job>) -> Self {
        self.jobs.entry(city.to_string()).or_default().push(batch);
        self
    }

    pub fn on_quiz(mut self, topic: &str, drafts: Vec<QuestionDraft>) -> Self {
        self.quizzes.insert(topic.to_string(), drafts);
        self
    }

    pub fn job_calls(&self, city: &str) -> usize {
        self.job_calls
            .lock()
            .unwrap()
            .get(city)
            .copied()
            .unwrap_or(0)
    }

    /// Article context passed with every quiz request, in call order.
    pub fn quiz_contexts(&self) -> Vec<String> {
        self.quiz_contexts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentGenerator for MockGenerator {
    async fn destinations(&self, from: &Location, _count: usize) -> Result<Vec<Location>, AiError> {
        self.destinations
            .get(&from.city)
            .cloned()
            .ok_or_else(|| unregistered("destinations", &from.city))
    }

    async fn jobs(&self, location: &Location, _count: usize) -> Result<Vec<Job>, AiError> {
        let call = {
            let mut calls = self.job_calls.lock().unwrap();
            let n = calls.entry(location.city.clone()).or_insert(0);
            *n += 1;
            *n
        };
        let batches = self
            .jobs
            .get(&location.city)
            .ok_or_else(|| unregistered("jobs", &location.city))?;
        let index = (call - 1).min(batches.len() - 1);
        Ok(batches[index].clone())
    }

    async fn quiz_questions(
        &self,
        context: &str,
        topic: &str,
        _count: usize,
    ) -> Result<Vec<QuestionDraft>, AiError> {
        self.quiz_contexts.lock().unwrap().push(context.to_string());
        self.quizzes
            .get(topic)
            .cloned()
            .ok_or_else(|| unregistered("quiz", topic))
    }
}

// ---------------------------------------------------------------------------
// MockEncyclopedia
// ---------------------------------------------------------------------------

/// Term to article text. Unregistered terms behave like missing articles.
pub struct MockEncyclopedia {
    articles: HashMap<String, String>,
    lookups: Mutex<Vec<String>>,
}

impl Default for MockEncyclopedia {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEncyclopedia {
    pub fn new() -> Self {
        Self {
            articles: HashMap::new(),
            lookups: Mutex::new(Vec::new()),
        }
    }

    pub fn on_article(mut self, term: &str, text: &str) -> Self {
        self.articles.insert(term.to_string(), text.to_string());
        self
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl Encyclopedia for MockEncyclopedia {
    async fn article_text(&self, term: &str) -> String {
        self.lookups.lock().unwrap().push(term.to_string());
        self.articles.get(term).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// RecordingProgress
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingProgress {
    messages: Mutex<Vec<String>>,
    done: Mutex<usize>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn done_count(&self) -> usize {
        *self.done.lock().unwrap()
    }
}

impl ProgressSink for RecordingProgress {
    fn loading(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn done(&self) {
        *self.done.lock().unwrap() += 1;
    }
}
