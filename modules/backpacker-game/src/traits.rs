// Trait abstractions for the game's external collaborators.
//
// ContentGenerator covers everything the language model produces,
// Encyclopedia covers article lookups, and ProgressSink lets a front end
// show what the game is waiting on. Mocks live in `testing.rs`.

use ai_client::AiError;
use async_trait::async_trait;
use tracing::warn;

use backpacker_common::{Job, Location, QuestionDraft};
use wiki_client::WikipediaClient;

// ---------------------------------------------------------------------------
// ContentGenerator
// ---------------------------------------------------------------------------

/// Generated game content. Errors are surfaced to the caller unchanged.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Candidate destinations around `from`, spread across the compass.
    async fn destinations(&self, from: &Location, count: usize) -> Result<Vec<Location>, AiError>;

    /// Candidate jobs a traveler could pick up in `location`.
    async fn jobs(&self, location: &Location, count: usize) -> Result<Vec<Job>, AiError>;

    /// Raw quiz questions about `topic`, grounded in `context` when non-empty.
    async fn quiz_questions(
        &self,
        context: &str,
        topic: &str,
        count: usize,
    ) -> Result<Vec<QuestionDraft>, AiError>;
}

// ---------------------------------------------------------------------------
// Encyclopedia
// ---------------------------------------------------------------------------

#[async_trait]
pub trait Encyclopedia: Send + Sync {
    /// Plain text of the article for `term`. Empty when the article does not
    /// exist or could not be fetched; lookups never fail.
    async fn article_text(&self, term: &str) -> String;
}

#[async_trait]
impl Encyclopedia for WikipediaClient {
    async fn article_text(&self, term: &str) -> String {
        match self.fetch_extract(term).await {
            Ok(Some(text)) => text,
            Ok(None) => String::new(),
            Err(e) => {
                warn!(term, error = %e, "Wikipedia lookup failed");
                String::new()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// ProgressSink
// ---------------------------------------------------------------------------

pub trait ProgressSink: Send + Sync {
    fn loading(&self, message: &str);
    fn done(&self);
}

pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn loading(&self, _message: &str) {}
    fn done(&self) {}
}
