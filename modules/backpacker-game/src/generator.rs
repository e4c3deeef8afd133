use ai_client::{AiError, Gemini, OutputBuilder};
use async_trait::async_trait;
use serde_json::Value;

use backpacker_common::{Job, Location, QuestionDraft, QuizQuestion};

use crate::traits::ContentGenerator;

/// [`ContentGenerator`] backed by Gemini structured output.
pub struct GeminiGenerator {
    ai: Gemini,
}

impl GeminiGenerator {
    pub fn new(ai: Gemini) -> Self {
        Self { ai }
    }
}

#[async_trait]
impl ContentGenerator for GeminiGenerator {
    async fn destinations(&self, from: &Location, count: usize) -> Result<Vec<Location>, AiError> {
        self.ai
            .extract::<Vec<Location>>(destinations_prompt(from, count))
            .await
    }

    async fn jobs(&self, location: &Location, count: usize) -> Result<Vec<Job>, AiError> {
        self.ai.extract::<Vec<Job>>(jobs_prompt(location, count)).await
    }

    async fn quiz_questions(
        &self,
        context: &str,
        topic: &str,
        count: usize,
    ) -> Result<Vec<QuestionDraft>, AiError> {
        // Ask for complete questions but only require an array back; each
        // entry is read on its own and the quiz filter decides what survives.
        let entries = self
            .ai
            .prompt(quiz_prompt(context, topic, count))
            .output::<Vec<Value>>()
            .schema_of::<Vec<QuizQuestion>>()
            .send()
            .await?;
        Ok(read_drafts(&entries))
    }
}

pub fn read_drafts(entries: &[Value]) -> Vec<QuestionDraft> {
    entries.iter().map(QuestionDraft::from_value).collect()
}

pub fn destinations_prompt(from: &Location, count: usize) -> String {
    let per_direction = count / 4;
    format!(
        "A backpacker is in {from} (latitude {lat}, longitude {lng}). \
         Suggest {count} real cities they could travel to next: \
         {per_direction} to the north, {per_direction} to the south, \
         {per_direction} to the east and {per_direction} to the west. \
         Mix nearby cities with ones further away. \
         For each city give its name, its country, and its latitude and longitude in decimal degrees.",
        lat = from.latitude,
        lng = from.longitude,
    )
}

pub fn jobs_prompt(location: &Location, count: usize) -> String {
    format!(
        "List {count} short-term jobs a traveling backpacker could realistically find in {location}. \
         For each job give a title and a one-sentence description. \
         Also give a wikipediaSearchTerm: the name of a general concept or profession related to the job \
         that is very likely to have its own English Wikipedia article (for example \"Dog walking\" for a dog walker)."
    )
}

pub fn quiz_prompt(context: &str, topic: &str, count: usize) -> String {
    format!(
        "Write {count} multiple-choice quiz questions about {topic}, \
         suitable for a high-school student, based on the article below. \
         Each question must have exactly 4 options and the answer must be copied exactly from the options. \
         Every question must make sense on its own, without the reader seeing the article.\n\n{context}"
    )
}
