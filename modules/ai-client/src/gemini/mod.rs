mod client;
pub mod prompt_builder;
pub(crate) mod schema;
pub(crate) mod types;

pub use prompt_builder::{GeminiOutputBuilder, GeminiPromptBuilder};
pub use schema::StructuredOutput;

use crate::error::Result;
use crate::traits::{OutputBuilder, PromptBuilder};

use client::GeminiClient;

// =============================================================================
// Gemini Agent
// =============================================================================

#[derive(Clone)]
pub struct Gemini {
    api_key: String,
    pub(crate) model: String,
    base_url: Option<String>,
    http: reqwest::Client,
}

impl Gemini {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: None,
            http: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Get the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn client(&self) -> GeminiClient {
        let client = GeminiClient::new(&self.api_key, self.http.clone());
        if let Some(ref url) = self.base_url {
            client.with_base_url(url)
        } else {
            client
        }
    }

    pub fn prompt(&self, input: impl Into<String>) -> GeminiPromptBuilder {
        GeminiPromptBuilder::new(self.clone(), input.into())
    }

    // =========================================================================
    // Convenience methods
    // =========================================================================

    /// Generate JSON constrained to the schema of `T` and parse it.
    pub async fn extract<T: StructuredOutput + Send + 'static>(
        &self,
        prompt: impl Into<String>,
    ) -> Result<T> {
        self.prompt(prompt).output::<T>().send().await
    }

    /// Free-form text completion.
    pub async fn complete(&self, prompt: impl Into<String>) -> Result<String> {
        self.prompt(prompt).send().await
    }
}
