use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{AiError, JsonExtractError, Result};
use crate::traits::{OutputBuilder, PromptBuilder};
use crate::util::{extract_json, truncate_to_char_boundary};

use super::schema::StructuredOutput;
use super::types::*;
use super::Gemini;

pub struct GeminiPromptBuilder {
    agent: Gemini,
    input: String,
}

impl GeminiPromptBuilder {
    pub(crate) fn new(agent: Gemini, input: String) -> Self {
        Self { agent, input }
    }

    /// Create a structured output builder for extracting typed data.
    ///
    /// The response schema defaults to the schema of `T`; see
    /// [`GeminiOutputBuilder::schema`] to constrain the model more tightly
    /// than the type that is parsed.
    pub fn output<T: StructuredOutput + Send + 'static>(self) -> GeminiOutputBuilder<T> {
        GeminiOutputBuilder {
            builder: self,
            schema: T::gemini_schema(),
            _phantom: PhantomData,
        }
    }

    fn request(&self) -> GenerateContentRequest {
        GenerateContentRequest::new(&self.input)
    }
}

#[async_trait]
impl PromptBuilder for GeminiPromptBuilder {
    async fn send(self) -> Result<String> {
        let request = self.request();
        let response = self
            .agent
            .client()
            .generate(&self.agent.model, &request)
            .await?;

        if let Some(reason) = response.block_reason() {
            warn!(reason, "Gemini blocked the prompt");
        }

        Ok(response.text().unwrap_or_default())
    }
}

// =============================================================================
// Structured Output Builder
// =============================================================================

pub struct GeminiOutputBuilder<T> {
    builder: GeminiPromptBuilder,
    schema: serde_json::Value,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> GeminiOutputBuilder<T> {
    /// Replace the response schema sent to the model.
    pub fn schema(mut self, schema: serde_json::Value) -> Self {
        self.schema = schema;
        self
    }

    /// Send the response schema of `S` instead of the schema of `T`.
    pub fn schema_of<S: StructuredOutput>(self) -> Self {
        self.schema(S::gemini_schema())
    }
}

#[async_trait]
impl<T: DeserializeOwned + Send + 'static> OutputBuilder<T> for GeminiOutputBuilder<T> {
    async fn send(self) -> Result<T> {
        let request = self.builder.request().json_schema(self.schema);
        let agent = &self.builder.agent;

        debug!(model = %agent.model, "Gemini structured output request");

        let response = agent.client().generate(&agent.model, &request).await?;

        if let Some(reason) = response.block_reason() {
            warn!(reason, "Gemini blocked the prompt");
        }

        let text = response
            .text()
            .ok_or(AiError::InvalidResponse(JsonExtractError::Empty))?;

        extract_json(&text).map_err(|e| {
            warn!(
                error = %e,
                response = truncate_to_char_boundary(&text, 300),
                "Failed to parse JSON from AI response"
            );
            AiError::InvalidResponse(e)
        })
    }
}
