//! AI-assisted question generation.
//!
//! One prompt, one round trip, no retry. The model is asked for a JSON
//! array of question strings and its reply is parsed defensively: any
//! output that does not decode to an array of strings becomes a distinct
//! [`SurveyError::InvalidGeneration`], never a propagated parse panic.
//! The returned count is not reconciled with the requested count.

mod openai;

pub use openai::OpenAiGenerator;

use crate::error::{Result, SurveyError};
use async_trait::async_trait;

#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    /// Generate `count` question strings about `topic`.
    async fn generate(&self, topic: &str, count: u32) -> Result<Vec<String>>;
}

pub(crate) fn build_prompt(topic: &str, count: u32) -> String {
    format!(
        "Generate {count} survey questions about {topic}. \
         Format the response as a JSON array of strings."
    )
}

pub(crate) fn parse_question_list(content: &str) -> Result<Vec<String>> {
    serde_json::from_str(content.trim()).map_err(|e| {
        SurveyError::InvalidGeneration(format!("model output is not a JSON array of strings: {e}"))
    })
}
