//! Document store access.
//!
//! Every operation is a single round trip against one of the two
//! collections (`surveys`, `responses`), with documents keyed by their
//! own `id` field. Reads return the canonical model; legacy shapes are
//! normalized before they leave this layer.

mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoSurveyStore;

use crate::error::Result;
use crate::schema::{Survey, SurveyResponse};
use async_trait::async_trait;

#[async_trait]
pub trait SurveyStore: Send + Sync {
    async fn insert_survey(&self, survey: &Survey) -> Result<()>;

    /// Fetch one survey by id, normalized. `None` when absent.
    async fn get_survey(&self, id: &str) -> Result<Option<Survey>>;

    /// All surveys, newest first.
    async fn list_surveys(&self) -> Result<Vec<Survey>>;

    /// Delete one survey document. Returns whether it existed.
    async fn delete_survey(&self, id: &str) -> Result<bool>;

    async fn insert_response(&self, response: &SurveyResponse) -> Result<()>;

    /// All responses referencing a survey, newest first.
    async fn responses_for(&self, survey_id: &str) -> Result<Vec<SurveyResponse>>;

    /// Delete one response document. Returns whether it existed.
    async fn delete_response(&self, id: &str) -> Result<bool>;
}
