//! survey-studio - HTTP service for AI-generated surveys.
//!
//! Stateless handlers over a document store, one operation per request:
//! survey CRUD with cascading delete, response ingestion, AI-assisted
//! question generation, and a pure aggregation engine for results.

pub mod analytics;
pub mod config;
pub mod error;
pub mod generate;
pub mod schema;
pub mod server;
pub mod storage;

pub use config::{AppConfig, GeneratorConfig};
pub use error::{Result, SurveyError};
pub use generate::{OpenAiGenerator, QuestionGenerator};
pub use schema::{Answer, AnswerValue, Question, QuestionType, Survey, SurveyResponse};
pub use server::{AppState, api_routes, build_cors_layer};
pub use storage::{MemoryStore, MongoSurveyStore, SurveyStore};
