//! Environment-derived configuration.
//!
//! All settings come from the environment (a `.env` file is loaded by the
//! binary before this runs). The composition root builds the store and
//! generator clients from these values once at startup; nothing else in
//! the crate reads the environment.

use crate::error::{Result, SurveyError};

/// Default OpenAI-compatible API base URL.
pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_DB_NAME: &str = "surveys";
const DEFAULT_PORT: u16 = 7000;

/// Configuration for the question-generation client.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// API key, sent as a bearer token.
    pub api_key: String,
    /// Model name.
    pub model: String,
    /// API base URL (override for self-hosted gateways and tests).
    pub api_base: String,
}

impl GeneratorConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), model: model.into(), api_base: OPENAI_API_BASE.to_string() }
    }

    /// Set a custom API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// MongoDB connection string.
    pub mongodb_uri: String,
    /// Database holding the `surveys` and `responses` collections.
    pub db_name: String,
    /// Listen port.
    pub port: u16,
    pub generator: GeneratorConfig,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Read configuration through a variable lookup, so tests can supply
    /// values without mutating the process environment.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mongodb_uri = require(&var, "MONGODB_URI")?;
        let db_name = var("SURVEY_DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_string());

        let port = match var("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| SurveyError::Config(format!("PORT is not a valid port: {raw}")))?,
            None => DEFAULT_PORT,
        };

        let api_key = require(&var, "OPENAI_API_KEY")?;
        let model = var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let mut generator = GeneratorConfig::new(api_key, model);
        if let Some(base) = var("OPENAI_API_BASE") {
            generator = generator.with_api_base(base);
        }

        Ok(Self { mongodb_uri, db_name, port, generator })
    }
}

fn require(var: &impl Fn(&str) -> Option<String>, name: &str) -> Result<String> {
    var(name)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| SurveyError::Config(format!("{name} is not set")))
}
