//! Crate-wide error type.
//!
//! Two classes of failure exist: client input errors (`InvalidInput`,
//! `NotFound`) and dependency errors (everything else). Handlers map the
//! former to 4xx responses and the latter to 500s with a logged cause.

#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("generation error: {0}")]
    Generation(String),

    /// The model replied, but its output did not decode to a question list.
    #[error("invalid generation output: {0}")]
    InvalidGeneration(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SurveyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SurveyError::InvalidInput("topic is required".to_string());
        assert_eq!(err.to_string(), "invalid input: topic is required");
    }

    #[test]
    fn test_error_from_serde() {
        let serde_err = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        let err: SurveyError = serde_err.into();
        assert!(matches!(err, SurveyError::Serde(_)));
    }

    #[test]
    fn test_generation_variants_are_distinct() {
        let invalid = SurveyError::InvalidGeneration("not an array".into());
        assert!(invalid.to_string().starts_with("invalid generation output"));
        let transport = SurveyError::Generation("connection refused".into());
        assert!(transport.to_string().starts_with("generation error"));
    }
}
