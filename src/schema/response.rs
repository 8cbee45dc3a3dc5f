//! Survey response data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A submitted answer value, discriminated by JSON shape: a string for
/// `text`/`radio`, a string list for `checkbox`, a number for `scale`.
/// The shape is never cross-checked against the referenced question;
/// mismatches are stored as-is and skipped by the analytics engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Selections(Vec<String>),
    Number(f64),
}

/// One question's submitted value within a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    pub value: AnswerValue,
}

/// One respondent's complete submission against a survey.
///
/// The aliases accept the legacy field names (`responses`, `timestamp`)
/// still present in older stored documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResponse {
    pub id: String,
    pub survey_id: String,
    #[serde(alias = "responses")]
    pub answers: Vec<Answer>,
    #[serde(alias = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl SurveyResponse {
    /// Build a fresh response with an id derived from the survey id and
    /// the submission time.
    ///
    /// Ids are unique only down to the millisecond: two submissions for
    /// the same survey within the same millisecond collide. The stored
    /// documents already use this format, so it stays.
    pub fn new(survey_id: impl Into<String>, answers: Vec<Answer>) -> Self {
        let survey_id = survey_id.into();
        let now = Utc::now();
        Self {
            id: format!("{}-{}", survey_id, now.timestamp_millis()),
            survey_id,
            answers,
            created_at: now,
        }
    }
}
