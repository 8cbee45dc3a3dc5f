//! Survey data model and legacy-document normalization.
//!
//! Stored survey documents exist in more than one historical shape:
//! `title` instead of `topic`, missing descriptions, and questions either
//! flat or wrapped in a `{questionId, question: {...}}` envelope. All of
//! that is mapped into the canonical [`Survey`] here, at the read
//! boundary, so nothing downstream ever sees a legacy shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Question kind. Unknown kinds survive deserialization so legacy
/// documents remain readable; the analytics engine reports them as
/// having no insights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Text,
    Radio,
    Checkbox,
    Scale,
    #[serde(other)]
    Unknown,
}

/// One prompt within a survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub required: bool,
    /// Meaningful only for `radio` and `checkbox` questions.
    #[serde(default)]
    pub options: Vec<String>,
}

/// Canonical survey document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub id: String,
    pub topic: String,
    #[serde(default)]
    pub description: String,
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
    /// Informational response count, not transactionally maintained.
    #[serde(default)]
    pub responses: i64,
}

impl Survey {
    /// Build a fresh survey with a timestamp-derived id.
    pub fn new(
        topic: impl Into<String>,
        description: Option<String>,
        questions: Vec<Question>,
    ) -> Self {
        let topic = topic.into();
        let description = description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| default_description(&topic));
        let now = Utc::now();
        Self {
            id: format!("survey_{}", now.timestamp_millis()),
            topic,
            description,
            questions,
            created_at: now,
            responses: 0,
        }
    }
}

/// Placeholder description for surveys saved without one.
pub fn default_description(topic: &str) -> String {
    format!("Please provide your feedback on {topic}")
}

/// Raw stored survey, tolerant of every historical shape.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyDoc {
    pub id: String,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<QuestionDoc>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub responses: i64,
}

impl SurveyDoc {
    /// Map any legacy shape into the canonical [`Survey`].
    pub fn normalize(self) -> Survey {
        let topic = self.topic.or(self.title).unwrap_or_default();
        let description = self
            .description
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| default_description(&topic));
        let questions =
            self.questions.into_iter().enumerate().map(|(i, q)| q.normalize(i)).collect();
        Survey {
            id: self.id,
            topic,
            description,
            questions,
            created_at: self.created_at,
            responses: self.responses,
        }
    }
}

/// Stored question: either the canonical flat shape or a legacy wrapper.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum QuestionDoc {
    Flat(Question),
    Nested {
        #[serde(rename = "questionId")]
        question_id: String,
        /// Outer type wins over the wrapped one when both are present.
        #[serde(rename = "type", default)]
        question_type: Option<QuestionType>,
        question: NestedQuestion,
    },
}

/// Payload of a legacy wrapper: a full question body, or just its text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NestedQuestion {
    Body {
        #[serde(default)]
        id: Option<String>,
        text: String,
        #[serde(rename = "type", default)]
        question_type: Option<QuestionType>,
        #[serde(default)]
        required: bool,
        #[serde(default)]
        options: Vec<String>,
    },
    Text(String),
}

impl QuestionDoc {
    fn normalize(self, index: usize) -> Question {
        match self {
            QuestionDoc::Flat(q) => q,
            QuestionDoc::Nested { question_id, question_type, question } => match question {
                NestedQuestion::Body { id, text, question_type: inner, required, options } => {
                    let id = if question_id.is_empty() {
                        id.filter(|i| !i.is_empty()).unwrap_or_else(|| format!("q{}", index + 1))
                    } else {
                        question_id
                    };
                    Question {
                        id,
                        text,
                        question_type: question_type.or(inner).unwrap_or(QuestionType::Unknown),
                        required,
                        options,
                    }
                }
                NestedQuestion::Text(text) => Question {
                    id: question_id,
                    text,
                    question_type: question_type.unwrap_or(QuestionType::Unknown),
                    required: false,
                    options: Vec::new(),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_document_passes_through() {
        let doc: SurveyDoc = serde_json::from_value(json!({
            "id": "survey_1",
            "topic": "Coffee",
            "description": "Tell us about your coffee habits",
            "questions": [
                {"id": "q1", "text": "How often?", "type": "radio",
                 "required": true, "options": ["Daily", "Weekly"]}
            ],
            "createdAt": "2024-06-01T12:00:00Z",
            "responses": 3
        }))
        .unwrap();

        let survey = doc.normalize();
        assert_eq!(survey.topic, "Coffee");
        assert_eq!(survey.responses, 3);
        assert_eq!(survey.questions[0].question_type, QuestionType::Radio);
        assert_eq!(survey.questions[0].options, vec!["Daily", "Weekly"]);
    }

    #[test]
    fn test_title_fallback_and_default_description() {
        let doc: SurveyDoc = serde_json::from_value(json!({
            "id": "survey_2",
            "title": "Remote Work",
            "questions": [],
            "createdAt": "2024-06-01T12:00:00Z"
        }))
        .unwrap();

        let survey = doc.normalize();
        assert_eq!(survey.topic, "Remote Work");
        assert_eq!(survey.description, "Please provide your feedback on Remote Work");
        assert_eq!(survey.responses, 0);
    }

    #[test]
    fn test_nested_wrapper_is_flattened() {
        let doc: SurveyDoc = serde_json::from_value(json!({
            "id": "survey_3",
            "topic": "Support",
            "questions": [
                {"questionId": "q7",
                 "question": {"text": "Rate our support", "type": "scale", "required": true}}
            ],
            "createdAt": "2024-06-01T12:00:00Z"
        }))
        .unwrap();

        let survey = doc.normalize();
        let q = &survey.questions[0];
        assert_eq!(q.id, "q7");
        assert_eq!(q.text, "Rate our support");
        assert_eq!(q.question_type, QuestionType::Scale);
        assert!(q.required);
        assert!(q.options.is_empty());
    }

    #[test]
    fn test_outer_type_wins_over_nested_type() {
        let doc: SurveyDoc = serde_json::from_value(json!({
            "id": "survey_4",
            "topic": "Support",
            "questions": [
                {"questionId": "q1", "type": "checkbox",
                 "question": {"text": "Pick some", "type": "radio", "options": ["A", "B"]}}
            ],
            "createdAt": "2024-06-01T12:00:00Z"
        }))
        .unwrap();

        assert_eq!(doc.normalize().questions[0].question_type, QuestionType::Checkbox);
    }

    #[test]
    fn test_string_question_wrapper() {
        // The oldest save path stored the question text directly with a
        // type the current model does not define.
        let doc: SurveyDoc = serde_json::from_value(json!({
            "id": "survey_5",
            "topic": "Lunch",
            "questions": [
                {"questionId": "q1", "question": "What did you eat?", "type": "rating"}
            ],
            "createdAt": "2024-06-01T12:00:00Z"
        }))
        .unwrap();

        let q = &doc.normalize().questions[0];
        assert_eq!(q.text, "What did you eat?");
        assert_eq!(q.question_type, QuestionType::Unknown);
    }

    #[test]
    fn test_unknown_question_type_is_tolerated() {
        let q: Question = serde_json::from_value(json!({
            "id": "q1", "text": "Hi", "type": "matrix"
        }))
        .unwrap();
        assert_eq!(q.question_type, QuestionType::Unknown);
    }

    #[test]
    fn test_canonical_serialization_uses_camel_case() {
        let survey = Survey::new("Coffee", None, vec![]);
        let value = serde_json::to_value(&survey).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("created_at").is_none());
        assert!(survey.id.starts_with("survey_"));
    }
}
