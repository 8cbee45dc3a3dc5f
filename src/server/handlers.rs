use crate::analytics::{self, QuestionSummary};
use crate::error::SurveyError;
use crate::schema::{Answer, Question, QuestionType, Survey, SurveyResponse};
use crate::server::state::AppState;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// API error response
#[derive(Serialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

type Rejection = (StatusCode, Json<ApiError>);
type ApiResult<T> = Result<Json<T>, Rejection>;

fn err(status: StatusCode, msg: impl Into<String>) -> Rejection {
    (status, Json(ApiError::new(msg)))
}

/// Map crate errors to HTTP responses. Dependency failures get a generic
/// body; the underlying cause goes to the log only.
fn reject(e: SurveyError) -> Rejection {
    match e {
        SurveyError::InvalidInput(msg) => err(StatusCode::BAD_REQUEST, msg),
        SurveyError::NotFound(msg) => err(StatusCode::NOT_FOUND, msg),
        SurveyError::InvalidGeneration(msg) => {
            tracing::error!(error = %msg, "generation produced invalid output");
            err(StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate valid survey questions")
        }
        other => {
            tracing::error!(error = %other, "request failed");
            err(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

/// Create survey request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSurveyRequest {
    pub topic: Option<String>,
    /// Accepted as an alternative to `topic`; older clients send it.
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub questions: Option<Vec<NewQuestion>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    pub id: Option<String>,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<String>,
}

/// Create a new survey
pub async fn create_survey(
    State(state): State<AppState>,
    Json(req): Json<CreateSurveyRequest>,
) -> Result<(StatusCode, Json<Survey>), Rejection> {
    let topic = req
        .topic
        .or(req.title)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            err(
                StatusCode::BAD_REQUEST,
                "Missing required fields: topic and questions array are required",
            )
        })?;

    let questions = req.questions.filter(|q| !q.is_empty()).ok_or_else(|| {
        err(StatusCode::BAD_REQUEST, "Missing required fields: topic and questions array are required")
    })?;
    if questions.iter().any(|q| q.text.trim().is_empty()) {
        return Err(err(StatusCode::BAD_REQUEST, "Question text must not be empty"));
    }

    let questions = questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| Question {
            id: q.id.filter(|id| !id.is_empty()).unwrap_or_else(|| format!("q{}", i + 1)),
            text: q.text,
            question_type: q.question_type,
            required: q.required,
            options: q.options,
        })
        .collect();

    let survey = Survey::new(topic, req.description, questions);
    state.store.insert_survey(&survey).await.map_err(reject)?;

    tracing::info!(survey_id = %survey.id, questions = survey.questions.len(), "survey created");
    Ok((StatusCode::CREATED, Json(survey)))
}

#[derive(Deserialize)]
pub struct SurveyIdQuery {
    pub id: Option<String>,
}

/// Get one survey by id, normalized
pub async fn get_survey(
    State(state): State<AppState>,
    Query(params): Query<SurveyIdQuery>,
) -> ApiResult<Survey> {
    let id = params
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| err(StatusCode::BAD_REQUEST, "Survey ID is required"))?;

    state
        .store
        .get_survey(&id)
        .await
        .map_err(reject)?
        .map(Json)
        .ok_or_else(|| err(StatusCode::NOT_FOUND, "Survey not found"))
}

/// List all surveys, newest first
pub async fn list_surveys(State(state): State<AppState>) -> ApiResult<Vec<Survey>> {
    state.store.list_surveys().await.map(Json).map_err(reject)
}

#[derive(Deserialize)]
pub struct DeleteSurveyRequest {
    pub id: Option<String>,
}

#[derive(Serialize)]
pub struct DeleteSurveyResult {
    pub message: String,
}

/// Delete a survey and fan out deletion of its responses.
///
/// Not transactional: once the survey document is gone, a failed
/// response deletion leaves orphans behind. That window is surfaced in
/// the error body and the log rather than masked.
pub async fn delete_survey(
    State(state): State<AppState>,
    Json(req): Json<DeleteSurveyRequest>,
) -> ApiResult<DeleteSurveyResult> {
    let id = req
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| err(StatusCode::BAD_REQUEST, "Survey ID is required"))?;

    if !state.store.delete_survey(&id).await.map_err(reject)? {
        return Err(err(StatusCode::NOT_FOUND, "Survey not found"));
    }

    let responses = match state.store.responses_for(&id).await {
        Ok(responses) => responses,
        Err(e) => {
            tracing::error!(survey_id = %id, error = %e, "survey deleted but responses could not be listed");
            return Err(err(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Survey deleted but its responses could not be removed",
            ));
        }
    };

    let total = responses.len();
    let results = join_all(responses.iter().map(|r| state.store.delete_response(&r.id))).await;
    let failed = results.iter().filter(|r| r.is_err()).count();
    if failed > 0 {
        tracing::error!(survey_id = %id, orphaned = failed, total, "cascade delete left orphaned responses");
        return Err(err(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Survey deleted but {failed} of {total} responses could not be removed"),
        ));
    }

    tracing::info!(survey_id = %id, responses = total, "survey and responses deleted");
    Ok(Json(DeleteSurveyResult {
        message: "Survey and its responses deleted successfully".to_string(),
    }))
}

/// Save response request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponseRequest {
    pub survey_id: Option<String>,
    /// Kept as raw JSON so absence, wrong type, and malformed entries
    /// each get their own client error.
    pub responses: Option<Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponseResult {
    pub message: String,
    pub response_id: String,
}

/// Persist one survey response
pub async fn save_response(
    State(state): State<AppState>,
    Json(req): Json<SaveResponseRequest>,
) -> ApiResult<SaveResponseResult> {
    let survey_id = req
        .survey_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| err(StatusCode::BAD_REQUEST, "Survey ID and responses are required"))?;
    let raw = req
        .responses
        .ok_or_else(|| err(StatusCode::BAD_REQUEST, "Survey ID and responses are required"))?;
    if !raw.is_array() {
        return Err(err(StatusCode::BAD_REQUEST, "Responses must be an array"));
    }

    let answers: Vec<Answer> = serde_json::from_value(raw)
        .map_err(|e| err(StatusCode::BAD_REQUEST, format!("Invalid responses payload: {e}")))?;
    if answers.is_empty() {
        return Err(err(StatusCode::BAD_REQUEST, "Responses must not be empty"));
    }

    let response = SurveyResponse::new(survey_id, answers);
    state.store.insert_response(&response).await.map_err(reject)?;

    tracing::info!(response_id = %response.id, survey_id = %response.survey_id, "response saved");
    Ok(Json(SaveResponseResult {
        message: "Response saved successfully".to_string(),
        response_id: response.id,
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResponsesQuery {
    pub survey_id: Option<String>,
}

/// List responses for a survey, newest first
pub async fn get_responses(
    State(state): State<AppState>,
    Query(params): Query<SurveyResponsesQuery>,
) -> ApiResult<Vec<SurveyResponse>> {
    let survey_id = params
        .survey_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| err(StatusCode::BAD_REQUEST, "Survey ID is required"))?;

    state.store.responses_for(&survey_id).await.map(Json).map_err(reject)
}

/// Generate questions request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub topic: Option<String>,
    pub num_questions: Option<i64>,
}

#[derive(Serialize)]
pub struct GenerateResult {
    pub topic: String,
    pub questions: Vec<String>,
}

const DEFAULT_QUESTION_COUNT: i64 = 5;
const MAX_QUESTION_COUNT: i64 = 20;

/// Generate question strings for a topic via the model.
///
/// The returned list is trusted as-is beyond the array-shape check; its
/// length may differ from the requested count.
pub async fn generate_questions(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> ApiResult<GenerateResult> {
    let topic = req
        .topic
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| err(StatusCode::BAD_REQUEST, "Topic is required"))?;

    let count = req.num_questions.unwrap_or(DEFAULT_QUESTION_COUNT);
    if !(1..=MAX_QUESTION_COUNT).contains(&count) {
        return Err(err(
            StatusCode::BAD_REQUEST,
            "Number of questions must be between 1 and 20",
        ));
    }

    let questions = state.generator.generate(&topic, count as u32).await.map_err(reject)?;

    tracing::info!(topic = %topic, requested = count, returned = questions.len(), "questions generated");
    Ok(Json(GenerateResult { topic, questions }))
}

/// Aggregated results for a survey
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResults {
    pub survey_id: String,
    pub topic: String,
    pub response_count: usize,
    pub summaries: Vec<QuestionSummary>,
}

/// Per-question chart data and insights, computed server-side from the
/// stored responses.
pub async fn survey_results(
    State(state): State<AppState>,
    Query(params): Query<SurveyResponsesQuery>,
) -> ApiResult<SurveyResults> {
    let survey_id = params
        .survey_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| err(StatusCode::BAD_REQUEST, "Survey ID is required"))?;

    let survey = state
        .store
        .get_survey(&survey_id)
        .await
        .map_err(reject)?
        .ok_or_else(|| err(StatusCode::NOT_FOUND, "Survey not found"))?;
    let responses = state.store.responses_for(&survey_id).await.map_err(reject)?;

    let summaries = analytics::survey_summary(&survey, &responses);
    Ok(Json(SurveyResults {
        survey_id: survey.id,
        topic: survey.topic,
        response_count: responses.len(),
        summaries,
    }))
}
