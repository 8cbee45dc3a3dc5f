use crate::server::{handlers, state::AppState};
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/surveys", post(handlers::create_survey))
        .route("/surveys", get(handlers::list_surveys))
        .route("/surveys", delete(handlers::delete_survey))
        .route("/survey", get(handlers::get_survey))
        .route("/responses", post(handlers::save_response))
        .route("/responses", get(handlers::get_responses))
        .route("/results", get(handlers::survey_results))
        .route("/generate", post(handlers::generate_questions))
}
