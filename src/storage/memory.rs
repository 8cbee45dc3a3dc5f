//! In-memory store for tests and database-free local runs.

use crate::error::Result;
use crate::schema::{Survey, SurveyResponse};
use crate::storage::SurveyStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

pub struct MemoryStore {
    surveys: RwLock<HashMap<String, Survey>>,
    responses: RwLock<HashMap<String, SurveyResponse>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self { surveys: RwLock::new(HashMap::new()), responses: RwLock::new(HashMap::new()) }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SurveyStore for MemoryStore {
    async fn insert_survey(&self, survey: &Survey) -> Result<()> {
        let mut surveys = self.surveys.write().unwrap();
        surveys.insert(survey.id.clone(), survey.clone());
        Ok(())
    }

    async fn get_survey(&self, id: &str) -> Result<Option<Survey>> {
        let surveys = self.surveys.read().unwrap();
        Ok(surveys.get(id).cloned())
    }

    async fn list_surveys(&self) -> Result<Vec<Survey>> {
        let surveys = self.surveys.read().unwrap();
        let mut all: Vec<Survey> = surveys.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn delete_survey(&self, id: &str) -> Result<bool> {
        let mut surveys = self.surveys.write().unwrap();
        Ok(surveys.remove(id).is_some())
    }

    async fn insert_response(&self, response: &SurveyResponse) -> Result<()> {
        let mut responses = self.responses.write().unwrap();
        responses.insert(response.id.clone(), response.clone());
        Ok(())
    }

    async fn responses_for(&self, survey_id: &str) -> Result<Vec<SurveyResponse>> {
        let responses = self.responses.read().unwrap();
        let mut matched: Vec<SurveyResponse> =
            responses.values().filter(|r| r.survey_id == survey_id).cloned().collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn delete_response(&self, id: &str) -> Result<bool> {
        let mut responses = self.responses.write().unwrap();
        Ok(responses.remove(id).is_some())
    }
}
