//! MongoDB-backed store.
//!
//! Surveys are read through [`SurveyDoc`] so legacy document shapes are
//! normalized on the way out; writes always use the canonical shape.
//! No operation is retried.

use crate::error::{Result, SurveyError};
use crate::schema::{Survey, SurveyDoc, SurveyResponse};
use crate::storage::SurveyStore;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Client, Collection, Database};

const SURVEYS: &str = "surveys";
const RESPONSES: &str = "responses";

pub struct MongoSurveyStore {
    db: Database,
}

impl MongoSurveyStore {
    /// Connect to the database. The client is built once here and shared
    /// by every request through the server state.
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await.map_err(store_err)?;
        Ok(Self { db: client.database(db_name) })
    }

    fn survey_docs(&self) -> Collection<SurveyDoc> {
        self.db.collection(SURVEYS)
    }

    fn surveys(&self) -> Collection<Survey> {
        self.db.collection(SURVEYS)
    }

    fn responses(&self) -> Collection<SurveyResponse> {
        self.db.collection(RESPONSES)
    }
}

fn store_err(e: mongodb::error::Error) -> SurveyError {
    SurveyError::Store(e.to_string())
}

#[async_trait]
impl SurveyStore for MongoSurveyStore {
    async fn insert_survey(&self, survey: &Survey) -> Result<()> {
        self.surveys().insert_one(survey).await.map_err(store_err)?;
        Ok(())
    }

    async fn get_survey(&self, id: &str) -> Result<Option<Survey>> {
        let doc = self.survey_docs().find_one(doc! { "id": id }).await.map_err(store_err)?;
        Ok(doc.map(SurveyDoc::normalize))
    }

    async fn list_surveys(&self) -> Result<Vec<Survey>> {
        let cursor = self
            .survey_docs()
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .await
            .map_err(store_err)?;
        let docs: Vec<SurveyDoc> = cursor.try_collect().await.map_err(store_err)?;
        Ok(docs.into_iter().map(SurveyDoc::normalize).collect())
    }

    async fn delete_survey(&self, id: &str) -> Result<bool> {
        let result = self.surveys().delete_one(doc! { "id": id }).await.map_err(store_err)?;
        Ok(result.deleted_count > 0)
    }

    async fn insert_response(&self, response: &SurveyResponse) -> Result<()> {
        self.responses().insert_one(response).await.map_err(store_err)?;
        Ok(())
    }

    async fn responses_for(&self, survey_id: &str) -> Result<Vec<SurveyResponse>> {
        let cursor = self
            .responses()
            .find(doc! { "surveyId": survey_id })
            .sort(doc! { "createdAt": -1 })
            .await
            .map_err(store_err)?;
        cursor.try_collect().await.map_err(store_err)
    }

    async fn delete_response(&self, id: &str) -> Result<bool> {
        let result = self.responses().delete_one(doc! { "id": id }).await.map_err(store_err)?;
        Ok(result.deleted_count > 0)
    }
}
