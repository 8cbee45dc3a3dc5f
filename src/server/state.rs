use crate::generate::QuestionGenerator;
use crate::storage::SurveyStore;
use std::sync::Arc;

/// Shared server state. Both dependencies are built once by the
/// composition root and injected here; handlers never construct clients.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SurveyStore>,
    pub generator: Arc<dyn QuestionGenerator>,
}

impl AppState {
    pub fn new(store: Arc<dyn SurveyStore>, generator: Arc<dyn QuestionGenerator>) -> Self {
        Self { store, generator }
    }
}
