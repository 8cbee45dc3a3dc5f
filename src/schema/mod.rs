mod response;
mod survey;

pub use response::{Answer, AnswerValue, SurveyResponse};
pub use survey::{
    NestedQuestion, Question, QuestionDoc, QuestionType, Survey, SurveyDoc, default_description,
};
