use askama::Template;

use super::PageContext;
use crate::models::response::{AnswerSlot, CompletedSurvey, CompletedSurveyDetail, QuestionTally};
use crate::models::survey::Survey;

#[derive(Template)]
#[template(path = "responses/fill.html")]
pub struct FillSurveyTemplate {
    pub ctx: PageContext,
    pub survey: Survey,
    pub slots: Vec<AnswerSlot>,
    pub name: String,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "responses/list.html")]
pub struct CompletedListTemplate {
    pub ctx: PageContext,
    pub survey: Survey,
    pub completed: Vec<CompletedSurvey>,
    pub tally: Vec<QuestionTally>,
}

#[derive(Template)]
#[template(path = "responses/detail.html")]
pub struct CompletedDetailTemplate {
    pub ctx: PageContext,
    pub detail: CompletedSurveyDetail,
}
