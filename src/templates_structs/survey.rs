use askama::Template;

use super::PageContext;
use crate::models::note::Note;
use crate::models::survey::{Question, Survey};

#[derive(Template)]
#[template(path = "surveys/form.html")]
pub struct SurveyFormTemplate {
    pub ctx: PageContext,
    pub title: String,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "surveys/questions.html")]
pub struct QuestionsTemplate {
    pub ctx: PageContext,
    pub survey: Survey,
    pub questions: Vec<Question>,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "surveys/detail.html")]
pub struct SurveyDetailTemplate {
    pub ctx: PageContext,
    pub survey: Survey,
    pub questions: Vec<Question>,
    pub notes: Vec<Note>,
}

#[derive(Template)]
#[template(path = "surveys/edit.html")]
pub struct EditSurveyTemplate {
    pub ctx: PageContext,
    pub survey: Survey,
    pub questions: Vec<Question>,
    pub errors: Vec<String>,
}
