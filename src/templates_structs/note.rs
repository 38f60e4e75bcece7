use askama::Template;

use super::PageContext;
use crate::models::survey::Survey;

#[derive(Template)]
#[template(path = "notes/form.html")]
pub struct NoteFormTemplate {
    pub ctx: PageContext,
    pub survey: Survey,
    pub content: String,
    pub errors: Vec<String>,
}
