// Template context structures for Askama templates, organized by domain.

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::session::{get_actor, take_flash};
use crate::config::AppConfig;
use crate::errors::AppError;

mod common;
mod note;
mod response;
mod survey;

pub use self::common::{IndexTemplate, LoginTemplate, SuccessTemplate};
pub use self::note::NoteFormTemplate;
pub use self::response::{CompletedDetailTemplate, CompletedListTemplate, FillSurveyTemplate};
pub use self::survey::{EditSurveyTemplate, QuestionsTemplate, SurveyDetailTemplate, SurveyFormTemplate};

/// Common context shared by all authenticated pages.
/// Templates access these as `ctx.username`, `ctx.is_admin`, etc.
pub struct PageContext {
    pub username: String,
    pub is_admin: bool,
    pub flash: Option<String>,
    pub app_name: String,
    pub csrf_token: String,
}

impl PageContext {
    pub fn build(session: &Session, config: &AppConfig) -> Result<Self, AppError> {
        let actor = get_actor(session)?;
        Ok(Self {
            username: actor.user_id.clone(),
            is_admin: actor.is_admin(),
            flash: take_flash(session),
            app_name: config.app_name.clone(),
            csrf_token: csrf::session_token(session)?,
        })
    }
}
