use actix_session::Session;
use actix_web::{HttpResponse, web};

use super::{CsrfOnly, see_other};
use crate::auth::csrf;
use crate::auth::session::{require_admin, set_flash};
use crate::config::AppConfig;
use crate::db::DbPool;
use crate::errors::{AppError, render, validation_message};
use crate::models::note::{self, NoteForm};
use crate::models::survey;
use crate::templates_structs::{NoteFormTemplate, PageContext};

pub async fn new_form(
    pool: web::Data<DbPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &config)?;
    let survey = survey::get(&pool, path.into_inner()).await?;
    render(NoteFormTemplate { ctx, survey, content: String::new(), errors: vec![] })
}

/// Any logged-in user may annotate a survey.
pub async fn create(
    pool: web::Data<DbPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<NoteForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let survey_id = path.into_inner();

    match validation_message(note::create(&pool, survey_id, &form.content).await)? {
        Ok(_) => Ok(see_other(&format!("/surveys/{survey_id}"))),
        Err(msg) => {
            let survey = survey::get(&pool, survey_id).await?;
            let ctx = PageContext::build(&session, &config)?;
            render(NoteFormTemplate { ctx, survey, content: form.content.clone(), errors: vec![msg] })
        }
    }
}

/// Admin only. Deleting a note that is already gone is not an error.
pub async fn delete(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    require_admin(&session, "note.delete")?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    match note::delete(&pool, path.into_inner()).await? {
        Some(survey_id) => {
            set_flash(&session, "Note deleted");
            Ok(see_other(&format!("/surveys/{survey_id}")))
        }
        None => Ok(see_other("/")),
    }
}
