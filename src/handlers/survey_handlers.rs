use actix_session::Session;
use actix_web::{HttpResponse, web};

use super::{CsrfOnly, see_other};
use crate::auth::csrf;
use crate::auth::session::{require_admin, set_flash};
use crate::config::AppConfig;
use crate::db::DbPool;
use crate::errors::{AppError, render, validation_message};
use crate::models::survey::{self, QuestionForm, SurveyEdit, SurveyForm};
use crate::templates_structs::{
    EditSurveyTemplate, PageContext, QuestionsTemplate, SurveyDetailTemplate, SurveyFormTemplate,
};

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

pub async fn new_form(
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    require_admin(&session, "survey.create")?;
    let ctx = PageContext::build(&session, &config)?;
    render(SurveyFormTemplate { ctx, title: String::new(), errors: vec![] })
}

pub async fn create(
    pool: web::Data<DbPool>,
    config: web::Data<AppConfig>,
    session: Session,
    form: web::Form<SurveyForm>,
) -> Result<HttpResponse, AppError> {
    require_admin(&session, "survey.create")?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    match validation_message(survey::create(&pool, &form.title).await)? {
        Ok(created) => Ok(see_other(&format!("/surveys/{}/questions", created.id))),
        Err(msg) => {
            let ctx = PageContext::build(&session, &config)?;
            render(SurveyFormTemplate { ctx, title: form.title.clone(), errors: vec![msg] })
        }
    }
}

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

pub async fn questions_page(
    pool: web::Data<DbPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    require_admin(&session, "survey.edit")?;
    let survey_id = path.into_inner();
    let survey = survey::get(&pool, survey_id).await?;
    let questions = survey::find_questions(&pool, survey_id).await?;
    let ctx = PageContext::build(&session, &config)?;
    render(QuestionsTemplate { ctx, survey, questions, errors: vec![] })
}

pub async fn add_question(
    pool: web::Data<DbPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<QuestionForm>,
) -> Result<HttpResponse, AppError> {
    require_admin(&session, "survey.edit")?;
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let survey_id = path.into_inner();

    match validation_message(survey::add_question(&pool, survey_id, &form.content).await)? {
        Ok(_) => Ok(see_other(&format!("/surveys/{survey_id}/questions"))),
        Err(msg) => {
            let survey = survey::get(&pool, survey_id).await?;
            let questions = survey::find_questions(&pool, survey_id).await?;
            let ctx = PageContext::build(&session, &config)?;
            render(QuestionsTemplate { ctx, survey, questions, errors: vec![msg] })
        }
    }
}

pub async fn delete_question(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    require_admin(&session, "survey.edit")?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let survey_id = survey::delete_question(&pool, path.into_inner()).await?;
    Ok(see_other(&format!("/surveys/{survey_id}/questions")))
}

// ---------------------------------------------------------------------------
// Detail / edit / delete
// ---------------------------------------------------------------------------

pub async fn detail(
    pool: web::Data<DbPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &config)?;
    let found = survey::find_detail(&pool, path.into_inner()).await?;
    render(SurveyDetailTemplate {
        ctx,
        survey: found.survey,
        questions: found.questions,
        notes: found.notes,
    })
}

pub async fn edit_form(
    pool: web::Data<DbPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    require_admin(&session, "survey.edit")?;
    let survey_id = path.into_inner();
    let survey = survey::get(&pool, survey_id).await?;
    let questions = survey::find_questions(&pool, survey_id).await?;
    let ctx = PageContext::build(&session, &config)?;
    render(EditSurveyTemplate { ctx, survey, questions, errors: vec![] })
}

pub async fn edit_submit(
    pool: web::Data<DbPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<Vec<(String, String)>>,
) -> Result<HttpResponse, AppError> {
    require_admin(&session, "survey.edit")?;
    csrf::validate_form_fields(&session, &form)?;
    let survey_id = path.into_inner();

    let changes = SurveyEdit::from_form(&form);
    if changes.is_empty() {
        return Ok(see_other(&format!("/surveys/{survey_id}")));
    }
    match validation_message(survey::edit(&pool, survey_id, &changes).await)? {
        Ok(summary) => {
            set_flash(
                &session,
                &format!(
                    "Saved: {} updated, {} added, {} deleted",
                    summary.updated, summary.added, summary.deleted
                ),
            );
            Ok(see_other(&format!("/surveys/{survey_id}")))
        }
        Err(msg) => {
            let survey = survey::get(&pool, survey_id).await?;
            let questions = survey::find_questions(&pool, survey_id).await?;
            let ctx = PageContext::build(&session, &config)?;
            render(EditSurveyTemplate { ctx, survey, questions, errors: vec![msg] })
        }
    }
}

pub async fn delete(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    let actor = require_admin(&session, "survey.delete")?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let survey_id = path.into_inner();
    survey::delete(&pool, survey_id).await?;
    log::info!("Survey {survey_id} deleted by '{}'", actor.user_id);
    set_flash(&session, "Survey deleted");
    Ok(see_other("/"))
}
