use actix_session::Session;
use actix_web::{HttpResponse, web};

use super::see_other;
use crate::auth::csrf;
use crate::auth::session::get_actor;
use crate::config::AppConfig;
use crate::db::DbPool;
use crate::errors::{AppError, render, validation_message};
use crate::models::response::{self, FillForm, NewResponse};
use crate::models::survey;
use crate::templates_structs::{
    CompletedDetailTemplate, CompletedListTemplate, FillSurveyTemplate, PageContext,
};

pub async fn fill_form(
    pool: web::Data<DbPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &config)?;
    let fill = response::begin_fill_out(&pool, path.into_inner()).await?;
    render(FillSurveyTemplate {
        ctx,
        survey: fill.survey,
        slots: fill.slots,
        name: String::new(),
        errors: vec![],
    })
}

pub async fn fill_submit(
    pool: web::Data<DbPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<Vec<(String, String)>>,
) -> Result<HttpResponse, AppError> {
    let form = FillForm::from_fields(&form);
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let actor = get_actor(&session)?;
    let survey_id = path.into_inner();

    let new = NewResponse {
        respondent_name: form.name.clone(),
        user_id: actor.user_id,
        answers: form.answers.clone(),
    };

    match validation_message(response::submit(&pool, survey_id, &new).await)? {
        Ok(_) => Ok(see_other("/success")),
        Err(msg) => {
            // Re-render with what the respondent already entered.
            let mut fill = response::begin_fill_out(&pool, survey_id).await?;
            for (slot, answer) in fill.slots.iter_mut().zip(form.answers) {
                slot.answer = answer;
            }
            let ctx = PageContext::build(&session, &config)?;
            render(FillSurveyTemplate {
                ctx,
                survey: fill.survey,
                slots: fill.slots,
                name: form.name,
                errors: vec![msg],
            })
        }
    }
}

/// Completed surveys for one survey, with per-question yes/no totals.
pub async fn list(
    pool: web::Data<DbPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let survey_id = path.into_inner();
    let survey = survey::get(&pool, survey_id).await?;
    let completed = response::list_completed(&pool, survey_id).await?;
    let tally = response::tally(&pool, survey_id).await?;
    let ctx = PageContext::build(&session, &config)?;
    render(CompletedListTemplate { ctx, survey, completed, tally })
}

pub async fn detail(
    pool: web::Data<DbPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &config)?;
    let detail = response::get_detail(&pool, path.into_inner()).await?;
    render(CompletedDetailTemplate { ctx, detail })
}
