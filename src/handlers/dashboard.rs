use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::config::AppConfig;
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::page_view::{self, SUCCESS_PAGE};
use crate::models::survey;
use crate::templates_structs::{IndexTemplate, PageContext, SuccessTemplate};

/// Survey list plus the success-page view counter.
pub async fn index(
    pool: web::Data<DbPool>,
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &config)?;
    let surveys = survey::find_all(&pool).await?;
    let views = page_view::get_view_count(&pool, SUCCESS_PAGE).await?;

    render(IndexTemplate { ctx, surveys, views })
}

/// Shown after a submission; each render counts as a view.
pub async fn success(
    pool: web::Data<DbPool>,
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &config)?;
    page_view::record_view(&pool, SUCCESS_PAGE).await?;

    render(SuccessTemplate { ctx })
}

pub async fn view_count(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let views = page_view::get_view_count(&pool, SUCCESS_PAGE).await?;
    Ok(HttpResponse::Ok().json(json!({ "views": views })))
}
