use actix_web::{HttpResponse, ResponseError};
use askama::Template;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Db(sqlx::Error),
    Template(askama::Error),
    Hash(String),
    Session(String),
    Validation(String),
    NotFound(String),
    PermissionDenied(String),
    Csrf,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(e) => write!(f, "Database error: {e}"),
            AppError::Template(e) => write!(f, "Template error: {e}"),
            AppError::Hash(e) => write!(f, "Hash error: {e}"),
            AppError::Session(e) => write!(f, "Session error: {e}"),
            AppError::Validation(msg) => write!(f, "{msg}"),
            AppError::NotFound(what) => write!(f, "{what} not found"),
            AppError::PermissionDenied(action) => write!(f, "Permission denied: {action}"),
            AppError::Csrf => write!(f, "Invalid or missing CSRF token"),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(msg) => HttpResponse::BadRequest().body(msg.clone()),
            AppError::NotFound(_) => HttpResponse::NotFound().body(self.to_string()),
            AppError::PermissionDenied(action) => {
                log::warn!("Permission denied: {action}");
                HttpResponse::Forbidden().body("Permission denied")
            }
            AppError::Csrf => HttpResponse::Forbidden().body(self.to_string()),
            AppError::Session(e) => {
                log::warn!("Session error: {e}");
                HttpResponse::SeeOther()
                    .insert_header(("Location", "/login"))
                    .finish()
            }
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Db(e)
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}

/// Render an askama template into an HTML response.
pub fn render<T: Template>(tmpl: T) -> Result<HttpResponse, AppError> {
    let body = tmpl.render()?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}

/// Helper for form handlers: turn a validation failure into `Some(message)` so the
/// form can be re-rendered, pass everything else through.
pub fn validation_message<T>(result: Result<T, AppError>) -> Result<Result<T, String>, AppError> {
    match result {
        Ok(v) => Ok(Ok(v)),
        Err(AppError::Validation(msg)) => Ok(Err(msg)),
        Err(e) => Err(e),
    }
}
