pub mod auth_handlers;
pub mod dashboard;
pub mod note_handlers;
pub mod response_handlers;
pub mod survey_handlers;

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::auth;

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

/// Route table shared by the server and the HTTP tests. Everything except
/// `/login` sits behind `require_auth`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::get().to(auth_handlers::login_page))
        .route("/login", web::post().to(auth_handlers::login_submit))
        .service(
            web::scope("")
                .wrap(actix_web::middleware::from_fn(auth::middleware::require_auth))
                .route("/", web::get().to(dashboard::index))
                .route("/logout", web::post().to(auth_handlers::logout))
                .route("/success", web::get().to(dashboard::success))
                .route("/view_count", web::get().to(dashboard::view_count))
                // Surveys
                .route("/surveys/new", web::get().to(survey_handlers::new_form))
                .route("/surveys/new", web::post().to(survey_handlers::create))
                .route("/surveys/{id}", web::get().to(survey_handlers::detail))
                .route("/surveys/{id}/questions", web::get().to(survey_handlers::questions_page))
                .route("/surveys/{id}/questions", web::post().to(survey_handlers::add_question))
                .route("/surveys/{id}/edit", web::get().to(survey_handlers::edit_form))
                .route("/surveys/{id}/edit", web::post().to(survey_handlers::edit_submit))
                .route("/surveys/{id}/delete", web::post().to(survey_handlers::delete))
                .route("/questions/{id}/delete", web::post().to(survey_handlers::delete_question))
                // Responses
                .route("/surveys/{id}/fill", web::get().to(response_handlers::fill_form))
                .route("/surveys/{id}/fill", web::post().to(response_handlers::fill_submit))
                .route("/surveys/{id}/responses", web::get().to(response_handlers::list))
                .route("/responses/{id}", web::get().to(response_handlers::detail))
                // Notes
                .route("/surveys/{id}/notes/new", web::get().to(note_handlers::new_form))
                .route("/surveys/{id}/notes/new", web::post().to(note_handlers::create))
                .route("/notes/{id}/delete", web::post().to(note_handlers::delete)),
        );
}
