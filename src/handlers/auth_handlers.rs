use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use super::{CsrfOnly, see_other};
use crate::auth::directory::{UserDirectory, authenticate};
use crate::auth::session::{Actor, get_user_id, log_in};
use crate::auth::csrf;
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::templates_structs::LoginTemplate;

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub csrf_token: String,
    /// Checkbox; present only when ticked.
    #[serde(default)]
    pub remember: Option<String>,
}

pub async fn login_page(
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    if get_user_id(&session).is_some() {
        return Ok(see_other("/"));
    }

    let csrf_token = csrf::session_token(&session)?;
    render(LoginTemplate { error: None, app_name: config.app_name.clone(), csrf_token })
}

pub async fn login_submit(
    config: web::Data<AppConfig>,
    directory: web::Data<dyn UserDirectory>,
    session: Session,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let LoginForm { username, password, remember, .. } = form.into_inner();
    let remember = remember.is_some_and(|v| !v.is_empty());
    let username = username.trim().to_string();

    // argon2 verification is CPU-bound
    let directory = directory.into_inner();
    let lookup_name = username.clone();
    let role = tokio::task::spawn_blocking(move || {
        authenticate(directory.as_ref(), &lookup_name, &password)
    })
    .await
    .map_err(|e| AppError::Hash(e.to_string()))??;

    match role {
        Some(role) => {
            let actor = Actor::new(username, role);
            log_in(&session, &actor, remember)?;
            log::info!(
                "User '{}' logged in as {} (remember me: {remember})",
                actor.user_id,
                role.as_str()
            );
            Ok(see_other("/"))
        }
        None => {
            log::warn!("Failed login attempt for '{username}'");
            let csrf_token = csrf::session_token(&session)?;
            render(LoginTemplate {
                error: Some("Invalid username or password".to_string()),
                app_name: config.app_name.clone(),
                csrf_token,
            })
        }
    }
}

pub async fn logout(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    session.purge();
    Ok(see_other("/login"))
}
