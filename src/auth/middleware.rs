use actix_session::SessionExt;
use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};

use super::session::{USER_ID_KEY, is_expired};

/// Middleware function that checks for an authenticated session.
/// Redirects to /login if there is no login or a short-lived login ran out;
/// an expired session is purged on the way.
pub async fn require_auth(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let session = req.get_session();
    let signed_in = match session.get::<String>(USER_ID_KEY).unwrap_or(None) {
        Some(user) if is_expired(&session) => {
            log::info!("Login of '{user}' expired without remember me");
            session.purge();
            false
        }
        Some(_) => true,
        None => false,
    };

    if !signed_in {
        let response = HttpResponse::SeeOther()
            .insert_header(("Location", "/login"))
            .finish();
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}
