use actix_session::Session;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const USER_ID_KEY: &str = "user_id";
pub const ROLE_KEY: &str = "role";
const FLASH_KEY: &str = "flash";
const EXPIRES_KEY: &str = "expires_at";

/// Lifetime of a login without "remember me". Remembered logins last as long
/// as the session cookie itself.
pub const UNREMEMBERED_TTL_SECS: i64 = 12 * 60 * 60;

/// The two roles the application knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// Opaque caller identity handed to the survey operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: String,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self { user_id: user_id.into(), role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Err(PermissionDenied) unless the actor is an admin.
    pub fn require_admin(&self, action: &str) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::PermissionDenied(action.to_string()))
        }
    }
}

pub fn get_user_id(session: &Session) -> Option<String> {
    session.get::<String>(USER_ID_KEY).unwrap_or(None)
}

/// Read the logged-in actor from the session.
pub fn get_actor(session: &Session) -> Result<Actor, AppError> {
    let user_id = get_user_id(session)
        .ok_or_else(|| AppError::Session("No user in session".to_string()))?;
    let role = session
        .get::<String>(ROLE_KEY)
        .map_err(|e| AppError::Session(e.to_string()))?
        .as_deref()
        .and_then(Role::from_name)
        .ok_or_else(|| AppError::Session("No role in session".to_string()))?;
    Ok(Actor { user_id, role })
}

/// Read the actor and check it holds the admin role.
pub fn require_admin(session: &Session, action: &str) -> Result<Actor, AppError> {
    let actor = get_actor(session)?;
    actor.require_admin(action)?;
    Ok(actor)
}

/// Store the authenticated identity, rotating the session id.
pub fn log_in(session: &Session, actor: &Actor, remember: bool) -> Result<(), AppError> {
    session.renew();
    if !remember {
        session
            .insert(EXPIRES_KEY, Utc::now().timestamp() + UNREMEMBERED_TTL_SECS)
            .map_err(|e| AppError::Session(e.to_string()))?;
    }
    session
        .insert(USER_ID_KEY, &actor.user_id)
        .map_err(|e| AppError::Session(e.to_string()))?;
    session
        .insert(ROLE_KEY, actor.role.as_str())
        .map_err(|e| AppError::Session(e.to_string()))?;
    Ok(())
}

/// True when the login was not remembered and its lifetime has run out.
pub fn is_expired(session: &Session) -> bool {
    let expires_at = session.get::<i64>(EXPIRES_KEY).unwrap_or(None);
    expired_at(expires_at, Utc::now().timestamp())
}

fn expired_at(expires_at: Option<i64>, now: i64) -> bool {
    matches!(expires_at, Some(deadline) if now >= deadline)
}

pub fn set_flash(session: &Session, message: &str) {
    let _ = session.insert(FLASH_KEY, message);
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>(FLASH_KEY).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH_KEY);
    }
    flash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_round_trip() {
        assert_eq!(Role::from_name("admin"), Some(Role::Admin));
        assert_eq!(Role::from_name(Role::User.as_str()), Some(Role::User));
        assert_eq!(Role::from_name("root"), None);
    }

    #[test]
    fn remembered_logins_never_expire() {
        assert!(!expired_at(None, i64::MAX));
    }

    #[test]
    fn unremembered_login_expires_at_deadline() {
        let deadline = 1_700_000_000;
        assert!(!expired_at(Some(deadline), deadline - 1));
        assert!(expired_at(Some(deadline), deadline));
        assert!(expired_at(Some(deadline), deadline + UNREMEMBERED_TTL_SECS));
    }

    #[test]
    fn only_admin_passes_require_admin() {
        let admin = Actor::new("admin", Role::Admin);
        let user = Actor::new("user", Role::User);
        assert!(admin.require_admin("survey.delete").is_ok());
        match user.require_admin("survey.delete") {
            Err(AppError::PermissionDenied(action)) => assert_eq!(action, "survey.delete"),
            other => panic!("expected PermissionDenied, got {other:?}"),
        }
    }
}
