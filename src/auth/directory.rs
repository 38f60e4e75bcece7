//! Pluggable user lookup used by the login handler.

use std::collections::HashMap;

use super::password;
use super::session::Role;
use crate::config::AppConfig;
use crate::errors::AppError;

/// Stored credentials for one account.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub password_hash: String,
    pub role: Role,
}

pub trait UserDirectory: Send + Sync {
    fn find_user(&self, id: &str) -> Option<UserRecord>;
}

/// In-memory directory with a fixed set of accounts.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    users: HashMap<String, UserRecord>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, id: &str, password_hash: String, role: Role) -> Self {
        self.users
            .insert(id.to_string(), UserRecord { password_hash, role });
        self
    }

    /// The two built-in accounts, `user` and `admin`, with configured passwords.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        Ok(Self::new()
            .with_user("user", password::hash_password(&config.user_password)?, Role::User)
            .with_user("admin", password::hash_password(&config.admin_password)?, Role::Admin))
    }
}

impl UserDirectory for StaticDirectory {
    fn find_user(&self, id: &str) -> Option<UserRecord> {
        self.users.get(id).cloned()
    }
}

/// Check a login attempt. Returns the role on success, `None` for an unknown
/// user or a wrong password.
pub fn authenticate(
    directory: &dyn UserDirectory,
    id: &str,
    password_attempt: &str,
) -> Result<Option<Role>, AppError> {
    let Some(record) = directory.find_user(id) else {
        return Ok(None);
    };
    if password::verify_password(password_attempt, &record.password_hash)? {
        Ok(Some(record.role))
    } else {
        Ok(None)
    }
}
