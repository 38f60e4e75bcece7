//! Per-session form tokens. Every state-changing form posts the token back
//! in a `csrf_token` field.

use actix_session::Session;
use rand::Rng;

use crate::errors::AppError;

const CSRF_KEY: &str = "csrf_token";
const FORM_FIELD: &str = "csrf_token";

/// The session's token, issued on first use.
pub fn session_token(session: &Session) -> Result<String, AppError> {
    if let Some(token) = session.get::<String>(CSRF_KEY).unwrap_or(None) {
        return Ok(token);
    }
    let token = new_token();
    session
        .insert(CSRF_KEY, &token)
        .map_err(|e| AppError::Session(e.to_string()))?;
    Ok(token)
}

pub fn validate_csrf(session: &Session, submitted: &str) -> Result<(), AppError> {
    let stored = session.get::<String>(CSRF_KEY).unwrap_or(None);
    if tokens_match(stored.as_deref(), submitted) {
        Ok(())
    } else {
        log::warn!("Rejected form post with a bad CSRF token");
        Err(AppError::Csrf)
    }
}

/// Same check for forms decoded as raw key/value pairs.
pub fn validate_form_fields(session: &Session, fields: &[(String, String)]) -> Result<(), AppError> {
    let submitted = fields
        .iter()
        .find(|(k, _)| k == FORM_FIELD)
        .map(|(_, v)| v.as_str())
        .unwrap_or("");
    validate_csrf(session, submitted)
}

fn new_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    hex::encode(bytes)
}

/// No stored token never matches. Comparison runs over every byte.
fn tokens_match(stored: Option<&str>, submitted: &str) -> bool {
    match stored {
        Some(stored) if !stored.is_empty() && stored.len() == submitted.len() => {
            stored
                .bytes()
                .zip(submitted.bytes())
                .fold(0u8, |acc, (x, y)| acc | (x ^ y))
                == 0
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_64_hex_chars_and_unique() {
        let a = new_token();
        let b = new_token();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn matching_needs_identical_tokens() {
        assert!(tokens_match(Some("abc"), "abc"));
        assert!(!tokens_match(Some("abc"), "abd"));
        assert!(!tokens_match(Some("abc"), "abcd"));
    }

    #[test]
    fn missing_or_empty_session_token_rejects_everything() {
        assert!(!tokens_match(None, ""));
        assert!(!tokens_match(None, "abc"));
        assert!(!tokens_match(Some(""), ""));
    }
}
