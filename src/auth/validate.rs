use crate::errors::AppError;

pub const TITLE_MAX: usize = 100;
pub const QUESTION_MAX: usize = 500;
pub const RESPONDENT_NAME_MAX: usize = 200;
pub const EXPLANATION_MAX: usize = 500;
pub const NOTE_MAX: usize = 500;

/// Validate a required text field with a max length. Returns the trimmed value.
pub fn validate_required(value: &str, field_name: &str, max_len: usize) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field_name} is required")));
    }
    if trimmed.chars().count() > max_len {
        return Err(AppError::Validation(format!(
            "{field_name} must be at most {max_len} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate an optional text field (empty becomes `None`).
pub fn validate_optional(
    value: Option<&str>,
    field_name: &str,
    max_len: usize,
) -> Result<Option<String>, AppError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.chars().count() > max_len => Err(AppError::Validation(format!(
            "{field_name} must be at most {max_len} characters"
        ))),
        Some(v) => Ok(Some(v.to_string())),
    }
}
