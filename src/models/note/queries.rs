use chrono::Utc;

use super::types::*;
use crate::auth::validate::{NOTE_MAX, validate_required};
use crate::db::DbPool;
use crate::errors::AppError;

/// Attach a note to a survey.
pub async fn create(pool: &DbPool, survey_id: i64, content: &str) -> Result<Note, AppError> {
    let content = validate_required(content, "Note", NOTE_MAX)?;

    let survey_exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM survey WHERE id = $1)")
        .bind(survey_id)
        .fetch_one(pool)
        .await?;
    if !survey_exists {
        return Err(AppError::NotFound(format!("Survey {survey_id}")));
    }

    let note = sqlx::query_as::<_, Note>(
        "INSERT INTO note (content, timestamp, survey_id) VALUES ($1, $2, $3) \
         RETURNING id, content, timestamp, survey_id",
    )
    .bind(&content)
    .bind(Utc::now().naive_utc())
    .bind(survey_id)
    .fetch_one(pool)
    .await?;
    Ok(note)
}

/// Notes of a survey in creation order.
pub async fn find_for_survey(pool: &DbPool, survey_id: i64) -> Result<Vec<Note>, AppError> {
    let notes = sqlx::query_as::<_, Note>(
        "SELECT id, content, timestamp, survey_id FROM note WHERE survey_id = $1 ORDER BY id",
    )
    .bind(survey_id)
    .fetch_all(pool)
    .await?;
    Ok(notes)
}

/// Delete a note. A missing note is not an error; returns the owning survey
/// id when something was deleted.
pub async fn delete(pool: &DbPool, note_id: i64) -> Result<Option<i64>, AppError> {
    let survey_id: Option<i64> = sqlx::query_scalar("DELETE FROM note WHERE id = $1 RETURNING survey_id")
        .bind(note_id)
        .fetch_optional(pool)
        .await?;
    Ok(survey_id)
}
