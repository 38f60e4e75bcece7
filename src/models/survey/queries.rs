use sqlx::{Sqlite, Transaction};

use super::types::*;
use crate::auth::validate::{QUESTION_MAX, TITLE_MAX, validate_required};
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::note;

/// Create a survey with no questions.
pub async fn create(pool: &DbPool, title: &str) -> Result<Survey, AppError> {
    let title = validate_required(title, "Title", TITLE_MAX)?;
    let survey = sqlx::query_as::<_, Survey>(
        "INSERT INTO survey (title) VALUES ($1) RETURNING id, title",
    )
    .bind(&title)
    .fetch_one(pool)
    .await?;
    log::info!("Created survey {} '{}'", survey.id, survey.title);
    Ok(survey)
}

/// All surveys in creation order.
pub async fn find_all(pool: &DbPool) -> Result<Vec<Survey>, AppError> {
    let surveys = sqlx::query_as::<_, Survey>("SELECT id, title FROM survey ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(surveys)
}

pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Survey>, AppError> {
    let survey = sqlx::query_as::<_, Survey>("SELECT id, title FROM survey WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(survey)
}

/// Like `find_by_id`, but a missing survey is an error.
pub async fn get(pool: &DbPool, id: i64) -> Result<Survey, AppError> {
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Survey {id}")))
}

/// Questions of a survey in insertion order.
pub async fn find_questions(pool: &DbPool, survey_id: i64) -> Result<Vec<Question>, AppError> {
    let questions = sqlx::query_as::<_, Question>(
        "SELECT id, content, survey_id FROM question WHERE survey_id = $1 ORDER BY id",
    )
    .bind(survey_id)
    .fetch_all(pool)
    .await?;
    Ok(questions)
}

pub async fn find_question(pool: &DbPool, question_id: i64) -> Result<Option<Question>, AppError> {
    let question = sqlx::query_as::<_, Question>(
        "SELECT id, content, survey_id FROM question WHERE id = $1",
    )
    .bind(question_id)
    .fetch_optional(pool)
    .await?;
    Ok(question)
}

/// Survey with its questions and notes.
pub async fn find_detail(pool: &DbPool, id: i64) -> Result<SurveyDetail, AppError> {
    let survey = get(pool, id).await?;
    let questions = find_questions(pool, id).await?;
    let notes = note::find_for_survey(pool, id).await?;
    Ok(SurveyDetail { survey, questions, notes })
}

/// Append a question to the end of a survey's list.
pub async fn add_question(pool: &DbPool, survey_id: i64, content: &str) -> Result<Question, AppError> {
    let content = validate_required(content, "Question", QUESTION_MAX)?;
    let mut tx = pool.begin().await?;
    ensure_survey(&mut tx, survey_id).await?;
    let question = insert_question(&mut tx, survey_id, &content).await?;
    tx.commit().await?;
    Ok(question)
}

/// Apply updates, additions and deletions to a survey's questions as one
/// transaction. Deleting a question deletes its answers. Any id that does not
/// belong to the survey aborts the whole edit.
pub async fn edit(pool: &DbPool, survey_id: i64, changes: &SurveyEdit) -> Result<EditSummary, AppError> {
    // Validate everything before touching the database. Questions marked
    // for deletion are not updated, so their content is not checked.
    let updated = changes
        .updated
        .iter()
        .filter(|(id, _)| !changes.deleted.contains(id))
        .map(|(id, content)| -> Result<(i64, String), AppError> {
            Ok((*id, validate_required(content, "Question", QUESTION_MAX)?))
        })
        .collect::<Result<Vec<_>, AppError>>()?;
    let added = changes
        .added
        .iter()
        .filter(|content| !content.trim().is_empty())
        .map(|content| validate_required(content, "Question", QUESTION_MAX))
        .collect::<Result<Vec<_>, AppError>>()?;

    let mut tx = pool.begin().await?;
    ensure_survey(&mut tx, survey_id).await?;

    for (id, content) in &updated {
        let result = sqlx::query("UPDATE question SET content = $1 WHERE id = $2 AND survey_id = $3")
            .bind(content)
            .bind(id)
            .bind(survey_id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Question {id}")));
        }
    }

    for content in &added {
        insert_question(&mut tx, survey_id, content).await?;
    }

    for id in &changes.deleted {
        if !delete_question_tx(&mut tx, *id, Some(survey_id)).await? {
            return Err(AppError::NotFound(format!("Question {id}")));
        }
    }

    tx.commit().await?;

    let summary = EditSummary {
        updated: updated.len(),
        added: added.len(),
        deleted: changes.deleted.len(),
    };
    log::info!("Edited survey {survey_id}: {summary:?}");
    Ok(summary)
}

/// Delete a survey and everything hanging off it: answers, completed surveys,
/// questions and notes. All or nothing.
pub async fn delete(pool: &DbPool, survey_id: i64) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    ensure_survey(&mut tx, survey_id).await?;

    sqlx::query(
        "DELETE FROM answer \
         WHERE question_id IN (SELECT id FROM question WHERE survey_id = $1) \
            OR completed_survey_id IN (SELECT id FROM completed_survey WHERE survey_id = $1)",
    )
    .bind(survey_id)
    .execute(&mut *tx)
    .await?;

    for sql in [
        "DELETE FROM completed_survey WHERE survey_id = $1",
        "DELETE FROM question WHERE survey_id = $1",
        "DELETE FROM note WHERE survey_id = $1",
        "DELETE FROM survey WHERE id = $1",
    ] {
        sqlx::query(sql).bind(survey_id).execute(&mut *tx).await?;
    }

    tx.commit().await?;
    log::info!("Deleted survey {survey_id}");
    Ok(())
}

/// Delete one question and its answers. Returns the owning survey id.
pub async fn delete_question(pool: &DbPool, question_id: i64) -> Result<i64, AppError> {
    let question = find_question(pool, question_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Question {question_id}")))?;

    let mut tx = pool.begin().await?;
    if !delete_question_tx(&mut tx, question_id, None).await? {
        return Err(AppError::NotFound(format!("Question {question_id}")));
    }
    tx.commit().await?;
    Ok(question.survey_id)
}

async fn ensure_survey(tx: &mut Transaction<'_, Sqlite>, survey_id: i64) -> Result<(), AppError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM survey WHERE id = $1)")
        .bind(survey_id)
        .fetch_one(&mut **tx)
        .await?;
    if exists {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("Survey {survey_id}")))
    }
}

async fn insert_question(
    tx: &mut Transaction<'_, Sqlite>,
    survey_id: i64,
    content: &str,
) -> Result<Question, AppError> {
    let question = sqlx::query_as::<_, Question>(
        "INSERT INTO question (content, survey_id) VALUES ($1, $2) \
         RETURNING id, content, survey_id",
    )
    .bind(content)
    .bind(survey_id)
    .fetch_one(&mut **tx)
    .await?;
    Ok(question)
}

/// Returns false when no matching question exists (optionally scoped to a survey).
async fn delete_question_tx(
    tx: &mut Transaction<'_, Sqlite>,
    question_id: i64,
    survey_id: Option<i64>,
) -> Result<bool, AppError> {
    let owner: Option<i64> = sqlx::query_scalar("SELECT survey_id FROM question WHERE id = $1")
        .bind(question_id)
        .fetch_optional(&mut **tx)
        .await?;
    match (owner, survey_id) {
        (None, _) => return Ok(false),
        (Some(owner), Some(expected)) if owner != expected => return Ok(false),
        _ => {}
    }

    sqlx::query("DELETE FROM answer WHERE question_id = $1")
        .bind(question_id)
        .execute(&mut **tx)
        .await?;
    sqlx::query("DELETE FROM question WHERE id = $1")
        .bind(question_id)
        .execute(&mut **tx)
        .await?;
    Ok(true)
}
