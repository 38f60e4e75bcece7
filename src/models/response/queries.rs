use super::types::*;
use crate::auth::validate::{EXPLANATION_MAX, RESPONDENT_NAME_MAX, validate_optional, validate_required};
use crate::clock;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::survey::{self, Question};

/// The survey's current questions, each with a blank answer. Nothing is stored.
pub async fn begin_fill_out(pool: &DbPool, survey_id: i64) -> Result<FillOut, AppError> {
    let survey = survey::get(pool, survey_id).await?;
    let slots = survey::find_questions(pool, survey_id)
        .await?
        .into_iter()
        .map(|question| AnswerSlot { question, answer: AnswerInput::default() })
        .collect();
    Ok(FillOut { survey, slots })
}

/// Record one submission: a completed survey plus one answer per
/// (question, answer) pair, matched by position against the survey's current
/// question list. Fewer answers than questions is accepted; extra answers
/// have no question to attach to and are dropped.
pub async fn submit(pool: &DbPool, survey_id: i64, new: &NewResponse) -> Result<CompletedSurvey, AppError> {
    let name = validate_required(&new.respondent_name, "Name", RESPONDENT_NAME_MAX)?;
    let mut answers = Vec::with_capacity(new.answers.len());
    for (i, answer) in new.answers.iter().enumerate() {
        if answer.response_tak && answer.response_nie {
            return Err(AppError::Validation(format!(
                "Question {}: answer either yes or no, not both",
                i + 1
            )));
        }
        let explanation = validate_optional(answer.explanation.as_deref(), "Explanation", EXPLANATION_MAX)?;
        answers.push((answer.response_tak, answer.response_nie, explanation));
    }

    let mut tx = pool.begin().await?;

    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM survey WHERE id = $1)")
        .bind(survey_id)
        .fetch_one(&mut *tx)
        .await?;
    if !exists {
        return Err(AppError::NotFound(format!("Survey {survey_id}")));
    }

    let questions = sqlx::query_as::<_, Question>(
        "SELECT id, content, survey_id FROM question WHERE survey_id = $1 ORDER BY id",
    )
    .bind(survey_id)
    .fetch_all(&mut *tx)
    .await?;

    if answers.len() > questions.len() {
        log::warn!(
            "Survey {survey_id}: {} answers for {} questions, dropping the extra answers",
            answers.len(),
            questions.len()
        );
    }

    let completed = sqlx::query_as::<_, CompletedSurvey>(
        "INSERT INTO completed_survey (user_id, name, timestamp, survey_id) VALUES ($1, $2, $3, $4) \
         RETURNING id, user_id, name, timestamp, survey_id",
    )
    .bind(&new.user_id)
    .bind(&name)
    .bind(clock::now_local())
    .bind(survey_id)
    .fetch_one(&mut *tx)
    .await?;

    for (question, (tak, nie, explanation)) in questions.iter().zip(answers) {
        sqlx::query(
            "INSERT INTO answer (completed_survey_id, question_id, response_tak, response_nie, explanation) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(completed.id)
        .bind(question.id)
        .bind(tak)
        .bind(nie)
        .bind(explanation)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    log::info!(
        "Recorded response {} to survey {survey_id} from user '{}'",
        completed.id,
        completed.user_id
    );
    Ok(completed)
}

/// Submissions for a survey in storage order. Unknown survey → empty list.
pub async fn list_completed(pool: &DbPool, survey_id: i64) -> Result<Vec<CompletedSurvey>, AppError> {
    let rows = sqlx::query_as::<_, CompletedSurvey>(
        "SELECT id, user_id, name, timestamp, survey_id FROM completed_survey \
         WHERE survey_id = $1 ORDER BY id",
    )
    .bind(survey_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_answers(pool: &DbPool, completed_survey_id: i64) -> Result<Vec<Answer>, AppError> {
    let rows = sqlx::query_as::<_, Answer>(
        "SELECT id, completed_survey_id, question_id, response_tak, response_nie, explanation \
         FROM answer WHERE completed_survey_id = $1 ORDER BY id",
    )
    .bind(completed_survey_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// One submission with its answers joined to the question text.
pub async fn get_detail(pool: &DbPool, id: i64) -> Result<CompletedSurveyDetail, AppError> {
    let completed = sqlx::query_as::<_, CompletedSurvey>(
        "SELECT id, user_id, name, timestamp, survey_id FROM completed_survey WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Completed survey {id}")))?;

    let survey_title: String = sqlx::query_scalar("SELECT title FROM survey WHERE id = $1")
        .bind(completed.survey_id)
        .fetch_optional(pool)
        .await?
        .unwrap_or_default();

    let answers = sqlx::query_as::<_, AnswerDetail>(
        "SELECT a.id, a.question_id, q.content AS question_content, \
                a.response_tak, a.response_nie, a.explanation \
         FROM answer a \
         JOIN question q ON q.id = a.question_id \
         WHERE a.completed_survey_id = $1 \
         ORDER BY q.id",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(CompletedSurveyDetail { completed, survey_title, answers })
}

/// Yes/no totals per question, in question order.
pub async fn tally(pool: &DbPool, survey_id: i64) -> Result<Vec<QuestionTally>, AppError> {
    let rows = sqlx::query_as::<_, QuestionTally>(
        "SELECT q.id AS question_id, q.content, \
                COALESCE(SUM(CASE WHEN a.response_tak THEN 1 ELSE 0 END), 0) AS yes_count, \
                COALESCE(SUM(CASE WHEN a.response_nie THEN 1 ELSE 0 END), 0) AS no_count, \
                COALESCE(SUM(CASE WHEN a.id IS NOT NULL AND NOT a.response_tak AND NOT a.response_nie \
                                  THEN 1 ELSE 0 END), 0) AS blank_count \
         FROM question q \
         LEFT JOIN answer a ON a.question_id = q.id \
         WHERE q.survey_id = $1 \
         GROUP BY q.id, q.content \
         ORDER BY q.id",
    )
    .bind(survey_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
