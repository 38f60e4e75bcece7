use chrono::NaiveDateTime;
use serde::Deserialize;

/// Free-text annotation on a survey. `timestamp` is UTC.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Note {
    pub id: i64,
    pub content: String,
    pub timestamp: NaiveDateTime,
    pub survey_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct NoteForm {
    pub content: String,
    pub csrf_token: String,
}
