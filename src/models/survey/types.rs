use serde::Deserialize;

use crate::models::note::Note;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Survey {
    pub id: i64,
    pub title: String,
}

/// One yes/no question. Ordered within its survey by id (insertion order).
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub content: String,
    pub survey_id: i64,
}

/// Survey page: the survey with its questions and notes.
#[derive(Debug, Clone)]
pub struct SurveyDetail {
    pub survey: Survey,
    pub questions: Vec<Question>,
    pub notes: Vec<Note>,
}

/// One edit transaction against a survey's question list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurveyEdit {
    /// (question id, new content) for existing questions.
    pub updated: Vec<(i64, String)>,
    /// Contents of questions to append, in order. Blank entries are ignored.
    pub added: Vec<String>,
    /// Question ids to delete together with their answers.
    pub deleted: Vec<i64>,
}

/// Counts of what an edit actually changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditSummary {
    pub updated: usize,
    pub added: usize,
    pub deleted: usize,
}

impl SurveyEdit {
    /// Decode the edit-survey form.
    ///
    /// `question_{id}` carries updated content, `question_new_{n}` a question to
    /// append and `delete_{id}` marks a question for deletion. Unknown keys
    /// (such as `csrf_token`) and unparseable ids are skipped.
    pub fn from_form(fields: &[(String, String)]) -> Self {
        let mut edit = SurveyEdit::default();
        for (key, value) in fields {
            if key.starts_with("question_new_") {
                edit.added.push(value.clone());
            } else if let Some(id) = key.strip_prefix("question_") {
                if let Ok(id) = id.parse::<i64>() {
                    edit.updated.push((id, value.clone()));
                }
            } else if let Some(id) = key.strip_prefix("delete_") {
                if let Ok(id) = id.parse::<i64>() {
                    if !edit.deleted.contains(&id) {
                        edit.deleted.push(id);
                    }
                }
            }
        }
        edit
    }

    pub fn is_empty(&self) -> bool {
        self.updated.is_empty() && self.added.is_empty() && self.deleted.is_empty()
    }
}

#[derive(Debug, Deserialize)]
pub struct SurveyForm {
    pub title: String,
    pub csrf_token: String,
}

#[derive(Debug, Deserialize)]
pub struct QuestionForm {
    pub content: String,
    pub csrf_token: String,
}
