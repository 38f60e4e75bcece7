use chrono::NaiveDateTime;

use crate::models::survey::{Question, Survey};

/// One respondent's submission. `timestamp` is reference-timezone wall time.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct CompletedSurvey {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub timestamp: NaiveDateTime,
    pub survey_id: i64,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Answer {
    pub id: i64,
    pub completed_survey_id: i64,
    pub question_id: i64,
    pub response_tak: bool,
    pub response_nie: bool,
    pub explanation: Option<String>,
}

/// What a respondent entered for one question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerInput {
    pub response_tak: bool,
    pub response_nie: bool,
    pub explanation: Option<String>,
}

impl AnswerInput {
    pub fn yes() -> Self {
        Self { response_tak: true, ..Self::default() }
    }

    pub fn no(explanation: &str) -> Self {
        Self {
            response_nie: true,
            explanation: Some(explanation.to_string()),
            ..Self::default()
        }
    }
}

/// A question paired with an (initially blank) answer.
#[derive(Debug, Clone)]
pub struct AnswerSlot {
    pub question: Question,
    pub answer: AnswerInput,
}

/// Fill-out form state: the survey's current questions with blank slots.
#[derive(Debug, Clone)]
pub struct FillOut {
    pub survey: Survey,
    pub slots: Vec<AnswerSlot>,
}

#[derive(Debug, Clone)]
pub struct NewResponse {
    pub respondent_name: String,
    pub user_id: String,
    /// Positionally aligned with the survey's question list.
    pub answers: Vec<AnswerInput>,
}

/// Answer joined with its question text.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct AnswerDetail {
    pub id: i64,
    pub question_id: i64,
    pub question_content: String,
    pub response_tak: bool,
    pub response_nie: bool,
    pub explanation: Option<String>,
}

impl AnswerDetail {
    pub fn verdict(&self) -> &'static str {
        match (self.response_tak, self.response_nie) {
            (true, _) => "Yes",
            (_, true) => "No",
            _ => "-",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompletedSurveyDetail {
    pub completed: CompletedSurvey,
    pub survey_title: String,
    pub answers: Vec<AnswerDetail>,
}

/// Per-question yes/no totals across all submissions of a survey.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct QuestionTally {
    pub question_id: i64,
    pub content: String,
    pub yes_count: i64,
    pub no_count: i64,
    pub blank_count: i64,
}
