//! Survey model tests: creation, question ordering, the edit transaction and
//! cascading deletes.

mod common;

use common::{count_rows, seed_survey, setup_test_db};
use surveys::errors::AppError;
use surveys::models::response::{self, AnswerInput, NewResponse};
use surveys::models::survey::{self, SurveyEdit};
use surveys::models::note;

fn response_from(user: &str, answers: Vec<AnswerInput>) -> NewResponse {
    NewResponse {
        respondent_name: "Jan Kowalski".to_string(),
        user_id: user.to_string(),
        answers,
    }
}

// ---------------------------------------------------------------------------
// Create / questions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_survey_starts_empty() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let created = survey::create(pool, "  Canteen quality  ").await.expect("create");
    assert_eq!(created.title, "Canteen quality");

    let found = survey::find_by_id(pool, created.id).await.expect("query").expect("missing");
    assert_eq!(found, created);
    assert!(survey::find_questions(pool, created.id).await.expect("questions").is_empty());
}

#[tokio::test]
async fn test_create_survey_rejects_blank_and_long_titles() {
    let db = setup_test_db().await;
    let pool = db.pool();

    assert!(matches!(survey::create(pool, "   ").await, Err(AppError::Validation(_))));
    let long = "x".repeat(101);
    assert!(matches!(survey::create(pool, &long).await, Err(AppError::Validation(_))));
    assert_eq!(count_rows(pool, "survey").await, 0);
}

#[tokio::test]
async fn test_questions_keep_insertion_order() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let (created, _) = seed_survey(pool, "Order", &["first", "second", "third"]).await;
    let contents: Vec<String> = survey::find_questions(pool, created.id)
        .await
        .expect("questions")
        .into_iter()
        .map(|q| q.content)
        .collect();
    assert_eq!(contents, ["first", "second", "third"]);
}

#[tokio::test]
async fn test_add_question_to_missing_survey() {
    let db = setup_test_db().await;
    let result = survey::add_question(db.pool(), 4242, "Anyone?").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_get_missing_survey_is_not_found() {
    let db = setup_test_db().await;
    let pool = db.pool();
    assert!(survey::find_by_id(pool, 7).await.expect("query").is_none());
    assert!(matches!(survey::get(pool, 7).await, Err(AppError::NotFound(_))));
}

// ---------------------------------------------------------------------------
// Edit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_edit_updates_adds_and_deletes_in_one_go() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let (created, questions) = seed_survey(pool, "Edit me", &["q1", "q2", "q3"]).await;
    let changes = SurveyEdit {
        updated: vec![(questions[0].id, "q1 reworded".to_string())],
        added: vec!["q4".to_string(), "   ".to_string()],
        deleted: vec![questions[1].id],
    };

    let summary = survey::edit(pool, created.id, &changes).await.expect("edit");
    assert_eq!((summary.updated, summary.added, summary.deleted), (1, 1, 1));

    let contents: Vec<String> = survey::find_questions(pool, created.id)
        .await
        .expect("questions")
        .into_iter()
        .map(|q| q.content)
        .collect();
    assert_eq!(contents, ["q1 reworded", "q3", "q4"]);
}

#[tokio::test]
async fn test_edit_deleting_question_removes_its_answers() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let (created, questions) = seed_survey(pool, "Answers", &["keep", "drop"]).await;
    response::submit(pool, created.id, &response_from("user", vec![AnswerInput::yes(), AnswerInput::no("meh")]))
        .await
        .expect("submit");
    assert_eq!(count_rows(pool, "answer").await, 2);

    let changes = SurveyEdit { deleted: vec![questions[1].id], ..SurveyEdit::default() };
    survey::edit(pool, created.id, &changes).await.expect("edit");

    assert_eq!(count_rows(pool, "answer").await, 1);
    assert_eq!(count_rows(pool, "completed_survey").await, 1);
}

#[tokio::test]
async fn test_edit_with_foreign_question_rolls_back() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let (target, own) = seed_survey(pool, "Target", &["mine"]).await;
    let (_, foreign) = seed_survey(pool, "Other", &["theirs"]).await;

    let changes = SurveyEdit {
        updated: vec![(own[0].id, "changed".to_string())],
        added: vec!["new one".to_string()],
        deleted: vec![foreign[0].id],
    };
    let result = survey::edit(pool, target.id, &changes).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let contents: Vec<String> = survey::find_questions(pool, target.id)
        .await
        .expect("questions")
        .into_iter()
        .map(|q| q.content)
        .collect();
    assert_eq!(contents, ["mine"], "partial edit must not be committed");
    assert!(survey::find_question(pool, foreign[0].id).await.expect("query").is_some());
}

#[tokio::test]
async fn test_edit_blank_content_on_deleted_question_is_ignored() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let (created, questions) = seed_survey(pool, "Cleared", &["q1", "q2"]).await;
    let changes = SurveyEdit {
        updated: vec![
            (questions[0].id, String::new()),
            (questions[1].id, "q2 kept".to_string()),
        ],
        deleted: vec![questions[0].id],
        ..SurveyEdit::default()
    };

    let summary = survey::edit(pool, created.id, &changes).await.expect("edit");
    assert_eq!((summary.updated, summary.deleted), (1, 1));

    let remaining = survey::find_questions(pool, created.id).await.expect("questions");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].content, "q2 kept");
}

#[tokio::test]
async fn test_edit_rejects_blank_update() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let (created, questions) = seed_survey(pool, "Blank", &["q1"]).await;
    let changes = SurveyEdit {
        updated: vec![(questions[0].id, "  ".to_string())],
        ..SurveyEdit::default()
    };
    assert!(matches!(
        survey::edit(pool, created.id, &changes).await,
        Err(AppError::Validation(_))
    ));
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_delete_survey_leaves_no_orphans() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let (doomed, _) = seed_survey(pool, "Doomed", &["a", "b"]).await;
    let (kept, _) = seed_survey(pool, "Kept", &["c"]).await;
    response::submit(pool, doomed.id, &response_from("user", vec![AnswerInput::yes(), AnswerInput::yes()]))
        .await
        .expect("submit doomed");
    response::submit(pool, kept.id, &response_from("admin", vec![AnswerInput::no("")]))
        .await
        .expect("submit kept");
    note::create(pool, doomed.id, "remember this").await.expect("note");

    survey::delete(pool, doomed.id).await.expect("delete");

    assert!(survey::find_by_id(pool, doomed.id).await.expect("query").is_none());
    assert_eq!(count_rows(pool, "survey").await, 1);
    assert_eq!(count_rows(pool, "question").await, 1);
    assert_eq!(count_rows(pool, "completed_survey").await, 1);
    assert_eq!(count_rows(pool, "answer").await, 1);
    assert_eq!(count_rows(pool, "note").await, 0);
}

#[tokio::test]
async fn test_delete_missing_survey_is_not_found() {
    let db = setup_test_db().await;
    assert!(matches!(survey::delete(db.pool(), 99).await, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_question_removes_its_answers_and_returns_owner() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let (created, questions) = seed_survey(pool, "Owner", &["x", "y"]).await;
    response::submit(pool, created.id, &response_from("user", vec![AnswerInput::yes(), AnswerInput::no("why")]))
        .await
        .expect("submit");
    assert_eq!(count_rows(pool, "answer").await, 2);

    let owner = survey::delete_question(pool, questions[0].id).await.expect("delete");
    assert_eq!(owner, created.id);
    assert_eq!(count_rows(pool, "answer").await, 1, "answers to the deleted question go with it");
    assert_eq!(count_rows(pool, "completed_survey").await, 1);

    let remaining = survey::find_questions(pool, created.id).await.expect("questions");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].content, "y");

    assert!(matches!(
        survey::delete_question(pool, questions[0].id).await,
        Err(AppError::NotFound(_))
    ));
}
