//! Shared test infrastructure: an isolated in-memory database per test.

#![allow(dead_code)]

use surveys::db::{self, DbPool};
use surveys::models::survey::{self, Question, Survey};

pub struct TestDb {
    pool: DbPool,
}

impl TestDb {
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Fresh schema on a private in-memory database.
pub async fn setup_test_db() -> TestDb {
    let pool = db::init_memory_pool()
        .await
        .expect("Failed to open in-memory database");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    TestDb { pool }
}

/// Create a survey with the given questions, in order.
pub async fn seed_survey(pool: &DbPool, title: &str, questions: &[&str]) -> (Survey, Vec<Question>) {
    let created = survey::create(pool, title).await.expect("create survey");
    let mut added = Vec::with_capacity(questions.len());
    for content in questions {
        added.push(
            survey::add_question(pool, created.id, content)
                .await
                .expect("add question"),
        );
    }
    (created, added)
}

pub async fn count_rows(pool: &DbPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("count rows")
}
