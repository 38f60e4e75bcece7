//! Daily page-view counter.
//!
//! The counter resets to 1 on the first view of each calendar day in the
//! reference timezone. `record_view` is a plain read-then-write: concurrent
//! calls can lose increments or insert duplicate rows for the same page.
//! Reads always use the first matching row, so a duplicate is harmless apart
//! from the lost counts.

use chrono::NaiveDate;

use crate::clock;
use crate::db::DbPool;
use crate::errors::AppError;

/// Page tracked by the index page counter.
pub const SUCCESS_PAGE: &str = "success";

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct PageView {
    pub id: i64,
    pub page_name: String,
    pub views: i64,
    pub last_view_date: NaiveDate,
}

pub async fn find_first(pool: &DbPool, page_name: &str) -> Result<Option<PageView>, AppError> {
    let row = sqlx::query_as::<_, PageView>(
        "SELECT id, page_name, views, last_view_date FROM page_view \
         WHERE page_name = $1 ORDER BY id LIMIT 1",
    )
    .bind(page_name)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Count a view of `page_name` today.
pub async fn record_view(pool: &DbPool, page_name: &str) -> Result<PageView, AppError> {
    record_view_on(pool, page_name, clock::today()).await
}

/// Count a view of `page_name` on the given calendar day.
pub async fn record_view_on(pool: &DbPool, page_name: &str, today: NaiveDate) -> Result<PageView, AppError> {
    match find_first(pool, page_name).await? {
        None => {
            let row = sqlx::query_as::<_, PageView>(
                "INSERT INTO page_view (page_name, views, last_view_date) VALUES ($1, 1, $2) \
                 RETURNING id, page_name, views, last_view_date",
            )
            .bind(page_name)
            .bind(today)
            .fetch_one(pool)
            .await?;
            Ok(row)
        }
        Some(existing) => {
            let views = if existing.last_view_date == today {
                existing.views + 1
            } else {
                1
            };
            sqlx::query("UPDATE page_view SET views = $1, last_view_date = $2 WHERE id = $3")
                .bind(views)
                .bind(today)
                .bind(existing.id)
                .execute(pool)
                .await?;
            Ok(PageView { views, last_view_date: today, ..existing })
        }
    }
}

/// Stored view count, 0 when the page was never viewed.
pub async fn get_view_count(pool: &DbPool, page_name: &str) -> Result<i64, AppError> {
    Ok(find_first(pool, page_name).await?.map_or(0, |row| row.views))
}
