//! Daily view counter tests.

mod common;

use chrono::NaiveDate;
use common::{count_rows, setup_test_db};
use surveys::models::page_view::{self, SUCCESS_PAGE};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[tokio::test]
async fn test_unviewed_page_counts_zero() {
    let db = setup_test_db().await;
    assert_eq!(page_view::get_view_count(db.pool(), SUCCESS_PAGE).await.expect("count"), 0);
}

#[tokio::test]
async fn test_first_view_creates_row() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let row = page_view::record_view_on(pool, SUCCESS_PAGE, day(2024, 3, 1)).await.expect("record");
    assert_eq!(row.views, 1);
    assert_eq!(row.last_view_date, day(2024, 3, 1));
    assert_eq!(count_rows(pool, "page_view").await, 1);
}

#[tokio::test]
async fn test_same_day_views_accumulate() {
    let db = setup_test_db().await;
    let pool = db.pool();

    for _ in 0..6 {
        page_view::record_view_on(pool, SUCCESS_PAGE, day(2024, 3, 1)).await.expect("record");
    }
    assert_eq!(page_view::get_view_count(pool, SUCCESS_PAGE).await.expect("count"), 6);
    assert_eq!(count_rows(pool, "page_view").await, 1);
}

#[tokio::test]
async fn test_new_day_resets_to_one() {
    let db = setup_test_db().await;
    let pool = db.pool();

    for _ in 0..5 {
        page_view::record_view_on(pool, SUCCESS_PAGE, day(2024, 3, 1)).await.expect("record");
    }
    let row = page_view::record_view_on(pool, SUCCESS_PAGE, day(2024, 3, 2)).await.expect("record");
    assert_eq!(row.views, 1);
    assert_eq!(row.last_view_date, day(2024, 3, 2));

    let stored = page_view::find_first(pool, SUCCESS_PAGE).await.expect("find").expect("row");
    assert_eq!(stored, row);
}

#[tokio::test]
async fn test_stored_count_is_not_reset_by_reading() {
    let db = setup_test_db().await;
    let pool = db.pool();

    for _ in 0..3 {
        page_view::record_view_on(pool, SUCCESS_PAGE, day(2020, 1, 1)).await.expect("record");
    }
    // Reads return the stored value even when it belongs to an earlier day.
    assert_eq!(page_view::get_view_count(pool, SUCCESS_PAGE).await.expect("count"), 3);
}

#[tokio::test]
async fn test_duplicate_rows_use_first() {
    let db = setup_test_db().await;
    let pool = db.pool();
    let today = day(2024, 3, 1);

    for views in [5_i64, 40] {
        sqlx::query("INSERT INTO page_view (page_name, views, last_view_date) VALUES ($1, $2, $3)")
            .bind(SUCCESS_PAGE)
            .bind(views)
            .bind(today)
            .execute(pool)
            .await
            .expect("insert duplicate row");
    }

    let row = page_view::record_view_on(pool, SUCCESS_PAGE, today).await.expect("record");
    assert_eq!((row.id, row.views), (1, 6));
    assert_eq!(page_view::get_view_count(pool, SUCCESS_PAGE).await.expect("count"), 6);

    let untouched: i64 = sqlx::query_scalar("SELECT views FROM page_view WHERE id = 2")
        .fetch_one(pool)
        .await
        .expect("second row");
    assert_eq!(untouched, 40);
}

#[tokio::test]
async fn test_pages_are_counted_separately() {
    let db = setup_test_db().await;
    let pool = db.pool();

    page_view::record_view_on(pool, SUCCESS_PAGE, day(2024, 3, 1)).await.expect("record");
    page_view::record_view_on(pool, "other", day(2024, 3, 1)).await.expect("record");
    page_view::record_view_on(pool, "other", day(2024, 3, 1)).await.expect("record");

    assert_eq!(page_view::get_view_count(pool, SUCCESS_PAGE).await.expect("count"), 1);
    assert_eq!(page_view::get_view_count(pool, "other").await.expect("count"), 2);
}

#[tokio::test]
async fn test_record_view_uses_today() {
    let db = setup_test_db().await;
    let row = page_view::record_view(db.pool(), SUCCESS_PAGE).await.expect("record");
    assert_eq!(row.last_view_date, surveys::clock::today());
}
