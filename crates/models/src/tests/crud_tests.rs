use anyhow::Result;
use chrono::{Duration, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;

use super::setup_test_db;
use crate::entry;

fn at(minutes_ago: i64) -> DateTimeWithTimeZone {
    (Utc::now() - Duration::minutes(minutes_ago)).into()
}

#[tokio::test]
async fn test_entry_crud() -> Result<()> {
    let (_dir, db) = setup_test_db().await?;

    let now = at(0);
    let created = entry::create(&db, "first", "# Hello", now, now).await?;
    assert!(created.id > 0);
    assert_eq!(created.description, "first");
    assert_eq!(created.created_at, created.updated_at);

    let found = entry::find(&db, created.id).await?.expect("entry exists");
    assert_eq!(found.content, "# Hello");

    let updated = entry::update(&db, created.id, "first, edited", "body").await?.expect("entry exists");
    assert_eq!(updated.description, "first, edited");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    assert!(entry::delete(&db, created.id).await?);
    assert!(entry::find(&db, created.id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_update_and_delete_report_missing_rows() -> Result<()> {
    let (_dir, db) = setup_test_db().await?;

    assert!(entry::update(&db, 4242, "d", "c").await?.is_none());
    assert!(!entry::delete(&db, 4242).await?);
    Ok(())
}

#[tokio::test]
async fn test_exists_with_description_excludes_given_id() -> Result<()> {
    let (_dir, db) = setup_test_db().await?;

    let now = at(0);
    let e = entry::create(&db, "unique", "c", now, now).await?;
    assert!(entry::exists_with_description(&db, "unique", None).await?);
    assert!(!entry::exists_with_description(&db, "unique", Some(e.id)).await?);
    assert!(!entry::exists_with_description(&db, "UNIQUE", None).await?);
    assert!(!entry::exists_with_description(&db, "other", None).await?);
    Ok(())
}

#[tokio::test]
async fn test_search_filters_case_insensitively_and_orders_by_update() -> Result<()> {
    let (_dir, db) = setup_test_db().await?;

    entry::create(&db, "Rust ownership", "borrowing rules", at(30), at(30)).await?;
    entry::create(&db, "Shopping", "milk, eggs", at(20), at(20)).await?;
    entry::create(&db, "Cargo tips", "use RUST_LOG for logs", at(10), at(10)).await?;

    let hits = entry::search(&db, "rust", 0, 10).await?;
    let names: Vec<_> = hits.iter().map(|e| e.description.as_str()).collect();
    assert_eq!(names, vec!["Cargo tips", "Rust ownership"]);
    assert_eq!(entry::count(&db, "rust").await?, 2);

    let all = entry::search(&db, "", 0, 10).await?;
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].description, "Cargo tips");
    assert_eq!(entry::count(&db, "").await?, 3);

    let page = entry::search(&db, "", 1, 1).await?;
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].description, "Shopping");
    Ok(())
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() -> Result<()> {
    let (_dir, db) = setup_test_db().await?;

    let now = at(0);
    entry::create(&db, "discount", "50% off", now, now).await?;
    entry::create(&db, "plain", "nothing special", now, now).await?;

    assert_eq!(entry::count(&db, "%").await?, 1);
    assert_eq!(entry::count(&db, "_").await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_recent_limits_results() -> Result<()> {
    let (_dir, db) = setup_test_db().await?;

    for i in 0..7 {
        let ts = at(60 - i);
        entry::create(&db, &format!("entry {i}"), "c", ts, ts).await?;
    }
    let recent = entry::recent(&db, 5).await?;
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0].description, "entry 6");
    assert_eq!(recent[4].description, "entry 2");
    Ok(())
}
