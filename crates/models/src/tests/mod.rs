
/// CRUD operations on entries
pub mod crud_tests;


use anyhow::Result;
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

/// Fresh, migrated SQLite database in a temp dir. Keep the `TempDir` alive for
/// as long as the connection is used.
pub async fn setup_test_db() -> Result<(TempDir, DatabaseConnection)> {
    let dir = tempfile::tempdir()?;
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("gist.db").display());
    let db = crate::db::connect(&url).await?;
    crate::db::migrate(&db).await?;
    Ok((dir, db))
}
