#![cfg(test)]
use configs::DatabaseConfig;
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

/// Migrated SQLite database private to the calling test. The returned
/// directory owns the database file; drop it last.
pub async fn get_db() -> Result<(TempDir, DatabaseConnection), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("gist.db").display());
    let mut cfg = DatabaseConfig::for_url(url);
    cfg.max_connections = 4;
    cfg.acquire_timeout_secs = 10;
    let db = models::db::connect_and_migrate(&cfg).await?;
    Ok((dir, db))
}
