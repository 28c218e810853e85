//! Startup checks the server runs before opening the pool.

/// Warn on a missing static dir; create the SQLite database directory.
pub async fn ensure_env(static_dir: &str, database_url: &str) -> anyhow::Result<()> {
    common::env::ensure_env(static_dir, database_url).await
}
