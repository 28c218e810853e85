//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::warn;

/// Warn when the static asset directory is missing and make sure the parent
/// directory of a file-backed SQLite database exists.
pub async fn ensure_env(static_dir: &str, database_url: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(static_dir).await.is_err() {
        warn!(%static_dir, "static assets directory not found; stylesheets will 404");
    }
    if let Some(parent) = sqlite_parent_dir(database_url) {
        tokio::fs::create_dir_all(&parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    }
    Ok(())
}

/// Directory holding the database file for `sqlite://path/to/file.db?...` URLs.
/// In-memory and bare-filename URLs yield `None`.
fn sqlite_parent_dir(database_url: &str) -> Option<std::path::PathBuf> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path.starts_with(":memory:") {
        return None;
    }
    Path::new(path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_dir_only_for_nested_sqlite_files() {
        assert_eq!(sqlite_parent_dir("sqlite://data/gist.db?mode=rwc").unwrap(), Path::new("data"));
        assert!(sqlite_parent_dir("sqlite://gist.db").is_none());
        assert!(sqlite_parent_dir("sqlite::memory:").is_none());
        assert!(sqlite_parent_dir("postgres://localhost/gist").is_none());
    }

    #[tokio::test]
    async fn ensure_env_creates_database_directory() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let db_dir = dir.path().join("nested");
        let url = format!("sqlite://{}/gist.db?mode=rwc", db_dir.display());
        ensure_env(dir.path().to_str().unwrap(), &url).await?;
        assert!(db_dir.is_dir());
        Ok(())
    }
}
