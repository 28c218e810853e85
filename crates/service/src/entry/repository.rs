use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use super::domain::{Entry, NewEntry};
use crate::errors::ServiceError;

/// Repository abstraction for entry persistence.
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// True if another entry already holds `description` (exact match).
    async fn exists_with_description(&self, description: &str, excluding_id: Option<i32>) -> Result<bool, ServiceError>;
    async fn list_recent(&self, n: u64) -> Result<Vec<Entry>, ServiceError>;
    async fn search(&self, query: &str, offset: u64, limit: u64) -> Result<Vec<Entry>, ServiceError>;
    async fn count(&self, query: &str) -> Result<u64, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<Entry>, ServiceError>;
    async fn create(&self, entry: NewEntry) -> Result<Entry, ServiceError>;
    async fn update(&self, id: i32, description: &str, content: &str) -> Result<Option<Entry>, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// Store backed by the `entries` table.
#[derive(Clone)]
pub struct SeaOrmEntryRepository {
    db: DatabaseConnection,
}

impl SeaOrmEntryRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl EntryRepository for SeaOrmEntryRepository {
    async fn exists_with_description(&self, description: &str, excluding_id: Option<i32>) -> Result<bool, ServiceError> {
        Ok(models::entry::exists_with_description(&self.db, description, excluding_id).await?)
    }

    async fn list_recent(&self, n: u64) -> Result<Vec<Entry>, ServiceError> {
        Ok(models::entry::recent(&self.db, n).await?)
    }

    async fn search(&self, query: &str, offset: u64, limit: u64) -> Result<Vec<Entry>, ServiceError> {
        Ok(models::entry::search(&self.db, query, offset, limit).await?)
    }

    async fn count(&self, query: &str) -> Result<u64, ServiceError> {
        Ok(models::entry::count(&self.db, query).await?)
    }

    async fn get(&self, id: i32) -> Result<Option<Entry>, ServiceError> {
        Ok(models::entry::find(&self.db, id).await?)
    }

    async fn create(&self, entry: NewEntry) -> Result<Entry, ServiceError> {
        Ok(models::entry::create(&self.db, &entry.description, &entry.content, entry.created_at, entry.updated_at).await?)
    }

    async fn update(&self, id: i32, description: &str, content: &str) -> Result<Option<Entry>, ServiceError> {
        Ok(models::entry::update(&self.db, id, description, content).await?)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(models::entry::delete(&self.db, id).await?)
    }
}

/// Simple in-memory mock repository for tests
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    pub struct InMemoryEntryRepository {
        rows: Mutex<BTreeMap<i32, Entry>>,
        next_id: Mutex<i32>,
    }

    impl InMemoryEntryRepository {
        fn rows(&self) -> MutexGuard<'_, BTreeMap<i32, Entry>> {
            self.rows.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
        }

        fn matching(&self, query: &str) -> Vec<Entry> {
            let needle = query.to_lowercase();
            let mut hits: Vec<Entry> = self
                .rows()
                .values()
                .filter(|e| {
                    needle.is_empty()
                        || e.description.to_lowercase().contains(&needle)
                        || e.content.to_lowercase().contains(&needle)
                })
                .cloned()
                .collect();
            hits.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
            hits
        }

        fn taken(rows: &BTreeMap<i32, Entry>, description: &str, excluding_id: Option<i32>) -> bool {
            rows.values().any(|e| e.description == description && Some(e.id) != excluding_id)
        }
    }

    #[async_trait]
    impl EntryRepository for InMemoryEntryRepository {
        async fn exists_with_description(&self, description: &str, excluding_id: Option<i32>) -> Result<bool, ServiceError> {
            Ok(Self::taken(&self.rows(), description, excluding_id))
        }

        async fn list_recent(&self, n: u64) -> Result<Vec<Entry>, ServiceError> {
            self.search("", 0, n).await
        }

        async fn search(&self, query: &str, offset: u64, limit: u64) -> Result<Vec<Entry>, ServiceError> {
            Ok(self.matching(query).into_iter().skip(offset as usize).take(limit as usize).collect())
        }

        async fn count(&self, query: &str) -> Result<u64, ServiceError> {
            Ok(self.matching(query).len() as u64)
        }

        async fn get(&self, id: i32) -> Result<Option<Entry>, ServiceError> {
            Ok(self.rows().get(&id).cloned())
        }

        async fn create(&self, entry: NewEntry) -> Result<Entry, ServiceError> {
            let mut rows = self.rows();
            if Self::taken(&rows, &entry.description, None) {
                return Err(ServiceError::Conflict("entries.description".into()));
            }
            let mut next_id = self.next_id.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            *next_id += 1;
            let row = Entry {
                id: *next_id,
                description: entry.description,
                content: entry.content,
                created_at: entry.created_at,
                updated_at: entry.updated_at.max(entry.created_at),
            };
            rows.insert(row.id, row.clone());
            Ok(row)
        }

        async fn update(&self, id: i32, description: &str, content: &str) -> Result<Option<Entry>, ServiceError> {
            let mut rows = self.rows();
            if !rows.contains_key(&id) {
                return Ok(None);
            }
            if Self::taken(&rows, description, Some(id)) {
                return Err(ServiceError::Conflict("entries.description".into()));
            }
            let Some(row) = rows.get_mut(&id) else { return Ok(None) };
            row.description = description.to_string();
            row.content = content.to_string();
            row.updated_at = models::entry::now_after(row.updated_at);
            Ok(Some(row.clone()))
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.rows().remove(&id).is_some())
        }
    }
}
