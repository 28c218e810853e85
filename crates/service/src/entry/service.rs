use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use super::domain::{Entry, EntryInput, FieldErrors, NewEntry, SearchPage, DESCRIPTION, DESCRIPTION_TAKEN};
use super::repository::EntryRepository;
use super::validation::validate;
use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// Entries shown on the home page and in autocomplete results.
pub const RECENT_LIMIT: u64 = 5;

/// Entry use cases, independent of the web framework.
pub struct EntryService<R: EntryRepository> {
    repo: Arc<R>,
}

impl<R: EntryRepository> EntryService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self, input))]
    pub async fn create_entry(&self, input: EntryInput) -> Result<Entry, ServiceError> {
        let errors = validate(self.repo.as_ref(), input.description.as_deref(), input.content.as_deref(), None).await?;
        if !errors.is_empty() {
            debug!(%errors, "entry rejected");
            return Err(ServiceError::Validation(errors));
        }

        let now = Utc::now().into();
        let entry = self
            .repo
            .create(NewEntry {
                description: input.description().to_string(),
                content: input.content().to_string(),
                created_at: now,
                updated_at: now,
            })
            .await
            .map_err(late_conflict)?;
        info!(entry_id = entry.id, "entry_created");
        Ok(entry)
    }

    #[instrument(skip(self, input))]
    pub async fn edit_entry(&self, id: i32, input: EntryInput) -> Result<Entry, ServiceError> {
        if self.repo.get(id).await?.is_none() {
            return Err(ServiceError::not_found("entry"));
        }
        let errors = validate(self.repo.as_ref(), input.description.as_deref(), input.content.as_deref(), Some(id)).await?;
        if !errors.is_empty() {
            debug!(%errors, "entry edit rejected");
            return Err(ServiceError::Validation(errors));
        }

        let entry = self
            .repo
            .update(id, input.description(), input.content())
            .await
            .map_err(late_conflict)?
            .ok_or_else(|| ServiceError::not_found("entry"))?;
        info!(entry_id = entry.id, "entry_updated");
        Ok(entry)
    }

    #[instrument(skip(self))]
    pub async fn delete_entry(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("entry"));
        }
        info!(entry_id = id, "entry_deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_entry(&self, id: i32) -> Result<Entry, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("entry"))
    }

    pub async fn list_recent(&self) -> Result<Vec<Entry>, ServiceError> {
        self.repo.list_recent(RECENT_LIMIT).await
    }

    /// One page of entries whose description or content contains `query`,
    /// ignoring case. An empty query pages through every entry.
    #[instrument(skip(self))]
    pub async fn search_entries(&self, query: &str, page: Pagination) -> Result<SearchPage, ServiceError> {
        let (offset, limit) = page.normalize();
        let entries = self.repo.search(query, offset, limit).await?;
        let total = self.repo.count(query).await?;
        Ok(SearchPage {
            entries,
            query: query.to_string(),
            offset,
            limit,
            has_more: total > offset + limit,
        })
    }

    #[instrument(skip(self))]
    pub async fn autocomplete(&self, query: &str) -> Result<Vec<Entry>, ServiceError> {
        self.repo.search(query, 0, RECENT_LIMIT).await
    }
}

/// The unique index caught a duplicate the pre-check missed.
fn late_conflict(e: ServiceError) -> ServiceError {
    match e {
        ServiceError::Conflict(_) => {
            let mut errors = FieldErrors::new();
            errors.insert(DESCRIPTION, DESCRIPTION_TAKEN);
            ServiceError::Validation(errors)
        }
        other => other,
    }
}
