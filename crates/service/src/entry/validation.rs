use super::domain::{FieldErrors, CONTENT, CONTENT_REQUIRED, DESCRIPTION, DESCRIPTION_REQUIRED, DESCRIPTION_TAKEN};
use super::repository::EntryRepository;
use crate::errors::ServiceError;

/// Checks a submitted entry. `entry_id` is the entry being edited, or `None`
/// on create. The uniqueness check runs even for a blank description, so the
/// store is read exactly once per call.
pub async fn validate<R: EntryRepository + ?Sized>(
    repo: &R,
    description: Option<&str>,
    content: Option<&str>,
    entry_id: Option<i32>,
) -> Result<FieldErrors, ServiceError> {
    let mut errors = FieldErrors::new();
    let description = description.unwrap_or_default();
    let content = content.unwrap_or_default();

    if description.is_empty() {
        errors.insert(DESCRIPTION, DESCRIPTION_REQUIRED);
    }
    if content.is_empty() {
        errors.insert(CONTENT, CONTENT_REQUIRED);
    }
    if repo.exists_with_description(description, entry_id).await? {
        errors.insert(DESCRIPTION, DESCRIPTION_TAKEN);
    }
    Ok(errors)
}
