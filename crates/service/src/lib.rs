//! Service layer providing the entry use cases on top of `models`.
//! - Separates business rules (validation, uniqueness, not-found) from data access.
//! - Expected outcomes come back as `ServiceError` variants, never panics.
//! - Markdown rendering for the presentation layer lives in [`render`].

pub mod errors;
pub mod pagination;
pub mod render;
pub mod runtime;
pub mod entry;
#[cfg(test)]
pub mod test_support;
