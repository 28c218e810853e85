//! Entry module: three-layer architecture (domain, repository, service).
//!
//! Validation lives beside the service so create and edit share one rule set.

pub mod domain;
pub mod repository;
pub mod service;
pub mod validation;

pub use service::EntryService;
