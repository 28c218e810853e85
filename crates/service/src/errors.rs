use thiserror::Error;

use crate::entry::domain::FieldErrors;
use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(FieldErrors),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(ModelError),
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Conflict(msg) => ServiceError::Conflict(msg),
            ModelError::Db(msg) => ServiceError::Db(msg),
            other => ServiceError::Model(other),
        }
    }
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Failures the caller cannot fix by changing its input.
    pub fn is_fault(&self) -> bool {
        matches!(self, ServiceError::Db(_) | ServiceError::Model(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_errors_map_to_service_variants() {
        let conflict: ServiceError = ModelError::Conflict("UNIQUE".into()).into();
        assert!(matches!(conflict, ServiceError::Conflict(_)));
        assert!(!conflict.is_fault());

        let db: ServiceError = ModelError::Db("disk I/O error".into()).into();
        assert!(matches!(db, ServiceError::Db(_)));
        assert!(db.is_fault());

        assert!(!ServiceError::not_found("entry").is_fault());
    }
}
