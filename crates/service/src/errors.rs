use models::errors::{FieldErrors, ModelError};
use sea_orm::DbErr;
use thiserror::Error;

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
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::Validation(FieldErrors::single(field, message))
    }

    /// Stable machine-readable code for external mapping/logging
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "validation_error",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::Conflict(_) => "conflict",
            ServiceError::Db(_) => "database_error",
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(fields) => ServiceError::Validation(fields),
            ModelError::Conflict(msg) => ServiceError::Conflict(msg),
            ModelError::Db(msg) => ServiceError::Db(msg),
        }
    }
}

impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self { ServiceError::Db(e.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_errors_keep_their_kind() {
        let v: ServiceError = ModelError::Validation(FieldErrors::single("name", "required")).into();
        assert_eq!(v.code(), "validation_error");
        let c: ServiceError = ModelError::Conflict("dup".into()).into();
        assert!(matches!(c, ServiceError::Conflict(ref m) if m == "dup"));
        let d: ServiceError = ModelError::Db("boom".into()).into();
        assert_eq!(d.code(), "database_error");
    }

    #[test]
    fn not_found_message() {
        assert_eq!(ServiceError::not_found("Course").to_string(), "not found: Course not found");
    }
}
