use async_trait::async_trait;
use models::course::{self, CourseFields};
use uuid::Uuid;

use super::filter::CourseFilter;
use crate::errors::ServiceError;

/// Repository abstraction for course persistence.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Courses matching every predicate of `filter`, newest first.
    async fn list(&self, filter: &CourseFilter) -> Result<Vec<course::Model>, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<course::Model>, ServiceError>;
    async fn create(&self, fields: &CourseFields) -> Result<course::Model, ServiceError>;
    async fn replace(&self, existing: course::Model, fields: &CourseFields) -> Result<course::Model, ServiceError>;
    /// Remove the course and all of its enrollments; `false` when no course matched.
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}
