use async_trait::async_trait;
use models::enrollment;
use uuid::Uuid;

use super::domain::{EnrollmentReportRow, EnrollmentWithCourse};
use crate::errors::ServiceError;

/// Repository abstraction for the enrollment ledger. List methods return newest first.
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<enrollment::Model>, ServiceError>;
    async fn find_pair(&self, course_id: Uuid, student_id: i64) -> Result<Option<enrollment::Model>, ServiceError>;
    /// Insert; a duplicate (student_id, course_id) pair yields `ServiceError::Conflict`.
    async fn create(&self, course_id: Uuid, student_id: i64) -> Result<enrollment::Model, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
    async fn list(&self, student_id: Option<i64>) -> Result<Vec<enrollment::Model>, ServiceError>;
    async fn list_for_course(&self, course_id: Uuid) -> Result<Vec<enrollment::Model>, ServiceError>;
    async fn list_with_course(&self, student_id: i64) -> Result<Vec<EnrollmentWithCourse>, ServiceError>;
    /// Join projection ordered by course name, optionally restricted to one exact course name.
    async fn report(&self, course_name: Option<&str>) -> Result<Vec<EnrollmentReportRow>, ServiceError>;
}
