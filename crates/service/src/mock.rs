//! In-memory repository for tests and doc examples.
//!
//! One store backs both repository traits so that cascade deletes, the
//! (student_id, course_id) uniqueness rule and course joins behave like the
//! database-backed implementation.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use models::course::{self, CourseFields};
use models::enrollment;
use uuid::Uuid;

use crate::course::filter::CourseFilter;
use crate::course::repository::CourseRepository;
use crate::enrollment::domain::{EnrollmentReportRow, EnrollmentWithCourse};
use crate::enrollment::repository::EnrollmentRepository;
use crate::errors::ServiceError;

#[derive(Default)]
pub struct InMemoryRepository {
    // lock order: courses before enrollments
    courses: Mutex<Vec<course::Model>>,   // newest first
    enrollments: Mutex<Vec<enrollment::Model>>, // newest first
}

fn lock<T>(m: &Mutex<T>) -> Result<MutexGuard<'_, T>, ServiceError> {
    m.lock().map_err(|_| ServiceError::Db("in-memory store lock poisoned".into()))
}

#[async_trait]
impl CourseRepository for InMemoryRepository {
    async fn list(&self, filter: &CourseFilter) -> Result<Vec<course::Model>, ServiceError> {
        let courses = lock(&self.courses)?;
        let mut rows: Vec<course::Model> = courses.iter().filter(|c| filter.matches(c)).cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> Result<Option<course::Model>, ServiceError> {
        Ok(lock(&self.courses)?.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, fields: &CourseFields) -> Result<course::Model, ServiceError> {
        let now = Utc::now().into();
        let c = course::Model {
            id: Uuid::new_v4(),
            name: fields.name.clone(),
            instructor: fields.instructor.clone(),
            category: fields.category.clone(),
            schedule: fields.schedule.clone(),
            created_at: now,
            updated_at: now,
        };
        lock(&self.courses)?.insert(0, c.clone());
        Ok(c)
    }

    async fn replace(&self, existing: course::Model, fields: &CourseFields) -> Result<course::Model, ServiceError> {
        let mut courses = lock(&self.courses)?;
        let slot = courses
            .iter_mut()
            .find(|c| c.id == existing.id)
            .ok_or_else(|| ServiceError::not_found("Course"))?;
        slot.name = fields.name.clone();
        slot.instructor = fields.instructor.clone();
        slot.category = fields.category.clone();
        slot.schedule = fields.schedule.clone();
        slot.updated_at = Utc::now().into();
        Ok(slot.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let mut courses = lock(&self.courses)?;
        let mut enrollments = lock(&self.enrollments)?;
        let before = courses.len();
        courses.retain(|c| c.id != id);
        if courses.len() == before {
            return Ok(false);
        }
        enrollments.retain(|e| e.course_id != id);
        Ok(true)
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryRepository {
    async fn get(&self, id: Uuid) -> Result<Option<enrollment::Model>, ServiceError> {
        Ok(lock(&self.enrollments)?.iter().find(|e| e.id == id).cloned())
    }

    async fn find_pair(&self, course_id: Uuid, student_id: i64) -> Result<Option<enrollment::Model>, ServiceError> {
        Ok(lock(&self.enrollments)?
            .iter()
            .find(|e| e.course_id == course_id && e.student_id == student_id)
            .cloned())
    }

    async fn create(&self, course_id: Uuid, student_id: i64) -> Result<enrollment::Model, ServiceError> {
        let courses = lock(&self.courses)?;
        let mut enrollments = lock(&self.enrollments)?;
        if !courses.iter().any(|c| c.id == course_id) {
            return Err(ServiceError::Db(format!("foreign key violation: course {} does not exist", course_id)));
        }
        if enrollments.iter().any(|e| e.course_id == course_id && e.student_id == student_id) {
            return Err(ServiceError::Conflict("Student is already enrolled in this course".into()));
        }
        let e = enrollment::Model {
            id: Uuid::new_v4(),
            student_id,
            course_id,
            enrolled_at: Utc::now().into(),
        };
        enrollments.insert(0, e.clone());
        Ok(e)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let mut enrollments = lock(&self.enrollments)?;
        let before = enrollments.len();
        enrollments.retain(|e| e.id != id);
        Ok(enrollments.len() < before)
    }

    async fn list(&self, student_id: Option<i64>) -> Result<Vec<enrollment::Model>, ServiceError> {
        Ok(lock(&self.enrollments)?
            .iter()
            .filter(|e| student_id.map_or(true, |sid| e.student_id == sid))
            .cloned()
            .collect())
    }

    async fn list_for_course(&self, course_id: Uuid) -> Result<Vec<enrollment::Model>, ServiceError> {
        Ok(lock(&self.enrollments)?
            .iter()
            .filter(|e| e.course_id == course_id)
            .cloned()
            .collect())
    }

    async fn list_with_course(&self, student_id: i64) -> Result<Vec<EnrollmentWithCourse>, ServiceError> {
        let courses = lock(&self.courses)?;
        let enrollments = lock(&self.enrollments)?;
        Ok(enrollments
            .iter()
            .filter(|e| e.student_id == student_id)
            .filter_map(|e| {
                courses
                    .iter()
                    .find(|c| c.id == e.course_id)
                    .map(|c| EnrollmentWithCourse::new(e.clone(), c.clone()))
            })
            .collect())
    }

    async fn report(&self, course_name: Option<&str>) -> Result<Vec<EnrollmentReportRow>, ServiceError> {
        let courses = lock(&self.courses)?;
        let enrollments = lock(&self.enrollments)?;
        let mut rows: Vec<EnrollmentReportRow> = enrollments
            .iter()
            .filter_map(|e| courses.iter().find(|c| c.id == e.course_id).map(|c| (e, c)))
            .filter(|(_, c)| course_name.map_or(true, |n| c.name == n))
            .map(|(e, c)| EnrollmentReportRow::new(e, c))
            .collect();
        // stable: ties keep newest-first order
        rows.sort_by(|a, b| a.course_name.cmp(&b.course_name));
        Ok(rows)
    }
}
