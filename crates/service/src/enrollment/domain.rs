use models::{course, enrollment};
use sea_orm::{entity::prelude::DateTimeWithTimeZone, FromQueryResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Roster of one course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseRoster {
    pub course_id: Uuid,
    pub course_name: String,
    pub enrolled_students_count: usize,
    pub enrollments: Vec<enrollment::Model>,
}

/// Enrollment with its course embedded instead of referenced by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentWithCourse {
    pub id: Uuid,
    pub student_id: i64,
    pub course: course::Model,
    pub enrolled_at: DateTimeWithTimeZone,
}

impl EnrollmentWithCourse {
    pub fn new(e: enrollment::Model, course: course::Model) -> Self {
        Self { id: e.id, student_id: e.student_id, course, enrolled_at: e.enrolled_at }
    }
}

/// Everything one student is enrolled in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentCourses {
    pub student_id: i64,
    pub enrolled_courses_count: usize,
    pub enrollments: Vec<EnrollmentWithCourse>,
}

/// Read-only join projection of enrollment and course columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromQueryResult)]
pub struct EnrollmentReportRow {
    pub enrollment_id: Uuid,
    pub student_id: i64,
    pub course_id: Uuid,
    pub course_name: String,
    pub instructor: String,
    pub enrolled_at: DateTimeWithTimeZone,
}

impl EnrollmentReportRow {
    pub fn new(e: &enrollment::Model, c: &course::Model) -> Self {
        Self {
            enrollment_id: e.id,
            student_id: e.student_id,
            course_id: c.id,
            course_name: c.name.clone(),
            instructor: c.instructor.clone(),
            enrolled_at: e.enrolled_at,
        }
    }
}
