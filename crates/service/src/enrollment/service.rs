use std::sync::Arc;

use models::{course, enrollment};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::domain::{CourseRoster, EnrollmentReportRow, StudentCourses};
use super::repository::EnrollmentRepository;
use crate::course::repository::CourseRepository;
use crate::errors::ServiceError;

/// Enrollment ledger. Uses the course repository for existence checks only.
pub struct EnrollmentService<C, E>
where
    C: CourseRepository + ?Sized,
    E: EnrollmentRepository + ?Sized,
{
    courses: Arc<C>,
    enrollments: Arc<E>,
}

impl<C, E> EnrollmentService<C, E>
where
    C: CourseRepository + ?Sized,
    E: EnrollmentRepository + ?Sized,
{
    pub fn new(courses: Arc<C>, enrollments: Arc<E>) -> Self { Self { courses, enrollments } }

    async fn course(&self, course_id: Uuid) -> Result<course::Model, ServiceError> {
        self.courses
            .get(course_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Course"))
    }

    /// Enroll a student. Checks, in order: course exists, student id is valid, pair is new.
    #[instrument(skip(self))]
    pub async fn enroll(&self, course_id: Uuid, student_id: Option<i64>) -> Result<enrollment::Model, ServiceError> {
        let course = self.course(course_id).await?;
        let student_id = enrollment::validate_student_id(student_id)?;
        if let Some(existing) = self.enrollments.find_pair(course.id, student_id).await? {
            debug!(enrollment_id = %existing.id, "already enrolled");
            return Err(ServiceError::Conflict("Student is already enrolled in this course".into()));
        }
        // the unique index still guards the window between the check and the insert
        let created = self.enrollments.create(course.id, student_id).await?;
        info!(enrollment_id = %created.id, course_id = %course.id, student_id, "student_enrolled");
        Ok(created)
    }

    /// Remove the (student, course) enrollment.
    #[instrument(skip(self))]
    pub async fn unenroll(&self, course_id: Uuid, student_id: Option<i64>) -> Result<(), ServiceError> {
        let course = self.course(course_id).await?;
        let student_id = enrollment::validate_student_id(student_id)?;
        let existing = self
            .enrollments
            .find_pair(course.id, student_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Student is not enrolled in this course".into()))?;
        if !self.enrollments.delete(existing.id).await? {
            // removed concurrently
            return Err(ServiceError::NotFound("Student is not enrolled in this course".into()));
        }
        info!(course_id = %course.id, student_id, "student_unenrolled");
        Ok(())
    }

    pub async fn roster(&self, course_id: Uuid) -> Result<CourseRoster, ServiceError> {
        let course = self.course(course_id).await?;
        let enrollments = self.enrollments.list_for_course(course.id).await?;
        Ok(CourseRoster {
            course_id: course.id,
            course_name: course.name,
            enrolled_students_count: enrollments.len(),
            enrollments,
        })
    }

    pub async fn list(&self, student_id: Option<i64>) -> Result<Vec<enrollment::Model>, ServiceError> {
        self.enrollments.list(student_id).await
    }

    pub async fn get(&self, id: Uuid) -> Result<enrollment::Model, ServiceError> {
        self.enrollments
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Enrollment"))
    }

    /// Courses of one student, each enrollment carrying its course.
    pub async fn courses_for_student(&self, student_id: Option<i64>) -> Result<StudentCourses, ServiceError> {
        let student_id = student_id
            .ok_or_else(|| ServiceError::invalid("student_id", "student_id query parameter is required"))?;
        let enrollments = self.enrollments.list_with_course(student_id).await?;
        Ok(StudentCourses {
            student_id,
            enrolled_courses_count: enrollments.len(),
            enrollments,
        })
    }

    /// Enrollment/course join, optionally restricted to one exact course name.
    pub async fn report(&self, course_name: Option<&str>) -> Result<Vec<EnrollmentReportRow>, ServiceError> {
        let course_name = course_name.map(str::trim).filter(|n| !n.is_empty());
        self.enrollments.report(course_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::{domain::CourseInput, CourseService};
    use crate::mock::InMemoryRepository;

    struct Fixture {
        courses: CourseService<InMemoryRepository>,
        ledger: EnrollmentService<InMemoryRepository, InMemoryRepository>,
    }

    fn fixture() -> Fixture {
        let repo = Arc::new(InMemoryRepository::default());
        Fixture {
            courses: CourseService::new(Arc::clone(&repo)),
            ledger: EnrollmentService::new(Arc::clone(&repo), repo),
        }
    }

    async fn algorithms(f: &Fixture) -> course::Model {
        f.courses
            .create(CourseInput::new("Algorithms", "Dr. Lee", "CS", "MWF 10am"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn enrolling_twice_conflicts() {
        let f = fixture();
        let c = algorithms(&f).await;
        f.ledger.enroll(c.id, Some(42)).await.unwrap();
        let second = f.ledger.enroll(c.id, Some(42)).await;
        assert!(matches!(second, Err(ServiceError::Conflict(_))));
        assert_eq!(f.ledger.list(Some(42)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn enroll_checks_course_then_student() {
        let f = fixture();
        let missing = f.ledger.enroll(Uuid::new_v4(), None).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));

        let c = algorithms(&f).await;
        let no_student = f.ledger.enroll(c.id, None).await;
        assert!(matches!(no_student, Err(ServiceError::Validation(_))));
        let bad_student = f.ledger.enroll(c.id, Some(0)).await;
        assert!(matches!(bad_student, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn unenroll_without_enrollment_is_not_found() {
        let f = fixture();
        let c = algorithms(&f).await;
        let res = f.ledger.unenroll(c.id, Some(7)).await;
        assert!(matches!(res, Err(ServiceError::NotFound(ref m)) if m.contains("not enrolled")));

        let no_course = f.ledger.unenroll(Uuid::new_v4(), Some(7)).await;
        assert!(matches!(no_course, Err(ServiceError::NotFound(ref m)) if m.contains("Course")));
    }

    #[tokio::test]
    async fn deleting_course_cascades_to_ledger() {
        let f = fixture();
        let c = algorithms(&f).await;
        let other = f.courses.create(CourseInput::new("Databases", "Dr. Park", "CS", "TTh")).await.unwrap();
        for sid in [1, 2, 3] {
            f.ledger.enroll(c.id, Some(sid)).await.unwrap();
        }
        f.ledger.enroll(other.id, Some(1)).await.unwrap();

        f.courses.delete(c.id).await.unwrap();

        let left = f.ledger.list(None).await.unwrap();
        assert_eq!(left.len(), 1);
        assert!(left.iter().all(|e| e.course_id != c.id));
        assert!(matches!(f.ledger.roster(c.id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn roster_counts_enrollments() {
        let f = fixture();
        let c = algorithms(&f).await;
        f.ledger.enroll(c.id, Some(1)).await.unwrap();
        f.ledger.enroll(c.id, Some(2)).await.unwrap();

        let roster = f.ledger.roster(c.id).await.unwrap();
        assert_eq!(roster.course_id, c.id);
        assert_eq!(roster.course_name, "Algorithms");
        assert_eq!(roster.enrolled_students_count, 2);
        assert_eq!(roster.enrollments.len(), 2);
    }

    #[tokio::test]
    async fn get_enrollment_by_id() {
        let f = fixture();
        let c = algorithms(&f).await;
        let e = f.ledger.enroll(c.id, Some(9)).await.unwrap();
        assert_eq!(f.ledger.get(e.id).await.unwrap(), e);
        assert!(matches!(f.ledger.get(Uuid::new_v4()).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn courses_for_student_requires_id() {
        let f = fixture();
        assert!(matches!(f.ledger.courses_for_student(None).await, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn student_scenario_enroll_then_unenroll() {
        let f = fixture();
        let c = algorithms(&f).await;
        f.ledger.enroll(c.id, Some(42)).await.unwrap();

        let mine = f.ledger.courses_for_student(Some(42)).await.unwrap();
        assert_eq!(mine.enrolled_courses_count, 1);
        assert_eq!(mine.enrollments.len(), 1);
        assert_eq!(mine.enrollments[0].course, c);

        f.ledger.unenroll(c.id, Some(42)).await.unwrap();
        let after = f.ledger.courses_for_student(Some(42)).await.unwrap();
        assert_eq!(after.enrolled_courses_count, 0);
        assert!(after.enrollments.is_empty());
    }

    #[tokio::test]
    async fn report_ignores_blank_course_name() {
        let f = fixture();
        let c = algorithms(&f).await;
        f.ledger.enroll(c.id, Some(3)).await.unwrap();
        assert_eq!(f.ledger.report(Some("  ")).await.unwrap().len(), 1);
        assert_eq!(f.ledger.report(Some("Algorithms")).await.unwrap().len(), 1);
        assert!(f.ledger.report(Some("Databases")).await.unwrap().is_empty());
    }
}
