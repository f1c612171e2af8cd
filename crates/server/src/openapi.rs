use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CourseInputDoc {
    pub name: String,
    pub instructor: String,
    pub category: String,
    pub schedule: String,
}

#[derive(ToSchema)]
pub struct StudentIdDoc { pub student_id: i64 }

#[derive(ToSchema)]
pub struct CreateEnrollmentDoc { pub student_id: i64, pub course: Uuid }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::courses::list_courses,
        crate::routes::courses::search_courses,
        crate::routes::courses::create_course,
        crate::routes::courses::get_course,
        crate::routes::courses::update_course,
        crate::routes::courses::delete_course,
        crate::routes::courses::enroll_student,
        crate::routes::courses::unenroll_student,
        crate::routes::courses::course_students,
        crate::routes::enrollments::list_enrollments,
        crate::routes::enrollments::create_enrollment,
        crate::routes::enrollments::get_enrollment,
        crate::routes::enrollments::student_courses,
        crate::routes::enrollments::enrollment_report,
    ),
    components(
        schemas(
            HealthResponse,
            CourseInputDoc,
            StudentIdDoc,
            CreateEnrollmentDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "courses"),
        (name = "enrollments")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_catalog_and_ledger_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/api/courses/{id}/enroll/"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/enrollments/report/"));
        assert!(paths.iter().any(|p| p.as_str() == "/health"));
    }
}
