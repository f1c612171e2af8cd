use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::enrollment;
use serde::Deserialize;
use service::enrollment::domain::{EnrollmentReportRow, StudentCourses};
use service::errors::ServiceError;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::errors::JsonApiError;
use crate::extract::{optional_i64, ApiJson, ApiQuery};
use crate::routes::observe;
use crate::state::ServerState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentQuery {
    /// Blank is the same as absent
    #[param(value_type = Option<i64>)]
    pub student_id: Option<String>,
}

impl StudentQuery {
    pub fn student_id(&self) -> Result<Option<i64>, ServiceError> {
        optional_i64("student_id", self.student_id.as_deref())
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// Exact course name
    pub course_name: Option<String>,
}

/// Body of `POST /api/enrollments/`; `course` is also accepted as `course_id`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateEnrollmentBody {
    pub student_id: Option<i64>,
    #[serde(alias = "course_id")]
    pub course: Option<Uuid>,
}

#[utoipa::path(get, path = "/api/enrollments/", tag = "enrollments", params(StudentQuery), responses((status = 200, description = "Enrollments, newest first")))]
pub async fn list_enrollments(
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<StudentQuery>,
) -> Result<Json<Vec<enrollment::Model>>, JsonApiError> {
    let res = match q.student_id() {
        Ok(student_id) => state.enrollments.list(student_id).await,
        Err(e) => Err(e),
    };
    let items = observe("list_enrollments", res)?;
    Ok(Json(items))
}

#[utoipa::path(post, path = "/api/enrollments/", tag = "enrollments", request_body = CreateEnrollmentDoc, responses((status = 201, description = "Created"), (status = 400, description = "Validation Error"), (status = 404, description = "Course not found"), (status = 409, description = "Already enrolled")))]
pub async fn create_enrollment(
    State(state): State<ServerState>,
    ApiJson(body): ApiJson<CreateEnrollmentBody>,
) -> Result<(StatusCode, Json<enrollment::Model>), JsonApiError> {
    let res = match body.course {
        Some(course_id) => state.enrollments.enroll(course_id, body.student_id).await,
        None => Err(ServiceError::invalid("course", "This field is required.")),
    };
    let created = observe("create_enrollment", res)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/api/enrollments/{id}/", tag = "enrollments", params(("id" = Uuid, Path, description = "Enrollment ID")), responses((status = 200, description = "OK"), (status = 404, description = "Not Found")))]
pub async fn get_enrollment(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<enrollment::Model>, JsonApiError> {
    let item = observe("get_enrollment", state.enrollments.get(id).await)?;
    Ok(Json(item))
}

#[utoipa::path(get, path = "/api/enrollments/by_student/", tag = "enrollments", params(StudentQuery), responses((status = 200, description = "Courses of one student"), (status = 400, description = "student_id missing")))]
pub async fn student_courses(
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<StudentQuery>,
) -> Result<Json<StudentCourses>, JsonApiError> {
    let res = match q.student_id() {
        Ok(student_id) => state.enrollments.courses_for_student(student_id).await,
        Err(e) => Err(e),
    };
    let found = observe("student_courses", res)?;
    Ok(Json(found))
}

#[utoipa::path(get, path = "/api/enrollments/report/", tag = "enrollments", params(ReportQuery), responses((status = 200, description = "Enrollment and course join rows")))]
pub async fn enrollment_report(
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<ReportQuery>,
) -> Result<Json<Vec<EnrollmentReportRow>>, JsonApiError> {
    let rows = observe("enrollment_report", state.enrollments.report(q.course_name.as_deref()).await)?;
    Ok(Json(rows))
}
