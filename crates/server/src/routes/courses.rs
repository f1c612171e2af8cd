use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::{course, enrollment};
use serde::{Deserialize, Serialize};
use service::course::domain::{CourseInput, CourseSearchResult};
use service::course::CourseFilter;
use service::enrollment::domain::CourseRoster;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiQuery};
use crate::routes::observe;
use crate::state::ServerState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseQuery {
    /// Case-insensitive substring of the course name
    pub name: Option<String>,
    pub instructor: Option<String>,
    pub category: Option<String>,
    /// Matches name, instructor or category
    pub search: Option<String>,
}

impl From<CourseQuery> for CourseFilter {
    fn from(q: CourseQuery) -> Self {
        let mut filter = CourseFilter::new();
        if let Some(v) = q.name { filter = filter.name(v); }
        if let Some(v) = q.instructor { filter = filter.instructor(v); }
        if let Some(v) = q.category { filter = filter.category(v); }
        if let Some(v) = q.search { filter = filter.search(v); }
        filter
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StudentBody {
    pub student_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct EnrollResponse {
    pub message: String,
    pub enrollment: enrollment::Model,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[utoipa::path(get, path = "/api/courses/", tag = "courses", params(CourseQuery), responses((status = 200, description = "Courses, newest first")))]
pub async fn list_courses(
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<CourseQuery>,
) -> Result<Json<Vec<course::Model>>, JsonApiError> {
    let filter = CourseFilter::from(q);
    let items = observe("list_courses", state.courses.list(&filter).await)?;
    Ok(Json(items))
}

#[utoipa::path(get, path = "/api/courses/search/", tag = "courses", params(CourseQuery), responses((status = 200, description = "Matching courses with count")))]
pub async fn search_courses(
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<CourseQuery>,
) -> Result<Json<CourseSearchResult>, JsonApiError> {
    let filter = CourseFilter::from(q);
    let found = observe("search_courses", state.courses.search(&filter).await)?;
    Ok(Json(found))
}

#[utoipa::path(post, path = "/api/courses/", tag = "courses", request_body = CourseInputDoc, responses((status = 201, description = "Created"), (status = 400, description = "Validation Error")))]
pub async fn create_course(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<CourseInput>,
) -> Result<(StatusCode, Json<course::Model>), JsonApiError> {
    let created = observe("create_course", state.courses.create(input).await)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/api/courses/{id}/", tag = "courses", params(("id" = Uuid, Path, description = "Course ID")), responses((status = 200, description = "OK"), (status = 404, description = "Not Found")))]
pub async fn get_course(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<course::Model>, JsonApiError> {
    let item = observe("get_course", state.courses.get(id).await)?;
    Ok(Json(item))
}

#[utoipa::path(put, path = "/api/courses/{id}/", tag = "courses", params(("id" = Uuid, Path, description = "Course ID")), request_body = CourseInputDoc, responses((status = 200, description = "Replaced"), (status = 400, description = "Validation Error"), (status = 404, description = "Not Found")))]
pub async fn update_course(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    ApiJson(input): ApiJson<CourseInput>,
) -> Result<Json<course::Model>, JsonApiError> {
    let updated = observe("update_course", state.courses.update(id, input).await)?;
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/api/courses/{id}/", tag = "courses", params(("id" = Uuid, Path, description = "Course ID")), responses((status = 204, description = "Deleted with its enrollments"), (status = 404, description = "Not Found")))]
pub async fn delete_course(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    observe("delete_course", state.courses.delete(id).await)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/api/courses/{id}/enroll/", tag = "enrollments", params(("id" = Uuid, Path, description = "Course ID")), request_body = StudentIdDoc, responses((status = 201, description = "Enrolled"), (status = 404, description = "Course not found"), (status = 409, description = "Already enrolled")))]
pub async fn enroll_student(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    ApiJson(body): ApiJson<StudentBody>,
) -> Result<(StatusCode, Json<EnrollResponse>), JsonApiError> {
    let enrollment = observe("enroll", state.enrollments.enroll(id, body.student_id).await)?;
    let message = format!("Student {} enrolled successfully", enrollment.student_id);
    Ok((StatusCode::CREATED, Json(EnrollResponse { message, enrollment })))
}

#[utoipa::path(delete, path = "/api/courses/{id}/unenroll/", tag = "enrollments", params(("id" = Uuid, Path, description = "Course ID")), request_body = StudentIdDoc, responses((status = 200, description = "Unenrolled"), (status = 404, description = "Course or enrollment not found")))]
pub async fn unenroll_student(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    ApiJson(body): ApiJson<StudentBody>,
) -> Result<Json<MessageResponse>, JsonApiError> {
    observe("unenroll", state.enrollments.unenroll(id, body.student_id).await)?;
    let message = match body.student_id {
        Some(sid) => format!("Student {sid} unenrolled successfully"),
        None => "Student unenrolled successfully".to_string(),
    };
    Ok(Json(MessageResponse { message }))
}

#[utoipa::path(get, path = "/api/courses/{id}/students/", tag = "enrollments", params(("id" = Uuid, Path, description = "Course ID")), responses((status = 200, description = "Course roster"), (status = 404, description = "Not Found")))]
pub async fn course_students(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseRoster>, JsonApiError> {
    let roster = observe("course_students", state.enrollments.roster(id).await)?;
    Ok(Json(roster))
}
