use axum::{
    http::StatusCode,
    routing::{get, MethodRouter},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use service::errors::ServiceError;

use crate::errors::JsonApiError;
use crate::metrics;
use crate::openapi::{ApiDoc, HealthResponse};
use crate::state::ServerState;

pub mod courses;
pub mod enrollments;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

pub async fn metrics_text() -> (StatusCode, String) {
    metrics::encode_metrics()
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Count the operation and convert a service error into its HTTP form.
pub(crate) fn observe<T>(operation: &str, res: Result<T, ServiceError>) -> Result<T, JsonApiError> {
    metrics::record(operation, &res);
    res.map_err(JsonApiError::from)
}

/// Register `path` (written with a trailing slash) with and without the slash.
fn route_both(router: Router<ServerState>, path: &str, method_router: MethodRouter<ServerState>) -> Router<ServerState> {
    let bare = path.trim_end_matches('/');
    router.route(bare, method_router.clone()).route(path, method_router)
}

/// Build the full application router: catalog and ledger under `/api`, plus health, metrics and docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        .route("/api-docs/openapi.json", get(openapi_json));

    let mut api = Router::new();
    api = route_both(api, "/api/courses/", get(courses::list_courses).post(courses::create_course));
    api = route_both(api, "/api/courses/search/", get(courses::search_courses));
    api = route_both(
        api,
        "/api/courses/:id/",
        get(courses::get_course).put(courses::update_course).delete(courses::delete_course),
    );
    api = route_both(api, "/api/courses/:id/enroll/", axum::routing::post(courses::enroll_student));
    api = route_both(api, "/api/courses/:id/unenroll/", axum::routing::delete(courses::unenroll_student));
    api = route_both(api, "/api/courses/:id/students/", get(courses::course_students));
    api = route_both(
        api,
        "/api/enrollments/",
        get(enrollments::list_enrollments).post(enrollments::create_enrollment),
    );
    api = route_both(api, "/api/enrollments/by_student/", get(enrollments::student_courses));
    api = route_both(api, "/api/enrollments/report/", get(enrollments::enrollment_report));
    api = route_both(api, "/api/enrollments/:id/", get(enrollments::get_enrollment));

    public
        .merge(api.with_state(state))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
