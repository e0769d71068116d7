use crate::{
    dtos::course::{CourseDetailResponse, CourseResponse},
    error::{ApiError, ApiResult},
    extract::ApiPath,
    state::AppState,
};
use axum::{Json, extract::State};
use database::services::course::CourseService;

/// List all courses with their rating summary
#[utoipa::path(
    get,
    path = "/courses",
    responses(
        (status = 200, description = "List of courses retrieved successfully", body = Vec<CourseResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn get_courses(State(state): State<AppState>) -> ApiResult<Json<Vec<CourseResponse>>> {
    let courses = CourseService::list_courses(&state.db).await?;

    Ok(Json(
        courses
            .into_iter()
            .map(|(course, stats)| CourseResponse::new(course, stats))
            .collect(),
    ))
}

/// Get a course with its teachers, classes and ratings by slug
#[utoipa::path(
    get,
    path = "/courses/{course}",
    params(
        ("course" = String, Path, description = "Course slug")
    ),
    responses(
        (status = 200, description = "Course found", body = CourseDetailResponse),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn get_course_by_slug(
    State(state): State<AppState>,
    ApiPath(slug): ApiPath<String>,
) -> ApiResult<Json<CourseDetailResponse>> {
    match CourseService::get_course_by_slug(&state.db, &slug).await? {
        Some(detail) => Ok(Json(detail.into())),
        None => Err(ApiError::NotFound(format!("Course '{slug}' not found"))),
    }
}
