use crate::{
    dtos::lesson::LessonResponse,
    error::{ApiError, ApiResult},
    extract::ApiPath,
    state::AppState,
};
use axum::{Json, extract::State};
use database::services::course::CourseService;

/// Get a single class by ID
#[utoipa::path(
    get,
    path = "/classes/{class_id}",
    params(
        ("class_id" = i32, Path, description = "Class ID")
    ),
    responses(
        (status = 200, description = "Class found", body = LessonResponse),
        (status = 400, description = "Malformed class ID"),
        (status = 404, description = "Class not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Classes"
)]
pub async fn get_class_by_id(
    State(state): State<AppState>,
    ApiPath(class_id): ApiPath<i32>,
) -> ApiResult<Json<LessonResponse>> {
    CourseService::get_lesson_by_id(&state.db, class_id)
        .await?
        .map(|lesson| Json(lesson.into()))
        .ok_or_else(|| ApiError::NotFound(format!("Class {class_id} not found")))
}
