use crate::{
    dtos::rating::{CreateRatingRequest, RatingResponse, RatingStatsResponse, UpdateRatingRequest},
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiPath},
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use database::services::rating::RatingService;
use models::rating::RatingValue;
use validator::Validate;

/// Rate a course. Re-rating replaces the user's active rating.
#[utoipa::path(
    post,
    path = "/courses/{course}/ratings",
    params(
        ("course" = i32, Path, description = "Course ID")
    ),
    request_body = CreateRatingRequest,
    responses(
        (status = 201, description = "Rating created", body = RatingResponse),
        (status = 200, description = "Existing rating updated", body = RatingResponse),
        (status = 400, description = "Malformed course ID or body"),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Concurrent rating by the same user"),
        (status = 422, description = "Rating or user ID out of range")
    ),
    tag = "Ratings"
)]
pub async fn create_rating(
    State(state): State<AppState>,
    ApiPath(course_id): ApiPath<i32>,
    ApiJson(payload): ApiJson<CreateRatingRequest>,
) -> ApiResult<(StatusCode, Json<RatingResponse>)> {
    payload.validate()?;
    let value = RatingValue::new(payload.rating)?;

    let (rating, created) =
        RatingService::add_rating(&state.db, course_id, payload.user_id, value).await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(rating.into())))
}

/// List the active ratings of a course, newest first
#[utoipa::path(
    get,
    path = "/courses/{course}/ratings",
    params(
        ("course" = i32, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Ratings retrieved", body = Vec<RatingResponse>),
        (status = 400, description = "Malformed course ID"),
        (status = 404, description = "Course not found")
    ),
    tag = "Ratings"
)]
pub async fn list_ratings(
    State(state): State<AppState>,
    ApiPath(course_id): ApiPath<i32>,
) -> ApiResult<Json<Vec<RatingResponse>>> {
    let ratings = RatingService::list_ratings(&state.db, course_id).await?;
    Ok(Json(ratings.into_iter().map(RatingResponse::from).collect()))
}

/// Average, total and per-star distribution of a course's ratings
#[utoipa::path(
    get,
    path = "/courses/{course}/ratings/stats",
    params(
        ("course" = i32, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Statistics computed", body = RatingStatsResponse),
        (status = 400, description = "Malformed course ID"),
        (status = 404, description = "Course not found")
    ),
    tag = "Ratings"
)]
pub async fn get_rating_stats(
    State(state): State<AppState>,
    ApiPath(course_id): ApiPath<i32>,
) -> ApiResult<Json<RatingStatsResponse>> {
    let stats = RatingService::get_stats(&state.db, course_id).await?;
    Ok(Json(stats.into()))
}

/// Get a user's active rating of a course
#[utoipa::path(
    get,
    path = "/courses/{course}/ratings/user/{user_id}",
    params(
        ("course" = i32, Path, description = "Course ID"),
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Rating found", body = RatingResponse),
        (status = 400, description = "Malformed course or user ID"),
        (status = 404, description = "Course not found or user has not rated it")
    ),
    tag = "Ratings"
)]
pub async fn get_user_rating(
    State(state): State<AppState>,
    ApiPath((course_id, user_id)): ApiPath<(i32, i32)>,
) -> ApiResult<Json<RatingResponse>> {
    RatingService::get_user_rating(&state.db, course_id, user_id)
        .await?
        .map(|rating| Json(rating.into()))
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "No active rating from user {user_id} for course {course_id}"
            ))
        })
}

/// Change a user's active rating
#[utoipa::path(
    put,
    path = "/courses/{course}/ratings/{user_id}",
    params(
        ("course" = i32, Path, description = "Course ID"),
        ("user_id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateRatingRequest,
    responses(
        (status = 200, description = "Rating updated", body = RatingResponse),
        (status = 400, description = "Malformed course or user ID"),
        (status = 404, description = "Course not found or user has not rated it"),
        (status = 422, description = "Rating out of range")
    ),
    tag = "Ratings"
)]
pub async fn update_rating(
    State(state): State<AppState>,
    ApiPath((course_id, user_id)): ApiPath<(i32, i32)>,
    ApiJson(payload): ApiJson<UpdateRatingRequest>,
) -> ApiResult<Json<RatingResponse>> {
    let value = RatingValue::new(payload.rating)?;

    let rating = RatingService::update_rating(&state.db, course_id, user_id, value).await?;
    Ok(Json(rating.into()))
}

/// Soft delete a user's rating; it no longer counts toward statistics
#[utoipa::path(
    delete,
    path = "/courses/{course}/ratings/{user_id}",
    params(
        ("course" = i32, Path, description = "Course ID"),
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "Rating deleted"),
        (status = 400, description = "Malformed course or user ID"),
        (status = 404, description = "Course not found or user has not rated it")
    ),
    tag = "Ratings"
)]
pub async fn delete_rating(
    State(state): State<AppState>,
    ApiPath((course_id, user_id)): ApiPath<(i32, i32)>,
) -> ApiResult<StatusCode> {
    RatingService::delete_rating(&state.db, course_id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
