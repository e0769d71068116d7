use crate::{
    dtos::{
        course::{CourseDetailResponse, CourseResponse, TeacherResponse},
        health::{HealthResponse, RootResponse},
        lesson::{LessonResponse, LessonSummaryResponse},
        rating::{CreateRatingRequest, RatingResponse, RatingStatsResponse, UpdateRatingRequest},
    },
    routes::{course, health, lesson, rating, root},
};
use utoipa::OpenApi;

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        course::get_courses,
        course::get_course_by_slug,
        lesson::get_class_by_id,
        rating::create_rating,
        rating::list_ratings,
        rating::get_rating_stats,
        rating::get_user_rating,
        rating::update_rating,
        rating::delete_rating
    ),
    components(schemas(
        RootResponse,
        HealthResponse,
        CourseResponse,
        CourseDetailResponse,
        TeacherResponse,
        LessonResponse,
        LessonSummaryResponse,
        CreateRatingRequest,
        UpdateRatingRequest,
        RatingResponse,
        RatingStatsResponse
    )),
    tags(
        (name = "Health", description = "Service status endpoints"),
        (name = "Courses", description = "Course catalog endpoints"),
        (name = "Classes", description = "Course class endpoints"),
        (name = "Ratings", description = "Course rating endpoints"),
    ),
    info(
        title = "Platziflix API",
        version = "1.0.0",
        description = "Courses, teachers, classes and ratings for Platziflix",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
