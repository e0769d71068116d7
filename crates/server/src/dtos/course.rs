use super::{lesson::LessonSummaryResponse, rating::RatingStatsResponse};
use database::{
    entities::{courses, teachers},
    services::course::CourseDetail,
};
use models::stats::RatingStats;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub thumbnail: String,
    pub slug: String,
    pub average_rating: f64,
    pub total_ratings: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseDetailResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub thumbnail: String,
    pub slug: String,
    pub teachers: Vec<TeacherResponse>,
    pub classes: Vec<LessonSummaryResponse>,
    pub average_rating: f64,
    pub total_ratings: u64,
    pub rating_distribution: std::collections::BTreeMap<String, u64>,
}

impl CourseResponse {
    pub fn new(course: courses::Model, stats: RatingStats) -> Self {
        Self {
            id: course.id,
            name: course.name,
            description: course.description,
            thumbnail: course.thumbnail,
            slug: course.slug,
            average_rating: stats.average_rating,
            total_ratings: stats.total_ratings,
        }
    }
}

impl From<teachers::Model> for TeacherResponse {
    fn from(teacher: teachers::Model) -> Self {
        Self {
            id: teacher.id,
            name: teacher.name,
            email: teacher.email,
        }
    }
}

impl From<CourseDetail> for CourseDetailResponse {
    fn from(detail: CourseDetail) -> Self {
        let CourseDetail {
            course,
            teachers,
            lessons,
            stats,
        } = detail;
        let stats = RatingStatsResponse::from(stats);

        Self {
            id: course.id,
            name: course.name,
            description: course.description,
            thumbnail: course.thumbnail,
            slug: course.slug,
            teachers: teachers.into_iter().map(TeacherResponse::from).collect(),
            classes: lessons
                .into_iter()
                .map(LessonSummaryResponse::from)
                .collect(),
            average_rating: stats.average_rating,
            total_ratings: stats.total_ratings,
            rating_distribution: stats.rating_distribution,
        }
    }
}
