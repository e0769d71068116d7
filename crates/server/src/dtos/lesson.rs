use database::entities::lessons;
use serde::Serialize;
use utoipa::ToSchema;

/// A class as listed on its course's detail page
#[derive(Debug, Serialize, ToSchema)]
pub struct LessonSummaryResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub slug: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LessonResponse {
    pub id: i32,
    pub course_id: i32,
    pub name: String,
    pub description: String,
    pub slug: String,
    pub video_url: String,
}

impl From<lessons::Model> for LessonSummaryResponse {
    fn from(lesson: lessons::Model) -> Self {
        Self {
            id: lesson.id,
            name: lesson.name,
            description: lesson.description,
            slug: lesson.slug,
        }
    }
}

impl From<lessons::Model> for LessonResponse {
    fn from(lesson: lessons::Model) -> Self {
        Self {
            id: lesson.id,
            course_id: lesson.course_id,
            name: lesson.name,
            description: lesson.description,
            slug: lesson.slug,
            video_url: lesson.video_url,
        }
    }
}
