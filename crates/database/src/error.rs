use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    Db(#[from] DbErr),

    #[error("Course {0} not found")]
    CourseNotFound(i32),

    #[error("No active rating from user {user_id} for course {course_id}")]
    RatingNotFound { course_id: i32, user_id: i32 },

    #[error("User {user_id} already has an active rating for course {course_id}")]
    DuplicateRating { course_id: i32, user_id: i32 },
}

impl ServiceError {
    /// Classifies an insert failure, turning a unique index violation on the
    /// active rating into [`ServiceError::DuplicateRating`]
    pub(crate) fn from_rating_insert(err: DbErr, course_id: i32, user_id: i32) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                Self::DuplicateRating { course_id, user_id }
            }
            _ => Self::Db(err),
        }
    }
}
