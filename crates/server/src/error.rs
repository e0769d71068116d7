use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::error::ServiceError;
use log::error;
use models::rating::RatingValueError;
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Db(e) => ApiError::Database(e),
            ServiceError::CourseNotFound(_) | ServiceError::RatingNotFound { .. } => {
                ApiError::NotFound(err.to_string())
            }
            ServiceError::DuplicateRating { .. } => ApiError::Conflict(err.to_string()),
        }
    }
}

impl From<RatingValueError> for ApiError {
    fn from(err: RatingValueError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

// Bodies that parse but don't fit the request type are 422, broken JSON is 400
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection.status() {
            StatusCode::UNPROCESSABLE_ENTITY => ApiError::Validation(rejection.body_text()),
            _ => ApiError::BadRequest(rejection.body_text()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Database(e) => {
                error!("Database error: {e}");
                "Internal server error".to_owned()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::rating::RatingValue;

    #[test]
    fn test_service_errors_map_to_status() {
        let cases = [
            (ServiceError::CourseNotFound(1), StatusCode::NOT_FOUND),
            (
                ServiceError::RatingNotFound {
                    course_id: 1,
                    user_id: 2,
                },
                StatusCode::NOT_FOUND,
            ),
            (
                ServiceError::DuplicateRating {
                    course_id: 1,
                    user_id: 2,
                },
                StatusCode::CONFLICT,
            ),
            (
                ServiceError::Db(DbErr::Custom("boom".to_owned())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }

    #[test]
    fn test_out_of_range_rating_is_unprocessable() {
        let err: ApiError = RatingValue::new(0).unwrap_err().into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "rating must be between 1 and 5, got 0");
    }

    #[test]
    fn test_bad_request_keeps_json_shape() {
        let err = ApiError::BadRequest("Invalid URL".to_owned());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_database_errors_are_not_leaked() {
        let response = ApiError::Database(DbErr::Custom("secret".to_owned())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
