use chrono::NaiveDateTime;
use database::entities::course_ratings;
use models::{rating::RatingValue, stats::RatingStats};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRatingRequest {
    #[validate(range(min = 1, message = "user_id must be a positive integer"))]
    pub user_id: i32,

    /// Star value, 1 through 5
    pub rating: i16,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRatingRequest {
    /// Star value, 1 through 5
    pub rating: i16,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RatingResponse {
    pub id: i32,
    pub course_id: i32,
    pub user_id: i32,
    pub rating: i16,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RatingStatsResponse {
    pub average_rating: f64,
    pub total_ratings: u64,
    /// Number of active ratings per star value, keyed "1" through "5"
    pub rating_distribution: BTreeMap<String, u64>,
}

impl From<course_ratings::Model> for RatingResponse {
    fn from(rating: course_ratings::Model) -> Self {
        Self {
            id: rating.id,
            course_id: rating.course_id,
            user_id: rating.user_id,
            rating: rating.rating,
            created_at: rating.created_at,
            updated_at: rating.updated_at,
        }
    }
}

impl From<RatingStats> for RatingStatsResponse {
    fn from(stats: RatingStats) -> Self {
        let rating_distribution = RatingValue::all()
            .map(|value| {
                (
                    value.to_string(),
                    stats.rating_distribution.count(value),
                )
            })
            .collect();

        Self {
            average_rating: stats.average_rating,
            total_ratings: stats.total_ratings,
            rating_distribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::stats::RatingDistribution;
    use serde_json::json;

    #[test]
    fn test_stats_response_lists_every_star_value() {
        let stats = RatingDistribution::from_counts([(4i16, 2i64)]).stats();
        let body = serde_json::to_value(RatingStatsResponse::from(stats)).unwrap();

        assert_eq!(body["average_rating"], 4.0);
        assert_eq!(body["total_ratings"], 2);
        assert_eq!(
            body["rating_distribution"],
            json!({"1": 0, "2": 0, "3": 0, "4": 2, "5": 0})
        );
    }

    #[test]
    fn test_empty_stats_response_keeps_zero_buckets() {
        let body = serde_json::to_value(RatingStatsResponse::from(RatingStats::default())).unwrap();

        assert_eq!(body["average_rating"], 0.0);
        assert_eq!(body["total_ratings"], 0);
        assert_eq!(
            body["rating_distribution"],
            json!({"1": 0, "2": 0, "3": 0, "4": 0, "5": 0})
        );
    }
}
