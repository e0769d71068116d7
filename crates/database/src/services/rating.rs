use crate::{
    entities::{course_ratings, courses},
    error::{ServiceError, ServiceResult},
};
use chrono::Utc;
use log::{debug, info};
use models::{
    rating::RatingValue,
    stats::{RatingDistribution, RatingStats},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

pub struct RatingService;

impl RatingService {
    /// Rate a course on behalf of a user.
    ///
    /// An existing active rating from the same user is updated in place. The
    /// returned flag is `true` when a new row was inserted.
    pub async fn add_rating(
        db: &DatabaseConnection,
        course_id: i32,
        user_id: i32,
        value: RatingValue,
    ) -> ServiceResult<(course_ratings::Model, bool)> {
        let txn = db.begin().await?;
        Self::ensure_course_exists(&txn, course_id).await?;

        let now = Utc::now().naive_utc();
        let result = match Self::find_active(&txn, course_id, user_id).await? {
            Some(existing) => {
                debug!("User {user_id} re-rated course {course_id}, updating rating {}", existing.id);
                let mut rating: course_ratings::ActiveModel = existing.into();
                rating.rating = Set(value.into());
                rating.updated_at = Set(now);
                (rating.update(&txn).await?, false)
            }
            None => {
                let rating = course_ratings::ActiveModel {
                    course_id: Set(course_id),
                    user_id: Set(user_id),
                    rating: Set(value.into()),
                    created_at: Set(now),
                    updated_at: Set(now),
                    deleted_at: Set(None),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(|e| ServiceError::from_rating_insert(e, course_id, user_id))?;
                (rating, true)
            }
        };

        txn.commit().await?;
        info!("User {user_id} rated course {course_id} with {value}");
        Ok(result)
    }

    /// All active ratings of a course, newest first
    pub async fn list_ratings(
        db: &DatabaseConnection,
        course_id: i32,
    ) -> ServiceResult<Vec<course_ratings::Model>> {
        Self::ensure_course_exists(db, course_id).await?;

        let ratings = course_ratings::Entity::find()
            .filter(course_ratings::Column::CourseId.eq(course_id))
            .filter(course_ratings::Column::DeletedAt.is_null())
            .order_by_desc(course_ratings::Column::CreatedAt)
            .order_by_desc(course_ratings::Column::Id)
            .all(db)
            .await?;

        Ok(ratings)
    }

    pub async fn get_user_rating(
        db: &DatabaseConnection,
        course_id: i32,
        user_id: i32,
    ) -> ServiceResult<Option<course_ratings::Model>> {
        Self::ensure_course_exists(db, course_id).await?;
        Ok(Self::find_active(db, course_id, user_id).await?)
    }

    /// Change the value of a user's active rating
    pub async fn update_rating(
        db: &DatabaseConnection,
        course_id: i32,
        user_id: i32,
        value: RatingValue,
    ) -> ServiceResult<course_ratings::Model> {
        let txn = db.begin().await?;
        Self::ensure_course_exists(&txn, course_id).await?;

        let existing = Self::find_active(&txn, course_id, user_id)
            .await?
            .ok_or(ServiceError::RatingNotFound { course_id, user_id })?;

        let mut rating: course_ratings::ActiveModel = existing.into();
        rating.rating = Set(value.into());
        rating.updated_at = Set(Utc::now().naive_utc());
        let updated = rating.update(&txn).await?;

        txn.commit().await?;
        info!("User {user_id} changed rating of course {course_id} to {value}");
        Ok(updated)
    }

    /// Soft delete a user's active rating. The row stays in the table as history.
    pub async fn delete_rating(
        db: &DatabaseConnection,
        course_id: i32,
        user_id: i32,
    ) -> ServiceResult<()> {
        let txn = db.begin().await?;
        Self::ensure_course_exists(&txn, course_id).await?;

        let existing = Self::find_active(&txn, course_id, user_id)
            .await?
            .ok_or(ServiceError::RatingNotFound { course_id, user_id })?;

        let now = Utc::now().naive_utc();
        let mut rating: course_ratings::ActiveModel = existing.into();
        rating.deleted_at = Set(Some(now));
        rating.updated_at = Set(now);
        rating.update(&txn).await?;

        txn.commit().await?;
        info!("User {user_id} removed rating of course {course_id}");
        Ok(())
    }

    /// Average, count and per-star distribution of a course's active ratings
    pub async fn get_stats(db: &DatabaseConnection, course_id: i32) -> ServiceResult<RatingStats> {
        Self::ensure_course_exists(db, course_id).await?;

        let rows: Vec<(i16, i64)> = course_ratings::Entity::find()
            .select_only()
            .column(course_ratings::Column::Rating)
            .column_as(course_ratings::Column::Id.count(), "total")
            .filter(course_ratings::Column::CourseId.eq(course_id))
            .filter(course_ratings::Column::DeletedAt.is_null())
            .group_by(course_ratings::Column::Rating)
            .into_tuple()
            .all(db)
            .await?;

        Ok(RatingDistribution::from_counts(rows).stats())
    }

    async fn ensure_course_exists<C: ConnectionTrait>(db: &C, course_id: i32) -> ServiceResult<()> {
        let found = courses::Entity::find_by_id(course_id)
            .filter(courses::Column::DeletedAt.is_null())
            .count(db)
            .await?;

        if found == 0 {
            return Err(ServiceError::CourseNotFound(course_id));
        }
        Ok(())
    }

    async fn find_active<C: ConnectionTrait>(
        db: &C,
        course_id: i32,
        user_id: i32,
    ) -> Result<Option<course_ratings::Model>, sea_orm::DbErr> {
        course_ratings::Entity::find()
            .filter(course_ratings::Column::CourseId.eq(course_id))
            .filter(course_ratings::Column::UserId.eq(user_id))
            .filter(course_ratings::Column::DeletedAt.is_null())
            .one(db)
            .await
    }
}
