use crate::entities::{course_ratings, course_teachers, courses, lessons, teachers};
use models::stats::{RatingDistribution, RatingStats};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use std::collections::HashMap;

/// A course together with everything its detail page shows
#[derive(Debug, Clone, PartialEq)]
pub struct CourseDetail {
    pub course: courses::Model,
    pub teachers: Vec<teachers::Model>,
    pub lessons: Vec<lessons::Model>,
    pub stats: RatingStats,
}

pub struct CourseService;

impl CourseService {
    /// List every active course with its rating statistics
    pub async fn list_courses(
        db: &DatabaseConnection,
    ) -> Result<Vec<(courses::Model, RatingStats)>, DbErr> {
        let courses = courses::Entity::find()
            .filter(courses::Column::DeletedAt.is_null())
            .order_by_asc(courses::Column::Id)
            .all(db)
            .await?;

        if courses.is_empty() {
            return Ok(vec![]);
        }

        let course_ids: Vec<i32> = courses.iter().map(|c| c.id).collect();

        // One grouped query for the ratings of every listed course
        let rows: Vec<(i32, i16, i64)> = course_ratings::Entity::find()
            .select_only()
            .column(course_ratings::Column::CourseId)
            .column(course_ratings::Column::Rating)
            .column_as(course_ratings::Column::Id.count(), "total")
            .filter(course_ratings::Column::CourseId.is_in(course_ids))
            .filter(course_ratings::Column::DeletedAt.is_null())
            .group_by(course_ratings::Column::CourseId)
            .group_by(course_ratings::Column::Rating)
            .into_tuple()
            .all(db)
            .await?;

        let mut counts_by_course: HashMap<i32, Vec<(i16, i64)>> = HashMap::new();
        for (course_id, rating, total) in rows {
            counts_by_course
                .entry(course_id)
                .or_default()
                .push((rating, total));
        }

        let results = courses
            .into_iter()
            .map(|course| {
                let stats = counts_by_course
                    .remove(&course.id)
                    .map(|counts| RatingDistribution::from_counts(counts).stats())
                    .unwrap_or_default();
                (course, stats)
            })
            .collect();

        Ok(results)
    }

    /// Get a single course with its teachers, lessons and rating statistics
    pub async fn get_course_by_slug(
        db: &DatabaseConnection,
        slug: &str,
    ) -> Result<Option<CourseDetail>, DbErr> {
        let course = match courses::Entity::find()
            .filter(courses::Column::Slug.eq(slug))
            .filter(courses::Column::DeletedAt.is_null())
            .one(db)
            .await?
        {
            Some(course) => course,
            None => return Ok(None),
        };

        let teachers = course
            .find_related(teachers::Entity)
            .filter(course_teachers::Column::DeletedAt.is_null())
            .filter(teachers::Column::DeletedAt.is_null())
            .order_by_asc(teachers::Column::Id)
            .all(db)
            .await?;

        let lessons = lessons::Entity::find()
            .filter(lessons::Column::CourseId.eq(course.id))
            .filter(lessons::Column::DeletedAt.is_null())
            .order_by_asc(lessons::Column::Id)
            .all(db)
            .await?;

        let counts: Vec<(i16, i64)> = course_ratings::Entity::find()
            .select_only()
            .column(course_ratings::Column::Rating)
            .column_as(course_ratings::Column::Id.count(), "total")
            .filter(course_ratings::Column::CourseId.eq(course.id))
            .filter(course_ratings::Column::DeletedAt.is_null())
            .group_by(course_ratings::Column::Rating)
            .into_tuple()
            .all(db)
            .await?;

        Ok(Some(CourseDetail {
            course,
            teachers,
            lessons,
            stats: RatingDistribution::from_counts(counts).stats(),
        }))
    }

    /// Get a single lesson ("class") by ID
    pub async fn get_lesson_by_id(
        db: &DatabaseConnection,
        lesson_id: i32,
    ) -> Result<Option<lessons::Model>, DbErr> {
        lessons::Entity::find_by_id(lesson_id)
            .filter(lessons::Column::DeletedAt.is_null())
            .one(db)
            .await
    }

    pub async fn count_courses(db: &DatabaseConnection) -> Result<u64, DbErr> {
        courses::Entity::find()
            .filter(courses::Column::DeletedAt.is_null())
            .count(db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::rating::RatingService,
        test_utils::{insert_course, insert_lesson, insert_teacher, setup_db},
    };
    use chrono::Utc;
    use models::rating::RatingValue;
    use sea_orm::{ActiveModelTrait, ActiveValue::Set, IntoActiveModel};

    #[tokio::test]
    async fn test_list_courses_with_stats() {
        let db = setup_db().await;
        let rated = insert_course(&db, "rated").await;
        let unrated = insert_course(&db, "unrated").await;

        for (user_id, value) in [(1, 5), (2, 4)] {
            RatingService::add_rating(&db, rated.id, user_id, RatingValue::new(value).unwrap())
                .await
                .unwrap();
        }

        let listed = CourseService::list_courses(&db).await.unwrap();
        assert_eq!(listed.len(), 2);

        let (first, first_stats) = &listed[0];
        assert_eq!(first.id, rated.id);
        assert_eq!(first_stats.average_rating, 4.5);
        assert_eq!(first_stats.total_ratings, 2);

        let (second, second_stats) = &listed[1];
        assert_eq!(second.id, unrated.id);
        assert_eq!(second_stats.total_ratings, 0);
        assert_eq!(second_stats.average_rating, 0.0);
    }

    #[tokio::test]
    async fn test_list_courses_skips_soft_deleted() {
        let db = setup_db().await;
        insert_course(&db, "kept").await;
        let removed = insert_course(&db, "removed").await;

        let mut removed = removed.into_active_model();
        removed.deleted_at = Set(Some(Utc::now().naive_utc()));
        removed.update(&db).await.unwrap();

        let listed = CourseService::list_courses(&db).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].0.slug, "kept");
        assert_eq!(CourseService::count_courses(&db).await.unwrap(), 1);
        assert!(
            CourseService::get_course_by_slug(&db, "removed")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_get_course_by_slug() {
        let db = setup_db().await;
        let course = insert_course(&db, "detail").await;
        let other = insert_course(&db, "other").await;
        let teacher = insert_teacher(&db, course.id, "Ada Lovelace").await;
        insert_teacher(&db, other.id, "Grace Hopper").await;
        let intro = insert_lesson(&db, course.id, "intro").await;
        let outro = insert_lesson(&db, course.id, "outro").await;
        insert_lesson(&db, other.id, "intro").await;

        RatingService::add_rating(&db, course.id, 1, RatingValue::new(4).unwrap())
            .await
            .unwrap();

        let detail = CourseService::get_course_by_slug(&db, "detail")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(detail.course.id, course.id);
        assert_eq!(detail.teachers, vec![teacher]);
        assert_eq!(
            detail.lessons.iter().map(|l| l.id).collect::<Vec<_>>(),
            vec![intro.id, outro.id]
        );
        assert_eq!(detail.stats.total_ratings, 1);
        assert_eq!(detail.stats.average_rating, 4.0);
    }

    #[tokio::test]
    async fn test_get_course_by_unknown_slug() {
        let db = setup_db().await;
        assert!(
            CourseService::get_course_by_slug(&db, "nope")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_get_lesson_by_id() {
        let db = setup_db().await;
        let course = insert_course(&db, "lessons").await;
        let lesson = insert_lesson(&db, course.id, "first").await;

        let found = CourseService::get_lesson_by_id(&db, lesson.id)
            .await
            .unwrap();
        assert_eq!(found, Some(lesson));

        assert!(
            CourseService::get_lesson_by_id(&db, 999)
                .await
                .unwrap()
                .is_none()
        );
    }
}
