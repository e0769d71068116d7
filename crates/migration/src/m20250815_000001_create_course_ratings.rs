use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CourseRatings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseRatings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseRatings::CourseId).integer().not_null())
                    .col(ColumnDef::new(CourseRatings::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(CourseRatings::Rating)
                            .small_integer()
                            .not_null()
                            .check(Expr::col(CourseRatings::Rating).between(1, 5)),
                    )
                    .col(
                        ColumnDef::new(CourseRatings::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(CourseRatings::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(CourseRatings::DeletedAt).timestamp().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_ratings-course_id")
                            .from(CourseRatings::Table, CourseRatings::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_ratings_course_id")
                    .table(CourseRatings::Table)
                    .col(CourseRatings::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_ratings_user_id")
                    .table(CourseRatings::Table)
                    .col(CourseRatings::UserId)
                    .to_owned(),
            )
            .await?;

        // At most one active rating per user and course. NULLs compare distinct
        // in a plain unique index, so the soft delete marker goes in the predicate.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS uq_course_ratings_active
                 ON course_ratings (course_id, user_id)
                 WHERE deleted_at IS NULL;",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP INDEX IF EXISTS uq_course_ratings_active;")
            .await?;

        manager
            .drop_table(Table::drop().table(CourseRatings::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum CourseRatings {
    Table,
    Id,
    CourseId,
    UserId,
    Rating,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
}
