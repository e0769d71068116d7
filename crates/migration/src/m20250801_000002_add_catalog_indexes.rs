use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on lessons.course_id for faster joins
        manager
            .create_index(
                Index::create()
                    .name("idx_lessons_course_id")
                    .table(Lessons::Table)
                    .col(Lessons::CourseId)
                    .to_owned(),
            )
            .await?;

        // A course never lists the same lesson slug twice
        manager
            .create_index(
                Index::create()
                    .name("idx_lessons_course_id_slug")
                    .table(Lessons::Table)
                    .col(Lessons::CourseId)
                    .col(Lessons::Slug)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Indexes on course_teachers for faster many-to-many lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_course_teachers_course_id")
                    .table(CourseTeachers::Table)
                    .col(CourseTeachers::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_teachers_teacher_id")
                    .table(CourseTeachers::Table)
                    .col(CourseTeachers::TeacherId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_course_teachers_teacher_id")
                    .table(CourseTeachers::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_course_teachers_course_id")
                    .table(CourseTeachers::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_lessons_course_id_slug")
                    .table(Lessons::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_lessons_course_id")
                    .table(Lessons::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Lessons {
    Table,
    CourseId,
    Slug,
}

#[derive(Iden)]
enum CourseTeachers {
    Table,
    CourseId,
    TeacherId,
}
