use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Columns shared by every table: surrogate key, audit timestamps and soft delete marker
fn base_columns(table: &mut TableCreateStatement) -> &mut TableCreateStatement {
    table
        .col(
            ColumnDef::new(Alias::new("id"))
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(Alias::new("created_at"))
                .timestamp()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(Alias::new("updated_at"))
                .timestamp()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(ColumnDef::new(Alias::new("deleted_at")).timestamp().null())
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create teachers table
        manager
            .create_table(
                base_columns(Table::create().table(Teachers::Table).if_not_exists())
                    .col(ColumnDef::new(Teachers::Name).string().not_null())
                    .col(
                        ColumnDef::new(Teachers::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create courses table
        manager
            .create_table(
                base_columns(Table::create().table(Courses::Table).if_not_exists())
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .col(ColumnDef::new(Courses::Description).text().not_null())
                    .col(ColumnDef::new(Courses::Thumbnail).string().not_null())
                    .col(
                        ColumnDef::new(Courses::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create lessons table
        manager
            .create_table(
                base_columns(Table::create().table(Lessons::Table).if_not_exists())
                    .col(ColumnDef::new(Lessons::CourseId).integer().not_null())
                    .col(ColumnDef::new(Lessons::Name).string().not_null())
                    .col(ColumnDef::new(Lessons::Description).text().not_null())
                    .col(ColumnDef::new(Lessons::Slug).string().not_null())
                    .col(ColumnDef::new(Lessons::VideoUrl).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-lessons-course_id")
                            .from(Lessons::Table, Lessons::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create course_teachers junction table (many-to-many)
        manager
            .create_table(
                base_columns(Table::create().table(CourseTeachers::Table).if_not_exists())
                    .col(ColumnDef::new(CourseTeachers::CourseId).integer().not_null())
                    .col(ColumnDef::new(CourseTeachers::TeacherId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_teachers-course_id")
                            .from(CourseTeachers::Table, CourseTeachers::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_teachers-teacher_id")
                            .from(CourseTeachers::Table, CourseTeachers::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CourseTeachers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Lessons::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Teachers::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Teachers {
    Table,
    Id,
    Name,
    Email,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
    Name,
    Description,
    Thumbnail,
    Slug,
}

#[derive(Iden)]
enum Lessons {
    Table,
    CourseId,
    Name,
    Description,
    Slug,
    VideoUrl,
}

#[derive(Iden)]
enum CourseTeachers {
    Table,
    CourseId,
    TeacherId,
}
