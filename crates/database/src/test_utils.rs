use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ConnectOptions, Database, DatabaseConnection};

use crate::entities::{course_teachers, courses, lessons, teachers};

/// Fresh in-memory SQLite database with the full migration chain applied
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1);

    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub async fn insert_course(db: &DatabaseConnection, slug: &str) -> courses::Model {
    let now = Utc::now().naive_utc();
    courses::ActiveModel {
        name: Set(format!("Course {slug}")),
        description: Set(format!("Description of {slug}")),
        thumbnail: Set(format!("https://example.com/{slug}.png")),
        slug: Set(slug.to_owned()),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn insert_teacher(
    db: &DatabaseConnection,
    course_id: i32,
    name: &str,
) -> teachers::Model {
    let now = Utc::now().naive_utc();
    let teacher = teachers::ActiveModel {
        name: Set(name.to_owned()),
        email: Set(format!("{}@example.com", name.to_lowercase().replace(' ', "."))),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    course_teachers::ActiveModel {
        course_id: Set(course_id),
        teacher_id: Set(teacher.id),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    teacher
}

pub async fn insert_lesson(db: &DatabaseConnection, course_id: i32, slug: &str) -> lessons::Model {
    let now = Utc::now().naive_utc();
    lessons::ActiveModel {
        course_id: Set(course_id),
        name: Set(format!("Lesson {slug}")),
        description: Set(format!("About {slug}")),
        slug: Set(slug.to_owned()),
        video_url: Set(format!("https://example.com/videos/{slug}.mp4")),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}
