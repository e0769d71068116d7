use crate::entities::{course_teachers, courses, lessons, teachers};
use chrono::Utc;
use log::info;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, TransactionTrait,
};

struct SampleLesson {
    name: &'static str,
    slug: &'static str,
    description: &'static str,
}

struct SampleCourse {
    name: &'static str,
    slug: &'static str,
    description: &'static str,
    teacher: usize,
    lessons: &'static [SampleLesson],
}

const SAMPLE_TEACHERS: &[(&str, &str)] = &[
    ("Juan Pérez", "juan.perez@platziflix.com"),
    ("María García", "maria.garcia@platziflix.com"),
    ("Carlos Rodríguez", "carlos.rodriguez@platziflix.com"),
];

const SAMPLE_COURSES: &[SampleCourse] = &[
    SampleCourse {
        name: "Curso de React",
        slug: "curso-de-react",
        description: "Aprende React desde cero: componentes, hooks y estado.",
        teacher: 0,
        lessons: &[
            SampleLesson {
                name: "Introducción a React",
                slug: "introduccion-a-react",
                description: "Qué es React y por qué usarlo.",
            },
            SampleLesson {
                name: "Componentes y props",
                slug: "componentes-y-props",
                description: "Construye interfaces a partir de componentes.",
            },
            SampleLesson {
                name: "Hooks",
                slug: "hooks",
                description: "Estado y efectos con useState y useEffect.",
            },
        ],
    },
    SampleCourse {
        name: "Curso de Python",
        slug: "curso-de-python",
        description: "Fundamentos de programación con Python.",
        teacher: 1,
        lessons: &[
            SampleLesson {
                name: "Variables y tipos",
                slug: "variables-y-tipos",
                description: "Los tipos de datos básicos de Python.",
            },
            SampleLesson {
                name: "Funciones",
                slug: "funciones",
                description: "Define y reutiliza bloques de código.",
            },
        ],
    },
    SampleCourse {
        name: "Curso de JavaScript",
        slug: "curso-de-javascript",
        description: "JavaScript moderno para la web.",
        teacher: 2,
        lessons: &[
            SampleLesson {
                name: "Sintaxis básica",
                slug: "sintaxis-basica",
                description: "Variables, operadores y control de flujo.",
            },
            SampleLesson {
                name: "Asincronía",
                slug: "asincronia",
                description: "Promesas y async/await.",
            },
        ],
    },
];

pub struct SeedService;

impl SeedService {
    /// Populate an empty catalog with sample teachers, courses and lessons.
    ///
    /// Returns the number of courses inserted, which is zero when the catalog
    /// already has courses.
    pub async fn seed_sample_data(db: &DatabaseConnection) -> Result<usize, DbErr> {
        if courses::Entity::find().count(db).await? > 0 {
            info!("Catalog already has courses, skipping seed");
            return Ok(0);
        }

        let txn = db.begin().await?;
        let now = Utc::now().naive_utc();

        let mut teacher_ids = Vec::with_capacity(SAMPLE_TEACHERS.len());
        for (name, email) in SAMPLE_TEACHERS {
            // Teachers can exist without courses, match them by email
            if let Some(existing) = teachers::Entity::find()
                .filter(teachers::Column::Email.eq(*email))
                .one(&txn)
                .await?
            {
                teacher_ids.push(existing.id);
                continue;
            }

            let teacher = teachers::ActiveModel {
                name: Set((*name).to_owned()),
                email: Set((*email).to_owned()),
                created_at: Set(now),
                updated_at: Set(now),
                deleted_at: Set(None),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            teacher_ids.push(teacher.id);
        }

        for sample in SAMPLE_COURSES {
            let course = courses::ActiveModel {
                name: Set(sample.name.to_owned()),
                description: Set(sample.description.to_owned()),
                thumbnail: Set(format!(
                    "https://static.platziflix.com/thumbnails/{}.png",
                    sample.slug
                )),
                slug: Set(sample.slug.to_owned()),
                created_at: Set(now),
                updated_at: Set(now),
                deleted_at: Set(None),
                ..Default::default()
            }
            .insert(&txn)
            .await?;

            course_teachers::ActiveModel {
                course_id: Set(course.id),
                teacher_id: Set(teacher_ids[sample.teacher]),
                created_at: Set(now),
                updated_at: Set(now),
                deleted_at: Set(None),
                ..Default::default()
            }
            .insert(&txn)
            .await?;

            let lesson_models = sample.lessons.iter().map(|lesson| lessons::ActiveModel {
                course_id: Set(course.id),
                name: Set(lesson.name.to_owned()),
                description: Set(lesson.description.to_owned()),
                slug: Set(lesson.slug.to_owned()),
                video_url: Set(format!(
                    "https://videos.platziflix.com/{}/{}.mp4",
                    sample.slug, lesson.slug
                )),
                created_at: Set(now),
                updated_at: Set(now),
                deleted_at: Set(None),
                ..Default::default()
            });
            lessons::Entity::insert_many(lesson_models).exec(&txn).await?;

            info!(
                "Seeded course '{}' with {} lessons",
                sample.slug,
                sample.lessons.len()
            );
        }

        txn.commit().await?;
        Ok(SAMPLE_COURSES.len())
    }
}
