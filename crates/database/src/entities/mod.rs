pub mod course_ratings;
pub mod course_teachers;
pub mod courses;
pub mod lessons;
pub mod teachers;
