pub mod course;
pub mod health;
pub mod lesson;
pub mod rating;
