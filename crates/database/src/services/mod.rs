pub mod course;
pub mod rating;
pub mod seed;
