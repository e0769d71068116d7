pub mod rating;
pub mod stats;
