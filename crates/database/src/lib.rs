pub mod db;
pub mod entities;
pub mod error;
pub mod services;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
