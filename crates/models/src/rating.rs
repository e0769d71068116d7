use std::fmt::{Display, Formatter, Result as FmtResult};
use thiserror::Error;

/// A star rating a user gives to a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RatingValue(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RatingValueError {
    #[error("rating must be between {min} and {max}, got {0}", min = RatingValue::MIN, max = RatingValue::MAX)]
    OutOfRange(i64),
}

impl RatingValue {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: impl Into<i64>) -> Result<Self, RatingValueError> {
        let value = value.into();
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(RatingValueError::OutOfRange(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Iterates over every valid rating, lowest first
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }
}

impl From<RatingValue> for i16 {
    fn from(value: RatingValue) -> Self {
        value.0 as i16
    }
}

impl Display for RatingValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_bounds() {
        assert_eq!(RatingValue::new(1).map(RatingValue::get), Ok(1));
        assert_eq!(RatingValue::new(5).map(RatingValue::get), Ok(5));
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(RatingValue::new(0), Err(RatingValueError::OutOfRange(0)));
        assert_eq!(RatingValue::new(6), Err(RatingValueError::OutOfRange(6)));
        assert_eq!(RatingValue::new(-3), Err(RatingValueError::OutOfRange(-3)));
    }

    #[test]
    fn test_error_message() {
        let err = RatingValue::new(9).unwrap_err();
        assert_eq!(err.to_string(), "rating must be between 1 and 5, got 9");
    }

    #[test]
    fn test_all_yields_five_values() {
        let values: Vec<u8> = RatingValue::all().map(RatingValue::get).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_rejects_values_wider_than_storage() {
        assert_eq!(
            RatingValue::new(70_000),
            Err(RatingValueError::OutOfRange(70_000))
        );
        assert_eq!(i16::from(RatingValue::new(3).unwrap()), 3);
    }
}
