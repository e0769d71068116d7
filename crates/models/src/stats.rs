//! Aggregate statistics over a course's active ratings.

use crate::rating::RatingValue;

/// Fixed five-bucket histogram of ratings, indexed by star value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingDistribution {
    counts: [u64; RatingValue::MAX as usize],
}

impl RatingDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a distribution from `(rating, count)` rows of a group-by query.
    ///
    /// Rows whose rating falls outside the valid range are skipped.
    pub fn from_counts<R, C>(rows: impl IntoIterator<Item = (R, C)>) -> Self
    where
        R: Into<i64>,
        C: Into<i64>,
    {
        let mut distribution = Self::new();
        for (rating, count) in rows {
            if let Ok(value) = RatingValue::new(rating) {
                let count: i64 = count.into();
                distribution.counts[Self::index(value)] += count.max(0) as u64;
            }
        }
        distribution
    }

    pub fn record(&mut self, value: RatingValue) {
        self.counts[Self::index(value)] += 1;
    }

    pub fn count(&self, value: RatingValue) -> u64 {
        self.counts[Self::index(value)]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn sum(&self) -> u64 {
        RatingValue::all()
            .map(|value| value.get() as u64 * self.count(value))
            .sum()
    }

    /// Mean rating rounded to two decimals, or `0.0` with no ratings
    pub fn average(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let mean = self.sum() as f64 / total as f64;
        (mean * 100.0).round() / 100.0
    }

    pub fn stats(&self) -> RatingStats {
        RatingStats {
            average_rating: self.average(),
            total_ratings: self.total(),
            rating_distribution: *self,
        }
    }

    fn index(value: RatingValue) -> usize {
        (value.get() - RatingValue::MIN) as usize
    }
}

impl FromIterator<RatingValue> for RatingDistribution {
    fn from_iter<I: IntoIterator<Item = RatingValue>>(iter: I) -> Self {
        let mut distribution = Self::new();
        for value in iter {
            distribution.record(value);
        }
        distribution
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RatingStats {
    pub average_rating: f64,
    pub total_ratings: u64,
    pub rating_distribution: RatingDistribution,
}
