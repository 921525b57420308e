// ABOUTME: Star rating models with validated 1-5 values
// ABOUTME: Ratings are unique per (meal id, user id) and written with upsert semantics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::ratings::{MAX_STARS, MIN_STARS};
use crate::errors::AppError;

/// A star value guaranteed to be within 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct RatingValue(u8);

impl RatingValue {
    /// Validate a raw star count
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` when `value` is outside 1..=5
    pub fn new(value: i64) -> Result<Self, AppError> {
        u8::try_from(value)
            .ok()
            .filter(|stars| (MIN_STARS..=MAX_STARS).contains(stars))
            .map(Self)
            .ok_or_else(|| {
                AppError::out_of_range(format!(
                    "Rating must be between {MIN_STARS} and {MAX_STARS}, got {value}"
                ))
            })
    }

    /// Star count
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Render as filled/empty stars, e.g. `★★★☆☆`
    #[must_use]
    pub fn stars(self) -> String {
        let filled = usize::from(self.0);
        let empty = usize::from(MAX_STARS) - filled;
        format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
    }
}

impl TryFrom<i64> for RatingValue {
    type Error = AppError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RatingValue> for i64 {
    fn from(value: RatingValue) -> Self {
        Self::from(value.0)
    }
}

impl fmt::Display for RatingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One user's rating of one meal, in the shape the ratings table stores it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    /// Recipe id
    pub meal_id: String,
    /// Rating author
    pub user_id: String,
    /// Star value
    pub rating: RatingValue,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_bounds() {
        assert!(RatingValue::new(1).is_ok());
        assert!(RatingValue::new(5).is_ok());
        assert_eq!(
            RatingValue::new(0).unwrap_err().code,
            ErrorCode::ValueOutOfRange
        );
        assert_eq!(
            RatingValue::new(6).unwrap_err().code,
            ErrorCode::ValueOutOfRange
        );
    }

    #[test]
    fn test_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<RatingValue>("3").is_ok());
        assert!(serde_json::from_str::<RatingValue>("9").is_err());
    }

    #[test]
    fn test_stars() {
        assert_eq!(RatingValue::new(3).unwrap().stars(), "★★★☆☆");
    }
}
