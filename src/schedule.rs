//! Fixed-step review schedule
//!
//! A card's mastery level indexes into a table of intervals. Each correct
//! answer moves the card one step further out; a wrong answer sends it back
//! to the first step.

use chrono::{DateTime, Duration, Utc};

/// Days until the next review, indexed by mastery level
pub const REVIEW_STEPS: [i64; 5] = [1, 3, 7, 14, 30];

/// Interval used once a card's level is past the end of `REVIEW_STEPS`
pub const FALLBACK_DAYS: i64 = 60;

/// Returns the number of days a card at `level` waits before its next review
pub fn review_interval_days(level: u32) -> i64 {
    REVIEW_STEPS
        .get(level as usize)
        .copied()
        .unwrap_or(FALLBACK_DAYS)
}

/// Computes when a card at `level` is due again, counted from `now`
pub fn next_review_at(level: u32, now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::days(review_interval_days(level))
}
