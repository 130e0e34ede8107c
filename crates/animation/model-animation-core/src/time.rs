//! Scene clock instants.
//!
//! The scheduler only needs two operations from its clock: offsetting an
//! instant by a number of seconds, and measuring the seconds elapsed between
//! two instants. `JulianDate` keeps a whole day number and the seconds into
//! that day so long-running scenes do not lose sub-second precision.

use serde::{Deserialize, Serialize};

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// An instant on the scene clock: Julian day number plus seconds of day.
///
/// Always normalized so that `0.0 <= seconds_of_day < SECONDS_PER_DAY`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct JulianDate {
    day_number: i64,
    seconds_of_day: f64,
}

impl JulianDate {
    /// Create an instant, carrying whole days out of `seconds_of_day`.
    pub fn new(day_number: i64, seconds_of_day: f64) -> Self {
        let mut date = Self {
            day_number,
            seconds_of_day,
        };
        date.normalize();
        date
    }

    /// Instant `seconds` after day zero.
    #[inline]
    pub fn from_seconds(seconds: f64) -> Self {
        Self::new(0, seconds)
    }

    #[inline]
    pub fn day_number(&self) -> i64 {
        self.day_number
    }

    #[inline]
    pub fn seconds_of_day(&self) -> f64 {
        self.seconds_of_day
    }

    /// Fractional Julian day (lossy for very large day numbers).
    #[inline]
    pub fn total_days(&self) -> f64 {
        self.day_number as f64 + self.seconds_of_day / SECONDS_PER_DAY
    }

    /// Return a new instant offset by `seconds` (may be negative).
    #[inline]
    pub fn add_seconds(&self, seconds: f64) -> Self {
        Self::new(self.day_number, self.seconds_of_day + seconds)
    }

    /// Seconds elapsed from `self` to `other` (positive when `other` is later).
    #[inline]
    pub fn seconds_difference(&self, other: &JulianDate) -> f64 {
        let days = (other.day_number - self.day_number) as f64;
        days * SECONDS_PER_DAY + (other.seconds_of_day - self.seconds_of_day)
    }

    fn normalize(&mut self) {
        if !self.seconds_of_day.is_finite() {
            return;
        }
        let whole_days = (self.seconds_of_day / SECONDS_PER_DAY).floor();
        if whole_days != 0.0 {
            self.day_number += whole_days as i64;
            self.seconds_of_day -= whole_days * SECONDS_PER_DAY;
        }
        // Floating error can leave us exactly on the upper bound.
        if self.seconds_of_day >= SECONDS_PER_DAY {
            self.day_number += 1;
            self.seconds_of_day -= SECONDS_PER_DAY;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carries_seconds_into_days() {
        let d = JulianDate::new(10, SECONDS_PER_DAY + 5.0);
        assert_eq!(d.day_number(), 11);
        assert_eq!(d.seconds_of_day(), 5.0);

        let back = d.add_seconds(-10.0);
        assert_eq!(back.day_number(), 10);
        assert_eq!(back.seconds_of_day(), SECONDS_PER_DAY - 5.0);
    }

    #[test]
    fn difference_spans_days() {
        let a = JulianDate::new(2_451_545, SECONDS_PER_DAY - 1.0);
        let b = a.add_seconds(2.5);
        assert_eq!(b.day_number(), 2_451_546);
        assert!((a.seconds_difference(&b) - 2.5).abs() < 1e-9);
        assert!((b.seconds_difference(&a) + 2.5).abs() < 1e-9);
    }

    #[test]
    fn ordering_follows_time() {
        let a = JulianDate::from_seconds(1.0);
        let b = a.add_seconds(0.25);
        assert!(a < b);
        assert!(JulianDate::new(1, 0.0) > JulianDate::new(0, SECONDS_PER_DAY - 0.5));
    }
}
