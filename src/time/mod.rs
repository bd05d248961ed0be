//! UTC instants for chart computations
//!
//! An [`Instant`] is an immutable UTC point in time exposed as a Julian
//! date and as Julian centuries since J2000.0 — the two forms the rest of
//! the pipeline consumes. Calendar conversion follows the algorithm in the
//! Explanatory Supplement to the Astronomical Almanac 15.11.

use crate::constants::{DAYS_PER_JULIAN_CENTURY, GREGORIAN_START, J2000};
use chrono::{DateTime, Datelike, Timelike, Utc};
use thiserror::Error;

/// Error type for calendar input validation
#[derive(Debug, Error, PartialEq)]
pub enum TimeError {
    /// Month outside 1..=12
    #[error("month {0} is outside 1..=12")]
    InvalidMonth(u32),

    /// Day does not exist in the given month
    #[error("day {day} does not exist in {year}-{month:02}")]
    InvalidDay { year: i32, month: u32, day: u32 },

    /// Hour, minute or second outside its range
    #[error("time of day {hour:02}:{minute:02}:{second} is out of range")]
    InvalidTimeOfDay { hour: u32, minute: u32, second: f64 },

    /// Julian date is NaN or infinite
    #[error("julian date {0} is not finite")]
    NonFiniteJulianDate(f64),
}

/// Result type for time operations
pub type Result<T> = std::result::Result<T, TimeError>;

/// An immutable UTC instant, stored as a Julian date
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Instant {
    jd: f64,
}

impl Instant {
    /// Create an instant directly from a Julian date.
    ///
    /// A NaN or infinite value is rejected here rather than surfacing as
    /// meaningless angles downstream.
    pub fn from_julian_date(jd: f64) -> Result<Self> {
        if !jd.is_finite() {
            return Err(TimeError::NonFiniteJulianDate(jd));
        }
        Ok(Instant { jd })
    }

    /// Create an instant from a UTC calendar date and time.
    ///
    /// The seconds component accepts fractions; leap seconds are not
    /// representable.
    pub fn from_calendar(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(TimeError::InvalidMonth(month));
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(TimeError::InvalidDay { year, month, day });
        }
        if hour >= 24 || minute >= 60 || !(0.0..60.0).contains(&second) {
            return Err(TimeError::InvalidTimeOfDay {
                hour,
                minute,
                second,
            });
        }
        Ok(Self::from_parts(year, month, day, hour, minute, second))
    }

    /// Create an instant from a chrono UTC datetime
    pub fn from_utc(datetime: &DateTime<Utc>) -> Self {
        let second = datetime.second() as f64 + datetime.nanosecond() as f64 / 1_000_000_000.0;
        Self::from_parts(
            datetime.year(),
            datetime.month(),
            datetime.day(),
            datetime.hour(),
            datetime.minute(),
            second,
        )
    }

    /// The current instant
    pub fn now() -> Self {
        Self::from_utc(&Utc::now())
    }

    /// The Julian date
    pub fn julian_date(&self) -> f64 {
        self.jd
    }

    /// Julian centuries elapsed since the J2000.0 epoch
    pub fn julian_centuries(&self) -> f64 {
        (self.jd - J2000) / DAYS_PER_JULIAN_CENTURY
    }

    // Calendar fields are assumed valid here; the Julian day number is for
    // noon, so the civil time of day is offset by half a day.
    fn from_parts(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        let day_number = julian_day_number(year, month, day);
        let day_fraction = (hour as f64 + minute as f64 / 60.0 + second / 3600.0) / 24.0;
        Instant {
            jd: day_number as f64 - 0.5 + day_fraction,
        }
    }
}

/// Julian day number for a calendar date.
///
/// Explanatory Supplement to the Astronomical Almanac 15.11, switching
/// from the Julian to the Gregorian calendar at the 1582 reform.
fn julian_day_number(year: i32, month: u32, day: u32) -> i64 {
    let janfeb = month <= 2;
    let g = year as i64 + 4716 - if janfeb { 1 } else { 0 };
    let f = ((month + 9) % 12) as i64;
    let e = 1461 * g / 4 + day as i64 - 1402;
    let mut j = e + (153 * f + 2) / 5;
    if j >= GREGORIAN_START {
        j += 38 - (g + 184) / 100 * 3 / 4;
    }
    j
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;
    use rstest::rstest;

    #[test]
    fn test_j2000_epoch() {
        let instant = Instant::from_calendar(2000, 1, 1, 12, 0, 0.0).unwrap();
        assert_relative_eq!(instant.julian_date(), J2000, epsilon = 1e-9);
        assert_relative_eq!(instant.julian_centuries(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_scenario_a_julian_date() {
        let instant = Instant::from_calendar(1993, 6, 10, 11, 15, 0.0).unwrap();
        assert_relative_eq!(instant.julian_date(), 2_449_148.96875, epsilon = 1e-9);
    }

    #[rstest]
    #[case(1957, 10, 4, 19, 26, 24.0, 2_436_116.31)] // Sputnik launch, Meeus 7.a
    #[case(1600, 12, 31, 0, 0, 0.0, 2_305_812.5)]
    #[case(1582, 10, 15, 0, 0, 0.0, 2_299_160.5)] // first Gregorian day
    fn test_known_julian_dates(
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
        #[case] hour: u32,
        #[case] minute: u32,
        #[case] second: f64,
        #[case] expected_jd: f64,
    ) {
        let instant = Instant::from_calendar(year, month, day, hour, minute, second).unwrap();
        assert_relative_eq!(instant.julian_date(), expected_jd, epsilon = 1e-6);
    }

    #[test]
    fn test_from_utc_matches_from_calendar() {
        let datetime = Utc.with_ymd_and_hms(1993, 6, 10, 11, 15, 0).unwrap();
        let from_chrono = Instant::from_utc(&datetime);
        let from_calendar = Instant::from_calendar(1993, 6, 10, 11, 15, 0.0).unwrap();
        assert_relative_eq!(
            from_chrono.julian_date(),
            from_calendar.julian_date(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_invalid_calendar_inputs_are_rejected() {
        assert_eq!(
            Instant::from_calendar(1993, 13, 1, 0, 0, 0.0),
            Err(TimeError::InvalidMonth(13))
        );
        assert_eq!(
            Instant::from_calendar(1993, 2, 29, 0, 0, 0.0),
            Err(TimeError::InvalidDay {
                year: 1993,
                month: 2,
                day: 29
            })
        );
        assert!(Instant::from_calendar(1993, 6, 10, 24, 0, 0.0).is_err());
        assert!(Instant::from_calendar(1993, 6, 10, 0, 0, 60.0).is_err());
        assert!(Instant::from_calendar(1993, 6, 10, 0, 0, -1.0).is_err());
    }

    #[test]
    fn test_leap_day_accepted_in_leap_years() {
        assert!(Instant::from_calendar(1992, 2, 29, 0, 0, 0.0).is_ok());
        assert!(Instant::from_calendar(2000, 2, 29, 0, 0, 0.0).is_ok());
        assert!(Instant::from_calendar(1900, 2, 29, 0, 0, 0.0).is_err());
    }

    #[test]
    fn test_non_finite_julian_dates_are_rejected() {
        assert!(matches!(
            Instant::from_julian_date(f64::NAN),
            Err(TimeError::NonFiniteJulianDate(_))
        ));
        assert!(matches!(
            Instant::from_julian_date(f64::INFINITY),
            Err(TimeError::NonFiniteJulianDate(_))
        ));
        assert!(Instant::from_julian_date(J2000).is_ok());
    }

    #[test]
    fn test_now_is_after_2020() {
        // 2458849.5 is 2020-01-01T00:00:00Z
        assert!(Instant::now().julian_date() > 2_458_849.5);
    }
}
