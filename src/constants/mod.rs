//! Constants for the chart computation pipeline

// Time constants
/// J2000.0 epoch as Julian date
pub const J2000: f64 = 2_451_545.0;
/// Days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

// Calendar constants
/// First day of the Gregorian calendar (1582-10-15) as a Julian day number
pub const GREGORIAN_START: i64 = 2_299_161;

// Ecliptic geometry
/// Mean obliquity of the ecliptic at J2000.0 in degrees
pub const DEFAULT_OBLIQUITY_DEG: f64 = 23.4366;

// IAU Greenwich Mean Sidereal Time polynomial, degrees
/// GMST at the J2000.0 epoch
pub const GMST_J2000_DEG: f64 = 280.460_618_37;
/// GMST advance per UT day
pub const GMST_DEG_PER_DAY: f64 = 360.985_647_366_29;
/// Coefficient of the T^2 term
pub const GMST_T2_DEG: f64 = 0.000_387_933;
/// Divisor of the T^3 term
pub const GMST_T3_DIVISOR: f64 = 38_710_000.0;

// Numerical tolerances
/// Threshold below which a trigonometric numerator or denominator is
/// treated as exactly zero when resolving removable singularities
pub const VERY_SMALL: f64 = 1e-10;
