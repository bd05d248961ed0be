//! Greenwich and local sidereal time
//!
//! Sidereal time is derived fresh from every [`Instant`]; nothing is
//! cached across instants.

use crate::angles::Angle;
use crate::constants::{GMST_DEG_PER_DAY, GMST_J2000_DEG, GMST_T2_DEG, GMST_T3_DIVISOR, J2000};
use crate::time::Instant;

/// Greenwich Mean Sidereal Time as an angle in `[0, 360)`.
///
/// IAU polynomial in UT days and Julian centuries since J2000.0.
pub fn greenwich_sidereal_time(instant: &Instant) -> Angle {
    let days = instant.julian_date() - J2000;
    let t = instant.julian_centuries();
    let gmst =
        GMST_J2000_DEG + GMST_DEG_PER_DAY * days + GMST_T2_DEG * t * t - t * t * t / GMST_T3_DIVISOR;
    Angle::from_degrees(gmst)
}

/// Local Sidereal Time: GMST shifted east by the observer longitude.
///
/// For a fixed instant, `lst(λ) == normalize(lst(0) + λ)` for every λ.
pub fn local_sidereal_time(instant: &Instant, longitude: f64) -> Angle {
    Angle::from_degrees(greenwich_sidereal_time(instant).degrees() + longitude)
}
