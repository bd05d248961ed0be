//! Degree-based trigonometric primitives and angle normalization
//!
//! Every angular quantity that crosses a module boundary in this crate is
//! expressed in degrees; radians are an implementation detail of the
//! individual functions here and never leak outward. Final and stored
//! angles are carried by the [`Angle`] newtype, which guarantees the
//! normalized `[0, 360)` range. Raw intermediate values (differences,
//! un-normalized sums) stay plain `f64`.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error type for angle operations
#[derive(Debug, Error, PartialEq)]
pub enum AngleError {
    /// The direction of the zero vector is undefined
    #[error("atan2 is undefined for y = 0, x = 0")]
    Atan2Undefined,

    /// A NaN or infinite value cannot be normalized into an angle
    #[error("angle {0} is not a finite value")]
    NonFinite(f64),
}

/// Result type for angle operations
pub type Result<T> = std::result::Result<T, AngleError>;

/// Normalize an angle in degrees to the range `[0, 360)`.
///
/// Idempotent: `normalize_degrees(normalize_degrees(x)) == normalize_degrees(x)`.
/// Negative inputs wrap upward, so `normalize_degrees(-10.0) == 350.0`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid of a tiny negative value can round up to exactly 360.0,
    // which would violate the half-open range
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Sine of an angle given in degrees
pub fn sin_deg(degrees: f64) -> f64 {
    degrees.to_radians().sin()
}

/// Cosine of an angle given in degrees
pub fn cos_deg(degrees: f64) -> f64 {
    degrees.to_radians().cos()
}

/// Tangent of an angle given in degrees
pub fn tan_deg(degrees: f64) -> f64 {
    degrees.to_radians().tan()
}

/// Arcsine in degrees, in `[-90, 90]`
pub fn asin_deg(value: f64) -> f64 {
    value.asin().to_degrees()
}

/// Arctangent in degrees, in `(-90, 90)`
pub fn atan_deg(value: f64) -> f64 {
    value.atan().to_degrees()
}

/// Four-quadrant arctangent in degrees, normalized to `[0, 360)`.
///
/// Fails if both arguments are zero, where no direction is defined.
pub fn atan2_deg(y: f64, x: f64) -> Result<f64> {
    if y == 0.0 && x == 0.0 {
        return Err(AngleError::Atan2Undefined);
    }
    Ok(normalize_degrees(y.atan2(x).to_degrees()))
}

/// Shortest angular separation between two directions, in `[0, 180]`
pub fn angular_separation(a: f64, b: f64) -> f64 {
    let diff = normalize_degrees(b - a);
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// An ecliptic direction in degrees, always normalized to `[0, 360)`.
///
/// Deserialization goes through the same normalization as
/// [`Angle::from_degrees`], so a stored `Angle` never carries a raw
/// out-of-range value.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub struct Angle(f64);

impl Angle {
    /// Create an angle, normalizing the value into `[0, 360)`
    pub fn from_degrees(degrees: f64) -> Self {
        Angle(normalize_degrees(degrees))
    }

    /// The normalized value in degrees
    pub fn degrees(self) -> f64 {
        self.0
    }

    /// The diametrically opposite direction
    pub fn opposite(self) -> Self {
        Angle::from_degrees(self.0 + 180.0)
    }
}

impl From<Angle> for f64 {
    fn from(angle: Angle) -> f64 {
        angle.0
    }
}

impl TryFrom<f64> for Angle {
    type Error = AngleError;

    fn try_from(degrees: f64) -> Result<Self> {
        if !degrees.is_finite() {
            return Err(AngleError::NonFinite(degrees));
        }
        Ok(Angle::from_degrees(degrees))
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}°", self.0)
    }
}
