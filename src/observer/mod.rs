//! Geographic observer position

use crate::angles::normalize_degrees;
use crate::{DomusError, Result};
use serde::{Deserialize, Serialize};

/// An immutable observer location in decimal degrees.
///
/// Latitude is positive north and must lie in `[-90, 90]`; longitude is
/// positive east and is normalized into `(-180, 180]` on construction.
/// Deserialization runs the same validation, so an out-of-range
/// position cannot enter through the serde boundary either.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ObserverFields")]
pub struct Observer {
    latitude: f64,
    longitude: f64,
}

/// Raw fields read during deserialization, before validation
#[derive(Deserialize)]
struct ObserverFields {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<ObserverFields> for Observer {
    type Error = DomusError;

    fn try_from(fields: ObserverFields) -> Result<Self> {
        Observer::new(fields.latitude, fields.longitude)
    }
}

impl Observer {
    /// Create an observer, validating latitude and normalizing longitude
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || latitude.abs() > 90.0 {
            return Err(DomusError::LatitudeOutOfRange(latitude));
        }
        if !longitude.is_finite() {
            return Err(DomusError::InvalidLongitude(longitude));
        }
        let wrapped = normalize_degrees(longitude);
        let longitude = if wrapped > 180.0 {
            wrapped - 360.0
        } else {
            wrapped
        };
        Ok(Observer {
            latitude,
            longitude,
        })
    }

    /// Geographic latitude in degrees, positive north
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Geographic longitude in degrees, positive east, in `(-180, 180]`
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}
