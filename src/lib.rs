//! Domus: natal-chart angular cusps
//!
//! Computes the four cardinal points of a natal chart — Ascendant,
//! Midheaven, Descendant, Imum Coeli — and the eight intermediate
//! Placidus house cusps from an observer's geographic location and a UTC
//! instant.
//!
//! The pipeline is: calendar instant → Julian date → Greenwich and local
//! sidereal time → ecliptic intersections of meridian and horizon →
//! Placidus diurnal-arc root-finding → assembled, invariant-checked
//! twelve-house table.
//!
//! ```no_run
//! use domus::{compute_chart, Instant, Observer};
//!
//! let instant = Instant::from_calendar(1993, 6, 10, 11, 15, 0.0)?;
//! let observer = Observer::new(45.41317, 10.39799)?;
//! let chart = compute_chart(&instant, &observer)?;
//! println!("ascendant at {}", chart.ascendant());
//! # Ok::<(), domus::DomusError>(())
//! ```

use thiserror::Error;

pub mod angles;
pub mod cardinal;
pub mod chart;
pub mod constants;
pub mod observer;
pub mod placidus;
pub mod sidereal;
pub mod time;

// Re-export the types most callers need
pub use angles::Angle;
pub use cardinal::CardinalPoints;
pub use chart::{ChartConfig, Cusp, HouseChart};
pub use observer::Observer;
pub use time::Instant;

/// Main error type for the domus library
#[derive(Debug, Error)]
pub enum DomusError {
    #[error("latitude {0} is outside [-90, 90] degrees")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is not a finite value")]
    InvalidLongitude(f64),

    #[error("time error: {0}")]
    Time(#[from] time::TimeError),

    #[error("angle error: {0}")]
    Angle(#[from] angles::AngleError),

    #[error("houses {house} and {opposite} violate the opposite-cusp invariant")]
    InconsistentChart { house: u8, opposite: u8 },
}

/// Result type for domus operations
pub type Result<T> = std::result::Result<T, DomusError>;

/// Compute a house chart with the default obliquity.
///
/// Shorthand for [`HouseChart::compute`] with [`ChartConfig::default`].
pub fn compute_chart(instant: &Instant, observer: &Observer) -> Result<HouseChart> {
    HouseChart::compute(instant, observer, &ChartConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convenience_entry_matches_explicit_default_config() {
        let instant = Instant::from_calendar(1993, 6, 10, 11, 15, 0.0).unwrap();
        let observer = Observer::new(45.41317, 10.39799).unwrap();
        let shorthand = compute_chart(&instant, &observer).unwrap();
        let explicit = HouseChart::compute(&instant, &observer, &ChartConfig::default()).unwrap();
        assert_eq!(shorthand, explicit);
    }

    #[test]
    fn test_time_error_converts_into_crate_error() {
        let err = Instant::from_calendar(1993, 13, 1, 0, 0, 0.0).unwrap_err();
        let crate_err: DomusError = err.into();
        assert!(matches!(crate_err, DomusError::Time(_)));
    }
}
