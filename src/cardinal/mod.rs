//! Meridian and horizon intersections with the ecliptic
//!
//! Computes the Midheaven (meridian crossing) and the Ascendant (eastern
//! horizon crossing) for a local sidereal time, observer latitude and
//! ecliptic obliquity, plus their opposite points.
//!
//! The Midheaven is closed-form. The Ascendant uses the quadrant-aware
//! auxiliary-angle method: the sidereal angle is reduced into the first
//! quadrant with mirrored latitude where needed, a single-branch solve is
//! done there, and the combination rules restore the full circle. The
//! single-branch solve carries explicit handling for the removable
//! singularities where its numerator or denominator vanishes, which is
//! what keeps the result continuous across the quadrant boundaries.

use crate::angles::{atan_deg, cos_deg, sin_deg, tan_deg, Angle};
use crate::constants::VERY_SMALL;
use crate::Result;
use serde::Serialize;

/// The four angular cardinal points of a chart, as ecliptic longitudes
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardinalPoints {
    /// Eastern horizon crossing (house 1)
    pub ascendant: Angle,
    /// Meridian crossing (house 10)
    pub midheaven: Angle,
    /// Western horizon crossing, opposite the Ascendant (house 7)
    pub descendant: Angle,
    /// Anti-meridian crossing, opposite the Midheaven (house 4)
    pub imum_coeli: Angle,
}

/// Compute all four cardinal points
pub fn solve(lst: Angle, latitude: f64, obliquity: f64) -> Result<CardinalPoints> {
    let midheaven = midheaven(lst, obliquity)?;
    let ascendant = ascendant(lst, latitude, obliquity);
    Ok(CardinalPoints {
        ascendant,
        midheaven,
        descendant: ascendant.opposite(),
        imum_coeli: midheaven.opposite(),
    })
}

/// Ecliptic longitude of the Midheaven.
///
/// `MC = atan2(sin(LST)·cos(ε), cos(LST))`; atan2 resolves the full
/// circle, so no separate quadrant correction is needed.
pub fn midheaven(lst: Angle, obliquity: f64) -> Result<Angle> {
    let theta = lst.degrees();
    // sin and cos of the same angle cannot both vanish, so the atan2
    // domain error cannot fire for any real LST
    let mc = crate::angles::atan2_deg(sin_deg(theta) * cos_deg(obliquity), cos_deg(theta))?;
    Ok(Angle::from_degrees(mc))
}

/// Ecliptic longitude of the Ascendant.
///
/// At the geographic poles the horizon coincides with the celestial
/// equator's pole circle and the formula is undefined; the fixed values
/// 180° (north) and 0° (south) are returned instead.
pub fn ascendant(lst: Angle, latitude: f64, obliquity: f64) -> Angle {
    if (90.0 - latitude).abs() < VERY_SMALL {
        return Angle::from_degrees(180.0);
    }
    if (90.0 + latitude).abs() < VERY_SMALL {
        return Angle::from_degrees(0.0);
    }

    let sin_eps = sin_deg(obliquity);
    let cos_eps = cos_deg(obliquity);
    let x = lst.degrees();

    // Reduce to a first-quadrant solve; quadrants II and III mirror the
    // latitude, the combination rules below undo the reduction.
    let asc = if x < 90.0 {
        auxiliary_ascendant(x, latitude, sin_eps, cos_eps)
    } else if x < 180.0 {
        180.0 - auxiliary_ascendant(180.0 - x, -latitude, sin_eps, cos_eps)
    } else if x < 270.0 {
        180.0 + auxiliary_ascendant(x - 180.0, -latitude, sin_eps, cos_eps)
    } else {
        360.0 - auxiliary_ascendant(360.0 - x, latitude, sin_eps, cos_eps)
    };

    Angle::from_degrees(asc)
}

/// First-quadrant auxiliary solve, returning an angle in `[0, 180]`.
///
/// Where numerator and denominator approach zero the quotient has a
/// removable singularity; a signed epsilon (resp. the ±90 limit) is
/// substituted so the caller never sees a division by zero.
fn auxiliary_ascendant(x: f64, latitude: f64, sin_eps: f64, cos_eps: f64) -> f64 {
    let mut denominator = -tan_deg(latitude) * sin_eps + cos_eps * cos_deg(x);
    if denominator.abs() < VERY_SMALL {
        denominator = 0.0;
    }
    let mut numerator = sin_deg(x);
    if numerator.abs() < VERY_SMALL {
        numerator = 0.0;
    }

    let mut auxiliary = if numerator == 0.0 {
        if denominator < 0.0 {
            -VERY_SMALL
        } else {
            VERY_SMALL
        }
    } else if denominator == 0.0 {
        if numerator < 0.0 {
            -90.0
        } else {
            90.0
        }
    } else {
        atan_deg(numerator / denominator)
    };

    if auxiliary < 0.0 {
        auxiliary += 180.0;
    }
    auxiliary
}
