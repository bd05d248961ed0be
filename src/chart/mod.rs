//! House table assembly and validation
//!
//! Combines the cardinal points and the Placidus cusp solutions into one
//! immutable twelve-house table, deriving the four mirror houses from
//! their opposite points and checking the opposite-pair invariants before
//! the table is handed out.

use crate::angles::{angular_separation, Angle};
use crate::cardinal::{self, CardinalPoints};
use crate::constants::DEFAULT_OBLIQUITY_DEG;
use crate::observer::Observer;
use crate::placidus::{solved_cusps, CuspOutcome, SOLVED_HOUSES};
use crate::sidereal::local_sidereal_time;
use crate::time::Instant;
use crate::{DomusError, Result};
use log::debug;
use serde::{Deserialize, Serialize};

/// Largest angular deviation tolerated between opposite cusps, degrees
const OPPOSITE_TOLERANCE_DEG: f64 = 1e-6;

/// Per-computation settings.
///
/// The obliquity of the ecliptic is an explicit input rather than a
/// hidden global; [`ChartConfig::default`] uses the mean value near
/// J2000.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Obliquity of the ecliptic in degrees
    pub obliquity: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            obliquity: DEFAULT_OBLIQUITY_DEG,
        }
    }
}

/// One entry of the house table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", content = "degrees")]
pub enum Cusp {
    /// Cusp ecliptic longitude
    Available(Angle),
    /// The root search for this house found no solution at the given
    /// latitude
    Unavailable,
}

impl Cusp {
    /// The cusp longitude, if the house converged
    pub fn angle(&self) -> Option<Angle> {
        match self {
            Cusp::Available(angle) => Some(*angle),
            Cusp::Unavailable => None,
        }
    }

    fn is_available(&self) -> bool {
        matches!(self, Cusp::Available(_))
    }
}

impl From<CuspOutcome> for Cusp {
    fn from(outcome: CuspOutcome) -> Self {
        match outcome {
            CuspOutcome::Found(angle) => Cusp::Available(angle),
            CuspOutcome::NoSolution => Cusp::Unavailable,
        }
    }
}

/// Opposite-house pairs whose cusps must differ by exactly 180°
const OPPOSITE_PAIRS: [(u8, u8); 6] = [(1, 7), (10, 4), (2, 11), (3, 12), (9, 5), (8, 6)];

/// Houses derived as the opposite point of a solved house
const DERIVED_HOUSES: [(u8, u8); 4] = [(2, 11), (3, 12), (8, 6), (9, 5)];

/// A completed, validated natal house table.
///
/// Built once per (instant, observer, config) triple and immutable
/// afterwards. The four cardinal houses are always present; the eight
/// Placidus houses degrade per-house to [`Cusp::Unavailable`] where the
/// system has no solution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HouseChart {
    ascendant: Angle,
    midheaven: Angle,
    descendant: Angle,
    imum_coeli: Angle,
    houses: [Cusp; 12],
}

impl HouseChart {
    /// Compute the full house table for an instant and observer.
    ///
    /// Errors only on internally inconsistent assembly; per-house root
    /// failures appear as [`Cusp::Unavailable`] entries instead.
    pub fn compute(instant: &Instant, observer: &Observer, config: &ChartConfig) -> Result<Self> {
        let lst = local_sidereal_time(instant, observer.longitude());
        let points = cardinal::solve(lst, observer.latitude(), config.obliquity)?;
        let outcomes = solved_cusps(lst, observer.latitude(), config.obliquity);

        let mut houses = [Cusp::Unavailable; 12];
        houses[0] = Cusp::Available(points.ascendant);
        houses[9] = Cusp::Available(points.midheaven);
        houses[6] = Cusp::Available(points.descendant);
        houses[3] = Cusp::Available(points.imum_coeli);

        for (&house, outcome) in SOLVED_HOUSES.iter().zip(outcomes) {
            houses[usize::from(house) - 1] = outcome.into();
        }
        for (source, mirror) in DERIVED_HOUSES {
            houses[usize::from(mirror) - 1] = match houses[usize::from(source) - 1] {
                Cusp::Available(angle) => Cusp::Available(angle.opposite()),
                Cusp::Unavailable => Cusp::Unavailable,
            };
        }

        let unavailable = houses.iter().filter(|cusp| !cusp.is_available()).count();
        if unavailable > 0 {
            debug!(
                "chart: {} house(s) unavailable at latitude {:.4}",
                unavailable,
                observer.latitude()
            );
        }

        let chart = HouseChart {
            ascendant: points.ascendant,
            midheaven: points.midheaven,
            descendant: points.descendant,
            imum_coeli: points.imum_coeli,
            houses,
        };
        chart.validate()?;
        Ok(chart)
    }

    /// Check the six opposite-pair invariants.
    ///
    /// Availability must match within each pair and available cusps must
    /// sit 180° apart within tolerance.
    fn validate(&self) -> Result<()> {
        for (house, opposite) in OPPOSITE_PAIRS {
            let a = self.houses[usize::from(house) - 1];
            let b = self.houses[usize::from(opposite) - 1];
            let consistent = match (a.angle(), b.angle()) {
                (Some(a), Some(b)) => {
                    angular_separation(a.opposite().degrees(), b.degrees())
                        <= OPPOSITE_TOLERANCE_DEG
                }
                (None, None) => true,
                _ => false,
            };
            if !consistent {
                return Err(DomusError::InconsistentChart { house, opposite });
            }
        }
        Ok(())
    }

    /// The cusp for a house number in `1..=12`
    pub fn cusp(&self, house: u8) -> Option<Cusp> {
        if (1..=12).contains(&house) {
            Some(self.houses[usize::from(house) - 1])
        } else {
            None
        }
    }

    /// House numbers and cusps in table order
    pub fn houses(&self) -> impl Iterator<Item = (u8, Cusp)> + '_ {
        self.houses
            .iter()
            .enumerate()
            .map(|(i, cusp)| (i as u8 + 1, *cusp))
    }

    /// Cusp of house 1
    pub fn ascendant(&self) -> Angle {
        self.ascendant
    }

    /// Cusp of house 10
    pub fn midheaven(&self) -> Angle {
        self.midheaven
    }

    /// Cusp of house 7
    pub fn descendant(&self) -> Angle {
        self.descendant
    }

    /// Cusp of house 4
    pub fn imum_coeli(&self) -> Angle {
        self.imum_coeli
    }

    /// The four always-present cardinal points
    pub fn cardinal_points(&self) -> CardinalPoints {
        CardinalPoints {
            ascendant: self.ascendant,
            midheaven: self.midheaven,
            descendant: self.descendant,
            imum_coeli: self.imum_coeli,
        }
    }
}
