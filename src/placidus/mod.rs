//! Placidus intermediate house cusps
//!
//! The Placidus system trisects the diurnal and nocturnal arcs — the
//! paths ecliptic points travel above and below the horizon — between
//! meridian and horizon. A cusp is the point whose hour angle `H` from
//! the meridian divides its own semi-arc in the house's fraction. With
//! `SA` the diurnal semi-arc of the point, `cos(SA) = -tan(φ)·tan(δ)` and
//! `tan(δ) = tan(ε)·sin(θ + H)`, the division condition becomes
//!
//! ```text
//! cos(SA(H)) + tan(φ)·tan(ε)·sin(θ + H) = 0
//! ```
//!
//! where `SA(H)` is the house-specific linear expression inverting the
//! fractional division (see [`ArcDivision`]). The equation has no closed
//! form and is not globally monotonic, so each house is solved in two
//! phases: a coarse grid over the admissible hour-angle domain isolates
//! sign-change brackets (skipping any sample where the equation cannot be
//! evaluated finitely), then bisection refines each bracket under an
//! iteration budget. A refined value is accepted only if the residual is
//! genuinely small, so a sign change across a discontinuity can never be
//! reported as a cusp.
//!
//! Houses 2, 3, 8 and 9 are solved directly; houses 11, 12, 5 and 6 are
//! their opposite points and are derived during chart assembly.

use crate::angles::{cos_deg, sin_deg, tan_deg, Angle};
use log::{debug, trace};

/// Houses solved by root-finding, in the order [`solved_cusps`] reports them
pub const SOLVED_HOUSES: [u8; 4] = [2, 3, 8, 9];

/// Number of grid intervals sampled per house domain
const GRID_SAMPLES: usize = 360;
/// Bisection iteration budget per bracket
const MAX_BISECTIONS: usize = 80;
/// Bracket width below which bisection stops, degrees of hour angle
const BRACKET_TOLERANCE: f64 = 1e-10;
/// Largest left-hand-side residual accepted as a genuine root
const RESIDUAL_TOLERANCE: f64 = 1e-6;

/// Outcome of one house's root search
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CuspOutcome {
    /// The diurnal-arc division converged to this ecliptic longitude
    Found(Angle),
    /// No genuine sign-change bracket, or refinement failed; the house
    /// has no Placidus cusp at this latitude
    NoSolution,
}

/// Hour-angle domain and semi-arc expression for one solved house.
///
/// For the diurnal houses the cusp's hour angle is a fraction f/3 of its
/// semi-arc, `H = f·SA/3`, inverted as `SA = 3H/f`. For the nocturnal
/// houses the hour angle passes the full diurnal semi-arc first,
/// `H = SA + f·(180 - SA)/3`, giving `SA = (3H - 180f)/(3 - f)`. Both
/// invert to the linear form `SA(H) = scale·H + shift` below. `nominal`
/// is the equal-division hour angle (the exact solution at the equator),
/// used to pick among multiple genuine roots.
struct ArcDivision {
    house: u8,
    sa_scale: f64,
    sa_shift: f64,
    lower: f64,
    upper: f64,
    nominal: f64,
}

const DIVISIONS: [ArcDivision; 4] = [
    // house 2: diurnal arc, first trisection
    ArcDivision {
        house: 2,
        sa_scale: 3.0,
        sa_shift: 0.0,
        lower: 0.0,
        upper: 60.0,
        nominal: 30.0,
    },
    // house 3: diurnal arc, second trisection
    ArcDivision {
        house: 3,
        sa_scale: 1.5,
        sa_shift: 0.0,
        lower: 0.0,
        upper: 120.0,
        nominal: 60.0,
    },
    // house 8: nocturnal arc, first trisection
    ArcDivision {
        house: 8,
        sa_scale: 1.5,
        sa_shift: -90.0,
        lower: 60.0,
        upper: 180.0,
        nominal: 120.0,
    },
    // house 9: nocturnal arc, second trisection
    ArcDivision {
        house: 9,
        sa_scale: 3.0,
        sa_shift: -360.0,
        lower: 120.0,
        upper: 180.0,
        nominal: 150.0,
    },
];

/// Solve the four independent cusp equations for houses 2, 3, 8 and 9.
///
/// Each house degrades independently: a failed search yields
/// [`CuspOutcome::NoSolution`] for that house only.
pub fn solved_cusps(lst: Angle, latitude: f64, obliquity: f64) -> [CuspOutcome; 4] {
    let theta = lst.degrees();
    let tan_product = tan_deg(latitude) * tan_deg(obliquity);

    let mut outcomes = [CuspOutcome::NoSolution; 4];
    for (slot, division) in outcomes.iter_mut().zip(DIVISIONS.iter()) {
        *slot = solve_division(division, theta, tan_product, latitude);
    }
    outcomes
}

fn equation_lhs(hour_angle: f64, theta: f64, tan_product: f64, division: &ArcDivision) -> f64 {
    let semi_arc = division.sa_scale * hour_angle + division.sa_shift;
    cos_deg(semi_arc) + tan_product * sin_deg(theta + hour_angle)
}

fn solve_division(
    division: &ArcDivision,
    theta: f64,
    tan_product: f64,
    latitude: f64,
) -> CuspOutcome {
    let mut roots: Vec<f64> = Vec::new();

    // Phase one: coarse sampling for sign-change brackets. A sample that
    // cannot be evaluated finitely is a domain failure for that point
    // alone and breaks the running bracket instead of aborting.
    let span = division.upper - division.lower;
    let mut previous: Option<(f64, f64)> = None;
    for i in 0..=GRID_SAMPLES {
        let h = division.lower + span * i as f64 / GRID_SAMPLES as f64;
        let value = equation_lhs(h, theta, tan_product, division);
        if !value.is_finite() {
            previous = None;
            continue;
        }
        if let Some((prev_h, prev_value)) = previous {
            if prev_value == 0.0 {
                roots.push(prev_h);
            } else if prev_value * value < 0.0 {
                if let Some(root) =
                    refine_bracket(prev_h, h, prev_value, theta, tan_product, division)
                {
                    roots.push(root);
                }
            }
        }
        previous = Some((h, value));
    }

    if roots.is_empty() {
        debug!(
            "placidus: no bracket for house {} at latitude {:.4}",
            division.house, latitude
        );
        return CuspOutcome::NoSolution;
    }

    // Several genuine roots can survive; keep the one nearest the
    // equal-division hour angle.
    let mut best = roots[0];
    for &root in &roots[1..] {
        if (root - division.nominal).abs() < (best - division.nominal).abs() {
            best = root;
        }
    }
    trace!(
        "placidus: house {} hour angle {:.6} from {} root(s)",
        division.house,
        best,
        roots.len()
    );
    CuspOutcome::Found(Angle::from_degrees(theta + best))
}

/// Bisection refinement of one sign-change bracket.
///
/// Returns `None` when the iteration budget runs out before the bracket
/// tightens, when a midpoint cannot be evaluated, or when the refined
/// point fails the residual check — the bracket then contained a
/// discontinuity rather than a root.
fn refine_bracket(
    mut lower: f64,
    mut upper: f64,
    mut lower_value: f64,
    theta: f64,
    tan_product: f64,
    division: &ArcDivision,
) -> Option<f64> {
    let mut iterations = 0;
    while upper - lower > BRACKET_TOLERANCE {
        if iterations >= MAX_BISECTIONS {
            debug!(
                "placidus: bisection budget exhausted for house {}",
                division.house
            );
            return None;
        }
        let midpoint = 0.5 * (lower + upper);
        let mid_value = equation_lhs(midpoint, theta, tan_product, division);
        if !mid_value.is_finite() {
            return None;
        }
        if lower_value * mid_value <= 0.0 {
            upper = midpoint;
        } else {
            lower = midpoint;
            lower_value = mid_value;
        }
        iterations += 1;
    }

    let root = 0.5 * (lower + upper);
    let residual = equation_lhs(root, theta, tan_product, division);
    if residual.is_finite() && residual.abs() <= RESIDUAL_TOLERANCE {
        Some(root)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angles::normalize_degrees;
    use crate::constants::DEFAULT_OBLIQUITY_DEG;
    use approx::assert_relative_eq;

    const SCENARIO_A_LST: f64 = 77.966_718_928_337_8;
    const SCENARIO_A_LAT: f64 = 45.41317;

    fn cusp_degrees(outcome: CuspOutcome) -> f64 {
        match outcome {
            CuspOutcome::Found(angle) => angle.degrees(),
            CuspOutcome::NoSolution => panic!("expected a converged cusp"),
        }
    }

    #[test]
    fn test_scenario_a_cusps() {
        let outcomes = solved_cusps(
            Angle::from_degrees(SCENARIO_A_LST),
            SCENARIO_A_LAT,
            DEFAULT_OBLIQUITY_DEG,
        );
        let expected = [115.745_684, 147.164_263, 193.918_349, 222.235_163];
        for (outcome, reference) in outcomes.iter().zip(expected) {
            assert_relative_eq!(cusp_degrees(*outcome), reference, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_equator_cusps_are_equal_divisions() {
        // At the equator every semi-arc is 90°, so the cusps sit at the
        // equal divisions LST + 30/60/120/150 and all four must converge
        let outcomes = solved_cusps(
            Angle::from_degrees(SCENARIO_A_LST),
            0.0,
            DEFAULT_OBLIQUITY_DEG,
        );
        let offsets = [30.0, 60.0, 120.0, 150.0];
        for (outcome, offset) in outcomes.iter().zip(offsets) {
            assert_relative_eq!(
                cusp_degrees(*outcome),
                normalize_degrees(SCENARIO_A_LST + offset),
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn test_near_pole_degrades_per_house() {
        let outcomes = solved_cusps(
            Angle::from_degrees(SCENARIO_A_LST),
            89.9,
            DEFAULT_OBLIQUITY_DEG,
        );
        // houses 2 and 9 lose their bracket, 3 and 8 still converge
        assert_eq!(outcomes[0], CuspOutcome::NoSolution);
        assert!(matches!(outcomes[1], CuspOutcome::Found(_)));
        assert!(matches!(outcomes[2], CuspOutcome::Found(_)));
        assert_eq!(outcomes[3], CuspOutcome::NoSolution);
    }

    #[test]
    fn test_southern_near_pole_degrades_symmetrically() {
        let outcomes = solved_cusps(
            Angle::from_degrees(SCENARIO_A_LST),
            -89.9,
            DEFAULT_OBLIQUITY_DEG,
        );
        assert_eq!(outcomes[0], CuspOutcome::NoSolution);
        assert!(matches!(outcomes[1], CuspOutcome::Found(_)));
        assert!(matches!(outcomes[2], CuspOutcome::Found(_)));
        assert_eq!(outcomes[3], CuspOutcome::NoSolution);
    }

    #[test]
    fn test_deterministic_across_calls() {
        let lst = Angle::from_degrees(SCENARIO_A_LST);
        let first = solved_cusps(lst, SCENARIO_A_LAT, DEFAULT_OBLIQUITY_DEG);
        let second = solved_cusps(lst, SCENARIO_A_LAT, DEFAULT_OBLIQUITY_DEG);
        assert_eq!(first, second);
    }

    #[test]
    fn test_cusps_follow_lst_periodically() {
        let base = solved_cusps(
            Angle::from_degrees(SCENARIO_A_LST),
            SCENARIO_A_LAT,
            DEFAULT_OBLIQUITY_DEG,
        );
        let wrapped = solved_cusps(
            Angle::from_degrees(SCENARIO_A_LST + 360.0),
            SCENARIO_A_LAT,
            DEFAULT_OBLIQUITY_DEG,
        );
        assert_eq!(base, wrapped);
    }
}
