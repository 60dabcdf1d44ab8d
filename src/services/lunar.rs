//! Lunar phase computation and metric correlation.
//!
//! Plankton migration and spawning metrics are charted against the synodic
//! cycle. A closed-form Julian-day approximation is plenty here: the target
//! is ±1 day, which is all a correlation curve needs, not ephemeris-grade
//! astronomy.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::julian_day;

/// Julian day of a reference new moon: 2000-01-06 18:14 UTC.
///
/// The epoch is pinned exactly so that independent implementations of this
/// formula agree; phase drift between implementations would otherwise exceed
/// the accuracy target over long date ranges.
const NEW_MOON_EPOCH_JD: f64 = 2_451_550.1;

/// Mean synodic month in days.
const SYNODIC_MONTH_DAYS: f64 = 29.530_588_853;

/// A metric value positioned on the synodic cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhasePoint {
    /// Position in the cycle, `[0, 1)`: 0 ≈ new moon, 0.5 ≈ full moon.
    pub phase: f64,
    pub metric: f64,
}

/// Phase fraction of the synodic cycle for a calendar date, in `[0, 1)`.
///
/// Pure function of the civil date; no timezone or locale dependency.
pub fn lunar_phase(date: NaiveDate) -> f64 {
    let cycles = (julian_day(date) - NEW_MOON_EPOCH_JD) / SYNODIC_MONTH_DAYS;
    let phase = cycles.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for inputs just below a cycle
    // boundary; fold that back into the half-open range.
    if phase >= 1.0 {
        0.0
    } else {
        phase
    }
}

/// Pair each dated metric with its lunar phase, sorted ascending by phase.
///
/// The sort is stable, so equal phases keep their input order.
pub fn correlate_with_metric(points: &[(NaiveDate, f64)]) -> Vec<PhasePoint> {
    let mut curve: Vec<PhasePoint> = points
        .iter()
        .map(|&(date, metric)| PhasePoint {
            phase: lunar_phase(date),
            metric,
        })
        .collect();
    curve.sort_by(|a, b| {
        a.phase
            .partial_cmp(&b.phase)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    curve
}
