//! Derived ecosystem indicators: per-region snapshots, condition
//! classification, and the short-range risk triple charted by the forecast
//! panel.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::Sample;

/// Payload keys the risk forecast reads.
pub const DISSOLVED_OXYGEN: &str = "dissolved_oxygen";
pub const CHLOROPHYLL: &str = "chlorophyll";
pub const PH: &str = "ph";

/// Defaults used when a sample lacks a risk input. These are the nominal
/// open-ocean values, so a missing reading contributes zero risk. Callers
/// normally declare the same defaults via the fallback field policy at
/// normalization time; these cover samples normalized without them.
pub const DEFAULT_DISSOLVED_OXYGEN: f64 = 8.0;
pub const DEFAULT_CHLOROPHYLL: f64 = 1.0;
pub const DEFAULT_PH: f64 = 8.1;

/// Traffic-light classification of a station's condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionStatus {
    Optimal,
    Warning,
    Critical,
}

impl ConditionStatus {
    /// Health index score shown next to the label.
    pub fn score(&self) -> u8 {
        match self {
            ConditionStatus::Optimal => 92,
            ConditionStatus::Warning => 65,
            ConditionStatus::Critical => 45,
        }
    }
}

/// The newest sample seen for one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSnapshot {
    pub region: String,
    pub latest: Sample,
}

/// Risk levels (each in `[0, 100]`) derived from one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskPoint {
    pub timestamp_ms: i64,
    /// Rises as dissolved oxygen falls.
    pub hypoxia: f64,
    /// Rises with chlorophyll (bloom proxy).
    pub algal: f64,
    /// Rises as pH falls below the nominal 8.1.
    pub acidity: f64,
}

/// Newest sample per region, regions sorted alphabetically for determinism.
///
/// Samples are normalized (ascending time), so the last sample seen for a
/// region is its latest; ties resolve to the later input, matching the
/// "take the last reading as live" behavior of the map overlay.
pub fn latest_by_region(samples: &[Sample]) -> Vec<RegionSnapshot> {
    let mut latest: BTreeMap<&str, &Sample> = BTreeMap::new();
    for sample in samples {
        match latest.get(sample.region.as_str()) {
            Some(current) if current.timestamp_ms > sample.timestamp_ms => {}
            _ => {
                latest.insert(&sample.region, sample);
            }
        }
    }
    latest
        .into_iter()
        .map(|(region, sample)| RegionSnapshot {
            region: region.to_string(),
            latest: sample.clone(),
        })
        .collect()
}

/// Classify a station from temperature (°C) and salinity (PSU).
///
/// Critical: temp > 30 or salinity < 30. Warning: temp > 28 or
/// salinity < 33. Otherwise optimal.
pub fn classify_condition(temperature: f64, salinity: f64) -> ConditionStatus {
    if temperature > 30.0 || salinity < 30.0 {
        ConditionStatus::Critical
    } else if temperature > 28.0 || salinity < 33.0 {
        ConditionStatus::Warning
    } else {
        ConditionStatus::Optimal
    }
}

/// Map each sample to its hypoxia/algal/acidity risk triple.
///
/// - hypoxia = `(10 − dissolved_oxygen) × 10`
/// - algal   = `chlorophyll × 5`
/// - acidity = `(8.1 − ph) × 50`
///
/// each clamped to `[0, 100]`. Missing inputs take the nominal defaults and
/// so read as zero-ish risk rather than poisoning the curve.
pub fn risk_forecast(samples: &[Sample]) -> Vec<RiskPoint> {
    samples
        .iter()
        .map(|sample| {
            let oxygen = sample.value(DISSOLVED_OXYGEN).unwrap_or(DEFAULT_DISSOLVED_OXYGEN);
            let chlorophyll = sample.value(CHLOROPHYLL).unwrap_or(DEFAULT_CHLOROPHYLL);
            let ph = sample.value(PH).unwrap_or(DEFAULT_PH);
            RiskPoint {
                timestamp_ms: sample.timestamp_ms,
                hypoxia: ((10.0 - oxygen) * 10.0).clamp(0.0, 100.0),
                algal: (chlorophyll * 5.0).clamp(0.0, 100.0),
                acidity: ((8.1 - ph) * 50.0).clamp(0.0, 100.0),
            }
        })
        .collect()
}
