use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Raw record as supplied by the external data layer.
///
/// Payload keys are arbitrary; numeric fields may arrive as JSON numbers,
/// numeric strings, or garbage. Nothing here is trusted until it has been
/// through [`crate::preprocessing::normalize`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
    /// Upstream row ID, when the data layer provides one. Informational only.
    #[serde(rename = "ID", alias = "id", default)]
    pub id: Option<i64>,
    #[serde(rename = "Region", alias = "region", default)]
    pub region: String,
    /// ISO-ish timestamp string, possibly unparsable. When empty, the
    /// normalizer falls back to an `eventdate` payload field (the upstream
    /// feeds put the observation date inside the payload).
    #[serde(rename = "Timestamp", alias = "timestamp", default)]
    pub timestamp: String,
    #[serde(rename = "Data", alias = "payload", default)]
    pub payload: serde_json::Map<String, Value>,
}

/// Canonical normalized measurement unit.
///
/// Invariant: `values` never contains a non-finite number. A parameter that
/// could not be resolved is either absent from the map (required policy) or
/// present with its declared default (fallback policy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Milliseconds since the Unix epoch, UTC.
    pub timestamp_ms: i64,
    pub region: String,
    pub values: BTreeMap<String, f64>,
}

impl Sample {
    /// Value of `parameter` for this sample, if it resolved.
    pub fn value(&self, parameter: &str) -> Option<f64> {
        self.values.get(parameter).copied()
    }
}

/// Resolution policy for a single declared parameter.
///
/// The required/fallback distinction is explicit per call site, never
/// inferred: the primary metric of a chart is `Required` (a sample without
/// it drops out of that series), while secondary classifier inputs declare
/// a `Fallback` default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FieldPolicy {
    /// Omit the parameter from the sample when it cannot be coerced.
    Required,
    /// Substitute the given default when it cannot be coerced.
    Fallback(f64),
}

/// Declares one output parameter: its canonical name, the payload key it is
/// read from, and what to do when the payload value is missing or invalid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Canonical parameter name used in [`Sample::values`].
    pub name: String,
    /// Payload key to read the raw value from.
    pub key: String,
    pub policy: FieldPolicy,
}

impl ParameterSpec {
    /// Declare a required parameter read from a payload key of the same name.
    pub fn required(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            key: name.clone(),
            name,
            policy: FieldPolicy::Required,
        }
    }

    /// Declare a parameter that defaults to `default` when unresolvable.
    pub fn fallback(name: impl Into<String>, default: f64) -> Self {
        let name = name.into();
        Self {
            key: name.clone(),
            name,
            policy: FieldPolicy::Fallback(default),
        }
    }

    /// Read the raw value from a different payload key than the canonical name.
    pub fn from_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Clipping box for spatial binning, decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl GeoBounds {
    /// min < max on both axes and all edges finite.
    pub fn is_valid(&self) -> bool {
        self.lat_min.is_finite()
            && self.lat_max.is_finite()
            && self.lon_min.is_finite()
            && self.lon_max.is_finite()
            && self.lat_min < self.lat_max
            && self.lon_min < self.lon_max
    }

    /// Half-open containment: the max edges are outside the box, matching
    /// the grid mapping in [`crate::services::hotspots`].
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.lat >= self.lat_min
            && point.lat < self.lat_max
            && point.lon >= self.lon_min
            && point.lon < self.lon_max
    }
}

/// Coerce a raw payload value to a finite f64.
///
/// Accepts JSON numbers and numeric strings (with surrounding whitespace);
/// anything else, including NaN/infinite values, resolves to `None`.
pub fn coerce_finite(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}
