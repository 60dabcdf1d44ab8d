//! Sample normalizer: the single entry point from untrusted records to the
//! canonical [`Sample`] stream every downstream service consumes.
//!
//! Records with unparsable timestamps are dropped rather than erroring. This
//! is a deliberate design decision: partial sensor corruption is expected in
//! these feeds, and one bad row must never abort a batch. Drops are logged at
//! debug level so operators can quantify feed quality.

use log::debug;

use crate::models::{coerce_finite, parse_timestamp_ms, FieldPolicy, ParameterSpec, RawRecord, Sample};

/// Normalize raw heterogeneous records into canonical samples.
///
/// For each record the timestamp is parsed (falling back to an `eventdate`
/// payload field when the envelope timestamp is empty, as the upstream feeds
/// embed observation dates in the payload). Each declared parameter is then
/// coerced to a finite number under its [`FieldPolicy`]:
///
/// - `Required`: an unresolvable value leaves the parameter out of the
///   sample, excluding the sample from that parameter's series only.
/// - `Fallback(d)`: an unresolvable value becomes `d`.
///
/// The output is sorted ascending by timestamp; ties keep input order
/// (stable sort) so reruns are deterministic.
pub fn normalize(records: &[RawRecord], parameters: &[ParameterSpec]) -> Vec<Sample> {
    let mut samples: Vec<Sample> = Vec::with_capacity(records.len());

    for (idx, record) in records.iter().enumerate() {
        let Some(timestamp_ms) = record_timestamp_ms(record) else {
            debug!(
                "dropping record {idx} (region {:?}): unparsable timestamp {:?}",
                record.region, record.timestamp
            );
            continue;
        };

        let mut sample = Sample {
            timestamp_ms,
            region: record.region.clone(),
            values: Default::default(),
        };

        for spec in parameters {
            let resolved = record.payload.get(&spec.key).and_then(coerce_finite);
            match (resolved, spec.policy) {
                (Some(value), _) => {
                    sample.values.insert(spec.name.clone(), value);
                }
                (None, FieldPolicy::Fallback(default)) => {
                    debug!(
                        "record {idx}: defaulting {} to {default} (key {:?} unresolved)",
                        spec.name, spec.key
                    );
                    sample.values.insert(spec.name.clone(), default);
                }
                (None, FieldPolicy::Required) => {
                    // Absent from this parameter's series; sample still kept
                    // for any parameter that did resolve.
                }
            }
        }

        samples.push(sample);
    }

    samples.sort_by_key(|s| s.timestamp_ms);
    samples
}

/// Timestamp of a record: the envelope field, or the payload's `eventdate`
/// when the envelope is empty.
fn record_timestamp_ms(record: &RawRecord) -> Option<i64> {
    if let Some(ms) = parse_timestamp_ms(&record.timestamp) {
        return Some(ms);
    }
    if record.timestamp.trim().is_empty() {
        if let Some(raw) = record.payload.get("eventdate").and_then(|v| v.as_str()) {
            return parse_timestamp_ms(raw);
        }
    }
    None
}
