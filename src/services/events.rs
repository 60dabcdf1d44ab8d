//! Run-length event detection over a threshold-crossing series.
//!
//! Used for marine heatwave tracking and similar episode timelines: a
//! candidate event opens when the metric first exceeds the threshold,
//! extends while it stays above, and is committed on the first sample at or
//! below the threshold, provided it lasted at least the caller's minimum
//! duration. Shorter runs are discarded silently — that is noise
//! suppression, not an error.

use serde::{Deserialize, Serialize};

use crate::models::Sample;

/// A committed contiguous run where a metric exceeded a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Timestamp of the first sample above the threshold.
    pub start_ms: i64,
    /// Timestamp of the last sample above the threshold.
    pub end_ms: i64,
    /// Maximum value observed during the run.
    pub peak_value: f64,
    /// Number of consecutive samples above the threshold.
    pub duration_samples: usize,
}

/// Open candidate while the scan is in the ACTIVE state.
struct Candidate {
    start_ms: i64,
    end_ms: i64,
    peak_value: f64,
    duration_samples: usize,
}

impl Candidate {
    fn open(timestamp_ms: i64, value: f64) -> Self {
        Self {
            start_ms: timestamp_ms,
            end_ms: timestamp_ms,
            peak_value: value,
            duration_samples: 1,
        }
    }

    fn extend(&mut self, timestamp_ms: i64, value: f64) {
        self.end_ms = timestamp_ms;
        self.peak_value = self.peak_value.max(value);
        self.duration_samples += 1;
    }

    fn commit(self, min_duration_samples: usize) -> Option<Event> {
        if self.duration_samples >= min_duration_samples {
            Some(Event {
                start_ms: self.start_ms,
                end_ms: self.end_ms,
                peak_value: self.peak_value,
                duration_samples: self.duration_samples,
            })
        } else {
            None
        }
    }
}

/// Scan `series` for runs of `parameter` strictly above `threshold` lasting
/// at least `min_duration_samples`.
///
/// The series must be in ascending time order (the normalizer guarantees
/// this); samples that do not carry `parameter` are not part of the series
/// and are skipped. Reaching the end of the series while a candidate is open
/// flushes it under the same duration rule as a threshold drop.
///
/// Events are returned sorted by duration descending, ties by peak value
/// descending; callers wanting a top-N simply truncate.
pub fn detect_events(
    series: &[Sample],
    parameter: &str,
    threshold: f64,
    min_duration_samples: usize,
) -> Vec<Event> {
    let mut events: Vec<Event> = Vec::new();
    let mut candidate: Option<Candidate> = None;

    for sample in series {
        let Some(value) = sample.value(parameter) else {
            continue;
        };

        if value > threshold {
            match candidate.as_mut() {
                Some(c) => c.extend(sample.timestamp_ms, value),
                None => candidate = Some(Candidate::open(sample.timestamp_ms, value)),
            }
        } else if let Some(c) = candidate.take() {
            events.extend(c.commit(min_duration_samples));
        }
    }
    // Series ended while ACTIVE: flush with the same rule.
    if let Some(c) = candidate.take() {
        events.extend(c.commit(min_duration_samples));
    }

    events.sort_by(|a, b| {
        b.duration_samples.cmp(&a.duration_samples).then(
            b.peak_value
                .partial_cmp(&a.peak_value)
                .unwrap_or(std::cmp::Ordering::Equal),
        )
    });
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    const DAY_MS: i64 = 86_400_000;

    fn series(values: &[f64]) -> Vec<Sample> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let mut map = BTreeMap::new();
                map.insert("temperature".to_string(), v);
                Sample {
                    timestamp_ms: i as i64 * DAY_MS,
                    region: "Pacific".to_string(),
                    values: map,
                }
            })
            .collect()
    }

    #[test]
    fn test_two_committed_runs_with_boundaries() {
        // Indices 0-2 (peak 32) and 4-6 (peak 35) both reach the minimum;
        // index 3 (28) and 7 (27) close them.
        let samples = series(&[30.0, 31.0, 32.0, 28.0, 33.0, 34.0, 35.0, 27.0]);
        let events = detect_events(&samples, "temperature", 29.0, 3);

        assert_eq!(events.len(), 2);
        // Equal durations rank by peak.
        assert_eq!(events[0].peak_value, 35.0);
        assert_eq!(events[0].start_ms, 4 * DAY_MS);
        assert_eq!(events[0].end_ms, 6 * DAY_MS);
        assert_eq!(events[0].duration_samples, 3);
        assert_eq!(events[1].peak_value, 32.0);
        assert_eq!(events[1].start_ms, 0);
        assert_eq!(events[1].end_ms, 2 * DAY_MS);
    }

    #[test]
    fn test_short_runs_discarded_silently() {
        let samples = series(&[30.0, 31.0, 25.0, 30.0, 25.0]);
        let events = detect_events(&samples, "temperature", 29.0, 3);
        assert!(events.is_empty());
    }

    #[test]
    fn test_open_run_at_end_of_series_is_flushed() {
        let samples = series(&[25.0, 30.0, 31.0, 32.0]);
        let events = detect_events(&samples, "temperature", 29.0, 3);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].duration_samples, 3);
        assert_eq!(events[0].end_ms, 3 * DAY_MS);
    }

    #[test]
    fn test_value_equal_to_threshold_does_not_extend() {
        let samples = series(&[30.0, 29.0, 30.0]);
        let events = detect_events(&samples, "temperature", 29.0, 1);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].duration_samples, 1);
    }

    #[test]
    fn test_samples_missing_parameter_are_skipped() {
        let mut samples = series(&[30.0, 31.0, 32.0]);
        samples[1].values.clear();
        let events = detect_events(&samples, "temperature", 29.0, 2);
        // The gap is invisible to this series; the two carriers are
        // consecutive samples of it.
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].duration_samples, 2);
    }

    #[test]
    fn test_idempotent() {
        let samples = series(&[30.0, 31.0, 28.0, 33.0, 34.0, 35.0, 27.0, 30.0]);
        let first = detect_events(&samples, "temperature", 29.0, 2);
        let second = detect_events(&samples, "temperature", 29.0, 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_series() {
        assert!(detect_events(&[], "temperature", 29.0, 3).is_empty());
    }

    #[test]
    fn test_ranking_by_duration_then_peak() {
        let samples = series(&[30.0, 30.0, 30.0, 30.0, 20.0, 40.0, 40.0, 20.0]);
        let events = detect_events(&samples, "temperature", 29.0, 2);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].duration_samples, 4);
        assert_eq!(events[1].peak_value, 40.0);
    }
}
