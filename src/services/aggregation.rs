//! Temporal aggregation: monthly means, long-term baseline, anomalies.
//!
//! Feeds the anomaly heatmap: one row per year (most recent first), twelve
//! buckets per row. A bucket with no samples is "no data", which is a
//! different thing from a bucket whose mean equals the baseline; conflating
//! the two would paint a false anomaly of `-baseline` on every gap.

use serde::{Deserialize, Serialize};

use crate::models::{year_month, Sample};

/// Baseline reported when the parameter has no valid samples at all. The
/// paired `insufficient_data` flag is what callers must check; the constant
/// only keeps the struct NaN-free.
pub const EMPTY_BASELINE: f64 = 0.0;

/// Sum/count accumulator for one calendar month of one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    pub year: i32,
    /// Calendar month, `0..=11`.
    pub month: usize,
    pub sum: f64,
    pub count: usize,
}

impl MonthlyBucket {
    fn empty(year: i32, month: usize) -> Self {
        Self {
            year,
            month,
            sum: 0.0,
            count: 0,
        }
    }

    /// Mean value, or `None` when the bucket holds no samples.
    pub fn mean(&self) -> Option<f64> {
        if self.count > 0 {
            Some(self.sum / self.count as f64)
        } else {
            None
        }
    }

    /// Deviation of this bucket's mean from the long-term baseline, or
    /// `None` for a no-data bucket.
    pub fn anomaly(&self, baseline: f64) -> Option<f64> {
        self.mean().map(|m| m - baseline)
    }
}

/// Monthly aggregation of one parameter across the whole sample set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    /// Distinct years present, sorted descending (most recent first), the
    /// order the heatmap renders rows in. `buckets[i]` is the row for
    /// `years[i]`.
    pub years: Vec<i32>,
    /// One row of twelve buckets per year in `years`.
    pub buckets: Vec<Vec<MonthlyBucket>>,
    /// Arithmetic mean of every valid sample value across the whole input,
    /// the zero-point for anomaly scoring.
    pub baseline: f64,
    /// True when the parameter had no valid samples; `baseline` is then
    /// [`EMPTY_BASELINE`] rather than a measurement.
    pub insufficient_data: bool,
}

impl MonthlyAggregate {
    /// Bucket for a given year/month, if the year is present.
    pub fn bucket(&self, year: i32, month: usize) -> Option<&MonthlyBucket> {
        let row = self.years.iter().position(|&y| y == year)?;
        self.buckets[row].get(month)
    }
}

/// Bucket samples of `parameter` by UTC year and month and compute the
/// long-term baseline.
///
/// Samples that do not carry `parameter` (or whose timestamp falls outside
/// the representable calendar range) are not part of this series and do not
/// count toward any bucket or the baseline. Every sample with a valid value
/// lands in exactly one bucket.
pub fn aggregate_monthly(samples: &[Sample], parameter: &str) -> MonthlyAggregate {
    let mut grand_sum = 0.0;
    let mut grand_count = 0usize;
    let mut years: Vec<i32> = Vec::new();
    let mut rows: Vec<Vec<MonthlyBucket>> = Vec::new();

    for sample in samples {
        let Some(value) = sample.value(parameter) else {
            continue;
        };
        let Some((year, month)) = year_month(sample.timestamp_ms) else {
            continue;
        };

        let row = match years.iter().position(|&y| y == year) {
            Some(i) => i,
            None => {
                years.push(year);
                rows.push((0..12).map(|m| MonthlyBucket::empty(year, m)).collect());
                years.len() - 1
            }
        };
        rows[row][month].sum += value;
        rows[row][month].count += 1;
        grand_sum += value;
        grand_count += 1;
    }

    // Most recent year first, keeping each row paired with its year.
    let mut order: Vec<usize> = (0..years.len()).collect();
    order.sort_by_key(|&i| std::cmp::Reverse(years[i]));
    let years: Vec<i32> = order.iter().map(|&i| years[i]).collect();
    let mut buckets: Vec<Vec<MonthlyBucket>> = Vec::with_capacity(rows.len());
    for &i in &order {
        buckets.push(rows[i].clone());
    }

    let (baseline, insufficient_data) = if grand_count > 0 {
        (grand_sum / grand_count as f64, false)
    } else {
        (EMPTY_BASELINE, true)
    };

    MonthlyAggregate {
        years,
        buckets,
        baseline,
        insufficient_data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_timestamp_ms;
    use std::collections::BTreeMap;

    fn sample(date: &str, parameter: &str, value: f64) -> Sample {
        let mut values = BTreeMap::new();
        values.insert(parameter.to_string(), value);
        Sample {
            timestamp_ms: parse_timestamp_ms(date).unwrap(),
            region: "Pacific".to_string(),
            values,
        }
    }

    #[test]
    fn test_single_bucket_mean_and_zero_anomaly() {
        let samples = vec![
            sample("2023-01-10", "temperature", 30.0),
            sample("2023-01-20", "temperature", 32.0),
        ];
        let agg = aggregate_monthly(&samples, "temperature");

        assert_eq!(agg.years, vec![2023]);
        let bucket = agg.bucket(2023, 0).unwrap();
        assert_eq!(bucket.count, 2);
        assert_eq!(bucket.mean(), Some(31.0));
        assert_eq!(agg.baseline, 31.0);
        assert_eq!(bucket.anomaly(agg.baseline), Some(0.0));
        assert!(!agg.insufficient_data);
    }

    #[test]
    fn test_years_sorted_descending() {
        let samples = vec![
            sample("2021-03-01", "temperature", 25.0),
            sample("2023-07-01", "temperature", 29.0),
            sample("2022-11-01", "temperature", 27.0),
        ];
        let agg = aggregate_monthly(&samples, "temperature");
        assert_eq!(agg.years, vec![2023, 2022, 2021]);
        // Rows stay paired with their years.
        assert_eq!(agg.buckets[0][6].count, 1);
        assert_eq!(agg.buckets[2][2].count, 1);
    }

    #[test]
    fn test_empty_bucket_is_no_data_not_zero() {
        let samples = vec![sample("2023-01-10", "temperature", 30.0)];
        let agg = aggregate_monthly(&samples, "temperature");
        let february = agg.bucket(2023, 1).unwrap();
        assert_eq!(february.mean(), None);
        assert_eq!(february.anomaly(agg.baseline), None);
    }

    #[test]
    fn test_empty_input_sets_insufficient_data_flag() {
        let agg = aggregate_monthly(&[], "temperature");
        assert!(agg.insufficient_data);
        assert_eq!(agg.baseline, EMPTY_BASELINE);
        assert!(agg.years.is_empty());
        assert!(agg.baseline.is_finite());
    }

    #[test]
    fn test_samples_missing_parameter_are_excluded() {
        let samples = vec![
            sample("2023-01-10", "temperature", 30.0),
            sample("2023-01-15", "salinity", 34.0),
        ];
        let agg = aggregate_monthly(&samples, "temperature");
        assert_eq!(agg.bucket(2023, 0).unwrap().count, 1);
        assert_eq!(agg.baseline, 30.0);
    }

    #[test]
    fn test_buckets_partition_sample_set() {
        let samples: Vec<Sample> = (0..50)
            .map(|i| {
                sample(
                    &format!("202{}-{:02}-15", i % 4, (i % 12) + 1),
                    "temperature",
                    20.0 + i as f64,
                )
            })
            .collect();
        let agg = aggregate_monthly(&samples, "temperature");
        let total: usize = agg
            .buckets
            .iter()
            .flat_map(|row| row.iter())
            .map(|b| b.count)
            .sum();
        assert_eq!(total, samples.len());
    }

    #[test]
    fn test_baseline_spans_whole_input_not_per_bucket() {
        let samples = vec![
            sample("2022-01-10", "temperature", 20.0),
            sample("2023-01-10", "temperature", 30.0),
        ];
        let agg = aggregate_monthly(&samples, "temperature");
        assert_eq!(agg.baseline, 25.0);
        let recent = agg.bucket(2023, 0).unwrap();
        assert_eq!(recent.anomaly(agg.baseline), Some(5.0));
    }
}
