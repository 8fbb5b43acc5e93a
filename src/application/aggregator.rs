// Aggregator - Pure functions turning a normalized batch into period
// summaries and batch-level statistics
use crate::domain::field::FieldKind;
use crate::domain::reading::NormalizedReading;
use crate::domain::rules::round_to;
use crate::domain::statistics::{
    AggregationBucket, ChlorineDistribution, FieldSummary, Granularity, PeriodStatistics,
    PeriodSummary,
};

/// Whether a normalized value can come from a working sensor.
///
/// These sensors report faults as zero, so zero is treated as "sensor
/// absent", not as a true zero measurement.
pub fn is_physically_plausible(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Group a batch into calendar buckets, preserving first-seen order.
///
/// Only plausible values contribute; records without a parseable timestamp
/// cannot be keyed and are skipped.
pub fn group_by_period(
    normalized: &[NormalizedReading],
    granularity: Granularity,
) -> Vec<AggregationBucket> {
    let mut buckets: Vec<AggregationBucket> = Vec::new();

    for reading in normalized {
        let Some(timestamp) = reading.timestamp() else {
            tracing::debug!(
                timestamp = reading.timestamp_str(),
                "skipping reading without parseable timestamp"
            );
            continue;
        };
        let key = granularity.bucket_key(&timestamp);

        let index = match buckets.iter().position(|b| b.period == key) {
            Some(existing) => existing,
            None => {
                buckets.push(AggregationBucket::new(key));
                buckets.len() - 1
            }
        };
        let bucket = &mut buckets[index];

        for kind in FieldKind::ALL {
            if let Some(value) = reading.field(kind) {
                if is_physically_plausible(value) {
                    bucket.push(kind, value);
                }
            }
        }
    }

    buckets
}

/// Arithmetic mean rounded to 2 decimals; 0 for an empty input.
/// Implausible entries are ignored.
pub fn mean_of(values: &[f64]) -> f64 {
    let valid: Vec<f64> = values
        .iter()
        .copied()
        .filter(|v| is_physically_plausible(*v))
        .collect();
    if valid.is_empty() {
        return 0.0;
    }
    round_to(valid.iter().sum::<f64>() / valid.len() as f64, 2)
}

fn valid_values(normalized: &[NormalizedReading], kind: FieldKind) -> Vec<f64> {
    normalized
        .iter()
        .filter_map(|reading| reading.field(kind))
        .filter(|v| is_physically_plausible(*v))
        .collect()
}

/// Per-field mean across the whole batch.
pub fn compute_overall_means(normalized: &[NormalizedReading]) -> FieldSummary {
    let mut means = FieldSummary::default();
    for kind in FieldKind::ALL {
        means.set(kind, mean_of(&valid_values(normalized, kind)));
    }
    means
}

/// Percentage change between the means of the first and second halves of
/// the field's valid-value sequence, rounded to 1 decimal.
///
/// Returns 0 with fewer than 2 valid values, or when the first half's mean
/// is 0. For odd lengths the extra element goes to the second half.
pub fn compute_trend(normalized: &[NormalizedReading], kind: FieldKind) -> f64 {
    let values = valid_values(normalized, kind);
    if values.len() < 2 {
        return 0.0;
    }

    let midpoint = values.len() / 2;
    let first_mean = mean_of(&values[..midpoint]);
    let second_mean = mean_of(&values[midpoint..]);
    if first_mean == 0.0 {
        return 0.0;
    }

    round_to((second_mean - first_mean) / first_mean * 100.0, 1)
}

fn compute_trends(normalized: &[NormalizedReading]) -> FieldSummary {
    let mut trends = FieldSummary::default();
    for kind in FieldKind::ALL {
        trends.set(kind, compute_trend(normalized, kind));
    }
    trends
}

/// Share of chlorine readings per quality band, in percent.
///
/// Falls back to a fixed distribution when no valid chlorine value exists
/// so downstream charts stay populated.
pub fn compute_chlorine_distribution(normalized: &[NormalizedReading]) -> ChlorineDistribution {
    let values = valid_values(normalized, FieldKind::Chlorine);
    if values.is_empty() {
        return ChlorineDistribution::FALLBACK;
    }

    let mut ideal = 0usize;
    let mut acceptable = 0usize;
    let mut low = 0usize;
    let mut high = 0usize;
    for value in &values {
        if (1.5..=2.5).contains(value) {
            ideal += 1;
        } else if (1.0..1.5).contains(value) || (*value > 2.5 && *value <= 3.0) {
            acceptable += 1;
        } else if *value < 1.0 {
            low += 1;
        } else {
            high += 1;
        }
    }

    let percent = |count: usize| (count as f64 / values.len() as f64 * 100.0).round() as u32;
    ChlorineDistribution {
        ideal: percent(ideal),
        acceptable: percent(acceptable),
        low: percent(low),
        high: percent(high),
    }
}

/// Full aggregation pass: period means plus batch-level statistics.
pub fn summarize(normalized: &[NormalizedReading], granularity: Granularity) -> PeriodStatistics {
    let periods = group_by_period(normalized, granularity)
        .into_iter()
        .map(|bucket| {
            let mut means = FieldSummary::default();
            for kind in FieldKind::ALL {
                means.set(kind, mean_of(bucket.values(kind)));
            }
            PeriodSummary {
                period: bucket.period,
                means,
            }
        })
        .collect();

    PeriodStatistics {
        granularity,
        periods,
        means: compute_overall_means(normalized),
        trends: compute_trends(normalized),
        chlorine_distribution: compute_chlorine_distribution(normalized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reading(value: serde_json::Value) -> NormalizedReading {
        serde_json::from_value(value).unwrap()
    }

    fn ph_series(values: &[f64]) -> Vec<NormalizedReading> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                reading(json!({
                    "timestamp": format!("2024-01-01T{:02}:00:00Z", i),
                    "ph": v
                }))
            })
            .collect()
    }

    #[test]
    fn test_mean_of_empty_is_zero() {
        assert_eq!(mean_of(&[]), 0.0);
    }

    #[test]
    fn test_mean_of_filters_implausible_entries() {
        assert_eq!(mean_of(&[7.0, 0.0, -3.0, f64::NAN, 8.0]), 7.5);
        assert_eq!(mean_of(&[0.0, -1.0]), 0.0);
    }

    #[test]
    fn test_group_by_hour() {
        let batch = vec![
            reading(json!({ "timestamp": "2024-01-01T10:05:00Z", "ph": 7.0 })),
            reading(json!({ "timestamp": "2024-01-01T10:40:00Z", "ph": 8.0 })),
            reading(json!({ "timestamp": "2024-01-01T11:10:00Z", "ph": 7.2 })),
        ];
        let buckets = group_by_period(&batch, Granularity::Hour);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].period, "01/01 10:00");
        assert_eq!(buckets[0].values(FieldKind::Ph), &[7.0, 8.0]);
        assert_eq!(buckets[1].period, "01/01 11:00");
    }

    #[test]
    fn test_group_by_day_preserves_first_seen_order() {
        let batch = vec![
            reading(json!({ "timestamp": "2024-01-02T10:00:00Z", "ph": 7.0 })),
            reading(json!({ "timestamp": "2024-01-01T09:00:00Z", "ph": 6.9 })),
            reading(json!({ "timestamp": "2024-01-02T23:00:00Z", "ph": 7.1 })),
        ];
        let buckets = group_by_period(&batch, Granularity::Day);

        let keys: Vec<&str> = buckets.iter().map(|b| b.period.as_str()).collect();
        assert_eq!(keys, vec!["02/01", "01/01"]);
        assert_eq!(buckets[0].values(FieldKind::Ph), &[7.0, 7.1]);
    }

    #[test]
    fn test_group_filters_zero_null_and_missing() {
        let batch = vec![reading(json!({
            "timestamp": "2024-01-01T10:00:00Z",
            "ph": 0.0,
            "cloro": null,
            "turbidez": 15.5
        }))];
        let buckets = group_by_period(&batch, Granularity::Hour);

        assert!(buckets[0].values(FieldKind::Ph).is_empty());
        assert!(buckets[0].values(FieldKind::Chlorine).is_empty());
        assert_eq!(buckets[0].values(FieldKind::Turbidity), &[15.5]);
    }

    #[test]
    fn test_group_skips_unparseable_timestamps() {
        let batch = vec![
            reading(json!({ "timestamp": "not-a-date", "ph": 7.0 })),
            reading(json!({ "ph": 7.0 })),
        ];
        assert!(group_by_period(&batch, Granularity::Hour).is_empty());
    }

    #[test]
    fn test_trend_over_split_halves() {
        // ((8.0 - 7.5) / 7.5) * 100 = 6.666... -> 6.7
        let batch = ph_series(&[7.5, 7.5, 8.0, 8.0]);
        assert_eq!(compute_trend(&batch, FieldKind::Ph), 6.7);
    }

    #[test]
    fn test_trend_odd_length_puts_extra_value_in_second_half() {
        // Halves: [6.0, 6.0] and [6.0, 9.0, 9.0] -> means 6.0 and 8.0
        let batch = ph_series(&[6.0, 6.0, 6.0, 9.0, 9.0]);
        assert_eq!(compute_trend(&batch, FieldKind::Ph), 33.3);
    }

    #[test]
    fn test_trend_insufficient_data_is_zero() {
        assert_eq!(compute_trend(&[], FieldKind::Ph), 0.0);
        assert_eq!(compute_trend(&ph_series(&[7.5]), FieldKind::Ph), 0.0);
        // Zeroes are not valid values
        assert_eq!(compute_trend(&ph_series(&[0.0, 0.0, 7.5]), FieldKind::Ph), 0.0);
    }

    #[test]
    fn test_overall_means() {
        let batch = vec![
            reading(json!({ "timestamp": "2024-01-01T10:00:00Z", "ph": 7.0, "cloro": 2.0 })),
            reading(json!({ "timestamp": "2024-01-01T11:00:00Z", "ph": 8.0, "cloro": 0.0 })),
        ];
        let means = compute_overall_means(&batch);
        assert_eq!(means.ph, 7.5);
        assert_eq!(means.chlorine, 2.0);
        assert_eq!(means.turbidity, 0.0);
    }

    #[test]
    fn test_chlorine_distribution_bands() {
        let batch: Vec<NormalizedReading> = [1.5, 2.5, 1.0, 3.0, 0.9, 3.1]
            .iter()
            .map(|v| reading(json!({ "cloro": v })))
            .collect();
        let distribution = compute_chlorine_distribution(&batch);

        // 2 ideal, 2 acceptable, 1 low, 1 high of 6
        assert_eq!(distribution.ideal, 33);
        assert_eq!(distribution.acceptable, 33);
        assert_eq!(distribution.low, 17);
        assert_eq!(distribution.high, 17);
    }

    #[test]
    fn test_chlorine_distribution_sums_to_100_within_rounding() {
        let batch: Vec<NormalizedReading> = [2.0, 1.2, 0.5]
            .iter()
            .map(|v| reading(json!({ "cloro": v })))
            .collect();
        let d = compute_chlorine_distribution(&batch);
        let sum = d.ideal + d.acceptable + d.low + d.high;
        assert!((99..=101).contains(&sum), "sum was {sum}");
    }

    #[test]
    fn test_chlorine_distribution_fallback() {
        assert_eq!(
            compute_chlorine_distribution(&[]),
            ChlorineDistribution::FALLBACK
        );
        let batch = vec![reading(json!({ "cloro": 0.0 }))];
        assert_eq!(
            compute_chlorine_distribution(&batch),
            ChlorineDistribution::FALLBACK
        );
    }

    #[test]
    fn test_summarize_composes_periods_and_statistics() {
        let batch = ph_series(&[7.5, 7.5, 8.0, 8.0]);
        let stats = summarize(&batch, Granularity::Hour);

        assert_eq!(stats.periods.len(), 4);
        assert_eq!(stats.periods[0].period, "01/01 00:00");
        assert_eq!(stats.periods[0].means.ph, 7.5);
        assert_eq!(stats.means.ph, 7.75);
        assert_eq!(stats.trends.ph, 6.7);
        assert_eq!(
            stats.chlorine_distribution,
            ChlorineDistribution::FALLBACK
        );
    }
}
