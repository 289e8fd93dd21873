//! Shared numeric helpers and per-series aggregation.

use crate::models::{SeriesPoint, SeriesSummary};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary statistics for one series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesStats {
    pub series_id: String,
    pub count: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by n, not n - 1).
///
/// The input is the full observed population, not a sample of one, so the
/// descriptive form is the right one.
pub fn std_dev_population(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    Some(var.sqrt())
}

/// Linear-interpolated quantile of an ascending-sorted slice, `q` in [0, 1].
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let q = q.clamp(0.0, 1.0);
    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (h - lo as f64))
}

/// Compute per-series statistics, grouped by `series_id`.
pub fn grouped_summary(points: &[SeriesPoint]) -> Vec<SeriesStats> {
    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    let mut missing: BTreeMap<String, usize> = BTreeMap::new();
    for p in points {
        match p.value {
            Some(v) => groups.entry(p.series_id.clone()).or_default().push(v),
            None => *missing.entry(p.series_id.clone()).or_default() += 1,
        }
    }

    // Series that only ever reported nulls still get a row.
    for id in missing.keys() {
        groups.entry(id.clone()).or_default();
    }

    let mut out = Vec::new();
    for (series_id, mut vals) in groups {
        vals.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let count = vals.len();
        let min = vals.first().cloned();
        let max = vals.last().cloned();
        let mean = mean(&vals);
        let median = if count == 0 {
            None
        } else if count % 2 == 1 {
            Some(vals[count / 2])
        } else {
            Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
        };
        let miss = missing.get(&series_id).cloned().unwrap_or(0);
        out.push(SeriesStats {
            series_id,
            count,
            missing: miss,
            min,
            max,
            mean,
            median,
        });
    }
    out
}

/// Derive the per-series magnitude summaries the axis optimizer consumes.
///
/// The magnitude of a series is the largest absolute value among its numeric
/// observations. Series with no numeric observations are dropped here; they
/// have no magnitude to place on an axis.
pub fn max_magnitudes(points: &[SeriesPoint]) -> Vec<SeriesSummary> {
    let mut magnitudes: BTreeMap<String, f64> = BTreeMap::new();
    for p in points {
        if let Some(v) = p.value {
            let entry = magnitudes.entry(p.series_id.clone()).or_insert(0.0);
            *entry = entry.max(v.abs());
        }
    }
    magnitudes
        .into_iter()
        .map(|(series_id, max_magnitude)| SeriesSummary {
            series_id,
            max_magnitude,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantile_interpolates() {
        let vals = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_sorted(&vals, 0.0), Some(1.0));
        assert_eq!(quantile_sorted(&vals, 1.0), Some(4.0));
        assert_eq!(quantile_sorted(&vals, 0.5), Some(2.5));
        assert_eq!(quantile_sorted(&[], 0.5), None);
    }

    #[test]
    fn population_std_dev_divides_by_n() {
        // Variance of [2, 4] around mean 3 is (1 + 1) / 2 = 1.
        let sd = std_dev_population(&[2.0, 4.0]).unwrap();
        assert!((sd - 1.0).abs() < 1e-12);
        assert_eq!(std_dev_population(&[7.0]), Some(0.0));
    }

    #[test]
    fn magnitudes_use_absolute_values_and_skip_empty_series() {
        let points = vec![
            SeriesPoint {
                series_id: "a".into(),
                year: 2020,
                value: Some(-9.0),
            },
            SeriesPoint {
                series_id: "a".into(),
                year: 2021,
                value: Some(4.0),
            },
            SeriesPoint {
                series_id: "b".into(),
                year: 2020,
                value: None,
            },
        ];
        let summaries = max_magnitudes(&points);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].series_id, "a");
        assert_eq!(summaries[0].max_magnitude, 9.0);
    }
}
