//! Automatic dual-axis assignment for multi-series line charts.
//!
//! Given per-series maximum magnitudes, decides which series share the left
//! and right y-axes so that no axis has to stretch across wildly different
//! scales (a series peaking at 1 next to one peaking at 10,000).

use crate::error::{Error, Result};
use crate::models::{Axis, SeriesSummary};
use ahash::AHashSet;
use serde::Serialize;
use std::collections::BTreeMap;

/// Series whose magnitudes differ by at least this factor get split onto
/// separate y-axes; anything tighter reads fine on a single axis.
pub const SPLIT_RATIO: f64 = 3.0;

/// Result of [`assign_axes`]: exactly one axis per input series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisAssignment {
    axes: BTreeMap<String, Axis>,
    split: bool,
}

impl AxisAssignment {
    /// Axis for one series, `None` if the id was not part of the input.
    pub fn axis_of(&self, series_id: &str) -> Option<Axis> {
        self.axes.get(series_id).copied()
    }

    /// Whether the right axis is in use at all.
    pub fn is_split(&self) -> bool {
        self.split
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// All assignments in series-id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Axis)> {
        self.axes.iter().map(|(id, axis)| (id.as_str(), *axis))
    }

    fn single_axis(series: &[SeriesSummary]) -> Self {
        let axes = series
            .iter()
            .map(|s| (s.series_id.clone(), Axis::Left))
            .collect();
        Self { axes, split: false }
    }
}

/// Partition series onto left/right y-axes, minimizing the worst intra-axis
/// magnitude ratio.
///
/// Fewer than two series, all-zero magnitudes, or a largest-to-smallest
/// (positive) magnitude ratio under [`SPLIT_RATIO`] keep everything on the
/// left axis. Otherwise the series are sorted descending by magnitude and
/// every prefix/suffix split is scored by the sum of the two groups' own
/// largest/smallest ratios; the lowest score wins, smallest split index on
/// ties. Equal magnitudes keep their input order (stable sort), so the
/// result is reproducible for a given input.
///
/// # Errors
///
/// Empty input, duplicate series ids, and negative or non-finite magnitudes
/// are caller contract violations and fail with [`Error`] rather than
/// producing a partial assignment.
pub fn assign_axes(series: &[SeriesSummary]) -> Result<AxisAssignment> {
    if series.is_empty() {
        return Err(Error::EmptySeries);
    }
    let mut seen = AHashSet::with_capacity(series.len());
    for s in series {
        if !s.max_magnitude.is_finite() {
            return Err(Error::NonFiniteValue {
                key: format!("series {}", s.series_id),
                value: s.max_magnitude,
            });
        }
        if s.max_magnitude < 0.0 {
            return Err(Error::NegativeMagnitude {
                series_id: s.series_id.clone(),
                magnitude: s.max_magnitude,
            });
        }
        if !seen.insert(s.series_id.as_str()) {
            return Err(Error::DuplicateSeries(s.series_id.clone()));
        }
    }

    if series.len() < 2 || !needs_split(series) {
        return Ok(AxisAssignment::single_axis(series));
    }

    let mut ordered: Vec<&SeriesSummary> = series.iter().collect();
    ordered.sort_by(|a, b| b.max_magnitude.partial_cmp(&a.max_magnitude).unwrap());

    let n = ordered.len();
    let mut best_idx = 0;
    let mut best_score = f64::INFINITY;
    for i in 0..n - 1 {
        let score = group_ratio(ordered[0].max_magnitude, ordered[i].max_magnitude)
            + group_ratio(ordered[i + 1].max_magnitude, ordered[n - 1].max_magnitude);
        if score < best_score {
            best_score = score;
            best_idx = i;
        }
    }

    let mut axes = BTreeMap::new();
    for (pos, s) in ordered.iter().enumerate() {
        let axis = if pos <= best_idx {
            Axis::Left
        } else {
            Axis::Right
        };
        axes.insert(s.series_id.clone(), axis);
    }
    Ok(AxisAssignment { axes, split: true })
}

/// Scale disparity between the largest and smallest magnitude of one group.
///
/// A zero magnitude cannot share an axis with a non-zero one (any finite
/// axis range flattens it completely), so its ratio against a positive
/// magnitude is infinite; a group made only of zeros has no disparity.
fn group_ratio(largest: f64, smallest: f64) -> f64 {
    if smallest > 0.0 {
        largest / smallest
    } else if largest > 0.0 {
        f64::INFINITY
    } else {
        1.0
    }
}

fn needs_split(series: &[SeriesSummary]) -> bool {
    let largest = series
        .iter()
        .map(|s| s.max_magnitude)
        .fold(0.0, f64::max);
    let smallest_positive = series
        .iter()
        .map(|s| s.max_magnitude)
        .filter(|m| *m > 0.0)
        .fold(f64::INFINITY, f64::min);
    if !smallest_positive.is_finite() {
        // All magnitudes are zero; nothing to separate.
        return false;
    }
    largest / smallest_positive >= SPLIT_RATIO
}
