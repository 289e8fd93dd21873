//! Outlier-robust color scaling for choropleth maps.
//!
//! Maps each region's value to one of `P` palette stops. Buckets are
//! equal-population quantiles rather than equal-width ranges, so a skewed
//! distribution still spreads across the whole palette, and extreme values
//! are winsorized before bucketing so one runaway region cannot compress
//! everyone else into the bottom stops. True extremes stay available in
//! [`ValueStats`] for legend and tooltip text.

use crate::error::{Error, Result};
use crate::models::RegionObservation;
use crate::stats;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Values more than this many standard deviations out are clamped before
/// the quantile thresholds are computed.
pub const OUTLIER_Z: f64 = 2.5;

/// Number of palette stops when none is configured.
pub const DEFAULT_PALETTE_SIZE: usize = 6;

/// Populations smaller than this are never capped.
const MIN_CAP_POPULATION: usize = 5;

/// How a [`ColorScale`] is built.
#[derive(Debug, Clone, Copy)]
pub struct ColorScaleOptions {
    /// Scale each category's values independently. Set by the caller for
    /// metrics whose values are not comparable across categories (e.g. a
    /// housing price index published on different bases per country).
    pub per_category: bool,
    /// Number of discrete palette stops. At least 2.
    pub palette_size: usize,
}

impl Default for ColorScaleOptions {
    fn default() -> Self {
        Self {
            per_category: false,
            palette_size: DEFAULT_PALETTE_SIZE,
        }
    }
}

/// Color outcome for one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionColor {
    /// No numeric observation; painted with the sentinel no-data fill.
    NoData,
    /// Index into the sequential palette, 0 = lightest stop.
    Bucket(usize),
}

/// Descriptive summary of one scaled value population.
///
/// `min` and `max` keep the true extremes for legend text; `capped_max` is
/// the largest value after winsorizing and is the upper bound the color
/// ramp actually spans. `min <= capped_max <= max` always holds, with
/// `capped_max == max` whenever nothing was capped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueStats {
    pub count: usize,
    pub missing: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub outlier_threshold: f64,
    pub capped_max: f64,
}

impl ValueStats {
    /// Sentinel for a population with no numeric values.
    pub fn empty(missing: usize) -> Self {
        Self {
            count: 0,
            missing,
            mean: 0.0,
            std_dev: 0.0,
            min: 0.0,
            max: 0.0,
            outlier_threshold: 0.0,
            capped_max: 0.0,
        }
    }

    /// Whether any value was clamped for the color ramp. Legends show a
    /// "values above X capped" note when this is set.
    pub fn has_capped_values(&self) -> bool {
        self.max > self.outlier_threshold
    }
}

/// Stats and quantile thresholds for one independently scaled category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScale {
    pub stats: ValueStats,
    pub thresholds: Vec<f64>,
}

/// Result of [`build_color_scale`]: a palette bucket (or no-data marker)
/// per region, plus the summaries the legend needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorScale {
    palette_size: usize,
    regions: BTreeMap<String, RegionColor>,
    stats: ValueStats,
    thresholds: Vec<f64>,
    categories: BTreeMap<String, CategoryScale>,
}

impl ColorScale {
    pub fn palette_size(&self) -> usize {
        self.palette_size
    }

    /// Global population summary (always over every numeric value, even
    /// when categories are scaled independently).
    pub fn stats(&self) -> &ValueStats {
        &self.stats
    }

    /// Global quantile bucket boundaries, ascending; empty when there were
    /// no numeric values.
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Color outcome for one region, `None` if the region was not part of
    /// the input.
    pub fn color_of(&self, region: &str) -> Option<RegionColor> {
        self.regions.get(region).copied()
    }

    /// All region outcomes in region-key order.
    pub fn regions(&self) -> impl Iterator<Item = (&str, RegionColor)> {
        self.regions.iter().map(|(r, c)| (r.as_str(), *c))
    }

    /// Per-category scales, present only for categories that had numeric
    /// values in a per-category computation.
    pub fn categories(&self) -> &BTreeMap<String, CategoryScale> {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Build the color scale for one observation set.
///
/// Null values never enter the statistics but stay in the output as
/// [`RegionColor::NoData`]. With `per_category` set, each category's values
/// get their own stats and thresholds; regions without a category, and
/// categories with no numeric values at all, use the global scale. An
/// observation set with no numeric values yields all-no-data output and
/// the [`ValueStats::empty`] sentinel rather than an error.
///
/// # Errors
///
/// Non-finite values, duplicate region keys, and a palette under 2 stops
/// are caller contract violations.
pub fn build_color_scale(
    observations: &[RegionObservation],
    options: ColorScaleOptions,
) -> Result<ColorScale> {
    if options.palette_size < 2 {
        return Err(Error::PaletteTooSmall(options.palette_size));
    }
    let mut seen = AHashSet::with_capacity(observations.len());
    for o in observations {
        if let Some(v) = o.value
            && !v.is_finite()
        {
            return Err(Error::NonFiniteValue {
                key: format!("region {}", o.region),
                value: v,
            });
        }
        if !seen.insert(o.region.as_str()) {
            return Err(Error::DuplicateRegion(o.region.clone()));
        }
    }

    let values: Vec<f64> = observations.iter().filter_map(|o| o.value).collect();
    let missing = observations.len() - values.len();
    let global = Quantizer::fit(&values, missing, options.palette_size);

    let mut category_scales: BTreeMap<String, Quantizer> = BTreeMap::new();
    if options.per_category {
        let mut grouped: BTreeMap<&str, (Vec<f64>, usize)> = BTreeMap::new();
        for o in observations {
            if let Some(cat) = o.category.as_deref() {
                let entry = grouped.entry(cat).or_default();
                match o.value {
                    Some(v) => entry.0.push(v),
                    None => entry.1 += 1,
                }
            }
        }
        for (cat, (vals, miss)) in grouped {
            // A category with no numeric values gets no scale of its own
            // and falls back to the global one.
            if let Some(q) = Quantizer::fit(&vals, miss, options.palette_size) {
                category_scales.insert(cat.to_string(), q);
            }
        }
    }

    let mut regions = BTreeMap::new();
    for o in observations {
        let color = match o.value {
            None => RegionColor::NoData,
            Some(v) => {
                let quantizer = o
                    .category
                    .as_deref()
                    .filter(|_| options.per_category)
                    .and_then(|c| category_scales.get(c))
                    .or(global.as_ref());
                match quantizer {
                    Some(q) => RegionColor::Bucket(q.bucket(v)),
                    None => RegionColor::NoData,
                }
            }
        };
        regions.insert(o.region.clone(), color);
    }

    let (stats, thresholds) = match global {
        Some(q) => (q.stats, q.thresholds),
        None => (ValueStats::empty(missing), Vec::new()),
    };
    let categories = category_scales
        .into_iter()
        .map(|(cat, q)| {
            (
                cat,
                CategoryScale {
                    stats: q.stats,
                    thresholds: q.thresholds,
                },
            )
        })
        .collect();

    Ok(ColorScale {
        palette_size: options.palette_size,
        regions,
        stats,
        thresholds,
        categories,
    })
}

/// One fitted scale: summary, winsorizing bounds, quantile thresholds.
struct Quantizer {
    stats: ValueStats,
    thresholds: Vec<f64>,
    cap_lo: f64,
    cap_hi: f64,
}

impl Quantizer {
    /// `None` when there are no numeric values to fit.
    fn fit(values: &[f64], missing: usize, palette_size: usize) -> Option<Self> {
        let count = values.len();
        let mean = stats::mean(values)?;
        let std_dev = stats::std_dev_population(values)?;
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let (cap_lo, cap_hi) = cap_bounds(values, mean, std_dev, min, max);

        let mut capped: Vec<f64> = values.iter().map(|v| v.clamp(cap_lo, cap_hi)).collect();
        capped.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let capped_max = *capped.last()?;

        let thresholds = (1..palette_size)
            .filter_map(|k| stats::quantile_sorted(&capped, k as f64 / palette_size as f64))
            .collect();

        Some(Self {
            stats: ValueStats {
                count,
                missing,
                mean,
                std_dev,
                min,
                max,
                outlier_threshold: cap_hi,
                capped_max,
            },
            thresholds,
            cap_lo,
            cap_hi,
        })
    }

    /// Bucket index for a raw value: clamp, then count thresholds strictly
    /// below it. Counting strictly keeps a zero-spread population (all
    /// thresholds equal) in bucket 0.
    fn bucket(&self, value: f64) -> usize {
        let capped = value.clamp(self.cap_lo, self.cap_hi);
        self.thresholds.partition_point(|t| *t < capped)
    }
}

/// Winsorizing bounds for one population.
///
/// With no flagged values the bounds are the plain `mean ± Z·std_dev`, and
/// since nothing sits outside them the clamp is the identity. When values
/// are flagged, the bounds come from the mean and deviation of the
/// unflagged remainder, which is what actually pulls a runaway value back
/// toward the rest of the population.
fn cap_bounds(values: &[f64], mean: f64, std_dev: f64, min: f64, max: f64) -> (f64, f64) {
    if std_dev == 0.0 {
        // Identical values: capping is skipped entirely.
        return (min, max);
    }
    let flagged = outlier_flags(values, OUTLIER_Z);
    if flagged.iter().all(|f| !f) {
        return (mean - OUTLIER_Z * std_dev, mean + OUTLIER_Z * std_dev);
    }
    let kept: Vec<f64> = values
        .iter()
        .zip(&flagged)
        .filter(|(_, f)| !**f)
        .map(|(v, _)| *v)
        .collect();
    match (
        stats::mean(&kept),
        stats::std_dev_population(&kept),
    ) {
        (Some(kept_mean), Some(kept_sd)) => (
            kept_mean - OUTLIER_Z * kept_sd,
            kept_mean + OUTLIER_Z * kept_sd,
        ),
        // Everything flagged: no usable center, leave values alone.
        _ => (min, max),
    }
}

/// Flag values whose deletion z-score exceeds `z`.
///
/// Each value is tested against the mean and deviation of the *remaining*
/// values. A lone extreme entry inflates the whole-population deviation
/// enough to hold its own z-score near 2 no matter how far out it sits;
/// the deletion form has no such blind spot. Populations under
/// [`MIN_CAP_POPULATION`] values are never flagged.
fn outlier_flags(values: &[f64], z: f64) -> Vec<bool> {
    let n = values.len();
    if n < MIN_CAP_POPULATION {
        return vec![false; n];
    }
    let sum: f64 = values.iter().sum();
    let sum_sq: f64 = values.iter().map(|v| v * v).sum();
    let m = (n - 1) as f64;
    values
        .iter()
        .map(|&v| {
            let rest_mean = (sum - v) / m;
            let rest_var = ((sum_sq - v * v) / m - rest_mean * rest_mean).max(0.0);
            if rest_var == 0.0 {
                v != rest_mean
            } else {
                (v - rest_mean).abs() / rest_var.sqrt() > z
            }
        })
        .collect()
}
