use serde::{Deserialize, Serialize};

/// Which y-axis a chart series is drawn against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Left,
    Right,
}

/// One observation of a plotted time series (one row = one point).
///
/// `value` is `None` when the source reported no figure for that year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesPoint {
    pub series_id: String,
    pub year: i32,
    pub value: Option<f64>,
}

/// Per-series magnitude summary consumed by the axis optimizer.
///
/// Derived by scanning a series' numeric observations and keeping the
/// largest absolute value; a series with no numeric observations never
/// produces a summary. `max_magnitude` is never negative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesSummary {
    pub series_id: String,
    pub max_magnitude: f64,
}

impl SeriesSummary {
    pub fn new(series_id: impl Into<String>, max_magnitude: f64) -> Self {
        Self {
            series_id: series_id.into(),
            max_magnitude,
        }
    }
}

/// One choropleth observation: a region's value for the selected metric.
///
/// `category` is an optional grouping key (e.g. a country code) used when
/// the metric's values are not comparable across categories. A `None`
/// value marks a region with no data; it is kept in the output and painted
/// with the no-data fill.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionObservation {
    pub region: String,
    #[serde(default)]
    pub category: Option<String>,
    pub value: Option<f64>,
}

impl RegionObservation {
    pub fn new(region: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            region: region.into(),
            category: None,
            value,
        }
    }

    pub fn with_category(
        region: impl Into<String>,
        category: impl Into<String>,
        value: Option<f64>,
    ) -> Self {
        Self {
            region: region.into(),
            category: Some(category.into()),
            value,
        }
    }
}
