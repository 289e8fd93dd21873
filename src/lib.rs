//! econviz
//!
//! Computation core for economic dashboards: decides which chart series
//! share the left/right y-axis and builds outlier-robust choropleth color
//! scales. Both engines are pure functions over numeric summaries;
//! rendering and data fetching stay with the caller.
//!
//! ### Features
//! - Dual-axis assignment minimizing intra-axis scale disparity
//! - Quantile-bucketed choropleth coloring with winsorized outliers
//! - Optional per-category scaling for metrics that are not comparable
//!   across categories
//! - Deterministic, collision-avoiding series colors
//! - Locale-aware legend labels
//!
//! ### Example
//! ```
//! use econviz::models::{RegionObservation, SeriesSummary};
//! use econviz::{ColorScaleOptions, assign_axes, build_color_scale};
//!
//! let assignment = assign_axes(&[
//!     SeriesSummary::new("gdp", 21_000_000_000.0),
//!     SeriesSummary::new("unemployment", 8.5),
//! ])?;
//! assert!(assignment.is_split());
//!
//! let scale = build_color_scale(
//!     &[
//!         RegionObservation::new("CA", Some(93.2)),
//!         RegionObservation::new("TX", None),
//!     ],
//!     ColorScaleOptions::default(),
//! )?;
//! assert!(scale.color_of("TX").is_some());
//! # Ok::<(), econviz::Error>(())
//! ```

pub mod axes;
pub mod choropleth;
pub mod error;
pub mod legend;
pub mod models;
pub mod stats;
pub mod storage;
pub mod style;

pub use axes::{AxisAssignment, assign_axes};
pub use choropleth::{ColorScale, ColorScaleOptions, RegionColor, ValueStats, build_color_scale};
pub use error::{Error, Result};
pub use models::{Axis, RegionObservation, SeriesPoint, SeriesSummary};
