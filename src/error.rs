use thiserror::Error;

/// Contract violations raised by the engines.
///
/// A malformed call indicates a caller bug (wrong data shape), so these are
/// raised immediately rather than coerced into a partial result. Data
/// conditions — missing values, identical values, empty observation sets —
/// are not errors and are handled by documented fallbacks instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no series summaries supplied")]
    EmptySeries,

    #[error("duplicate series id: {0}")]
    DuplicateSeries(String),

    #[error("duplicate region key: {0}")]
    DuplicateRegion(String),

    #[error("negative magnitude {magnitude} for series {series_id}")]
    NegativeMagnitude { series_id: String, magnitude: f64 },

    #[error("non-finite value {value} for {key}")]
    NonFiniteValue { key: String, value: f64 },

    #[error("palette needs at least 2 stops, got {0}")]
    PaletteTooSmall(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
