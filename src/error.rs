use crate::directory::error::DirectoryError;
use chrono::NaiveDate;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StationsError {
    #[error("Cannot read weather station directory")]
    SourceUnavailable(#[from] DirectoryError),

    #[error(transparent)]
    InvalidFilter(#[from] InvalidFilterError),

    #[error("Required column '{0}' missing from station directory frame")]
    MissingColumn(String),

    #[error("Failed to determine cache directory")]
    CacheDirResolution(#[source] std::io::Error),

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to delete cache '{0}'")]
    CacheDeletion(PathBuf, #[source] std::io::Error),

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

/// Rejected filter input. Raised before any filter runs, so a selection is
/// never built from partially applied arguments.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidFilterError {
    #[error("bounds must be [north, east, south, west], got {0} elements")]
    MalformedBounds(usize),

    #[error("unknown inventory resolution '{0}', expected 'hourly' or 'daily'")]
    UnknownResolution(String),

    #[error("inventory period starts {start} after it ends {end}")]
    InvertedPeriod { start: NaiveDate, end: NaiveDate },

    #[error("proximity radius must be non-negative, got {0}")]
    NegativeRadius(f64),

    #[error("proximity radius given without a location")]
    RadiusWithoutLocation,
}
