//! Client entry point: loads the station directory once and derives
//! filtered selections from it.

use crate::config::StationsConfig;
use crate::directory::loader::{DirectoryLoader, CACHE_FILE_NAME};
use crate::error::{InvalidFilterError, StationsError};
use crate::filters;
use crate::selection::StationSelection;
use crate::types::filters::{Bounds, InventoryRequest, InventoryRequirement};
use crate::types::station::STATION_COLUMNS;
use crate::utils::{default_cache_dir, ensure_cache_dir_exists};
use bon::bon;
use polars::prelude::DataFrame;
use std::path::PathBuf;

/// A geographical coordinate: latitude first, longitude second, in degrees.
///
/// # Examples
///
/// ```
/// use meteostat_stations::LatLon;
///
/// let berlin_center = LatLon(52.5200, 13.4050);
/// assert_eq!(berlin_center.0, 52.5200); // Latitude
/// assert_eq!(berlin_center.1, 13.4050); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// The full Meteostat station directory plus the configuration it was loaded
/// with.
///
/// Construct once via [`Stations::new`] (default configuration),
/// [`Stations::with_config`], or [`Stations::from_frame`] (pre-materialized
/// table, e.g. in tests), then derive narrowed [`StationSelection`]s via
/// [`Stations::select`].
#[derive(Debug)]
pub struct Stations {
    frame: DataFrame,
    config: StationsConfig,
}

#[bon]
impl Stations {
    /// Loads the station directory using the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StationsError::CacheDirResolution`] /
    /// [`StationsError::CacheDirCreation`] if the cache directory cannot be
    /// determined or created, and [`StationsError::SourceUnavailable`] if the
    /// directory can neither be read from cache nor downloaded.
    pub async fn new() -> Result<Self, StationsError> {
        Self::with_config(StationsConfig::default()).await
    }

    /// Loads the station directory with an explicit configuration.
    pub async fn with_config(config: StationsConfig) -> Result<Self, StationsError> {
        let cache_dir = resolve_cache_dir(&config)?;
        ensure_cache_dir_exists(&cache_dir)
            .await
            .map_err(|e| StationsError::CacheDirCreation(cache_dir.clone(), e))?;
        let loader = DirectoryLoader::new(cache_dir, config.max_age, config.max_threads);
        let frame = loader.load().await?;
        Self::from_frame(frame, config)
    }

    /// Wraps an already materialized station table, for callers with their
    /// own loading strategy. Validates that all station schema columns are
    /// present; no network or filesystem access happens.
    pub fn from_frame(frame: DataFrame, config: StationsConfig) -> Result<Self, StationsError> {
        for column in STATION_COLUMNS {
            if frame.column(column).is_err() {
                return Err(StationsError::MissingColumn(column.to_string()));
            }
        }
        Ok(Self { frame, config })
    }

    /// The configuration this directory was loaded with.
    pub fn config(&self) -> &StationsConfig {
        &self.config
    }

    /// Removes the cached station directory file, forcing the next load to
    /// download a fresh copy.
    pub async fn purge_cache(&self) -> Result<(), StationsError> {
        let cache_file = resolve_cache_dir(&self.config)?.join(CACHE_FILE_NAME);
        match tokio::fs::remove_file(&cache_file).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StationsError::CacheDeletion(cache_file, e)),
        }
    }

    /// Builds a [`StationSelection`] by applying the requested filters to the
    /// full directory, in this fixed order: identifier → country/region →
    /// bounds → proximity → inventory. Proximity is the only step that
    /// reorders rows, and its distance sort covers exactly the rows surviving
    /// the earlier filters.
    ///
    /// This method uses a builder pattern.
    ///
    /// * `.uid(Vec<String>)` / `.wmo(Vec<String>)` / `.icao(Vec<String>)`:
    ///   keep stations whose identifier is a member of the given set. The
    ///   classes are mutually exclusive by precedence: with `uid` given,
    ///   `wmo` and `icao` are ignored; with `wmo` given, `icao` is ignored.
    /// * `.country(String)` / `.region(String)`: code equality, both narrow
    ///   when both are given.
    /// * `.bounds(Bounds)`: rectangular region, see [`Bounds`].
    /// * `.location(LatLon)` with optional `.radius(f64)` in meters: adds a
    ///   `distance` column and sorts ascending by it.
    /// * `.inventory(Vec<InventoryRequest>)`: coverage constraints, combined
    ///   as a logical AND, using the configured max age as end tolerance.
    ///
    /// # Errors
    ///
    /// Fails fast with [`StationsError::InvalidFilter`] on inconsistent input
    /// (radius without location, negative radius, inverted inventory period)
    /// before any filter runs. An empty result is not an error; the returned
    /// selection simply has `count() == 0`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use meteostat_stations::{LatLon, Stations, StationsError};
    /// # async fn run() -> Result<(), StationsError> {
    /// let stations = Stations::new().await?;
    ///
    /// // The ten German stations closest to Berlin.
    /// let nearby = stations
    ///     .select()
    ///     .country("DE".to_string())
    ///     .location(LatLon(52.52, 13.405))
    ///     .call()?;
    /// let frame = nearby.fetch().limit(10).call()?;
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn select(
        &self,
        uid: Option<Vec<String>>,
        wmo: Option<Vec<String>>,
        icao: Option<Vec<String>>,
        country: Option<String>,
        region: Option<String>,
        bounds: Option<Bounds>,
        location: Option<LatLon>,
        radius: Option<f64>,
        inventory: Option<Vec<InventoryRequest>>,
    ) -> Result<StationSelection, StationsError> {
        if let Some(radius) = radius {
            if location.is_none() {
                return Err(InvalidFilterError::RadiusWithoutLocation.into());
            }
            if radius < 0.0 {
                return Err(InvalidFilterError::NegativeRadius(radius).into());
            }
        }
        if let Some(requests) = &inventory {
            for request in requests {
                if let InventoryRequirement::Period { start, end } = request.requirement {
                    if start > end {
                        return Err(InvalidFilterError::InvertedPeriod { start, end }.into());
                    }
                }
            }
        }

        let mut frame = self.frame.clone();
        frame =
            filters::filter_identifier(frame, uid.as_deref(), wmo.as_deref(), icao.as_deref())?;
        if country.is_some() || region.is_some() {
            frame = filters::filter_regional(frame, country.as_deref(), region.as_deref())?;
        }
        if let Some(bounds) = bounds {
            frame = filters::filter_bounds(frame, bounds)?;
        }
        if let Some(point) = location {
            frame = filters::filter_proximity(frame, point, radius)?;
        }
        if let Some(requests) = inventory {
            frame = filters::filter_inventory(frame, &requests, self.config.max_age)?;
        }
        Ok(StationSelection::new(frame))
    }
}

fn resolve_cache_dir(config: &StationsConfig) -> Result<PathBuf, StationsError> {
    match &config.cache_dir {
        Some(dir) => Ok(dir.clone()),
        None => default_cache_dir().map_err(StationsError::CacheDirResolution),
    }
}
