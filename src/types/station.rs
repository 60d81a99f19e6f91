//! Typed station records and the station directory schema.

use chrono::NaiveDate;
use polars::prelude::{DataType, Field, Schema};
use serde::{Deserialize, Serialize};

/// Columns of the station directory, in file order.
pub(crate) const STATION_COLUMNS: [&str; 14] = [
    "id",
    "name",
    "country",
    "region",
    "wmo",
    "icao",
    "latitude",
    "longitude",
    "elevation",
    "timezone",
    "hourly_start",
    "hourly_end",
    "daily_start",
    "daily_end",
];

/// Schema used to parse the station directory CSV. Identifier columns stay
/// strings so numeric WMO codes keep their leading zeros.
pub(crate) fn directory_schema() -> Schema {
    Schema::from_iter(STATION_COLUMNS.iter().map(|&name| {
        let dtype = match name {
            "latitude" | "longitude" | "elevation" => DataType::Float64,
            "hourly_start" | "hourly_end" | "daily_start" | "daily_end" => DataType::Date,
            _ => DataType::String,
        };
        Field::new(name.into(), dtype)
    }))
}

/// A single weather station record from the Meteostat station directory.
///
/// Produced by [`StationSelection::collect_stations`](crate::StationSelection::collect_stations).
/// Every field except `id` may be absent in the directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    /// The unique Meteostat station identifier (e.g., "10637").
    pub id: String,
    /// Human-readable station name.
    pub name: Option<String>,
    /// ISO country code (e.g., "NL", "DE").
    pub country: Option<String>,
    /// Region code (state, province, etc.).
    pub region: Option<String>,
    /// World Meteorological Organization identifier.
    pub wmo: Option<String>,
    /// ICAO airport code, if the station is at an airport.
    pub icao: Option<String>,
    /// Latitude in decimal degrees (positive north).
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees (positive east).
    pub longitude: Option<f64>,
    /// Elevation above sea level in meters.
    pub elevation: Option<f64>,
    /// IANA timezone name (e.g., "Europe/Amsterdam").
    pub timezone: Option<String>,
    /// Data availability windows per resolution.
    pub inventory: Inventory,
    /// Meters from the query point; set once a proximity filter has run.
    pub distance: Option<f64>,
}

/// Data availability windows of a station, per resolution.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Inventory {
    pub hourly: DateRange,
    pub daily: DateRange,
}

/// A date range with optional endpoints. An absent `start` means no data of
/// the resolution exists for the station at all.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}
