//! Filter parameter types accepted by [`Stations::select`](crate::Stations::select).

use crate::error::InvalidFilterError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A rectangular geographic region.
///
/// The array form follows the `[north, east, south, west]` caller contract:
/// `Bounds::from([52.7, 13.8, 52.3, 13.0])` covers latitudes `52.3..=52.7`
/// and longitudes `13.0..=13.8`. Swapped limits are not an error but select
/// nothing, so prefer the named constructor when in doubt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub north: f64,
    pub east: f64,
    pub south: f64,
    pub west: f64,
}

impl Bounds {
    pub fn new(north: f64, east: f64, south: f64, west: f64) -> Self {
        Self {
            north,
            east,
            south,
            west,
        }
    }
}

impl From<[f64; 4]> for Bounds {
    /// Element order is `[north, east, south, west]`.
    fn from(bounds: [f64; 4]) -> Self {
        Self::new(bounds[0], bounds[1], bounds[2], bounds[3])
    }
}

impl TryFrom<&[f64]> for Bounds {
    type Error = InvalidFilterError;

    /// Element order is `[north, east, south, west]`; any other length fails
    /// with [`InvalidFilterError::MalformedBounds`].
    fn try_from(bounds: &[f64]) -> Result<Self, Self::Error> {
        match *bounds {
            [north, east, south, west] => Ok(Self::new(north, east, south, west)),
            _ => Err(InvalidFilterError::MalformedBounds(bounds.len())),
        }
    }
}

impl TryFrom<Vec<f64>> for Bounds {
    type Error = InvalidFilterError;

    fn try_from(bounds: Vec<f64>) -> Result<Self, Self::Error> {
        Self::try_from(bounds.as_slice())
    }
}

/// Granularity of the observation data a station reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    Hourly,
    Daily,
}

impl Resolution {
    pub(crate) fn start_column(self) -> &'static str {
        match self {
            Resolution::Hourly => "hourly_start",
            Resolution::Daily => "daily_start",
        }
    }

    pub(crate) fn end_column(self) -> &'static str {
        match self {
            Resolution::Hourly => "hourly_end",
            Resolution::Daily => "daily_end",
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Resolution::Hourly => "hourly",
            Resolution::Daily => "daily",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = InvalidFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hourly" => Ok(Resolution::Hourly),
            "daily" => Ok(Resolution::Daily),
            other => Err(InvalidFilterError::UnknownResolution(other.to_string())),
        }
    }
}

/// Coverage a station's inventory window must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InventoryRequirement {
    /// Any data of the resolution exists (the recorded start date is present).
    Any,
    /// Data covers a single date; shorthand for a period collapsing to
    /// `[date, date]`.
    Date(NaiveDate),
    /// Data covers the whole inclusive period. The recorded end date may lag
    /// behind `end` by up to the configured max age and still count.
    Period { start: NaiveDate, end: NaiveDate },
}

/// One inventory constraint; several combine as a logical AND.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use meteostat_stations::{InventoryRequest, InventoryRequirement, Resolution};
///
/// // Stations with *any* hourly data.
/// let any_hourly = InventoryRequest::new(Resolution::Hourly, InventoryRequirement::Any);
///
/// // Stations with daily data covering all of 2023.
/// let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
/// let daily_2023 = InventoryRequest::new(
///     Resolution::Daily,
///     InventoryRequirement::Period { start, end },
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InventoryRequest {
    pub(crate) resolution: Resolution,
    pub(crate) requirement: InventoryRequirement,
}

impl InventoryRequest {
    pub fn new(resolution: Resolution, requirement: InventoryRequirement) -> Self {
        Self {
            resolution,
            requirement,
        }
    }
}
