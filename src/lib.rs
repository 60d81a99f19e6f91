mod config;
mod directory;
mod distance;
mod error;
mod filters;
mod selection;
mod stations;
mod types;
mod utils;

pub use config::StationsConfig;
pub use directory::error::DirectoryError;
pub use distance::equirectangular_distance;
pub use error::{InvalidFilterError, StationsError};
pub use selection::{StationSelection, UnitTransform};
pub use stations::{LatLon, Stations};

pub use types::filters::{Bounds, InventoryRequest, InventoryRequirement, Resolution};
pub use types::station::{DateRange, Inventory, Station};

#[cfg(test)]
pub(crate) mod testutil;
