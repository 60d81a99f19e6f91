//! The narrowed station table and its query surface.

use crate::error::StationsError;
use crate::types::station::{DateRange, Inventory, Station, STATION_COLUMNS};
use bon::bon;
use chrono::NaiveDate;
use polars::prelude::*;

/// Per-column value transform used by [`StationSelection::convert`].
pub type UnitTransform = fn(f64) -> f64;

/// A snapshot of the station directory narrowed by the filters it was built
/// with. Value-like: every accessor hands out independent copies and nothing
/// mutates the selection itself.
///
/// Built via [`Stations::select`](crate::Stations::select).
#[derive(Debug, Clone)]
pub struct StationSelection {
    frame: DataFrame,
}

#[bon]
impl StationSelection {
    pub(crate) fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// Number of stations currently selected. Zero is a valid selection.
    pub fn count(&self) -> usize {
        self.frame.height()
    }

    /// Returns the selected rows as an independent `DataFrame` snapshot;
    /// later changes to the returned frame never affect this selection.
    ///
    /// This method uses a builder pattern.
    ///
    /// * `.limit(n)`: keep only the first `n` rows in the current order.
    /// * `.limit(n).sample(true)`: instead draw `n` rows uniformly without
    ///   replacement; errors if `n` exceeds the selection size. `sample`
    ///   without `limit` returns the full snapshot.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use meteostat_stations::{Stations, StationsError};
    /// # async fn run() -> Result<(), StationsError> {
    /// let stations = Stations::new().await?;
    /// let selection = stations.select().country("DE".to_string()).call()?;
    ///
    /// let all = selection.fetch().call()?;
    /// let first_ten = selection.fetch().limit(10).call()?;
    /// let random_ten = selection.fetch().limit(10).sample(true).call()?;
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn fetch(
        &self,
        limit: Option<usize>,
        sample: Option<bool>,
    ) -> Result<DataFrame, StationsError> {
        match limit {
            Some(limit) if sample.unwrap_or(false) => {
                Ok(self.frame.sample_n_literal(limit, false, true, None)?)
            }
            Some(limit) => Ok(self.frame.head(Some(limit))),
            None => Ok(self.frame.clone()),
        }
    }

    /// Applies `transforms` element-wise to the named columns and returns the
    /// result as a new selection; this one stays untouched.
    ///
    /// Only numeric columns of the station record schema are convertible
    /// (`latitude`, `longitude`, `elevation`); other names, including the
    /// transient `distance` column, are ignored silently.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use meteostat_stations::{Stations, StationsError};
    /// # async fn run() -> Result<(), StationsError> {
    /// let stations = Stations::new().await?;
    /// let selection = stations.select().country("CH".to_string()).call()?;
    /// let in_feet = selection.convert(&[("elevation", |meters| meters * 3.28084)])?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert(
        &self,
        transforms: &[(&str, UnitTransform)],
    ) -> Result<StationSelection, StationsError> {
        let mut frame = self.frame.clone();
        for &(name, transform) in transforms {
            if !STATION_COLUMNS.contains(&name) {
                continue;
            }
            let Ok(column) = frame.column(name) else {
                continue;
            };
            if column.dtype() != &DataType::Float64 {
                continue;
            }
            let converted = column.f64()?.apply_values(|value| transform(value));
            frame.with_column(converted.into_series())?;
        }
        Ok(StationSelection { frame })
    }

    /// Materializes the selection into typed [`Station`] records, preserving
    /// the current row order. The `distance` field is populated only after a
    /// proximity filter has run.
    pub fn collect_stations(&self) -> Result<Vec<Station>, StationsError> {
        let frame = &self.frame;
        let id = frame.column("id")?.str()?;
        let name = frame.column("name")?.str()?;
        let country = frame.column("country")?.str()?;
        let region = frame.column("region")?.str()?;
        let wmo = frame.column("wmo")?.str()?;
        let icao = frame.column("icao")?.str()?;
        let latitude = frame.column("latitude")?.f64()?;
        let longitude = frame.column("longitude")?.f64()?;
        let elevation = frame.column("elevation")?.f64()?;
        let timezone = frame.column("timezone")?.str()?;
        let hourly_start = frame.column("hourly_start")?.date()?;
        let hourly_end = frame.column("hourly_end")?.date()?;
        let daily_start = frame.column("daily_start")?.date()?;
        let daily_end = frame.column("daily_end")?.date()?;
        let distance = match frame.column("distance") {
            Ok(column) => Some(column.f64()?),
            Err(_) => None,
        };

        let mut stations = Vec::with_capacity(frame.height());
        for row in 0..frame.height() {
            let Some(station_id) = id.get(row) else {
                return Err(StationsError::Polars(PolarsError::ComputeError(
                    "station directory row without an id".into(),
                )));
            };
            stations.push(Station {
                id: station_id.to_string(),
                name: name.get(row).map(str::to_string),
                country: country.get(row).map(str::to_string),
                region: region.get(row).map(str::to_string),
                wmo: wmo.get(row).map(str::to_string),
                icao: icao.get(row).map(str::to_string),
                latitude: latitude.get(row),
                longitude: longitude.get(row),
                elevation: elevation.get(row),
                timezone: timezone.get(row).map(str::to_string),
                inventory: Inventory {
                    hourly: DateRange {
                        start: hourly_start.get(row).and_then(date_from_days),
                        end: hourly_end.get(row).and_then(date_from_days),
                    },
                    daily: DateRange {
                        start: daily_start.get(row).and_then(date_from_days),
                        end: daily_end.get(row).and_then(date_from_days),
                    },
                },
                distance: distance.and_then(|column| column.get(row)),
            });
        }
        Ok(stations)
    }
}

/// Polars dates count days since 1970-01-01; chrono's day numbering starts at
/// 0001-01-01, 719,163 days earlier.
fn date_from_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days + 719_163)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{date, ids_of, sample_frame};
    use std::collections::HashSet;

    fn selection() -> StationSelection {
        StationSelection::new(sample_frame())
    }

    #[test]
    fn count_matches_row_count() {
        assert_eq!(selection().count(), 5);
    }

    #[test]
    fn fetch_returns_full_snapshot() {
        let fetched = selection().fetch().call().unwrap();
        assert!(fetched.equals_missing(&sample_frame()));
    }

    #[test]
    fn fetch_is_deterministic() {
        let selection = selection();
        let a = selection.fetch().call().unwrap();
        let b = selection.fetch().call().unwrap();
        assert!(a.equals_missing(&b));
    }

    #[test]
    fn fetch_limit_truncates_in_current_order() {
        let top = selection().fetch().limit(2).call().unwrap();
        assert_eq!(ids_of(&top), ["10382", "10379"]);
    }

    #[test]
    fn fetch_limit_beyond_count_returns_everything() {
        let all = selection().fetch().limit(50).call().unwrap();
        assert_eq!(all.height(), 5);
    }

    #[test]
    fn fetch_sample_draws_distinct_known_rows() {
        let selection = selection();
        let sampled = selection.fetch().limit(3).sample(true).call().unwrap();
        assert_eq!(sampled.height(), 3);

        let drawn: HashSet<String> = ids_of(&sampled).into_iter().collect();
        assert_eq!(drawn.len(), 3);

        let source: HashSet<String> = ids_of(&sample_frame()).into_iter().collect();
        assert!(drawn.is_subset(&source));
    }

    #[test]
    fn fetch_sample_without_limit_returns_everything() {
        let all = selection().fetch().sample(true).call().unwrap();
        assert_eq!(all.height(), 5);
    }

    #[test]
    fn fetch_sample_beyond_count_errors() {
        assert!(selection().fetch().limit(6).sample(true).call().is_err());
    }

    #[test]
    fn convert_transforms_column_and_leaves_original_untouched() {
        let selection = selection();
        let before = selection.fetch().call().unwrap();

        let converted = selection
            .convert(&[("elevation", |meters| meters * 3.28084)])
            .unwrap();

        let after = selection.fetch().call().unwrap();
        assert!(before.equals_missing(&after));

        let feet = converted.fetch().call().unwrap();
        let tegel_feet = feet.column("elevation").unwrap().f64().unwrap().get(0);
        assert!((tegel_feet.unwrap() - 37.0 * 3.28084).abs() < 1e-9);
    }

    #[test]
    fn convert_ignores_unknown_and_non_numeric_columns() {
        let selection = selection();
        let converted = selection
            .convert(&[
                ("nonexistent", |v| v + 1.0),
                ("id", |v| v + 1.0),
                ("distance", |v| v + 1.0),
            ])
            .unwrap();
        assert!(converted
            .fetch()
            .call()
            .unwrap()
            .equals_missing(&sample_frame()));
    }

    #[test]
    fn collect_stations_roundtrips_fields() {
        let stations = selection().collect_stations().unwrap();
        assert_eq!(stations.len(), 5);

        let tegel = &stations[0];
        assert_eq!(tegel.id, "10382");
        assert_eq!(tegel.name.as_deref(), Some("Berlin / Tegel"));
        assert_eq!(tegel.country.as_deref(), Some("DE"));
        assert_eq!(tegel.latitude, Some(52.5644));
        assert_eq!(tegel.inventory.hourly.start, Some(date(1948, 1, 1)));
        assert_eq!(tegel.inventory.hourly.end, Some(date(2026, 1, 10)));
        assert_eq!(tegel.distance, None);

        let hamburg = &stations[2];
        assert_eq!(hamburg.inventory.hourly.start, None);
        assert_eq!(hamburg.inventory.daily.start, Some(date(1891, 1, 1)));
    }
}
