//! Filter predicates over the station directory frame.
//!
//! Every predicate takes the current frame by value and returns a narrowed
//! copy; the input is never mutated in place. Only
//! [`filter_proximity`] changes row order.

use crate::distance::equirectangular_distance;
use crate::stations::LatLon;
use crate::types::filters::{Bounds, InventoryRequest, InventoryRequirement};
use chrono::{NaiveDate, NaiveTime};
use polars::prelude::*;
use std::time::Duration;

/// Narrows to stations matching one identifier class. Precedence: `uid`,
/// then `wmo`, then `icao`; only the first provided class applies.
pub(crate) fn filter_identifier(
    frame: DataFrame,
    uid: Option<&[String]>,
    wmo: Option<&[String]>,
    icao: Option<&[String]>,
) -> PolarsResult<DataFrame> {
    let (column, ids) = if let Some(ids) = uid {
        ("id", ids)
    } else if let Some(ids) = wmo {
        ("wmo", ids)
    } else if let Some(ids) = icao {
        ("icao", ids)
    } else {
        return Ok(frame);
    };
    let members = Series::new(column.into(), ids.to_vec());
    frame
        .lazy()
        .filter(col(column).is_in(lit(members)))
        .collect()
}

/// Narrows by country and/or region code equality; both narrow further when
/// both are given.
pub(crate) fn filter_regional(
    frame: DataFrame,
    country: Option<&str>,
    region: Option<&str>,
) -> PolarsResult<DataFrame> {
    let mut lf = frame.lazy();
    if let Some(country) = country {
        lf = lf.filter(col("country").eq(lit(country)));
    }
    if let Some(region) = region {
        lf = lf.filter(col("region").eq(lit(region)));
    }
    lf.collect()
}

/// Keeps stations inside the rectangle: `lat ≤ north`, `lat ≥ south`,
/// `lon ≤ east`, `lon ≥ west`.
pub(crate) fn filter_bounds(frame: DataFrame, bounds: Bounds) -> PolarsResult<DataFrame> {
    frame
        .lazy()
        .filter(
            col("latitude")
                .lt_eq(lit(bounds.north))
                .and(col("latitude").gt_eq(lit(bounds.south)))
                .and(col("longitude").lt_eq(lit(bounds.east)))
                .and(col("longitude").gt_eq(lit(bounds.west))),
        )
        .collect()
}

/// Adds a `distance` column in meters from `point`, drops rows beyond
/// `radius` when given, and sorts ascending by distance. Stations without
/// coordinates sort last.
pub(crate) fn filter_proximity(
    frame: DataFrame,
    point: LatLon,
    radius: Option<f64>,
) -> PolarsResult<DataFrame> {
    let distances: Vec<Option<f64>> = {
        let latitudes = frame.column("latitude")?.f64()?;
        let longitudes = frame.column("longitude")?.f64()?;
        latitudes
            .into_iter()
            .zip(longitudes)
            .map(|(lat, lon)| match (lat, lon) {
                (Some(lat), Some(lon)) => {
                    Some(equirectangular_distance(lat, lon, point.0, point.1))
                }
                _ => None,
            })
            .collect()
    };

    let mut frame = frame;
    frame.with_column(Series::new("distance".into(), distances))?;

    let mut lf = frame.lazy();
    if let Some(radius) = radius {
        lf = lf.filter(col("distance").lt_eq(lit(radius)));
    }
    lf.sort(
        ["distance"],
        SortMultipleOptions::default()
            .with_nulls_last(true)
            .with_maintain_order(true),
    )
    .collect()
}

/// Narrows to stations whose inventory satisfies every request.
pub(crate) fn filter_inventory(
    frame: DataFrame,
    requests: &[InventoryRequest],
    max_age: Duration,
) -> PolarsResult<DataFrame> {
    let mut lf = frame.lazy();
    for request in requests {
        lf = lf.filter(inventory_expr(request, max_age));
    }
    lf.collect()
}

fn inventory_expr(request: &InventoryRequest, max_age: Duration) -> Expr {
    match request.requirement {
        InventoryRequirement::Any => col(request.resolution.start_column()).is_not_null(),
        InventoryRequirement::Date(date) => window_expr(request, date, date, max_age),
        InventoryRequirement::Period { start, end } => window_expr(request, start, end, max_age),
    }
}

/// Rows whose window starts on or before `from` and whose recorded end,
/// padded by `max_age`, reaches `to`. The end comparison runs in millisecond
/// datetime space so sub-day tolerances behave exactly.
fn window_expr(
    request: &InventoryRequest,
    from: NaiveDate,
    to: NaiveDate,
    max_age: Duration,
) -> Expr {
    let start = col(request.resolution.start_column());
    let end = col(request.resolution.end_column());
    let earliest_end =
        to.and_time(NaiveTime::MIN) - chrono::Duration::seconds(max_age.as_secs() as i64);
    start
        .clone()
        .is_not_null()
        .and(start.lt_eq(lit(from)))
        .and(
            end.cast(DataType::Datetime(TimeUnit::Milliseconds, None))
                .gt_eq(lit(earliest_end)),
        )
}
