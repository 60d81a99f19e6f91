//! Shared fixtures for building synthetic station frames in tests.

use chrono::NaiveDate;
use polars::prelude::*;

pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub(crate) fn date_series(name: &str, values: &[Option<NaiveDate>]) -> Series {
    Series::new(name.into(), values.to_vec())
}

pub(crate) fn ids_of(frame: &DataFrame) -> Vec<String> {
    frame
        .column("id")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect()
}

/// Five hand-picked stations: Berlin-Tegel, Potsdam, Hamburg, Paris, Sydney.
///
/// Inventory layout, chosen to exercise the window edges:
/// - 10382 Berlin: hourly and daily 1948-01-01 ..= 2026-01-10
/// - 10379 Potsdam: hourly and daily 1893-01-01 ..= 2026-01-09
/// - 10147 Hamburg: no hourly window, daily 1891-01-01 ..= 2026-01-10
/// - 07156 Paris: hourly 1920-01-01 ..= 2025-06-30, no daily window
/// - 94767 Sydney: hourly and daily 1939-01-01 ..= 2026-01-10
pub(crate) fn sample_frame() -> DataFrame {
    let mut frame = df!(
        "id" => &["10382", "10379", "10147", "07156", "94767"],
        "name" => &["Berlin / Tegel", "Potsdam", "Hamburg / Fuhlsbuettel", "Paris-Montsouris", "Sydney Airport"],
        "country" => &["DE", "DE", "DE", "FR", "AU"],
        "region" => &["BE", "BB", "HH", "IDF", "NSW"],
        "wmo" => &[Some("10382"), Some("10379"), Some("10147"), Some("07156"), None],
        "icao" => &[Some("EDDT"), None, Some("EDDH"), None, Some("YSSY")],
        "latitude" => &[52.5644, 52.3833, 53.6333, 48.8167, -33.9461],
        "longitude" => &[13.3088, 13.0667, 9.9833, 2.3333, 151.1772],
        "elevation" => &[37.0, 81.0, 11.0, 75.0, 6.0],
        "timezone" => &["Europe/Berlin", "Europe/Berlin", "Europe/Berlin", "Europe/Paris", "Australia/Sydney"],
    )
    .unwrap();

    let hourly_start = [
        Some(date(1948, 1, 1)),
        Some(date(1893, 1, 1)),
        None,
        Some(date(1920, 1, 1)),
        Some(date(1939, 1, 1)),
    ];
    let hourly_end = [
        Some(date(2026, 1, 10)),
        Some(date(2026, 1, 9)),
        None,
        Some(date(2025, 6, 30)),
        Some(date(2026, 1, 10)),
    ];
    let daily_start = [
        Some(date(1948, 1, 1)),
        Some(date(1893, 1, 1)),
        Some(date(1891, 1, 1)),
        None,
        Some(date(1939, 1, 1)),
    ];
    let daily_end = [
        Some(date(2026, 1, 10)),
        Some(date(2026, 1, 9)),
        Some(date(2026, 1, 10)),
        None,
        Some(date(2026, 1, 10)),
    ];

    frame
        .with_column(date_series("hourly_start", &hourly_start))
        .unwrap();
    frame
        .with_column(date_series("hourly_end", &hourly_end))
        .unwrap();
    frame
        .with_column(date_series("daily_start", &daily_start))
        .unwrap();
    frame
        .with_column(date_series("daily_end", &daily_end))
        .unwrap();
    frame
}

/// A full-schema frame with the given ids and coordinates and empty
/// inventory windows.
pub(crate) fn minimal_frame(rows: &[(&str, f64, f64)]) -> DataFrame {
    let ids: Vec<&str> = rows.iter().map(|r| r.0).collect();
    let latitudes: Vec<f64> = rows.iter().map(|r| r.1).collect();
    let longitudes: Vec<f64> = rows.iter().map(|r| r.2).collect();
    let names: Vec<Option<&str>> = vec![None; rows.len()];
    let empty_dates: Vec<Option<NaiveDate>> = vec![None; rows.len()];

    let mut frame = df!(
        "id" => &ids,
        "name" => &names,
        "country" => &names,
        "region" => &names,
        "wmo" => &names,
        "icao" => &names,
        "latitude" => &latitudes,
        "longitude" => &longitudes,
        "elevation" => &vec![Some(0.0); rows.len()],
        "timezone" => &names,
    )
    .unwrap();

    for column in ["hourly_start", "hourly_end", "daily_start", "daily_end"] {
        frame
            .with_column(date_series(column, &empty_dates))
            .unwrap();
    }
    frame
}
