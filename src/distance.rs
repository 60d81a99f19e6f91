/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Distance in meters between a station coordinate and a query point, using
/// the equirectangular approximation.
///
/// Accurate for short-to-medium separations; systematically underestimates
/// over large distances and at high latitudes, and is unreliable near the
/// poles or across the antimeridian.
///
/// # Examples
///
/// ```
/// use meteostat_stations::equirectangular_distance;
///
/// let d = equirectangular_distance(52.5644, 13.3088, 52.52, 13.405);
/// assert!(d > 7_000.0 && d < 9_000.0); // Berlin-Tegel to the city center
/// ```
pub fn equirectangular_distance(
    station_lat: f64,
    station_lon: f64,
    point_lat: f64,
    point_lon: f64,
) -> f64 {
    let x = (point_lon.to_radians() - station_lon.to_radians())
        * (0.5 * (point_lat.to_radians() + station_lat.to_radians())).cos();
    let y = point_lat.to_radians() - station_lat.to_radians();
    EARTH_RADIUS_M * (x * x + y * y).sqrt()
}
