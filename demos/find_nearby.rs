use meteostat_stations::{LatLon, Stations, StationsError};

#[tokio::main]
async fn main() -> Result<(), StationsError> {
    let stations = Stations::new().await?;

    let nearby = stations
        .select()
        .location(LatLon(52.52, 13.405))
        .radius(50_000.0)
        .call()?;

    println!("{} stations within 50 km of Berlin", nearby.count());
    println!("{}", nearby.fetch().limit(10).call()?);

    for station in nearby.collect_stations()?.into_iter().take(5) {
        println!(
            "{}  {}  {:.1} km",
            station.id,
            station.name.unwrap_or_default(),
            station.distance.unwrap_or_default() / 1000.0
        );
    }
    Ok(())
}
