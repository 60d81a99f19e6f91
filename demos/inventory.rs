use chrono::NaiveDate;
use meteostat_stations::{
    InventoryRequest, InventoryRequirement, Resolution, Stations, StationsError,
};

#[tokio::main]
async fn main() -> Result<(), StationsError> {
    let stations = Stations::new().await?;

    // German stations with daily data covering all of 2020.
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date");
    let end = NaiveDate::from_ymd_opt(2020, 12, 31).expect("valid date");
    let selection = stations
        .select()
        .country("DE".to_string())
        .inventory(vec![InventoryRequest::new(
            Resolution::Daily,
            InventoryRequirement::Period { start, end },
        )])
        .call()?;

    println!(
        "{} German stations with daily coverage for 2020",
        selection.count()
    );

    // Same selection with elevation converted to feet.
    let in_feet = selection.convert(&[("elevation", |meters| meters * 3.28084)])?;
    println!("{}", in_feet.fetch().limit(8).call()?);
    Ok(())
}
