use weather_likelihood::{LatLon, LikelihoodError, WeatherLikelihood};

#[tokio::main]
async fn main() -> Result<(), LikelihoodError> {
    // Set RUST_LOG=info (or debug) to see provider requests and per-variable sample sizes.
    env_logger::init();
    let client = WeatherLikelihood::new();

    // New York City, Independence Day.
    let report = client
        .analyze()
        .location(LatLon(40.7128, -74.0060))
        .month(7)
        .day(4)
        .call()
        .await?;

    if let Some(temperature) = &report.results.temperature {
        println!(
            "{} days of history ({}), very hot above {}{}: {}%",
            temperature.data_points,
            temperature.years_of_data,
            temperature.very_hot_threshold,
            temperature.unit,
            temperature.very_hot_probability
        );
    }
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Could not serialize report: {}", e),
    }

    Ok(())
}
