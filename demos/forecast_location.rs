use chrono::NaiveDate;
use weather_likelihood::{ForecastConfig, LatLon, LikelihoodError, WeatherLikelihood};

#[tokio::main]
async fn main() -> Result<(), LikelihoodError> {
    env_logger::init();
    let client = WeatherLikelihood::new();

    // Amsterdam, one week from the first of June. A lighter ensemble than the default
    // keeps the demo quick.
    let report = client
        .forecast()
        .location(LatLon(52.3676, 4.9041))
        .start_date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
        .horizon_days(7)
        .config(ForecastConfig::builder().n_trees(50).build())
        .call()
        .await?;

    println!(
        "Held-out MAE {}{} over {} test days ({} to {})",
        report.model_accuracy.mean_absolute_error,
        report.unit,
        report.model_accuracy.test_samples,
        report.model_accuracy.training_period_start,
        report.model_accuracy.training_period_end
    );
    for point in &report.forecast {
        println!(
            "{}  {:>6.2}  [{:.2}, {:.2}]",
            point.date, point.predicted_temp, point.lower_bound, point.upper_bound
        );
    }

    Ok(())
}
