//! This module provides the main entry point of the crate. It answers two questions for
//! a geographical location: how likely extreme weather is on a calendar day, based on
//! decades of daily history, and what the temperature will be over the next days.

use crate::climatology::analyzer::MultiParameterAnalyzer;
use crate::climatology::cleaner::clean;
use crate::climatology::statistics::round_to;
use crate::error::LikelihoodError;
use crate::forecast::config::ForecastConfig;
use crate::forecast::error::ForecastError;
use crate::forecast::generator::{ForecastGenerator, MAX_HORIZON_DAYS};
use crate::forecast::trainer::{ForecastTrainer, TrainingSet};
use crate::power::client::{default_period_end, default_period_start, PowerClient};
use crate::types::report::{
    ClimatologyReport, ForecastReport, ModelAccuracy, ReportMetadata,
};
use crate::types::series::RawSeries;
use crate::types::variable::WeatherVariable;
use bon::bon;
use chrono::{NaiveDate, Utc};
use log::info;
use std::collections::HashMap;
use tokio::task;

pub const DATA_SOURCE: &str = "NASA POWER Project";
pub const DATA_SOURCE_URL: &str = "https://power.larc.nasa.gov/";
pub const METHODOLOGY: &str = "Percentile-based analysis of historical weather data";

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
/// Both values are represented as `f64`.
///
/// # Examples
///
/// ```
/// use weather_likelihood::LatLon;
///
/// let new_york = LatLon(40.7128, -74.0060);
/// assert_eq!(new_york.0, 40.7128); // Latitude
/// assert_eq!(new_york.1, -74.0060); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    /// Checks that latitude is within [-90, 90] and longitude within [-180, 180].
    ///
    /// # Errors
    ///
    /// Returns [`LikelihoodError::InvalidLatitude`] or [`LikelihoodError::InvalidLongitude`].
    pub fn validate(self) -> Result<Self, LikelihoodError> {
        if !(-90.0..=90.0).contains(&self.0) {
            return Err(LikelihoodError::InvalidLatitude(self.0));
        }
        if !(-180.0..=180.0).contains(&self.1) {
            return Err(LikelihoodError::InvalidLongitude(self.1));
        }
        Ok(self)
    }
}

fn validate_calendar_day(month: u32, day: u32) -> Result<(), LikelihoodError> {
    if !(1..=12).contains(&month) {
        return Err(LikelihoodError::InvalidMonth(month));
    }
    if !(1..=31).contains(&day) {
        return Err(LikelihoodError::InvalidDay(day));
    }
    Ok(())
}

/// Builds the analyze response from already fetched provider series.
///
/// This is the offline half of [`WeatherLikelihood::analyze`]: it validates the
/// request, runs the [`MultiParameterAnalyzer`] and attaches the report metadata.
///
/// # Errors
///
/// * Validation errors for the location, month or day.
/// * [`LikelihoodError::NotEnoughData`] if no variable produced a result.
pub fn climatology_report(
    data: &HashMap<WeatherVariable, RawSeries>,
    location: LatLon,
    month: u32,
    day: u32,
) -> Result<ClimatologyReport, LikelihoodError> {
    location.validate()?;
    validate_calendar_day(month, day)?;

    let results = MultiParameterAnalyzer::default()
        .analyze(data, month, day)
        .ok_or(LikelihoodError::NotEnoughData { month, day })?;

    Ok(ClimatologyReport {
        results,
        metadata: ReportMetadata {
            location: location.into(),
            query_date: format!("{:02}/{:02}", month, day),
            data_source: DATA_SOURCE,
            api_url: DATA_SOURCE_URL,
            analysis_timestamp: Utc::now(),
            methodology: METHODOLOGY,
        },
    })
}

/// Trains a model on a raw temperature series and forecasts `horizon_days` days from
/// `start_date`.
///
/// This is CPU bound; [`WeatherLikelihood::forecast`] runs it on a blocking thread.
///
/// # Errors
///
/// * [`ForecastError::InvalidHorizon`] unless `1 <= horizon_days <= 14`.
/// * [`ForecastError::InsufficientData`] if the cleaned series is shorter than
///   `config.min_training_samples`.
/// * [`ForecastError::TrainingFailed`] for any other training problem.
pub fn forecast_report(
    temperature: &RawSeries,
    location: LatLon,
    start_date: NaiveDate,
    horizon_days: usize,
    config: &ForecastConfig,
) -> Result<ForecastReport, LikelihoodError> {
    location.validate()?;
    if !(1..=MAX_HORIZON_DAYS).contains(&horizon_days) {
        return Err(ForecastError::InvalidHorizon(horizon_days).into());
    }

    let series = clean(temperature, WeatherVariable::Temperature.sentinel_policy());
    let model = ForecastTrainer::new(config.clone())
        .train(&TrainingSet::from_series(&series, location))?;
    let (Some(period_start), Some(period_end)) = (series.first_date(), series.last_date())
    else {
        return Err(ForecastError::TrainingFailed("empty training period".to_string()).into());
    };

    let forecast = ForecastGenerator::new(config.uncertainty_scale).generate(
        &model,
        location,
        start_date,
        horizon_days,
    )?;

    Ok(ForecastReport {
        location: location.into(),
        unit: WeatherVariable::Temperature.unit(),
        forecast,
        model_accuracy: ModelAccuracy {
            mean_absolute_error: round_to(model.test_mae, 2),
            training_samples: model.training_samples,
            test_samples: model.test_samples,
            training_period_start: period_start,
            training_period_end: period_end,
        },
    })
}

/// The main client struct of the crate.
///
/// Every request fetches its history from NASA POWER, computes its answer and returns
/// it. Nothing is cached between requests, and a trained forecast model lives only for
/// the request that trained it.
///
/// # Examples
///
/// ```rust
/// # use weather_likelihood::{LatLon, LikelihoodError, WeatherLikelihood};
/// # async fn run() -> Result<(), LikelihoodError> {
/// let client = WeatherLikelihood::new();
/// let report = client
///     .analyze()
///     .location(LatLon(40.7128, -74.0060))
///     .month(7)
///     .day(15)
///     .call()
///     .await?;
/// if let Some(temperature) = report.results.temperature {
///     println!("Very hot probability: {}%", temperature.very_hot_probability);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct WeatherLikelihood {
    power: PowerClient,
}

#[bon]
impl WeatherLikelihood {
    /// Creates a client that talks to the public NASA POWER endpoint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a client that fetches from a mirror of the daily point endpoint.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            power: PowerClient::with_base_url(base_url),
        }
    }

    /// Percentile climatology of temperature, precipitation and wind for one calendar day.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.location(LatLon)`: **Required.** Where to analyse.
    /// * `.month(u32)`: **Required.** 1-12.
    /// * `.day(u32)`: **Required.** 1-31. A day that does not exist in the month yields
    ///   [`LikelihoodError::NotEnoughData`].
    /// * `.start(NaiveDate)` / `.end(NaiveDate)`: Optional. The historical period,
    ///   1995-01-01 to 2023-12-31 by default.
    ///
    /// # Errors
    ///
    /// * Validation errors are returned before any network traffic.
    /// * [`LikelihoodError::Power`] when the provider cannot be reached or returns
    ///   no data.
    /// * [`LikelihoodError::NotEnoughData`] if no variable has at least three
    ///   observations for the day.
    #[builder]
    pub async fn analyze(
        &self,
        location: LatLon,
        month: u32,
        day: u32,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<ClimatologyReport, LikelihoodError> {
        location.validate()?;
        validate_calendar_day(month, day)?;
        info!(
            "Analysing {:02}/{:02} at lat={}, lon={}",
            month, day, location.0, location.1
        );

        let data = self
            .power
            .daily_point(
                location,
                &WeatherVariable::ALL,
                start.unwrap_or_else(default_period_start),
                end.unwrap_or_else(default_period_end),
            )
            .await?;
        climatology_report(&data, location, month, day)
    }

    /// Daily temperature forecast from a random forest trained on the location's history.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.location(LatLon)`: **Required.** Where to forecast.
    /// * `.start_date(NaiveDate)`: **Required.** First forecast day.
    /// * `.horizon_days(usize)`: **Required.** Number of days, 1-14.
    /// * `.start(NaiveDate)` / `.end(NaiveDate)`: Optional. The training period,
    ///   1995-01-01 to 2023-12-31 by default.
    /// * `.config(ForecastConfig)`: Optional. Model settings, [`ForecastConfig::default`]
    ///   if omitted.
    ///
    /// # Errors
    ///
    /// * Validation errors, including [`ForecastError::InvalidHorizon`], are returned
    ///   before any network traffic.
    /// * [`LikelihoodError::Power`] when the provider cannot be reached or returns
    ///   no data.
    /// * [`LikelihoodError::Forecast`] when there is too little history or training
    ///   fails. A panic during training is reported as [`ForecastError::TrainingFailed`].
    #[builder]
    pub async fn forecast(
        &self,
        location: LatLon,
        start_date: NaiveDate,
        horizon_days: usize,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        config: Option<ForecastConfig>,
    ) -> Result<ForecastReport, LikelihoodError> {
        location.validate()?;
        if !(1..=MAX_HORIZON_DAYS).contains(&horizon_days) {
            return Err(ForecastError::InvalidHorizon(horizon_days).into());
        }
        let config = config.unwrap_or_default();
        info!(
            "Forecasting {} days from {} at lat={}, lon={}",
            horizon_days, start_date, location.0, location.1
        );

        let mut data = self
            .power
            .daily_point(
                location,
                &[WeatherVariable::Temperature],
                start.unwrap_or_else(default_period_start),
                end.unwrap_or_else(default_period_end),
            )
            .await?;
        let temperature = data
            .remove(&WeatherVariable::Temperature)
            .ok_or(ForecastError::InsufficientData {
                found: 0,
                required: config.min_training_samples,
            })?;

        task::spawn_blocking(move || {
            forecast_report(&temperature, location, start_date, horizon_days, &config)
        })
        .await
        .map_err(|e| ForecastError::TrainingFailed(format!("training worker failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::variable::MISSING_SENTINEL;
    use chrono::Datelike;

    fn unreachable_client() -> WeatherLikelihood {
        WeatherLikelihood::with_base_url("http://127.0.0.1:9/daily/point")
    }

    fn july_series(values: &[Option<f64>]) -> RawSeries {
        values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let date = NaiveDate::from_ymd_opt(2000 + i as i32, 7, 15).unwrap();
                (date, *value)
            })
            .collect()
    }

    fn daily_temperatures(days: i64) -> RawSeries {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        (0..days)
            .map(|offset| {
                let date = start + chrono::Duration::days(offset);
                let phase = 2.0 * std::f64::consts::PI * f64::from(date.ordinal()) / 365.25;
                let value = if offset % 50 == 0 {
                    Some(MISSING_SENTINEL)
                } else {
                    Some(15.0 - 8.0 * phase.cos())
                };
                (date, value)
            })
            .collect()
    }

    #[test]
    fn test_location_validation() {
        assert!(LatLon(90.0, -180.0).validate().is_ok());
        assert!(matches!(
            LatLon(91.0, 0.0).validate(),
            Err(LikelihoodError::InvalidLatitude(_))
        ));
        assert!(matches!(
            LatLon(0.0, 180.5).validate(),
            Err(LikelihoodError::InvalidLongitude(_))
        ));
        assert!(matches!(
            LatLon(f64::NAN, 0.0).validate(),
            Err(LikelihoodError::InvalidLatitude(_))
        ));
    }

    #[test]
    fn test_calendar_day_validation() {
        assert!(validate_calendar_day(2, 31).is_ok());
        assert!(matches!(
            validate_calendar_day(13, 1),
            Err(LikelihoodError::InvalidMonth(13))
        ));
        assert!(matches!(
            validate_calendar_day(1, 0),
            Err(LikelihoodError::InvalidDay(0))
        ));
    }

    #[test]
    fn test_climatology_report_metadata() {
        let data = HashMap::from([(
            WeatherVariable::Temperature,
            july_series(&[Some(30.0), Some(32.0), Some(28.0), Some(31.0)]),
        )]);
        let report = climatology_report(&data, LatLon(40.7, -74.0), 7, 15).unwrap();

        assert_eq!(report.metadata.query_date, "07/15");
        assert_eq!(report.metadata.data_source, "NASA POWER Project");
        assert_eq!(report.metadata.location.latitude, 40.7);
        let temperature = report.results.temperature.unwrap();
        assert_eq!(temperature.average_temp, 30.25);
        assert_eq!(temperature.years_of_data, "2000-2003");
    }

    #[test]
    fn test_climatology_report_without_results() {
        let data = HashMap::from([(
            WeatherVariable::Temperature,
            july_series(&[Some(30.0), None, Some(MISSING_SENTINEL)]),
        )]);
        assert!(matches!(
            climatology_report(&data, LatLon(0.0, 0.0), 7, 15),
            Err(LikelihoodError::NotEnoughData { month: 7, day: 15 })
        ));
        assert!(matches!(
            climatology_report(&HashMap::new(), LatLon(0.0, 0.0), 2, 30),
            Err(LikelihoodError::NotEnoughData { .. })
        ));
    }

    #[test]
    fn test_forecast_report() {
        let config = ForecastConfig::builder().n_trees(10).max_depth(6).build();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let report =
            forecast_report(&daily_temperatures(730), LatLon(52.0, 5.0), start, 7, &config)
                .unwrap();

        assert_eq!(report.forecast.len(), 7);
        assert_eq!(report.forecast[0].date, start);
        assert_eq!(report.unit, "°C");
        let accuracy = &report.model_accuracy;
        // 15 sentinel days are dropped before the split.
        assert_eq!(accuracy.training_samples + accuracy.test_samples, 715);
        assert_eq!(accuracy.test_samples, 143);
        assert_eq!(
            accuracy.training_period_start,
            NaiveDate::from_ymd_opt(2020, 1, 2).unwrap()
        );
        assert_eq!(
            accuracy.training_period_end,
            NaiveDate::from_ymd_opt(2021, 12, 30).unwrap()
        );
    }

    #[test]
    fn test_forecast_report_needs_history() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(matches!(
            forecast_report(
                &daily_temperatures(60),
                LatLon(52.0, 5.0),
                start,
                7,
                &ForecastConfig::default()
            ),
            Err(LikelihoodError::Forecast(ForecastError::InsufficientData {
                found: 58,
                required: 100
            }))
        ));
    }

    #[tokio::test]
    async fn test_analyze_validates_before_fetching() {
        let client = unreachable_client();
        let result = client
            .analyze()
            .location(LatLon(95.0, 0.0))
            .month(7)
            .day(15)
            .call()
            .await;
        assert!(matches!(result, Err(LikelihoodError::InvalidLatitude(_))));

        let result = client
            .analyze()
            .location(LatLon(10.0, 0.0))
            .month(0)
            .day(15)
            .call()
            .await;
        assert!(matches!(result, Err(LikelihoodError::InvalidMonth(0))));
    }

    #[tokio::test]
    async fn test_forecast_validates_horizon_before_fetching() {
        let result = unreachable_client()
            .forecast()
            .location(LatLon(10.0, 0.0))
            .start_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .horizon_days(15)
            .call()
            .await;
        assert!(matches!(
            result,
            Err(LikelihoodError::Forecast(ForecastError::InvalidHorizon(15)))
        ));
    }

    #[tokio::test]
    async fn test_provider_failure_surfaces() {
        let result = unreachable_client()
            .analyze()
            .location(LatLon(10.0, 0.0))
            .month(7)
            .day(15)
            .call()
            .await;
        assert!(matches!(result, Err(LikelihoodError::Power(_))));
    }
}
