//! Result records returned by the analyze and forecast capabilities.
//!
//! Field names are the JSON keys the web front end consumes, so they are kept stable.

use crate::LatLon;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Percentile climatology for temperature on one calendar day.
///
/// Thresholds are rounded to two decimals; probabilities are percentages rounded to one
/// decimal and are computed against the rounded thresholds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimatologyResult {
    pub very_cold_threshold: f64,
    pub cold_threshold: f64,
    pub hot_threshold: f64,
    pub very_hot_threshold: f64,
    pub average_temp: f64,
    pub median_temp: f64,
    pub min_temp: f64,
    pub max_temp: f64,
    pub data_points: usize,
    pub unit: &'static str,
    /// `MM/DD` of the analysed day.
    pub date_analyzed: String,
    /// `"<first year>-<last year>"` of the series the sample was drawn from.
    pub years_of_data: String,
    pub very_hot_probability: f64,
    pub hot_probability: f64,
    pub cold_probability: f64,
    pub very_cold_probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrecipitationResult {
    pub average_precip: f64,
    pub very_wet_threshold: f64,
    pub wet_threshold: f64,
    /// Share of the sample with exactly zero precipitation, in percent.
    pub dry_days_percentage: f64,
    pub very_wet_probability: f64,
    pub unit: &'static str,
    pub data_points: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindResult {
    pub average_wind: f64,
    pub very_windy_threshold: f64,
    pub windy_threshold: f64,
    pub very_windy_probability: f64,
    pub unit: &'static str,
    pub data_points: usize,
}

/// Per-variable results for one calendar day. A variable that was absent from the
/// provider response, or had too few observations, is `None` and omitted from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VariableResults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<ClimatologyResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<PrecipitationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind: Option<WindResult>,
}

impl VariableResults {
    /// `true` when no variable produced a usable result.
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.precipitation.is_none() && self.wind.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<LatLon> for Location {
    fn from(value: LatLon) -> Self {
        Self {
            latitude: value.0,
            longitude: value.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMetadata {
    pub location: Location,
    pub query_date: String,
    pub data_source: &'static str,
    pub api_url: &'static str,
    pub analysis_timestamp: DateTime<Utc>,
    pub methodology: &'static str,
}

/// Full response of the analyze capability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimatologyReport {
    #[serde(flatten)]
    pub results: VariableResults,
    pub metadata: ReportMetadata,
}

/// One forecast day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted_temp: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// Days since the forecast start date, starting at 0.
    pub day_offset: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelAccuracy {
    /// Mean absolute error on the held-out partition, in °C.
    pub mean_absolute_error: f64,
    pub training_samples: usize,
    pub test_samples: usize,
    pub training_period_start: NaiveDate,
    pub training_period_end: NaiveDate,
}

/// Full response of the forecast capability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastReport {
    pub location: Location,
    pub unit: &'static str,
    pub forecast: Vec<ForecastPoint>,
    pub model_accuracy: ModelAccuracy,
}
