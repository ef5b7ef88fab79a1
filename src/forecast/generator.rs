//! Applies a trained model to consecutive future dates.

use crate::climatology::statistics::{round_to, std_dev};
use crate::forecast::error::ForecastError;
use crate::forecast::features::{encode_features, FeatureVector};
use crate::forecast::trainer::TrainedModel;
use crate::types::report::ForecastPoint;
use crate::LatLon;
use chrono::NaiveDate;
use log::info;

pub const MAX_HORIZON_DAYS: usize = 14;

/// Produces day-by-day point forecasts with a symmetric band.
///
/// The band is not a prediction interval. Its half-width is the standard deviation of
/// the predictions within the batch, multiplied by `uncertainty_scale`, and it is the
/// same for every point of the batch.
#[derive(Debug, Clone, Copy)]
pub struct ForecastGenerator {
    uncertainty_scale: f64,
}

impl Default for ForecastGenerator {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl ForecastGenerator {
    pub fn new(uncertainty_scale: f64) -> Self {
        Self { uncertainty_scale }
    }

    /// Forecasts `horizon` consecutive days starting at (and including) `start`.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InvalidHorizon`] unless `1 <= horizon <= 14`.
    pub fn generate(
        &self,
        model: &TrainedModel,
        location: LatLon,
        start: NaiveDate,
        horizon: usize,
    ) -> Result<Vec<ForecastPoint>, ForecastError> {
        if !(1..=MAX_HORIZON_DAYS).contains(&horizon) {
            return Err(ForecastError::InvalidHorizon(horizon));
        }

        let dates: Vec<NaiveDate> = start.iter_days().take(horizon).collect();
        let rows: Vec<FeatureVector> = dates
            .iter()
            .map(|date| encode_features(*date, location))
            .collect();
        let predictions = model.predict(&rows);
        let half_width = std_dev(&predictions) * self.uncertainty_scale;

        info!(
            "Forecast {} days from {} (band ±{:.2})",
            horizon, start, half_width
        );

        Ok(dates
            .into_iter()
            .zip(predictions)
            .enumerate()
            .map(|(day_offset, (date, predicted))| ForecastPoint {
                date,
                predicted_temp: round_to(predicted, 2),
                lower_bound: round_to(predicted - half_width, 2),
                upper_bound: round_to(predicted + half_width, 2),
                day_offset,
            })
            .collect())
    }
}
