//! Splits encoded history, fits the scaler and the ensemble, and measures held-out error.

use crate::forecast::config::ForecastConfig;
use crate::forecast::error::ForecastError;
use crate::forecast::features::{encode_features, FeatureVector, FEATURE_NAMES};
use crate::forecast::forest::RandomForestRegressor;
use crate::forecast::scaler::StandardScaler;
use crate::forecast::tree::TreeParams;
use crate::types::series::CleanSeries;
use crate::LatLon;
use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Parallel arrays of encoded features and observed temperatures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingSet {
    pub features: Vec<FeatureVector>,
    pub targets: Vec<f64>,
}

impl TrainingSet {
    /// Encodes every observation of `series` at `location`.
    pub fn from_series(series: &CleanSeries, location: LatLon) -> Self {
        let (features, targets) = series
            .iter()
            .map(|(date, value)| (encode_features(date, location), value))
            .unzip();
        Self { features, targets }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// A fitted scaler and ensemble together with their evaluation. Scoped to one request.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    scaler: StandardScaler,
    forest: RandomForestRegressor,
    pub train_mae: f64,
    /// Mean absolute error on the held-out partition; the reported accuracy.
    pub test_mae: f64,
    pub training_samples: usize,
    pub test_samples: usize,
}

impl TrainedModel {
    /// Scales `rows` with the training scaler and predicts with the ensemble.
    pub fn predict(&self, rows: &[FeatureVector]) -> Vec<f64> {
        self.forest.predict_all(&self.scaler.transform_all(rows))
    }
}

pub fn mean_absolute_error(predicted: &[f64], actual: &[f64]) -> f64 {
    predicted
        .iter()
        .zip(actual)
        .map(|(p, a)| (p - a).abs())
        .sum::<f64>()
        / actual.len() as f64
}

#[derive(Debug, Clone, Default)]
pub struct ForecastTrainer {
    config: ForecastConfig,
}

impl ForecastTrainer {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Seeded shuffle into (train, test) row indices. The test partition holds
    /// `ceil(n * test_fraction)` rows.
    fn split(&self, n: usize) -> (Vec<usize>, Vec<usize>) {
        let mut indices: Vec<usize> = (0..n).collect();
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        indices.shuffle(&mut rng);
        let n_test = (n as f64 * self.config.test_fraction).ceil() as usize;
        let train = indices.split_off(n_test);
        (train, indices)
    }

    fn validate(&self, set: &TrainingSet) -> Result<(), ForecastError> {
        if set.features.len() != set.targets.len() {
            return Err(ForecastError::TrainingFailed(format!(
                "{} feature rows but {} targets",
                set.features.len(),
                set.targets.len()
            )));
        }
        if set.len() < self.config.min_training_samples {
            return Err(ForecastError::InsufficientData {
                found: set.len(),
                required: self.config.min_training_samples,
            });
        }
        if !(self.config.test_fraction > 0.0 && self.config.test_fraction < 1.0) {
            return Err(ForecastError::TrainingFailed(format!(
                "test fraction {} is outside (0, 1)",
                self.config.test_fraction
            )));
        }
        if self.config.n_trees == 0 {
            return Err(ForecastError::TrainingFailed(
                "ensemble needs at least one tree".to_string(),
            ));
        }
        if let Some(row) = set.features.iter().position(|f| !f.is_finite()) {
            let feature = set.features[row]
                .0
                .iter()
                .position(|v| !v.is_finite())
                .unwrap_or_default();
            return Err(ForecastError::TrainingFailed(format!(
                "non-finite {} in row {}",
                FEATURE_NAMES[feature], row
            )));
        }
        if let Some(row) = set.targets.iter().position(|t| !t.is_finite()) {
            return Err(ForecastError::TrainingFailed(format!(
                "non-finite target in row {}",
                row
            )));
        }
        Ok(())
    }

    /// Trains a model on `set`.
    ///
    /// # Errors
    ///
    /// * [`ForecastError::InsufficientData`] if `set` has fewer rows than
    ///   `min_training_samples`; nothing is fitted in that case.
    /// * [`ForecastError::TrainingFailed`] for inconsistent input, non-finite values, an
    ///   unusable configuration or a degenerate partition.
    pub fn train(&self, set: &TrainingSet) -> Result<TrainedModel, ForecastError> {
        self.validate(set)?;

        let (train_rows, test_rows) = self.split(set.len());
        if train_rows.is_empty() || test_rows.is_empty() {
            return Err(ForecastError::TrainingFailed(format!(
                "split of {} rows left an empty partition",
                set.len()
            )));
        }

        let pick = |rows: &[usize]| -> (Vec<FeatureVector>, Vec<f64>) {
            rows.iter()
                .map(|&r| (set.features[r], set.targets[r]))
                .unzip()
        };
        let (train_x, train_y) = pick(&train_rows);
        let (test_x, test_y) = pick(&test_rows);

        let scaler = StandardScaler::fit(&train_x)?;
        let train_scaled = scaler.transform_all(&train_x);
        let test_scaled = scaler.transform_all(&test_x);

        let forest = RandomForestRegressor::fit(
            &train_scaled,
            &train_y,
            self.config.n_trees,
            TreeParams {
                max_depth: self.config.max_depth,
                min_samples_split: self.config.min_samples_split,
            },
            self.config.seed,
        );

        let train_mae = mean_absolute_error(&forest.predict_all(&train_scaled), &train_y);
        let test_mae = mean_absolute_error(&forest.predict_all(&test_scaled), &test_y);
        info!(
            "Trained {} trees on {} rows: train MAE {:.3}, test MAE {:.3} ({} held out)",
            forest.n_trees(),
            train_rows.len(),
            train_mae,
            test_mae,
            test_rows.len()
        );

        Ok(TrainedModel {
            scaler,
            forest,
            train_mae,
            test_mae,
            training_samples: train_rows.len(),
            test_samples: test_rows.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    fn seasonal_series(days: i64) -> CleanSeries {
        let start = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
        (0..days)
            .map(|offset| {
                let date = start + chrono::Duration::days(offset);
                let phase = 2.0 * std::f64::consts::PI * f64::from(date.ordinal()) / 365.25;
                (date, 12.0 - 10.0 * phase.cos() + f64::from(date.day() % 3) * 0.1)
            })
            .collect()
    }

    fn small_config() -> ForecastConfig {
        ForecastConfig::builder().n_trees(15).max_depth(6).build()
    }

    #[test]
    fn test_insufficient_data_is_not_fitted() {
        let set = TrainingSet::from_series(&seasonal_series(50), LatLon(40.0, -74.0));
        assert_eq!(set.len(), 50);
        let result = ForecastTrainer::default().train(&set);
        assert!(matches!(
            result,
            Err(ForecastError::InsufficientData {
                found: 50,
                required: 100
            })
        ));
    }

    #[test]
    fn test_split_is_80_20() {
        let trainer = ForecastTrainer::default();
        let (train, test) = trainer.split(101);
        assert_eq!(test.len(), 21);
        assert_eq!(train.len(), 80);
        let mut all: Vec<usize> = train.iter().chain(test.iter()).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..101).collect::<Vec<_>>());
    }

    #[test]
    fn test_training_is_reproducible() {
        let set = TrainingSet::from_series(&seasonal_series(400), LatLon(40.0, -74.0));
        let trainer = ForecastTrainer::new(small_config());
        let a = trainer.train(&set).unwrap();
        let b = trainer.train(&set).unwrap();
        assert_eq!(a.test_mae, b.test_mae);
        assert_eq!(a.train_mae, b.train_mae);
        assert_eq!(a.training_samples, 320);
        assert_eq!(a.test_samples, 80);
    }

    #[test]
    fn test_learns_seasonal_cycle() {
        let set = TrainingSet::from_series(&seasonal_series(3 * 365), LatLon(40.0, -74.0));
        let model = ForecastTrainer::new(small_config()).train(&set).unwrap();
        assert!(model.test_mae < 1.5, "test MAE {}", model.test_mae);
    }

    #[test]
    fn test_mismatched_lengths_fail() {
        let mut set = TrainingSet::from_series(&seasonal_series(150), LatLon(0.0, 0.0));
        set.targets.pop();
        assert!(matches!(
            ForecastTrainer::default().train(&set),
            Err(ForecastError::TrainingFailed(_))
        ));
    }

    #[test]
    fn test_non_finite_target_fails() {
        let mut set = TrainingSet::from_series(&seasonal_series(150), LatLon(0.0, 0.0));
        set.targets[7] = f64::NAN;
        assert!(matches!(
            ForecastTrainer::default().train(&set),
            Err(ForecastError::TrainingFailed(_))
        ));
    }

    #[test]
    fn test_non_finite_feature_is_named() {
        let mut set = TrainingSet::from_series(&seasonal_series(150), LatLon(0.0, 0.0));
        set.features[12].0[4] = f64::INFINITY;
        match ForecastTrainer::default().train(&set) {
            Err(ForecastError::TrainingFailed(message)) => {
                assert_eq!(message, "non-finite latitude_norm in row 12");
            }
            other => panic!("unexpected result: {:?}", other.map(|m| m.test_mae)),
        }
    }
}
