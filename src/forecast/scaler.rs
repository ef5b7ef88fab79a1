use crate::forecast::error::ForecastError;
use crate::forecast::features::{FeatureVector, FEATURE_COUNT};

/// Per-feature standardisation: `(x - mean) / std`.
///
/// Fitted on the training partition only and then applied unchanged to every other
/// input. A feature with zero variance keeps a scale of `1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    means: [f64; FEATURE_COUNT],
    scales: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    /// # Errors
    ///
    /// Returns [`ForecastError::TrainingFailed`] if `rows` is empty.
    pub fn fit(rows: &[FeatureVector]) -> Result<Self, ForecastError> {
        if rows.is_empty() {
            return Err(ForecastError::TrainingFailed(
                "cannot fit scaler on an empty partition".to_string(),
            ));
        }
        let n = rows.len() as f64;
        let mut means = [0.0; FEATURE_COUNT];
        let mut scales = [1.0; FEATURE_COUNT];

        for feature in 0..FEATURE_COUNT {
            let mean = rows.iter().map(|r| r.get(feature)).sum::<f64>() / n;
            let variance = rows
                .iter()
                .map(|r| (r.get(feature) - mean).powi(2))
                .sum::<f64>()
                / n;
            let std = variance.sqrt();
            means[feature] = mean;
            if std > f64::EPSILON {
                scales[feature] = std;
            }
        }

        Ok(Self { means, scales })
    }

    pub fn transform(&self, row: &FeatureVector) -> FeatureVector {
        let mut scaled = row.0;
        for (feature, value) in scaled.iter_mut().enumerate() {
            *value = (*value - self.means[feature]) / self.scales[feature];
        }
        FeatureVector(scaled)
    }

    pub fn transform_all(&self, rows: &[FeatureVector]) -> Vec<FeatureVector> {
        rows.iter().map(|row| self.transform(row)).collect()
    }
}
