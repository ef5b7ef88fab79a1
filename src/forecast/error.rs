use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Not enough historical data to train a forecast model: found {found}, need at least {required}")]
    InsufficientData { found: usize, required: usize },

    #[error("Forecast horizon must be between 1 and 14 days, got {0}")]
    InvalidHorizon(usize),

    #[error("Model training failed: {0}")]
    TrainingFailed(String),
}
