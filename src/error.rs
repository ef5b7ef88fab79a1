use crate::climatology::error::ClimatologyError;
use crate::forecast::error::ForecastError;
use crate::power::error::PowerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LikelihoodError {
    #[error(transparent)]
    Power(#[from] PowerError),

    #[error(transparent)]
    Climatology(#[from] ClimatologyError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error("Latitude must be between -90 and 90, got {0}")]
    InvalidLatitude(f64),

    #[error("Longitude must be between -180 and 180, got {0}")]
    InvalidLongitude(f64),

    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),

    #[error("Day must be between 1 and 31, got {0}")]
    InvalidDay(u32),

    #[error("Not enough historical data for {month:02}/{day:02}")]
    NotEnoughData { month: u32, day: u32 },
}
