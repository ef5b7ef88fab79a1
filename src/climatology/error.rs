use crate::types::variable::WeatherVariable;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimatologyError {
    #[error("Not enough {variable} data for {month:02}/{day:02}: found {found}, need at least {required}")]
    InsufficientData {
        variable: WeatherVariable,
        month: u32,
        day: u32,
        found: usize,
        required: usize,
    },

    #[error("Date key '{0}' is not a valid YYYYMMDD calendar date")]
    MalformedDate(String),

    #[error("Failed processing day-of-year frame")]
    Frame(#[from] PolarsError),
}
