mod climatology;
mod error;
mod forecast;
mod likelihood;
mod power;
mod types;

pub use error::LikelihoodError;
pub use likelihood::*;

pub use climatology::aggregator::{DailySample, DayOfYearAggregator, DEFAULT_MIN_SAMPLES};
pub use climatology::analyzer::MultiParameterAnalyzer;
pub use climatology::cleaner::{clean, drop_missing, zero_fill_missing};
pub use climatology::error::ClimatologyError;
pub use climatology::statistics::{
    mean, percentile, precipitation_climatology, round_to, std_dev, temperature_climatology,
    wind_climatology,
};

pub use forecast::config::ForecastConfig;
pub use forecast::error::ForecastError;
pub use forecast::features::{encode_features, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use forecast::generator::{ForecastGenerator, MAX_HORIZON_DAYS};
pub use forecast::trainer::{ForecastTrainer, TrainedModel, TrainingSet};

pub use power::client::{default_period_end, default_period_start, PowerClient};
pub use power::error::PowerError;
pub use power::response::{ParameterValues, PowerProperties, PowerResponse};

pub use types::report::*;
pub use types::series::{CleanSeries, RawSeries};
pub use types::variable::{SentinelPolicy, WeatherVariable, MISSING_SENTINEL};
