//! Runs the per-variable climatology for every variable present in a provider response.

use crate::climatology::aggregator::{DailySample, DayOfYearAggregator};
use crate::climatology::cleaner::clean;
use crate::climatology::error::ClimatologyError;
use crate::climatology::statistics::{
    precipitation_climatology, temperature_climatology, wind_climatology,
};
use crate::types::report::VariableResults;
use crate::types::series::RawSeries;
use crate::types::variable::WeatherVariable;
use log::warn;
use std::collections::HashMap;

/// Combines cleaning, day-of-year aggregation and statistics for temperature,
/// precipitation and wind.
///
/// Each variable is processed independently with its own missing-value policy; a
/// variable that is absent or has too few observations is left out of the result
/// without affecting the others.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use weather_likelihood::{MultiParameterAnalyzer, RawSeries, WeatherVariable};
///
/// let temperature = RawSeries::from_date_keys([
///     ("20200715", Some(30.0)),
///     ("20210715", Some(32.0)),
///     ("20220715", Some(28.0)),
///     ("20230715", Some(31.0)),
/// ]).unwrap();
/// let data = HashMap::from([(WeatherVariable::Temperature, temperature)]);
///
/// let results = MultiParameterAnalyzer::default().analyze(&data, 7, 15).unwrap();
/// assert_eq!(results.temperature.unwrap().average_temp, 30.25);
/// assert!(results.precipitation.is_none());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiParameterAnalyzer {
    aggregator: DayOfYearAggregator,
}

impl MultiParameterAnalyzer {
    pub fn new(aggregator: DayOfYearAggregator) -> Self {
        Self { aggregator }
    }

    /// Daily sample for one variable, cleaned with that variable's sentinel policy.
    ///
    /// # Errors
    ///
    /// Propagates [`ClimatologyError`] from aggregation, notably
    /// [`ClimatologyError::InsufficientData`].
    pub fn daily_sample(
        &self,
        variable: WeatherVariable,
        raw: &RawSeries,
        month: u32,
        day: u32,
    ) -> Result<DailySample, ClimatologyError> {
        let cleaned = clean(raw, variable.sentinel_policy());
        self.aggregator.sample(&cleaned, variable, month, day)
    }

    /// Analyses every variable in `data` for `month`/`day`.
    ///
    /// Returns `None` when no variable yields a usable result; callers report this as
    /// "not enough data".
    pub fn analyze(
        &self,
        data: &HashMap<WeatherVariable, RawSeries>,
        month: u32,
        day: u32,
    ) -> Option<VariableResults> {
        let mut results = VariableResults::default();

        for variable in WeatherVariable::ALL {
            let Some(raw) = data.get(&variable) else {
                continue;
            };
            let sample = match self.daily_sample(variable, raw, month, day) {
                Ok(sample) => sample,
                Err(e) => {
                    warn!("Skipping {} analysis: {}", variable, e);
                    continue;
                }
            };
            match variable {
                WeatherVariable::Temperature => {
                    results.temperature = Some(temperature_climatology(&sample))
                }
                WeatherVariable::Precipitation => {
                    results.precipitation = Some(precipitation_climatology(&sample))
                }
                WeatherVariable::Wind => results.wind = Some(wind_climatology(&sample)),
            }
        }

        (!results.is_empty()).then_some(results)
    }
}
