use crate::power::error::PowerError;
use crate::types::series::RawSeries;
use crate::types::variable::WeatherVariable;
use log::{debug, warn};
use serde::Deserialize;
use std::collections::HashMap;

/// Date key (`YYYYMMDD`) to value, `null` when the provider has no observation.
pub type ParameterValues = HashMap<String, Option<f64>>;

/// The part of a daily point response this crate reads. Everything else in the
/// document (header, geometry, messages) is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PowerResponse {
    #[serde(default)]
    pub properties: Option<PowerProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PowerProperties {
    #[serde(default)]
    pub parameter: Option<HashMap<String, ParameterValues>>,
}

impl PowerResponse {
    /// Converts the parameter block into one [`RawSeries`] per known variable.
    ///
    /// Unknown parameter codes are ignored. A series with an unparseable date key is
    /// dropped with a warning, leaving the other variables intact.
    ///
    /// # Errors
    ///
    /// Returns [`PowerError::NoData`] when the response has no parameter block or an
    /// empty one.
    pub fn into_series(self) -> Result<HashMap<WeatherVariable, RawSeries>, PowerError> {
        let parameters = self
            .properties
            .and_then(|properties| properties.parameter)
            .filter(|parameters| !parameters.is_empty())
            .ok_or(PowerError::NoData)?;

        let mut series = HashMap::new();
        for (code, values) in parameters {
            let Some(variable) = WeatherVariable::from_parameter_code(&code) else {
                debug!("Ignoring unknown parameter {}", code);
                continue;
            };
            match RawSeries::from_date_keys(values) {
                Ok(raw) => {
                    debug!("Parsed {} observations for {}", raw.len(), variable);
                    series.insert(variable, raw);
                }
                Err(e) => warn!("Dropping {} series: {}", variable, e),
            }
        }
        Ok(series)
    }
}
