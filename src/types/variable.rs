//! Defines the physical variables this crate analyses and how each one maps onto
//! the NASA POWER daily point API.

use std::fmt;

/// Numeric value the NASA POWER API reports when no observation is available.
pub const MISSING_SENTINEL: f64 = -999.0;

/// How a variable treats sentinel (missing) observations before aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentinelPolicy {
    /// Missing observations are removed from the series.
    Drop,
    /// Missing observations are replaced by `0.0` (e.g. "no rain recorded").
    ZeroFill,
}

/// A physical weather variable that can be requested from the provider and analysed.
///
/// Each variable has a fixed unit, a provider parameter code and its own policy for
/// missing values. The policies differ per variable: precipitation
/// treats a missing day as a dry day, while temperature and wind treat it as unknown.
///
/// # Examples
///
/// ```
/// use weather_likelihood::WeatherVariable;
///
/// assert_eq!(WeatherVariable::Temperature.parameter_code(), "T2M");
/// assert_eq!(WeatherVariable::Wind.to_string(), "wind");
/// assert_eq!(WeatherVariable::from_parameter_code("PRECTOTCORR"), Some(WeatherVariable::Precipitation));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WeatherVariable {
    /// Air temperature at 2 metres, daily mean, in degrees Celsius.
    Temperature,
    /// Bias-corrected total precipitation, in millimetres per day.
    Precipitation,
    /// Wind speed at 2 metres, daily mean, in metres per second.
    Wind,
}

impl WeatherVariable {
    /// All variables, in the order they are reported.
    pub const ALL: [WeatherVariable; 3] = [
        WeatherVariable::Temperature,
        WeatherVariable::Precipitation,
        WeatherVariable::Wind,
    ];

    /// Label used as the key of this variable's block in an analysis report.
    pub fn label(&self) -> &'static str {
        match self {
            WeatherVariable::Temperature => "temperature",
            WeatherVariable::Precipitation => "precipitation",
            WeatherVariable::Wind => "wind",
        }
    }

    /// NASA POWER parameter code for this variable.
    pub fn parameter_code(&self) -> &'static str {
        match self {
            WeatherVariable::Temperature => "T2M",
            WeatherVariable::Precipitation => "PRECTOTCORR",
            WeatherVariable::Wind => "WS2M",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            WeatherVariable::Temperature => "°C",
            WeatherVariable::Precipitation => "mm/day",
            WeatherVariable::Wind => "m/s",
        }
    }

    pub fn sentinel_policy(&self) -> SentinelPolicy {
        match self {
            WeatherVariable::Precipitation => SentinelPolicy::ZeroFill,
            WeatherVariable::Temperature | WeatherVariable::Wind => SentinelPolicy::Drop,
        }
    }

    /// Resolves a provider parameter code back to a variable. Unknown codes yield `None`.
    pub fn from_parameter_code(code: &str) -> Option<WeatherVariable> {
        Self::ALL.into_iter().find(|v| v.parameter_code() == code)
    }
}

impl fmt::Display for WeatherVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
