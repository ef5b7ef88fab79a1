//! Date-keyed observation series as delivered by the provider (`RawSeries`) and after
//! missing values have been removed or substituted (`CleanSeries`).

use crate::climatology::error::ClimatologyError;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Format of the provider's date keys, e.g. `20230715`.
pub const DATE_KEY_FORMAT: &str = "%Y%m%d";

/// Parses an 8-digit `YYYYMMDD` key into a calendar date.
///
/// # Errors
///
/// Returns [`ClimatologyError::MalformedDate`] if the key is not exactly eight ASCII
/// digits or does not denote a real calendar date (e.g. `20230230`).
pub fn parse_date_key(key: &str) -> Result<NaiveDate, ClimatologyError> {
    if key.len() != 8 || !key.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ClimatologyError::MalformedDate(key.to_string()));
    }
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT)
        .map_err(|_| ClimatologyError::MalformedDate(key.to_string()))
}

/// A provider time series: one optional observation per calendar date.
///
/// `None` means the provider returned `null` for that date. The sentinel value
/// ([`crate::MISSING_SENTINEL`]) is kept as-is until cleaning, because what it means
/// depends on the variable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSeries {
    observations: BTreeMap<NaiveDate, Option<f64>>,
}

impl RawSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a series from `YYYYMMDD` keyed entries, the shape the provider returns.
    ///
    /// # Errors
    ///
    /// Returns [`ClimatologyError::MalformedDate`] for the first key that fails to parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use weather_likelihood::RawSeries;
    ///
    /// let raw = RawSeries::from_date_keys([("20230715", Some(30.1)), ("20230716", None)]).unwrap();
    /// assert_eq!(raw.len(), 2);
    /// assert!(RawSeries::from_date_keys([("2023-07-15", Some(1.0))]).is_err());
    /// ```
    pub fn from_date_keys<I, K>(entries: I) -> Result<Self, ClimatologyError>
    where
        I: IntoIterator<Item = (K, Option<f64>)>,
        K: AsRef<str>,
    {
        let observations = entries
            .into_iter()
            .map(|(key, value)| parse_date_key(key.as_ref()).map(|date| (date, value)))
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        Ok(Self { observations })
    }

    pub fn insert(&mut self, date: NaiveDate, value: Option<f64>) {
        self.observations.insert(date, value);
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Iterates observations in date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, Option<f64>)> + '_ {
        self.observations.iter().map(|(date, value)| (*date, *value))
    }
}

impl FromIterator<(NaiveDate, Option<f64>)> for RawSeries {
    fn from_iter<T: IntoIterator<Item = (NaiveDate, Option<f64>)>>(iter: T) -> Self {
        Self {
            observations: iter.into_iter().collect(),
        }
    }
}

/// A series with every value present and finite, ordered by date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanSeries {
    values: BTreeMap<NaiveDate, f64>,
}

impl CleanSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.values.get(&date).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.values.iter().map(|(date, value)| (*date, *value))
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.values.keys().copied()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.values.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.values.keys().next_back().copied()
    }

    /// First and last calendar year present in the series.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        Some((self.first_date()?.year(), self.last_date()?.year()))
    }
}

impl FromIterator<(NaiveDate, f64)> for CleanSeries {
    fn from_iter<T: IntoIterator<Item = (NaiveDate, f64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
