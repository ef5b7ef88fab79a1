//! Selects the historical observations that fall on one calendar day across all years.

use crate::climatology::error::ClimatologyError;
use crate::types::series::CleanSeries;
use crate::types::variable::WeatherVariable;
use chrono::NaiveDate;
use log::debug;
use polars::prelude::*;

/// Minimum number of years with an observation before a day is analysed.
pub const DEFAULT_MIN_SAMPLES: usize = 3;

/// Observations of one variable on the same month/day across years, in year order.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySample {
    pub variable: WeatherVariable,
    pub month: u32,
    pub day: u32,
    pub values: Vec<f64>,
    /// First and last year of the series the sample was drawn from.
    pub year_span: (i32, i32),
}

impl DailySample {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Builds [`DailySample`]s from a cleaned series.
///
/// Matching is an exact month/day comparison. A day that does not exist in some year
/// (29 February outside leap years, 31 April) simply contributes nothing for that year.
#[derive(Debug, Clone, Copy)]
pub struct DayOfYearAggregator {
    min_samples: usize,
}

impl Default for DayOfYearAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SAMPLES)
    }
}

impl DayOfYearAggregator {
    /// A minimum below one is raised to one; an empty sample is never returned.
    pub fn new(min_samples: usize) -> Self {
        Self {
            min_samples: min_samples.max(1),
        }
    }

    pub fn min_samples(&self) -> usize {
        self.min_samples
    }

    /// Collects every value in `series` dated on `month`/`day`.
    ///
    /// # Errors
    ///
    /// Returns [`ClimatologyError::InsufficientData`] if fewer than the configured minimum
    /// number of observations match (including when `series` is empty), and
    /// [`ClimatologyError::Frame`] if the underlying frame operation fails.
    pub fn sample(
        &self,
        series: &CleanSeries,
        variable: WeatherVariable,
        month: u32,
        day: u32,
    ) -> Result<DailySample, ClimatologyError> {
        let insufficient = |found| ClimatologyError::InsufficientData {
            variable,
            month,
            day,
            found,
            required: self.min_samples,
        };

        let Some(year_span) = series.year_span() else {
            return Err(insufficient(0));
        };

        let values = day_of_year_values(series, month, day)?;
        debug!(
            "{} observations of {} on {:02}/{:02}",
            values.len(),
            variable,
            month,
            day
        );

        if values.len() < self.min_samples {
            return Err(insufficient(values.len()));
        }

        Ok(DailySample {
            variable,
            month,
            day,
            values,
            year_span,
        })
    }
}

fn series_to_frame(series: &CleanSeries) -> PolarsResult<DataFrame> {
    let (dates, values): (Vec<NaiveDate>, Vec<f64>) = series.iter().unzip();
    df!(
        "date" => dates,
        "value" => values
    )
}

fn day_of_year_values(series: &CleanSeries, month: u32, day: u32) -> PolarsResult<Vec<f64>> {
    let daily = series_to_frame(series)?
        .lazy()
        .filter(
            col("date")
                .dt()
                .month()
                .cast(DataType::UInt32)
                .eq(lit(month))
                .and(col("date").dt().day().cast(DataType::UInt32).eq(lit(day))),
        )
        .select([col("value")])
        .collect()?;

    Ok(daily.column("value")?.f64()?.into_no_null_iter().collect())
}
