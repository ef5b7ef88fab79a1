//! Percentile thresholds, central tendency and exceedance probabilities for a
//! [`DailySample`].

use crate::climatology::aggregator::DailySample;
use crate::types::report::{ClimatologyResult, PrecipitationResult, WindResult};
use ordered_float::OrderedFloat;

/// Rounds `value` to `decimals` decimal places.
///
/// Rounding is decided on the exact binary value, and an exact tie goes to the even
/// digit, so `6.25` becomes `6.2` while `2.675` (stored just below the tie) becomes
/// `2.67`.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, value)
        .parse()
        .unwrap_or(value)
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by_key(|v| OrderedFloat(*v));
    sorted
}

/// Percentile of already sorted values using linear interpolation between closest ranks.
///
/// The rank of percentile `q` (0..=100) is `q / 100 * (n - 1)`; this is the default
/// method of common numeric libraries. Returns `NaN` for an empty slice.
pub fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let rank = (q / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

/// Percentile of unsorted values. See [`percentile_sorted`].
pub fn percentile(values: &[f64], q: f64) -> f64 {
    percentile_sorted(&sorted(values), q)
}

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by `n`).
pub fn std_dev(values: &[f64]) -> f64 {
    let m = mean(values);
    (values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
}

/// Share of `values` satisfying `predicate`, as a percentage rounded to one decimal.
fn probability(values: &[f64], predicate: impl Fn(f64) -> bool) -> f64 {
    let hits = values.iter().filter(|v| predicate(**v)).count();
    round_to(hits as f64 / values.len() as f64 * 100.0, 1)
}

/// Full temperature climatology for one calendar day.
///
/// Exceedance probabilities compare each observation against the *rounded* thresholds
/// reported in the result, so a reader can reproduce them from the output alone.
///
/// The sample must be non-empty; [`crate::DayOfYearAggregator`] guarantees this.
pub fn temperature_climatology(sample: &DailySample) -> ClimatologyResult {
    let values = &sample.values;
    let sorted = sorted(values);

    let very_cold_threshold = round_to(percentile_sorted(&sorted, 10.0), 2);
    let cold_threshold = round_to(percentile_sorted(&sorted, 25.0), 2);
    let hot_threshold = round_to(percentile_sorted(&sorted, 75.0), 2);
    let very_hot_threshold = round_to(percentile_sorted(&sorted, 90.0), 2);

    ClimatologyResult {
        very_cold_threshold,
        cold_threshold,
        hot_threshold,
        very_hot_threshold,
        average_temp: round_to(mean(values), 2),
        median_temp: round_to(percentile_sorted(&sorted, 50.0), 2),
        min_temp: round_to(sorted[0], 2),
        max_temp: round_to(sorted[sorted.len() - 1], 2),
        data_points: values.len(),
        unit: sample.variable.unit(),
        date_analyzed: format!("{:02}/{:02}", sample.month, sample.day),
        years_of_data: format!("{}-{}", sample.year_span.0, sample.year_span.1),
        very_hot_probability: probability(values, |v| v >= very_hot_threshold),
        hot_probability: probability(values, |v| v >= hot_threshold),
        cold_probability: probability(values, |v| v <= cold_threshold),
        very_cold_probability: probability(values, |v| v <= very_cold_threshold),
    }
}

/// Precipitation climatology: wet-side thresholds plus the share of dry days.
pub fn precipitation_climatology(sample: &DailySample) -> PrecipitationResult {
    let values = &sample.values;
    let sorted = sorted(values);
    let very_wet = percentile_sorted(&sorted, 90.0);

    PrecipitationResult {
        average_precip: round_to(mean(values), 2),
        very_wet_threshold: round_to(very_wet, 2),
        wet_threshold: round_to(percentile_sorted(&sorted, 75.0), 2),
        dry_days_percentage: probability(values, |v| v == 0.0),
        very_wet_probability: probability(values, |v| v >= very_wet),
        unit: sample.variable.unit(),
        data_points: values.len(),
    }
}

/// Wind climatology. Wind has no calm-side thresholds.
pub fn wind_climatology(sample: &DailySample) -> WindResult {
    let values = &sample.values;
    let sorted = sorted(values);
    let very_windy = percentile_sorted(&sorted, 90.0);

    WindResult {
        average_wind: round_to(mean(values), 2),
        very_windy_threshold: round_to(very_windy, 2),
        windy_threshold: round_to(percentile_sorted(&sorted, 75.0), 2),
        very_windy_probability: probability(values, |v| v >= very_windy),
        unit: sample.variable.unit(),
        data_points: values.len(),
    }
}
