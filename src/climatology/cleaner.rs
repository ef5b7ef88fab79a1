//! Removes or substitutes missing observations in a provider series.

use crate::types::series::{CleanSeries, RawSeries};
use crate::types::variable::{SentinelPolicy, MISSING_SENTINEL};

fn is_missing(value: Option<f64>) -> bool {
    match value {
        Some(v) => v == MISSING_SENTINEL || !v.is_finite(),
        None => true,
    }
}

/// Drops every missing observation (`null`, the sentinel, or a non-finite number).
///
/// Never fails: a series where everything is missing becomes an empty [`CleanSeries`],
/// which the aggregation stage reports as insufficient data.
pub fn drop_missing(raw: &RawSeries) -> CleanSeries {
    raw.iter()
        .filter(|(_, value)| !is_missing(*value))
        .filter_map(|(date, value)| value.map(|v| (date, v)))
        .collect()
}

/// Replaces every missing observation with `0.0`, keeping the date.
pub fn zero_fill_missing(raw: &RawSeries) -> CleanSeries {
    raw.iter()
        .map(|(date, value)| match value {
            Some(v) if !is_missing(Some(v)) => (date, v),
            _ => (date, 0.0),
        })
        .collect()
}

/// Cleans `raw` according to a variable's [`SentinelPolicy`].
pub fn clean(raw: &RawSeries, policy: SentinelPolicy) -> CleanSeries {
    match policy {
        SentinelPolicy::Drop => drop_missing(raw),
        SentinelPolicy::ZeroFill => zero_fill_missing(raw),
    }
}
