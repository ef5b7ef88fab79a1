//! Encodes a date and a location into the numeric features the forecast model uses.

use crate::LatLon;
use chrono::{Datelike, NaiveDate};
use std::f64::consts::PI;

/// Year length used for the day-of-year cycle, so leap years do not cause a jump.
pub const YEAR_LENGTH_DAYS: f64 = 365.25;

pub const FEATURE_COUNT: usize = 10;

pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "day_of_year_sin",
    "day_of_year_cos",
    "month_sin",
    "month_cos",
    "latitude_norm",
    "longitude_norm",
    "distance_from_equator",
    "is_coastal",
    "month",
    "day",
];

/// Fixed-length feature vector for one date at one location. Order matches
/// [`FEATURE_NAMES`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn get(&self, feature: usize) -> f64 {
        self.0[feature]
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

/// Crude coastal indicator: away from the prime meridian band and outside polar latitudes.
fn coastal_indicator(location: LatLon) -> f64 {
    if location.1.abs() > 10.0 && location.0.abs() < 60.0 {
        1.0
    } else {
        0.0
    }
}

/// Encodes `date` at `location`.
///
/// Day of year and month are encoded as sine/cosine pairs so that 31 December and
/// 1 January end up close together. Latitude and longitude are scaled into [-1, 1].
/// The result is a pure function of the inputs.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use weather_likelihood::{encode_features, LatLon, FEATURE_NAMES};
///
/// let date = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
/// let features = encode_features(date, LatLon(45.0, -90.0));
/// assert_eq!(FEATURE_NAMES[4], "latitude_norm");
/// assert_eq!(features.0[4], 0.5); // latitude / 90
/// assert_eq!(features.0[5], -0.5); // longitude / 180
/// assert_eq!(features.0[8], 7.0);
/// ```
pub fn encode_features(date: NaiveDate, location: LatLon) -> FeatureVector {
    let day_angle = 2.0 * PI * f64::from(date.ordinal()) / YEAR_LENGTH_DAYS;
    let month_angle = 2.0 * PI * f64::from(date.month()) / 12.0;

    FeatureVector([
        day_angle.sin(),
        day_angle.cos(),
        month_angle.sin(),
        month_angle.cos(),
        location.0 / 90.0,
        location.1 / 180.0,
        location.0.abs() / 90.0,
        coastal_indicator(location),
        f64::from(date.month()),
        f64::from(date.day()),
    ])
}
