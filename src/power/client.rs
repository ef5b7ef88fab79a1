use crate::power::error::PowerError;
use crate::power::response::PowerResponse;
use crate::types::series::{RawSeries, DATE_KEY_FORMAT};
use crate::types::variable::WeatherVariable;
use crate::LatLon;
use chrono::NaiveDate;
use log::{info, warn};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://power.larc.nasa.gov/api/temporal/daily/point";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const COMMUNITY: &str = "RE";

/// First day of the default historical period.
pub fn default_period_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(1995, 1, 1).unwrap_or_default()
}

/// Last day of the default historical period.
pub fn default_period_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 12, 31).unwrap_or_default()
}

/// Fetches daily point series from NASA POWER.
///
/// One call fetches several variables for one location. There is no retry and no
/// caching; every call goes to the provider.
#[derive(Debug, Clone)]
pub struct PowerClient {
    client: Client,
    base_url: String,
}

impl Default for PowerClient {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

impl PowerClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points the client at a mirror of the daily point endpoint.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Query string of a daily point request. Variables keep the order given.
    pub fn query(
        location: LatLon,
        variables: &[WeatherVariable],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<(&'static str, String)> {
        let parameters = variables
            .iter()
            .map(|variable| variable.parameter_code())
            .collect::<Vec<_>>()
            .join(",");
        vec![
            ("parameters", parameters),
            ("community", COMMUNITY.to_string()),
            ("longitude", location.1.to_string()),
            ("latitude", location.0.to_string()),
            ("start", start.format(DATE_KEY_FORMAT).to_string()),
            ("end", end.format(DATE_KEY_FORMAT).to_string()),
            ("format", "JSON".to_string()),
        ]
    }

    /// Downloads `variables` at `location` for every day in `start..=end`.
    ///
    /// # Errors
    ///
    /// * [`PowerError::NetworkRequest`] if the request cannot be sent or times out.
    /// * [`PowerError::HttpStatus`] for a non-success status code.
    /// * [`PowerError::JsonParse`] if the body is not a valid response document.
    /// * [`PowerError::NoData`] if the response has no parameter data.
    pub async fn daily_point(
        &self,
        location: LatLon,
        variables: &[WeatherVariable],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HashMap<WeatherVariable, RawSeries>, PowerError> {
        let request = self
            .client
            .get(&self.base_url)
            .query(&Self::query(location, variables, start, end))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PowerError::NetworkRequest(self.base_url.clone(), e))?;
        let url = request.url().to_string();
        info!("Requesting daily point data from {}", url);

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| PowerError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    PowerError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    PowerError::NetworkRequest(url, e)
                });
            }
        };

        let body: PowerResponse = response
            .json()
            .await
            .map_err(|e| PowerError::JsonParse(url.clone(), e))?;
        body.into_series()
    }
}
