use chrono::{Datelike, Duration, NaiveDate};
use serde_json::{json, Map, Value};
use weather_likelihood::{
    climatology_report, forecast_report, ForecastConfig, ForecastError, LatLon, LikelihoodError,
    PowerError, PowerResponse, WeatherVariable,
};

const LOCATION: LatLon = LatLon(40.7128, -74.006);

/// A provider document with five years of daily data, shaped like a daily point response.
fn provider_document() -> Value {
    let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
    let mut temperature = Map::new();
    let mut precipitation = Map::new();
    let mut wind = Map::new();

    for offset in 0..(5 * 365 + 1) {
        let date = start + Duration::days(offset);
        let key = date.format("%Y%m%d").to_string();
        let phase = 2.0 * std::f64::consts::PI * f64::from(date.ordinal()) / 365.25;
        let year_shift = f64::from(date.year() - 2019);

        let t2m = if offset % 97 == 0 {
            Value::Null
        } else {
            json!(12.5 - 10.0 * phase.cos() + year_shift * 0.2)
        };
        // Every July 15th after the first year is a provider gap for precipitation.
        let precip = if date.month() == 7 && date.day() == 15 && date.year() > 2019 {
            json!(-999.0)
        } else {
            json!(f64::from(offset as i32 % 4) * 2.5)
        };

        temperature.insert(key.clone(), t2m);
        precipitation.insert(key.clone(), precip);
        wind.insert(key, json!(3.0 + year_shift));
    }

    json!({
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": [LOCATION.1, LOCATION.0, 10.0]},
        "properties": {
            "parameter": {
                "T2M": temperature,
                "PRECTOTCORR": precipitation,
                "WS2M": wind,
            }
        },
        "header": {"title": "NASA/POWER Source Native Resolution Daily Data"},
        "messages": [],
    })
}

fn parse(document: Value) -> PowerResponse {
    serde_json::from_value(document).unwrap()
}

#[test]
fn analyze_end_to_end() {
    let data = parse(provider_document()).into_series().unwrap();
    let report = climatology_report(&data, LOCATION, 7, 15).unwrap();

    let temperature = report.results.temperature.as_ref().unwrap();
    assert_eq!(temperature.data_points, 5);
    assert_eq!(temperature.years_of_data, "2019-2023");
    assert_eq!(temperature.date_analyzed, "07/15");
    assert!(temperature.very_cold_threshold <= temperature.cold_threshold);
    assert!(temperature.hot_threshold <= temperature.very_hot_threshold);

    // The precipitation gaps are zero-filled, so the sample keeps all five years.
    let precipitation = report.results.precipitation.as_ref().unwrap();
    assert_eq!(precipitation.data_points, 5);
    assert!(precipitation.dry_days_percentage >= 80.0);

    let wind = report.results.wind.as_ref().unwrap();
    assert_eq!(wind.data_points, 5);
    assert_eq!(wind.average_wind, 5.0);
    assert_eq!(wind.very_windy_probability, 20.0);

    let json = serde_json::to_value(&report).unwrap();
    assert!(json.get("temperature").is_some());
    assert_eq!(json["metadata"]["query_date"], "07/15");
    assert_eq!(json["metadata"]["data_source"], "NASA POWER Project");
    assert_eq!(json["wind"]["unit"], "m/s");
}

#[test]
fn analyze_keeps_other_variables_when_one_is_missing() {
    let mut document = provider_document();
    document["properties"]["parameter"]
        .as_object_mut()
        .unwrap()
        .remove("T2M");
    let data = parse(document).into_series().unwrap();
    let report = climatology_report(&data, LOCATION, 3, 1).unwrap();

    assert!(report.results.temperature.is_none());
    assert!(report.results.precipitation.is_some());
    assert!(report.results.wind.is_some());
    let json = serde_json::to_value(&report).unwrap();
    assert!(json.get("temperature").is_none());
}

#[test]
fn analyze_impossible_day_is_not_enough_data() {
    let data = parse(provider_document()).into_series().unwrap();
    assert!(matches!(
        climatology_report(&data, LOCATION, 4, 31),
        Err(LikelihoodError::NotEnoughData { month: 4, day: 31 })
    ));
}

#[test]
fn empty_provider_response_is_no_data() {
    let document = json!({"properties": {"parameter": {}}});
    assert!(matches!(
        parse(document).into_series(),
        Err(PowerError::NoData)
    ));
}

#[test]
fn forecast_end_to_end() {
    let mut data = parse(provider_document()).into_series().unwrap();
    let temperature = data.remove(&WeatherVariable::Temperature).unwrap();
    let config = ForecastConfig::builder().n_trees(20).max_depth(8).build();
    let start = NaiveDate::from_ymd_opt(2024, 12, 28).unwrap();

    let first = forecast_report(&temperature, LOCATION, start, 14, &config).unwrap();
    let second = forecast_report(&temperature, LOCATION, start, 14, &config).unwrap();
    assert_eq!(first, second);

    assert_eq!(first.forecast.len(), 14);
    let offsets: Vec<usize> = first.forecast.iter().map(|p| p.day_offset).collect();
    assert_eq!(offsets, (0..14).collect::<Vec<_>>());
    assert_eq!(
        first.forecast[13].date,
        NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
    );
    for point in &first.forecast {
        assert!(point.lower_bound <= point.predicted_temp);
        assert!(point.predicted_temp <= point.upper_bound);
        // Winter at this location is cold in the synthetic history.
        assert!(point.predicted_temp < 8.0, "{:?}", point);
    }

    let accuracy = &first.model_accuracy;
    assert!(accuracy.mean_absolute_error < 1.5, "{:?}", accuracy);
    assert!(accuracy.test_samples * 4 >= accuracy.training_samples);
    assert_eq!(
        accuracy.training_period_start,
        NaiveDate::from_ymd_opt(2019, 1, 2).unwrap()
    );
}

#[test]
fn forecast_rejects_long_horizon() {
    let mut data = parse(provider_document()).into_series().unwrap();
    let temperature = data.remove(&WeatherVariable::Temperature).unwrap();
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    assert!(matches!(
        forecast_report(&temperature, LOCATION, start, 21, &ForecastConfig::default()),
        Err(LikelihoodError::Forecast(ForecastError::InvalidHorizon(21)))
    ));
}
