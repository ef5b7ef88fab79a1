use chrono::{Datelike, Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::HashMap;
use weather_likelihood::{
    CleanSeries, ForecastConfig, ForecastTrainer, LatLon, MultiParameterAnalyzer, RawSeries,
    TrainingSet, WeatherVariable,
};

const LOCATION: LatLon = LatLon(52.3676, 4.9041);

fn seasonal(date: NaiveDate) -> f64 {
    let phase = 2.0 * std::f64::consts::PI * f64::from(date.ordinal()) / 365.25;
    11.0 - 7.0 * phase.cos() + f64::from(date.day() % 5) * 0.3
}

fn history(days: i64) -> Vec<(NaiveDate, f64)> {
    let start = NaiveDate::from_ymd_opt(1995, 1, 1).unwrap();
    (0..days)
        .map(|offset| {
            let date = start + Duration::days(offset);
            (date, seasonal(date))
        })
        .collect()
}

fn bench_training(c: &mut Criterion) {
    let _ = env_logger::builder().is_test(true).try_init();
    let series: CleanSeries = history(5 * 365).into_iter().collect();
    let set = TrainingSet::from_series(&series, LOCATION);

    let mut group = c.benchmark_group("training");
    group.sample_size(10);
    group.bench_function("default_ensemble_5y", |b| {
        let trainer = ForecastTrainer::default();
        b.iter(|| trainer.train(black_box(&set)))
    });
    group.bench_function("small_ensemble_5y", |b| {
        let trainer =
            ForecastTrainer::new(ForecastConfig::builder().n_trees(20).max_depth(6).build());
        b.iter(|| trainer.train(black_box(&set)))
    });
    group.finish();
}

fn bench_analysis(c: &mut Criterion) {
    let days = 29 * 365;
    let raw = |scale: f64| -> RawSeries {
        history(days)
            .into_iter()
            .map(|(date, value)| (date, Some(value * scale)))
            .collect()
    };
    let data = HashMap::from([
        (WeatherVariable::Temperature, raw(1.0)),
        (WeatherVariable::Precipitation, raw(0.2)),
        (WeatherVariable::Wind, raw(0.4)),
    ]);

    let analyzer = MultiParameterAnalyzer::default();
    c.bench_function("analyze_29y_all_variables", |b| {
        b.iter(|| analyzer.analyze(black_box(&data), 7, 15))
    });
}

criterion_group!(benches, bench_training, bench_analysis);
criterion_main!(benches);
