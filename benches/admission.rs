use chrono::TimeDelta;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use weather_collector::{
    has_duplicates, within_limits, DataKind, LatLon, Location, OpenMeteoTier, OwmTier, Provider, Task,
    Tiers,
};

fn task_set(count: usize) -> Vec<Task> {
    (0..count)
        .map(|i| {
            let location = Location::builder()
                .coordinates(LatLon(-80.0 + i as f64 * 3.0, 10.0))
                .build()
                .unwrap();
            let provider = if i % 2 == 0 { Provider::OpenWeatherMap } else { Provider::OpenMeteo };
            Task::new(location, provider, DataKind::Current, TimeDelta::minutes(10 + i as i64))
        })
        .collect()
}

fn bench_admission(c: &mut Criterion) {
    let tasks = task_set(50);
    let tiers = Tiers::builder()
        .owm(OwmTier::Startup)
        .open_meteo(OpenMeteoTier::Free)
        .build();
    c.bench_function("has_duplicates", |b| b.iter(|| has_duplicates(black_box(&tasks), true)));
    c.bench_function("within_limits", |b| b.iter(|| within_limits(black_box(&tasks), &tiers, true)));
}

criterion_group!(benches, bench_admission);
criterion_main!(benches);
