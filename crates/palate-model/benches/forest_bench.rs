//! Random forest fit/predict benchmarks.
//!
//! Run with: cargo bench -p palate-model --bench forest_bench

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use palate_core::constants::CUISINES;
use palate_core::models::{Diet, Emotion, PriceRange, SearchRecord, UserBiasState};
use palate_features::{encode, FeatureVector};
use palate_model::{Classifier, ForestParams, RandomForest};

/// Generate labelled rows cycling through the vocabularies.
fn generate_rows(count: usize) -> (Vec<FeatureVector>, Vec<u8>) {
    (0..count)
        .map(|i| {
            let cuisine = CUISINES[i % CUISINES.len()];
            let bias = UserBiasState::new((i % 10) as f64 / 10.0, 0.5, Emotion::ALL[i % 3]);
            let price = PriceRange::new(1, 1 + (i % 4) as i64).unwrap_or_default();
            let search = SearchRecord {
                search_id: i as i64,
                user_id: 1,
                cuisines: vec![cuisine.to_string()],
                tastes: vec![],
                diet: Some(Diet::ALL[i % 3]),
                price_range: price,
                location: "Lisbon".to_string(),
                emotion: None,
                timestamp: Utc::now(),
            };
            let x = encode(&bias, &search);
            (x, u8::from(i % 3 == 0 || cuisine == "Thai"))
        })
        .unzip()
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("forest_fit");

    for size in [50, 200, 1_000].iter() {
        let (x, y) = generate_rows(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut forest = RandomForest::new(ForestParams::default());
                forest.fit(&x, &y).unwrap();
                forest
            });
        });
    }

    group.finish();
}

fn bench_predict(c: &mut Criterion) {
    let (x, y) = generate_rows(500);
    let mut forest = RandomForest::default();
    forest.fit(&x, &y).unwrap();

    c.bench_function("forest_predict_single", |b| {
        b.iter(|| forest.predict(black_box(&x[17])).unwrap());
    });
}

criterion_group!(benches, bench_fit, bench_predict);
criterion_main!(benches);
