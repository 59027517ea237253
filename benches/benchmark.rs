// Performance benchmarks for building and querying the similarity index
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hoopsim::{
    Catalog, Distance, FeatureVector, IndexConfig, PlayerSeason, SeasonKey, SimilarityIndex,
    StatField, StatLine, StatSchema,
};
use rand::Rng;
use std::sync::Arc;

const SEASONS_PER_PLAYER: u16 = 12;

fn generate_random_line(rng: &mut impl Rng) -> StatLine {
    let mut line = StatLine::default();
    for field in StatField::ALL {
        field.set(&mut line, Some(rng.random_range(0.0f32..2000.0f32)));
    }
    line
}

fn generate_catalog(players: u64) -> Catalog {
    let mut rng = rand::rng();
    let seasons = (0..players).flat_map(|player| {
        (0..SEASONS_PER_PLAYER)
            .map(|year| {
                PlayerSeason::new(
                    SeasonKey::new(player, 1980 + year),
                    format!("Player {}", player),
                    generate_random_line(&mut rng),
                )
            })
            .collect::<Vec<_>>()
    });
    Catalog::from_seasons(StatSchema::all(), seasons).unwrap()
}

fn generate_query(dim: usize) -> FeatureVector {
    let mut rng = rand::rng();
    FeatureVector::new((0..dim).map(|_| rng.random_range(0.0f32..2000.0f32)).collect())
}

fn benchmark_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for players in [100u64, 1000, 5000].iter() {
        let catalog = Arc::new(generate_catalog(*players));
        group.bench_with_input(BenchmarkId::new("index", players), &catalog, |b, catalog| {
            b.iter(|| {
                let index =
                    SimilarityIndex::build(Arc::clone(catalog), IndexConfig::default()).unwrap();
                black_box(index);
            });
        });
    }

    group.finish();
}

fn benchmark_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");

    let catalog = Arc::new(generate_catalog(5000));
    let query = generate_query(catalog.dim());

    for distance in [Distance::Cosine, Distance::Euclidean, Distance::Dot] {
        let config = IndexConfig {
            distance,
            ..IndexConfig::default()
        };
        let index = SimilarityIndex::build(Arc::clone(&catalog), config).unwrap();
        for k in [1usize, 10, 50].iter() {
            group.bench_with_input(BenchmarkId::new(format!("{:?}", distance), k), k, |b, &k| {
                b.iter(|| {
                    let results = index.query(black_box(&query), k).unwrap();
                    black_box(results);
                });
            });
        }
    }

    group.finish();
}

fn benchmark_oversample(c: &mut Criterion) {
    let mut group = c.benchmark_group("oversample");

    let catalog = Arc::new(generate_catalog(2000));
    let query = generate_query(catalog.dim());

    for oversample in [1usize, 5, 20].iter() {
        let config = IndexConfig {
            oversample: *oversample,
            ..IndexConfig::default()
        };
        let index = SimilarityIndex::build(Arc::clone(&catalog), config).unwrap();
        group.bench_with_input(BenchmarkId::new("k10", oversample), oversample, |b, _| {
            b.iter(|| {
                let results = index.query(black_box(&query), 10).unwrap();
                black_box(results);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_build, benchmark_query, benchmark_oversample);
criterion_main!(benches);
