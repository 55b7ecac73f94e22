use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use pingpong_core::constants::reference_players;
use pingpong_core::{
    run_batch, run_batch_parallel, simulate_game, simulate_match, simulate_round, SimConfig,
};

fn bench_simulate_round(c: &mut Criterion) {
    let (a, b) = reference_players();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    c.bench_function("simulate_round", |bench| {
        bench.iter(|| simulate_round(black_box(&a), black_box(&b), false, &mut rng))
    });
}

fn bench_simulate_game(c: &mut Criterion) {
    let (a, b) = reference_players();
    let config = SimConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    c.bench_function("simulate_game", |bench| {
        bench.iter(|| simulate_game(black_box(&a), black_box(&b), &config, &mut rng))
    });
}

fn bench_simulate_match(c: &mut Criterion) {
    let (a, b) = reference_players();
    let config = SimConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    c.bench_function("simulate_match_best_of_5", |bench| {
        bench.iter(|| simulate_match(black_box(&a), black_box(&b), &config, &mut rng))
    });
}

fn bench_batch(c: &mut Criterion) {
    let (a, b) = reference_players();
    let config = SimConfig::default();

    c.bench_function("batch_1000_sequential", |bench| {
        bench.iter(|| {
            let mut rng = ChaCha8Rng::seed_from_u64(42);
            run_batch(black_box(&a), black_box(&b), &config, &mut rng)
        })
    });

    c.bench_function("batch_1000_parallel", |bench| {
        bench.iter(|| run_batch_parallel(black_box(&a), black_box(&b), &config, Some(42)))
    });
}

criterion_group!(
    benches,
    bench_simulate_round,
    bench_simulate_game,
    bench_simulate_match,
    bench_batch,
);
criterion_main!(benches);
