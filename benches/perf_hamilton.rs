use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use bitmask_dp::problems::hamilton::{shortest_path, solve_dense, solve_matrix, WeightMatrix};
use rand::{rngs::StdRng, Rng, SeedableRng};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

fn random_weights(rng: &mut StdRng, n: usize) -> WeightMatrix {
    let rows: Vec<Vec<i64>> = (0..n)
        .map(|_| (0..n).map(|_| rng.gen_range(0..1_000)).collect())
        .collect();
    WeightMatrix::from_rows(&rows).unwrap()
}

fn rss_kib() -> u64 {
    let mut sys = System::new();
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    if let Some(p) = sys.process(get_current_pid().unwrap()) {
        p.memory() / 1024
    } else {
        0
    }
}

fn bench_hamilton_perf(c: &mut Criterion) {
    let mut group = c.benchmark_group("hamilton_perf");
    group.sample_size(10);
    for &n in &[12usize, 14, 16] {
        group.bench_function(format!("layered_cost_n{n}"), |b| {
            b.iter_batched(
                || random_weights(&mut StdRng::seed_from_u64(42), n),
                |weights| {
                    let before = rss_kib();
                    let cost = solve_matrix(&weights);
                    let after = rss_kib();
                    criterion::black_box(cost);
                    // record memory delta to stderr to avoid criterion noise
                    eprintln!(
                        "RSS KiB delta (layered cost, n={n}): {}",
                        after.saturating_sub(before)
                    );
                },
                BatchSize::PerIteration,
            )
        });
        group.bench_function(format!("layered_path_n{n}"), |b| {
            b.iter_batched(
                || random_weights(&mut StdRng::seed_from_u64(42), n),
                |weights| criterion::black_box(shortest_path(&weights)),
                BatchSize::PerIteration,
            )
        });
        group.bench_function(format!("dense_table_n{n}"), |b| {
            b.iter_batched(
                || random_weights(&mut StdRng::seed_from_u64(42), n),
                |weights| {
                    let before = rss_kib();
                    let cost = solve_dense(&weights);
                    let after = rss_kib();
                    criterion::black_box(cost);
                    eprintln!(
                        "RSS KiB delta (dense table, n={n}): {}",
                        after.saturating_sub(before)
                    );
                },
                BatchSize::PerIteration,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_hamilton_perf);
criterion_main!(benches);
