use criterion::{black_box, criterion_group, criterion_main, Criterion};
use bitmask_dp::{
    problems::{
        hamilton::{HamiltonProblem, WeightMatrix},
        max_attack::{Gate, MaxAttackProblem},
    },
    subsets::SubsetIndexer,
    BitState, LayeredProblem,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_weights(rng: &mut StdRng, n: usize) -> WeightMatrix {
    let rows: Vec<Vec<i64>> = (0..n)
        .map(|_| (0..n).map(|_| rng.gen_range(0..1_000)).collect())
        .collect();
    WeightMatrix::from_rows(&rows).unwrap()
}

fn bench_hamilton_step(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0x5155AA55);
    let n = 16;
    let weights = random_weights(&mut rng, n);
    let problem = HamiltonProblem::new(&weights);

    // Widest layer sits in the middle.
    let mid = (n - 1) / 2;
    let mut frontier = problem.init_frontier();
    for layer in 0..mid {
        frontier = problem.forward_step(layer, &frontier);
    }

    let mut group = c.benchmark_group("layer_ops_hamilton");
    group.bench_function("forward_step_widest", |b| {
        b.iter(|| black_box(problem.forward_step(mid, black_box(&frontier))));
    });
    group.finish();
}

fn bench_subsets(c: &mut Criterion) {
    let indexer = SubsetIndexer::new(19);
    let masks: Vec<u32> = indexer.iter(9).collect();

    let mut group = c.benchmark_group("layer_ops_subsets");
    group.bench_function("enumerate_19_choose_9", |b| {
        b.iter(|| black_box(indexer.iter(9).count()));
    });
    group.bench_function("rank_19_choose_9", |b| {
        b.iter(|| {
            let total: usize = masks.iter().map(|&m| indexer.rank(m)).sum();
            black_box(total)
        });
    });
    group.bench_function("bitstate_iter_ones", |b| {
        b.iter(|| {
            let total: usize = masks
                .iter()
                .map(|&m| BitState::from(m).iter_ones().sum::<usize>())
                .sum();
            black_box(total)
        });
    });
    group.finish();
}

fn bench_max_attack_step(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let gates: Vec<Gate> = (0..100_000)
        .map(|_| match rng.gen_range(0..3) {
            0 => Gate::And(rng.gen()),
            1 => Gate::Or(rng.gen()),
            _ => Gate::Xor(rng.gen()),
        })
        .collect();

    let mut group = c.benchmark_group("layer_ops_max_attack");
    group.bench_function("prepare_100k_gates", |b| {
        b.iter(|| black_box(MaxAttackProblem::new(black_box(&gates), 1_000_000_000)));
    });
    group.finish();
}

criterion_group!(benches, bench_hamilton_step, bench_subsets, bench_max_attack_step);
criterion_main!(benches);
