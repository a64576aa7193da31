// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use binpack_bnb::bounds::lower_bounds;
use binpack_bnb::heuristics::best_heuristic_packing;
use binpack_bnb::reduction::reduce;
use binpack_model::instance::Instance;
use binpack_solver::solver::SolverBuilder;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;
use std::time::Duration;

const CAPACITY: u32 = 150;

/// Uniform weights in `[20, 100]`, the classic setting for random bin packing benchmarks.
fn uniform_instance(num_items: usize, seed: u64) -> Instance<u32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let weights: Vec<u32> = (0..num_items).map(|_| rng.random_range(20..=100)).collect();
    Instance::from_weights(CAPACITY, weights).expect("generated weights fit the capacity")
}

fn bench_presolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("presolve");

    for &n in &[50usize, 200, 1000] {
        let instance = uniform_instance(n, 0xC0FFEE + n as u64);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("bounds", n), &instance, |b, inst| {
            b.iter(|| lower_bounds(black_box(inst.sorted_weights()), inst.capacity()))
        });

        group.bench_with_input(BenchmarkId::new("reduction", n), &instance, |b, inst| {
            b.iter(|| reduce(black_box(inst.sorted_weights()), inst.capacity()))
        });

        group.bench_with_input(BenchmarkId::new("heuristics", n), &instance, |b, inst| {
            b.iter(|| best_heuristic_packing(black_box(inst.sorted_weights()), inst.capacity()))
        });
    }

    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    group.sample_size(20);

    for &n in &[20usize, 40, 60] {
        let instances: Vec<Instance<u32>> =
            (0..4).map(|k| uniform_instance(n, 17 * k + n as u64)).collect();
        group.throughput(Throughput::Elements((n * instances.len()) as u64));

        group.bench_with_input(BenchmarkId::new("uniform", n), &instances, |b, insts| {
            let mut solver = SolverBuilder::<u32>::new()
                .with_time_limit(Duration::from_secs(5))
                .build();
            b.iter(|| {
                for inst in insts {
                    let outcome = solver.solve(black_box(inst)).expect("instance is valid");
                    black_box(outcome.num_bins());
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_presolve, bench_solve);
criterion_main!(benches);
