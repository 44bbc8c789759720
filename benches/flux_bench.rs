//! Benchmarks for reconstruction and Riemann solver kernels.
//!
//! Run with: `cargo bench --bench flux_bench`
//!
//! Compares HLLE and HLLC on smooth and shocked face states, and measures
//! the WENO5 tile sweeps in x, y and z.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mpcf_rs::flux::{FluxKind, HllcSolver, HlleSolver, RiemannSolver};
use mpcf_rs::layout::{InputSoA, TempSoA};
use mpcf_rs::reconstruction::{weno_minus, weno_x, weno_y, weno_z};
use mpcf_rs::{Axis, FacePrimitive, HALO, PrimitiveState, Real};

/// Generate face state pairs for flux computation.
fn generate_face_states(n: usize, jump: Real) -> Vec<(FacePrimitive, FacePrimitive)> {
    (0..n)
        .map(|i| {
            let phase = i as Real * 0.1;
            let left = PrimitiveState::new(
                1.0 + 0.2 * phase.sin(),
                0.5 + 0.3 * phase.cos(),
                0.2 - 0.1 * phase.sin(),
                0.1,
                1.0 + 0.1 * phase.cos(),
                2.5,
                0.0,
            );
            let right = PrimitiveState::new(
                left.rho / (1.0 + jump),
                left.u,
                left.v,
                left.w,
                left.p / (1.0 + 10.0 * jump),
                if jump > 0.0 { 1.0 / 5.4 } else { 2.5 },
                if jump > 0.0 { 1.0 } else { 0.0 },
            );
            (left.to_face(Axis::X), right.to_face(Axis::X))
        })
        .collect()
}

fn run_solver<S: RiemannSolver>(solver: &S, states: &[(FacePrimitive, FacePrimitive)]) -> Real {
    let kinds = FluxKind::all(Axis::X);
    let mut total = 0.0;
    for (minus, plus) in states {
        let fan = match solver.wave_fan(black_box(minus), black_box(plus)) {
            Ok(fan) => fan,
            Err(_) => continue,
        };
        for kind in kinds {
            total += solver.flux(kind, minus, plus, &fan);
        }
        total += solver.face_velocity(minus, plus, &fan);
    }
    total
}

/// Benchmark the two Riemann solvers.
fn bench_riemann_solvers(c: &mut Criterion) {
    let mut group = c.benchmark_group("riemann_solvers");

    for (label, jump) in [("smooth", 0.0), ("interface", 4.0)] {
        let states = generate_face_states(1000, jump);
        group.throughput(Throughput::Elements(states.len() as u64));

        group.bench_with_input(BenchmarkId::new("hlle", label), &states, |b, states| {
            b.iter(|| run_solver(&HlleSolver, states));
        });
        group.bench_with_input(BenchmarkId::new("hllc", label), &states, |b, states| {
            b.iter(|| run_solver(&HllcSolver, states));
        });
    }

    group.finish();
}

/// Benchmark a single WENO5 reconstruction.
fn bench_weno_point(c: &mut Criterion) {
    c.bench_function("weno_minus", |b| {
        b.iter(|| {
            weno_minus(
                black_box(1.0),
                black_box(1.1),
                black_box(0.9),
                black_box(2.0),
                black_box(2.1),
            )
        });
    });
}

fn filled_tile(n: usize, seed: Real) -> InputSoA {
    let mut tile = InputSoA::new(n);
    let h = HALO as isize;
    for iy in -h..(n as isize + h) {
        for ix in -h..(n as isize + h) {
            tile.set(ix, iy, 1.0 + 0.5 * (seed + 0.3 * ix as Real - 0.2 * iy as Real).sin());
        }
    }
    tile
}

/// Benchmark WENO5 tile sweeps in each direction.
fn bench_weno_sweeps(c: &mut Criterion) {
    let mut group = c.benchmark_group("weno_sweeps");

    for n in [8, 16, 32] {
        let tile = filled_tile(n, 0.0);
        let slices: Vec<InputSoA> = (0..6).map(|k| filled_tile(n, k as Real)).collect();
        let mut minus = TempSoA::faces(n);
        let mut plus = TempSoA::faces(n);
        group.throughput(Throughput::Elements((n * (n + 1)) as u64));

        group.bench_with_input(BenchmarkId::new("x", n), &n, |b, _| {
            b.iter(|| weno_x(black_box(&tile), &mut minus, &mut plus));
        });
        group.bench_with_input(BenchmarkId::new("y", n), &n, |b, _| {
            b.iter(|| weno_y(black_box(&tile), &mut minus, &mut plus));
        });
        group.bench_with_input(BenchmarkId::new("z", n), &n, |b, _| {
            let refs = [
                &slices[0], &slices[1], &slices[2], &slices[3], &slices[4], &slices[5],
            ];
            b.iter(|| weno_z(black_box(refs), &mut minus, &mut plus));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_riemann_solvers,
    bench_weno_point,
    bench_weno_sweeps
);
criterion_main!(benches);
