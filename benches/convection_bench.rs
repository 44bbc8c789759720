//! Benchmarks for the full block convection pass.
//!
//! Run with: `cargo bench --bench convection_bench`
//! (add `--features simd` for the vectorized divergence kernels)
//!
//! The roofline group prints a report against a nominal machine.

use std::time::Instant;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mpcf_rs::{
    BlockBuffer, ConservedState, ConvectionConfig, ConvectionWorkspace, ExtraTermMode, HALO,
    MachineSpec, PerformanceModel, PrimitiveState, Real, RooflineReport, StandardSolver,
    compute_convection,
};

/// Smooth two-material block: air with an embedded water bubble.
fn bubble_block(n: usize) -> BlockBuffer {
    let side = n + 2 * HALO;
    let centre = side as Real / 2.0;
    let mut src = BlockBuffer::new(side, 7);
    src.set_from_fn(|ix, iy, iz| {
        let r2 = [ix, iy, iz]
            .map(|i| (i as Real - centre).powi(2))
            .iter()
            .sum::<Real>();
        let phi = 1.0 / (1.0 + (r2 / (0.1 * (side * side) as Real)).powi(4));
        let gamma = phi / 5.4 + (1.0 - phi) / 0.4;
        let pi = phi * 6.4 * 3.0e3 / 5.4;
        ConservedState::from_primitive(&PrimitiveState::new(
            1.0 + 999.0 * phi,
            0.1,
            -0.05,
            0.02,
            1.0,
            gamma,
            pi,
        ))
    });
    src
}

/// Benchmark one block pass per solver and Γ/Π mode.
fn bench_convection(c: &mut Criterion) {
    let mut group = c.benchmark_group("convection_block");

    for n in [8, 16, 32] {
        let src = bubble_block(n);
        let mut dst = BlockBuffer::new(n, 7);
        let mut ws = ConvectionWorkspace::new(n);
        group.throughput(Throughput::Elements((n * n * n) as u64));

        for solver in [StandardSolver::Hlle, StandardSolver::Hllc] {
            for mode in [ExtraTermMode::Reconstructed, ExtraTermMode::CellCentred] {
                let config = ConvectionConfig::new(0.0, 1.0e-3)
                    .with_solver(solver)
                    .with_extra_term(mode);
                let id = BenchmarkId::new(format!("{solver}_{mode}"), n);
                group.bench_with_input(id, &n, |b, _| {
                    b.iter(|| {
                        compute_convection(
                            black_box(&src.view()),
                            &mut dst.view_mut(),
                            &mut ws,
                            &config,
                        )
                    });
                });
            }
        }
    }

    group.finish();
}

/// Time a batch of passes and print the roofline report.
fn bench_roofline(c: &mut Criterion) {
    let n = 16;
    let steps = 4;
    let src = bubble_block(n);
    let mut dst = BlockBuffer::new(n, 7);
    let mut ws = ConvectionWorkspace::new(n);
    let config = ConvectionConfig::new(0.0, 1.0e-3);

    c.bench_function("convection_roofline_16", |b| {
        b.iter(|| compute_convection(&src.view(), &mut dst.view_mut(), &mut ws, &config));
    });

    let start = Instant::now();
    for _ in 0..steps {
        let _ = compute_convection(&src.view(), &mut dst.view_mut(), &mut ws, &config);
    }
    let elapsed = start.elapsed().as_secs_f64();

    let model = PerformanceModel::for_block(n);
    let machine = MachineSpec::new(8.0e9, 20.0e9, 1);
    if let Ok(report) = RooflineReport::compute(&model, &machine, steps, 1, elapsed) {
        println!("{}", report.report());
    }
}

criterion_group!(benches, bench_convection, bench_roofline);
criterion_main!(benches);
