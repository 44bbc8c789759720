//! Integration tests for the block convection pass.
//!
//! These tests verify:
//! - Free-stream preservation for both solvers and both Γ/Π modes
//! - The `a·q - dtinvh·rhs` blend
//! - Equivalent results for the same profile along x, y and z
//! - Error reporting and partial write-back on non-physical input

use approx::assert_relative_eq;
use mpcf_rs::{
    Axis, BlockBuffer, ConservedState, ConvectionConfig, ConvectionError, ConvectionKernel,
    ConvectionWorkspace, ExtraTermMode, HALO, PrimitiveState, Real, StandardSolver,
    StateViolation, compute_convection,
};

const N: usize = 6;
const TOL: Real = 1e-4;

const SOLVERS: [StandardSolver; 2] = [StandardSolver::Hlle, StandardSolver::Hllc];
const MODES: [ExtraTermMode; 2] = [ExtraTermMode::Reconstructed, ExtraTermMode::CellCentred];

fn air(u: Real, v: Real, w: Real) -> ConservedState {
    ConservedState::from_primitive(&PrimitiveState::new(1.2, u, v, w, 1.0, 2.5, 0.0))
}

/// Halo-extended source block filled from a function of padded indices.
fn source_block(f: impl Fn(usize, usize, usize) -> ConservedState) -> BlockBuffer {
    let mut src = BlockBuffer::new(N + 2 * HALO, 7);
    src.set_from_fn(f);
    src
}

/// Destination block initialized with the interior of `src`.
fn interior_of(src: &BlockBuffer) -> BlockBuffer {
    let mut dst = BlockBuffer::new(N, 7);
    dst.set_from_fn(|ix, iy, iz| src.get(ix + HALO, iy + HALO, iz + HALO));
    dst
}

fn assert_states_close(got: ConservedState, want: ConservedState) {
    for (g, w) in got.to_array().iter().zip(want.to_array()) {
        assert_relative_eq!(*g, w, epsilon = TOL, max_relative = TOL);
    }
}

#[test]
fn test_free_stream_is_preserved() {
    let state = air(0.4, -0.3, 0.2);
    for solver in SOLVERS {
        for mode in MODES {
            let src = source_block(|_, _, _| state);
            let mut dst = interior_of(&src);
            let config = ConvectionConfig::new(1.0, 0.25)
                .with_solver(solver)
                .with_extra_term(mode);
            let mut ws = ConvectionWorkspace::new(N);
            compute_convection(&src.view(), &mut dst.view_mut(), &mut ws, &config).unwrap();

            for iz in 0..N {
                for iy in 0..N {
                    for ix in 0..N {
                        assert_states_close(dst.get(ix, iy, iz), state);
                    }
                }
            }
        }
    }
}

/// Run one pass with `a = 0` and `dtinvh = 1`, so the destination holds `-rhs`.
fn negated_rhs(src: &BlockBuffer, solver: StandardSolver, mode: ExtraTermMode) -> BlockBuffer {
    let mut dst = BlockBuffer::new(N, 7);
    let config = ConvectionConfig::new(0.0, 1.0)
        .with_solver(solver)
        .with_extra_term(mode);
    let mut ws = ConvectionWorkspace::new(N);
    compute_convection(&src.view(), &mut dst.view_mut(), &mut ws, &config).unwrap();
    dst
}

#[test]
fn test_uniform_blocks_have_exactly_zero_rhs() {
    for u in [0.0, 1.0] {
        let state =
            ConservedState::from_primitive(&PrimitiveState::new(1.0, u, 0.0, 0.0, 1.0, 1.4, 0.0));
        let src = source_block(|_, _, _| state);
        for solver in SOLVERS {
            for mode in MODES {
                let dst = negated_rhs(&src, solver, mode);
                for (k, value) in dst.as_slice().iter().enumerate() {
                    assert_eq!(*value, 0.0, "{solver} {mode} u = {u}: index {k}");
                }
            }
        }
    }
}

#[test]
fn test_zero_sound_speed_block_is_accepted() {
    // p = Π = 0 gives c² = 0 in every cell
    let w = PrimitiveState::new(1.0, 0.0, 0.0, 0.0, 0.0, 2.5, 0.0);
    let state = ConservedState::from_primitive(&w);
    let src = source_block(|_, _, _| state);
    for solver in SOLVERS {
        for mode in MODES {
            let dst = negated_rhs(&src, solver, mode);
            assert!(dst.as_slice().iter().all(|v| v.is_finite()), "{solver} {mode}");
        }
    }
}

#[test]
fn test_blend_scales_previous_destination() {
    let src = source_block(|_, _, _| air(1.0, 0.0, 0.0));
    let previous = ConservedState::new(2.0, 4.0, -2.0, 0.5, 10.0, 3.0, 1.0);
    let mut dst = BlockBuffer::new(N, 7);
    dst.set_from_fn(|_, _, _| previous);

    let mut kernel = ConvectionKernel::new(N, ConvectionConfig::new(0.5, 0.7));
    kernel.compute(&src.view(), &mut dst.view_mut()).unwrap();

    // Uniform input has an exactly zero RHS
    assert_eq!(dst.get(3, 1, 4), previous * 0.5);
    assert_eq!(dst.get(0, 0, 0), previous * 0.5);
}

/// Pressure pulse along `axis` at rest; density, Γ and Π uniform.
fn pressure_profile(axis: Axis) -> BlockBuffer {
    source_block(|ix, iy, iz| {
        let s = match axis {
            Axis::X => ix,
            Axis::Y => iy,
            Axis::Z => iz,
        } as Real;
        let p = 1.0 + 0.2 * (0.7 * s).sin();
        ConservedState::from_primitive(&PrimitiveState::new(1.0, 0.0, 0.0, 0.0, p, 2.5, 0.1))
    })
}

/// Momentum along `axis` of a conserved state.
fn normal_momentum(state: &ConservedState, axis: Axis) -> Real {
    match axis {
        Axis::X => state.rho_u,
        Axis::Y => state.rho_v,
        Axis::Z => state.rho_w,
    }
}

#[test]
fn test_directional_symmetry() {
    for solver in SOLVERS {
        let config = ConvectionConfig::new(1.0, 0.1).with_solver(solver);
        let mut results = Vec::new();
        for axis in Axis::ALL {
            let src = pressure_profile(axis);
            let mut dst = interior_of(&src);
            let mut ws = ConvectionWorkspace::new(N);
            compute_convection(&src.view(), &mut dst.view_mut(), &mut ws, &config).unwrap();
            results.push((axis, dst));
        }

        // Same profile index k along each axis, transverse indices (i, j)
        let at = |axis: Axis, block: &BlockBuffer, k: usize, i: usize, j: usize| match axis {
            Axis::X => block.get(k, i, j),
            Axis::Y => block.get(i, k, j),
            Axis::Z => block.get(i, j, k),
        };
        let (x_axis, x_block) = &results[0];
        for (axis, block) in &results[1..] {
            for k in 0..N {
                let want = at(*x_axis, x_block, k, 1, 2);
                let got = at(*axis, block, k, 1, 2);
                assert_relative_eq!(got.rho, want.rho, epsilon = TOL);
                assert_relative_eq!(got.energy, want.energy, epsilon = TOL);
                assert_relative_eq!(got.gamma, want.gamma, epsilon = TOL);
                assert_relative_eq!(
                    normal_momentum(&got, *axis),
                    normal_momentum(&want, *x_axis),
                    epsilon = TOL
                );
            }
        }

        // The pressure gradient drives momentum only along the profile
        let (_, z_block) = &results[2];
        let cell = z_block.get(2, 3, 1);
        assert!(normal_momentum(&cell, Axis::Z).abs() > 1e-3);
        assert_relative_eq!(cell.rho_u, 0.0, epsilon = TOL);
        assert_relative_eq!(cell.rho_v, 0.0, epsilon = TOL);
    }
}

#[test]
fn test_extra_term_modes_agree_for_uniform_eos() {
    // Γ and Π uniform: both samplings of the non-conservative term match
    let src = source_block(|ix, iy, iz| {
        let (x, y, z) = (ix as Real, iy as Real, iz as Real);
        let u = 0.3 * (0.5 * x).sin();
        let v = 0.2 * (0.4 * y + 0.1 * z).cos();
        let w = -0.1 * (0.3 * z).sin();
        ConservedState::from_primitive(&PrimitiveState::new(1.0, u, v, w, 1.0, 2.5, 0.3))
    });
    for solver in SOLVERS {
        let blocks = MODES.map(|mode| {
            let mut dst = interior_of(&src);
            let config = ConvectionConfig::new(1.0, 0.1)
                .with_solver(solver)
                .with_extra_term(mode);
            let mut ws = ConvectionWorkspace::new(N);
            compute_convection(&src.view(), &mut dst.view_mut(), &mut ws, &config).unwrap();
            dst
        });
        for (a, b) in blocks[0].as_slice().iter().zip(blocks[1].as_slice()) {
            assert_relative_eq!(*a, *b, epsilon = TOL, max_relative = TOL);
        }
        // The velocity field is not divergence free, so mass moves
        assert!((blocks[0].get(2, 2, 2).rho - 1.0).abs() > 1e-3);
    }
}

#[test]
fn test_negative_density_is_reported_before_write_back() {
    let bad = ConservedState::new(-1.0, 0.0, 0.0, 0.0, 2.5, 2.5, 0.0);
    let src = source_block(|_, _, _| bad);
    let marker = ConservedState::new(7.0, 7.0, 7.0, 7.0, 7.0, 7.0, 7.0);
    let mut dst = BlockBuffer::new(N, 7);
    dst.set_from_fn(|_, _, _| marker);

    let mut ws = ConvectionWorkspace::new(N);
    let err = compute_convection(
        &src.view(),
        &mut dst.view_mut(),
        &mut ws,
        &ConvectionConfig::default(),
    )
    .unwrap_err();

    match err {
        ConvectionError::NonPhysicalState {
            location,
            violation,
        } => {
            assert_eq!(violation, StateViolation::NonPositiveDensity);
            assert_eq!(location.axis, Some(Axis::Z));
            assert_eq!(location.slice, 0);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(dst.get(1, 1, 1), marker);
}

#[test]
fn test_slices_below_failure_are_written() {
    let good = air(0.0, 0.0, 0.0);
    let bad = ConservedState::new(-1.0, 0.0, 0.0, 0.0, 2.5, 2.5, 0.0);
    // Non-physical upper halo only
    let src = source_block(|_, _, iz| if iz >= N + HALO { bad } else { good });
    let marker = ConservedState::new(7.0, 7.0, 7.0, 7.0, 7.0, 7.0, 7.0);
    let mut dst = BlockBuffer::new(N, 7);
    dst.set_from_fn(|_, _, _| marker);

    let mut ws = ConvectionWorkspace::new(N);
    let err = compute_convection(
        &src.view(),
        &mut dst.view_mut(),
        &mut ws,
        &ConvectionConfig::new(0.0, 1.0),
    )
    .unwrap_err();

    let ConvectionError::NonPhysicalState { location, .. } = err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(location.axis, Some(Axis::Z));
    assert!(location.slice >= N - 2, "failed at z face {}", location.slice);

    // Slice 0 sees a uniform neighbourhood: zero RHS and a = 0
    assert_eq!(dst.get(2, 2, 0).rho, 0.0);
    assert_eq!(dst.get(2, 2, N - 1), marker);
}

#[test]
fn test_layout_errors() {
    let src = source_block(|_, _, _| air(0.0, 0.0, 0.0));
    let mut small = BlockBuffer::new(N - 1, 7);
    let mut ws = ConvectionWorkspace::new(N);
    let err = compute_convection(
        &src.view(),
        &mut small.view_mut(),
        &mut ws,
        &ConvectionConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ConvectionError::InvalidLayout(_)));
    assert!(err.to_string().contains("destination"));
}
