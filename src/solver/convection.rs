//! Streaming convection pass over one block.
//!
//! The block is processed one z slice at a time. Primitive slices enter a
//! six-slot ring as they are converted, z-face results live in two-slot
//! rings, and each output slice is written as soon as its upper z face is
//! known:
//!
//! ```text
//! load slices 0..6
//! z faces of slice 0 (lower face only)
//! for each output slice k:
//!     x and y sweeps of slice k
//!     load slice k + 6
//!     z faces between k and k + 1, close the z differences
//!     write back slice k
//! ```

use tracing::{debug, warn};

use crate::flux::{
    HllcSolver, HlleSolver, RiemannSolver, StandardSolver, estimate_wave_speeds, riemann_fluxes,
};
use crate::layout::{BlockView, BlockViewMut};
use crate::reconstruction::{reconstruct_x, reconstruct_y, reconstruct_z};
use crate::source::{ExtraTermMode, extra_term_x, extra_term_y, extra_term_z};
use crate::types::{Axis, HALO};

use super::config::ConvectionConfig;
use super::error::ConvectionError;
use super::rhs::{divergence_x, divergence_y, divergence_z, write_back};
use super::workspace::{ConvectionWorkspace, INPUT_SLICES};

/// Compute the convective RHS of one block and blend it into `dst`.
///
/// `src` holds `(n + 6)³` conserved records including a three-cell halo on
/// every side; `dst` holds the `n³` interior records. `dst` is updated slice
/// by slice, so on error the slices below the failing one are already
/// written.
///
/// # Errors
/// - [`ConvectionError::InvalidConfig`] for non-finite blend coefficients
/// - [`ConvectionError::InvalidLayout`] if the block extents do not match
///   the workspace
/// - [`ConvectionError::NonPhysicalState`] if a reconstructed face state has
///   non-positive density, Γ, or squared sound speed
/// - [`ConvectionError::NotANumber`] if a NaN reaches a flux or the RHS
pub fn compute_convection(
    src: &BlockView<'_>,
    dst: &mut BlockViewMut<'_>,
    workspace: &mut ConvectionWorkspace,
    config: &ConvectionConfig,
) -> Result<(), ConvectionError> {
    config.validate()?;
    let n = workspace.block_size();
    if src.extent() != n + 2 * HALO {
        return Err(ConvectionError::InvalidLayout(format!(
            "source extent {} does not match block size {} plus halo",
            src.extent(),
            n
        )));
    }
    if dst.extent() != n {
        return Err(ConvectionError::InvalidLayout(format!(
            "destination extent {} does not match block size {}",
            dst.extent(),
            n
        )));
    }

    debug!(
        n,
        solver = %config.solver,
        extra_term = %config.extra_term,
        "convection pass"
    );
    let result = match config.solver {
        StandardSolver::Hlle => run_block(&HlleSolver, src, dst, workspace, config),
        StandardSolver::Hllc => run_block(&HllcSolver, src, dst, workspace, config),
    };
    if let Err(err) = &result {
        warn!(%err, solver = %config.solver, "convection pass aborted");
    }
    result
}

/// Convection pass monomorphized over the Riemann solver.
fn run_block<S: RiemannSolver>(
    solver: &S,
    src: &BlockView<'_>,
    dst: &mut BlockViewMut<'_>,
    ws: &mut ConvectionWorkspace,
    config: &ConvectionConfig,
) -> Result<(), ConvectionError> {
    let n = ws.n;
    let mode = config.extra_term;

    ws.rewind();
    ws.input.current_mut().load(src, 0);
    for s in 1..INPUT_SLICES {
        ws.input.advance();
        ws.input.current_mut().load(src, s);
    }
    z_faces(solver, ws, 0)?;
    ws.advance_z_faces();

    for islice in 0..n {
        plane_sweep(solver, ws, Axis::X, mode, islice)?;
        plane_sweep(solver, ws, Axis::Y, mode, islice)?;

        ws.input.advance();
        ws.input.current_mut().load(src, islice + INPUT_SLICES);

        z_faces(solver, ws, islice + 1)?;
        close_z(ws, mode);

        write_back(&ws.rhs, &ws.sources, config, dst, islice)?;
        ws.advance_z_faces();
    }
    Ok(())
}

/// x or y sweep of the cell slice at input slot `-2`.
///
/// The x sweep overwrites the RHS and Γ/Π accumulators, the y sweep adds to
/// them.
fn plane_sweep<S: RiemannSolver>(
    solver: &S,
    ws: &mut ConvectionWorkspace,
    axis: Axis,
    mode: ExtraTermMode,
    islice: usize,
) -> Result<(), ConvectionError> {
    let ConvectionWorkspace {
        n,
        input,
        faces,
        fans,
        fluxes,
        rhs,
        sources,
        ..
    } = ws;
    let cells = input.get(-2);

    if axis == Axis::X {
        reconstruct_x(cells, faces);
    } else {
        reconstruct_y(cells, faces);
    }
    estimate_wave_speeds(solver, axis, faces, fans, *n, islice)?;
    riemann_fluxes(solver, axis, faces, fans, fluxes, *n, islice)?;

    if axis == Axis::X {
        extra_term_x(faces, fans, cells, mode, sources);
        divergence_x(fluxes, rhs);
    } else {
        extra_term_y(faces, fans, cells, mode, sources);
        divergence_y(fluxes, rhs);
    }
    Ok(())
}

/// Reconstruct, estimate, and flux the z faces between input slots `-3`
/// and `-2` into the current z-face slot.
fn z_faces<S: RiemannSolver>(
    solver: &S,
    ws: &mut ConvectionWorkspace,
    face_z: usize,
) -> Result<(), ConvectionError> {
    let ConvectionWorkspace {
        n,
        input,
        z_faces,
        z_fans,
        z_fluxes,
        ..
    } = ws;
    let faces = z_faces.current_mut();
    reconstruct_z(input, faces);
    let fans = z_fans.current_mut();
    estimate_wave_speeds(solver, Axis::Z, faces, fans, *n, face_z)?;
    riemann_fluxes(solver, Axis::Z, faces, fans, z_fluxes.current_mut(), *n, face_z)
}

/// Add the z contributions of the cell slice at input slot `-3`, which now
/// sits between z-face slots `-1` and `0`.
fn close_z(ws: &mut ConvectionWorkspace, mode: ExtraTermMode) {
    let ConvectionWorkspace {
        input,
        z_faces,
        z_fans,
        z_fluxes,
        rhs,
        sources,
        ..
    } = ws;
    extra_term_z(
        (z_faces.get(-1), z_fans.get(-1)),
        (z_faces.current(), z_fans.current()),
        input.get(-3),
        mode,
        sources,
    );
    divergence_z(z_fluxes.get(-1), z_fluxes.current(), rhs);
}

/// A workspace bundled with its configuration.
///
/// # Example
/// ```
/// use mpcf_rs::layout::BlockBuffer;
/// use mpcf_rs::solver::{ConvectionConfig, ConvectionKernel};
/// use mpcf_rs::state::ConservedState;
///
/// let n = 4;
/// let air = ConservedState::new(1.0, 0.0, 0.0, 0.0, 2.5, 2.5, 0.0);
/// let mut src = BlockBuffer::new(n + 6, 7);
/// src.set_from_fn(|_, _, _| air);
/// let mut dst = BlockBuffer::new(n, 7);
/// dst.set_from_fn(|_, _, _| air);
///
/// let mut kernel = ConvectionKernel::new(n, ConvectionConfig::new(1.0, 0.1));
/// kernel.compute(&src.view(), &mut dst.view_mut()).unwrap();
/// assert_eq!(dst.get(1, 2, 3), air);
/// ```
#[derive(Clone, Debug)]
pub struct ConvectionKernel {
    config: ConvectionConfig,
    workspace: ConvectionWorkspace,
}

impl ConvectionKernel {
    /// Kernel for blocks of `n³` cells.
    pub fn new(n: usize, config: ConvectionConfig) -> Self {
        Self {
            config,
            workspace: ConvectionWorkspace::new(n),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &ConvectionConfig {
        &self.config
    }

    /// Replace the configuration; the workspace is kept.
    pub fn set_config(&mut self, config: ConvectionConfig) {
        self.config = config;
    }

    /// Block size `n`.
    pub fn block_size(&self) -> usize {
        self.workspace.block_size()
    }

    /// Run [`compute_convection`] with the owned workspace.
    pub fn compute(
        &mut self,
        src: &BlockView<'_>,
        dst: &mut BlockViewMut<'_>,
    ) -> Result<(), ConvectionError> {
        compute_convection(src, dst, &mut self.workspace, &self.config)
    }
}
