//! Non-conservative term of the Γ and Π transport equations.
//!
//! Γ and Π are advected, not conserved: their equations read
//! `∂φ/∂t + ∇·(φ v) - φ ∇·v = 0`. The flux divergence is handled like any
//! other quantity; this module accumulates the two extra factors per cell:
//!
//! - `divu`: Σ over axes of the face normal velocity difference across the cell
//! - `sum_g`, `sum_p`: six samples of Γ and Π around the cell, so that
//!   `sum / 6` approximates the cell value
//!
//! The samples come either from the reconstructed face values
//! ([`ExtraTermMode::Reconstructed`]) or from the cell value counted twice per
//! axis ([`ExtraTermMode::CellCentred`]). Both agree exactly on constant data.

use std::fmt;

use crate::flux::FanTiles;
use crate::layout::OutputSoA;
use crate::reconstruction::FaceStates;
use crate::state::PrimitiveSlice;
use crate::types::{Quantity, Real};

/// Source of the Γ/Π samples in the non-conservative term.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExtraTermMode {
    /// Reconstructed plus value of the lower face and minus value of the upper face.
    Reconstructed,
    /// Cell value, twice per axis.
    #[default]
    CellCentred,
}

impl fmt::Display for ExtraTermMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExtraTermMode::Reconstructed => "reconstructed",
            ExtraTermMode::CellCentred => "cell-centred",
        })
    }
}

/// Per-cell accumulators of the non-conservative term.
#[derive(Clone, Debug)]
pub struct SourceTiles {
    pub divu: OutputSoA,
    pub sum_g: OutputSoA,
    pub sum_p: OutputSoA,
}

impl SourceTiles {
    /// Zero-initialized tiles for a block of size `n`.
    pub fn new(n: usize) -> Self {
        Self {
            divu: OutputSoA::cells(n),
            sum_g: OutputSoA::cells(n),
            sum_p: OutputSoA::cells(n),
        }
    }

    /// Correction `divu · sum / 6` for Γ (`q = G`) or Π (`q = Pi`) at cell `(i, j)`.
    #[inline(always)]
    pub fn correction(&self, q: Quantity, i: usize, j: usize) -> Real {
        let sum = match q {
            Quantity::G => self.sum_g[(i, j)],
            Quantity::Pi => self.sum_p[(i, j)],
            _ => return 0.0,
        };
        self.divu[(i, j)] * sum * (1.0 / 6.0)
    }

    /// Number of scalars stored.
    pub fn len(&self) -> usize {
        3 * self.divu.len()
    }

    /// Whether no scalars are stored.
    pub fn is_empty(&self) -> bool {
        self.divu.is_empty()
    }
}

/// Cell value of Γ and Π counted twice, for the cell-centred mode.
#[inline(always)]
fn cell_pair(cells: &PrimitiveSlice, i: usize, j: usize) -> (Real, Real) {
    let (x, y) = (i as isize, j as isize);
    (
        2.0 * cells.field(Quantity::G).at(x, y),
        2.0 * cells.field(Quantity::Pi).at(x, y),
    )
}

/// x contribution; overwrites the accumulators.
///
/// Cell `(i, j)` lies between x-faces `i` and `i + 1`.
pub fn extra_term_x(
    faces: &FaceStates,
    fans: &FanTiles,
    cells: &PrimitiveSlice,
    mode: ExtraTermMode,
    out: &mut SourceTiles,
) {
    let n = out.divu.nx();
    let (gm, gp) = (faces.minus(Quantity::G), faces.plus(Quantity::G));
    let (pm, pp) = (faces.minus(Quantity::Pi), faces.plus(Quantity::Pi));
    for j in 0..n {
        for i in 0..n {
            out.divu[(i, j)] = fans.u_face[(i + 1, j)] - fans.u_face[(i, j)];
            let (g, p) = match mode {
                ExtraTermMode::Reconstructed => {
                    (gp[(i, j)] + gm[(i + 1, j)], pp[(i, j)] + pm[(i + 1, j)])
                }
                ExtraTermMode::CellCentred => cell_pair(cells, i, j),
            };
            out.sum_g[(i, j)] = g;
            out.sum_p[(i, j)] = p;
        }
    }
}

/// y contribution; accumulates.
///
/// y tiles are transposed: cell `(i, j)` lies between faces `(j, i)` and `(j + 1, i)`.
pub fn extra_term_y(
    faces: &FaceStates,
    fans: &FanTiles,
    cells: &PrimitiveSlice,
    mode: ExtraTermMode,
    out: &mut SourceTiles,
) {
    let n = out.divu.nx();
    let (gm, gp) = (faces.minus(Quantity::G), faces.plus(Quantity::G));
    let (pm, pp) = (faces.minus(Quantity::Pi), faces.plus(Quantity::Pi));
    for j in 0..n {
        for i in 0..n {
            out.divu[(i, j)] += fans.u_face[(j + 1, i)] - fans.u_face[(j, i)];
            let (g, p) = match mode {
                ExtraTermMode::Reconstructed => {
                    (gp[(j, i)] + gm[(j + 1, i)], pp[(j, i)] + pm[(j + 1, i)])
                }
                ExtraTermMode::CellCentred => cell_pair(cells, i, j),
            };
            out.sum_g[(i, j)] += g;
            out.sum_p[(i, j)] += p;
        }
    }
}

/// z contribution from the faces below and above the cell slice; accumulates.
pub fn extra_term_z(
    lower: (&FaceStates, &FanTiles),
    upper: (&FaceStates, &FanTiles),
    cells: &PrimitiveSlice,
    mode: ExtraTermMode,
    out: &mut SourceTiles,
) {
    let n = out.divu.nx();
    let (lower_faces, lower_fans) = lower;
    let (upper_faces, upper_fans) = upper;
    let gp = lower_faces.plus(Quantity::G);
    let pp = lower_faces.plus(Quantity::Pi);
    let gm = upper_faces.minus(Quantity::G);
    let pm = upper_faces.minus(Quantity::Pi);
    for j in 0..n {
        for i in 0..n {
            out.divu[(i, j)] += upper_fans.u_face[(i, j)] - lower_fans.u_face[(i, j)];
            let (g, p) = match mode {
                ExtraTermMode::Reconstructed => {
                    (gp[(i, j)] + gm[(i, j)], pp[(i, j)] + pm[(i, j)])
                }
                ExtraTermMode::CellCentred => cell_pair(cells, i, j),
            };
            out.sum_g[(i, j)] += g;
            out.sum_p[(i, j)] += p;
        }
    }
}
