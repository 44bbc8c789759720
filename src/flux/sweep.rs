//! Riemann solver sweeps over face tiles.
//!
//! The two stages of a directional flux pass:
//!
//! 1. [`estimate_wave_speeds`]: wave fan and face velocity of every face
//! 2. [`riemann_fluxes`]: numerical flux of every conserved quantity
//!
//! Both stages walk the face grid of the sweep axis (see [`Axis::face_extent`]).

use crate::layout::TempSoA;
use crate::reconstruction::FaceStates;
use crate::solver::{ConvectionError, Location, Stage};
use crate::types::{Axis, NQUANTITIES, Quantity};

use super::kind::FluxKind;
use super::traits::RiemannSolver;
use super::wave_speeds::WaveFan;

/// Wave fan tiles of one sweep.
#[derive(Clone, Debug)]
pub struct FanTiles {
    pub s_minus: TempSoA,
    pub s_plus: TempSoA,
    pub u_star: TempSoA,
    /// Face normal velocity for the velocity divergence.
    pub u_face: TempSoA,
}

impl FanTiles {
    /// Zero-initialized tiles for a block of size `n`.
    pub fn new(n: usize) -> Self {
        Self {
            s_minus: TempSoA::faces(n),
            s_plus: TempSoA::faces(n),
            u_star: TempSoA::faces(n),
            u_face: TempSoA::faces(n),
        }
    }

    /// Wave fan at face `(i, j)`.
    #[inline(always)]
    pub fn fan(&self, i: usize, j: usize) -> WaveFan {
        WaveFan {
            s_minus: self.s_minus[(i, j)],
            s_plus: self.s_plus[(i, j)],
            u_star: self.u_star[(i, j)],
        }
    }

    /// Number of scalars stored.
    pub fn len(&self) -> usize {
        4 * self.s_minus.len()
    }

    /// Whether no scalars are stored.
    pub fn is_empty(&self) -> bool {
        self.s_minus.is_empty()
    }
}

/// Numerical flux tiles of one sweep, one per conserved quantity.
#[derive(Clone, Debug)]
pub struct FluxTiles {
    tiles: [TempSoA; NQUANTITIES],
}

impl FluxTiles {
    /// Zero-initialized tiles for a block of size `n`.
    pub fn new(n: usize) -> Self {
        Self {
            tiles: std::array::from_fn(|_| TempSoA::faces(n)),
        }
    }

    /// Flux tile of one conserved quantity.
    #[inline(always)]
    pub fn get(&self, q: Quantity) -> &TempSoA {
        &self.tiles[q.index()]
    }

    /// Mutable flux tile of one conserved quantity.
    #[inline(always)]
    pub fn get_mut(&mut self, q: Quantity) -> &mut TempSoA {
        &mut self.tiles[q.index()]
    }

    /// Number of scalars stored.
    pub fn len(&self) -> usize {
        self.tiles.iter().map(TempSoA::len).sum()
    }

    /// Whether no scalars are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Estimate the wave fan and face velocity of every face.
///
/// Fails on the first face whose reconstructed states break positivity.
pub fn estimate_wave_speeds<S: RiemannSolver>(
    solver: &S,
    axis: Axis,
    faces: &FaceStates,
    out: &mut FanTiles,
    n: usize,
    slice: usize,
) -> Result<(), ConvectionError> {
    let (ni, nj) = axis.face_extent(n);
    for j in 0..nj {
        for i in 0..ni {
            let (minus, plus) = faces.face(axis, i, j);
            let fan = solver.wave_fan(&minus, &plus).map_err(|violation| {
                ConvectionError::non_physical(Location::face(axis, i, j, slice), violation)
            })?;
            out.s_minus[(i, j)] = fan.s_minus;
            out.s_plus[(i, j)] = fan.s_plus;
            out.u_star[(i, j)] = fan.u_star;
            out.u_face[(i, j)] = solver.face_velocity(&minus, &plus, &fan);
        }
    }
    Ok(())
}

/// Numerical flux of all seven conserved quantities at every face.
pub fn riemann_fluxes<S: RiemannSolver>(
    solver: &S,
    axis: Axis,
    faces: &FaceStates,
    fans: &FanTiles,
    out: &mut FluxTiles,
    n: usize,
    slice: usize,
) -> Result<(), ConvectionError> {
    let kinds = FluxKind::all(axis);
    let (ni, nj) = axis.face_extent(n);
    for j in 0..nj {
        for i in 0..ni {
            let (minus, plus) = faces.face(axis, i, j);
            let fan = fans.fan(i, j);
            for (q, kind) in Quantity::ALL.into_iter().zip(kinds) {
                let f = solver.flux(kind, &minus, &plus, &fan);
                if f.is_nan() {
                    return Err(ConvectionError::not_a_number(
                        Stage::RiemannFlux,
                        q,
                        Location::face(axis, i, j, slice),
                    ));
                }
                out.tiles[q.index()][(i, j)] = f;
            }
        }
    }
    Ok(())
}
