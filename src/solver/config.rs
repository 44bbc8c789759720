//! Configuration of a convection pass.

use crate::flux::StandardSolver;
use crate::source::ExtraTermMode;
use crate::types::Real;

use super::error::ConvectionError;

/// Configuration for one convection block pass.
///
/// The write-back blends the RHS into the destination as
/// `q ← a·q - dtinvh·rhs`, which lets the caller fold a low-storage
/// Runge–Kutta stage into the pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConvectionConfig {
    /// Weight of the previous destination value.
    pub a: Real,
    /// Time step divided by grid spacing.
    pub dtinvh: Real,
    /// Riemann solver.
    pub solver: StandardSolver,
    /// Γ/Π samples of the non-conservative term.
    pub extra_term: ExtraTermMode,
}

impl Default for ConvectionConfig {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

impl ConvectionConfig {
    /// Create a configuration with HLLE and the cell-centred Γ/Π term.
    pub fn new(a: Real, dtinvh: Real) -> Self {
        Self {
            a,
            dtinvh,
            solver: StandardSolver::Hlle,
            extra_term: ExtraTermMode::CellCentred,
        }
    }

    /// Set the Riemann solver.
    pub fn with_solver(mut self, solver: StandardSolver) -> Self {
        self.solver = solver;
        self
    }

    /// Set how Γ and Π are sampled in the non-conservative term.
    pub fn with_extra_term(mut self, mode: ExtraTermMode) -> Self {
        self.extra_term = mode;
        self
    }

    /// Reject non-finite blend coefficients.
    pub fn validate(&self) -> Result<(), ConvectionError> {
        if !self.a.is_finite() {
            return Err(ConvectionError::InvalidConfig(format!(
                "blend weight a = {} is not finite",
                self.a
            )));
        }
        if !self.dtinvh.is_finite() {
            return Err(ConvectionError::InvalidConfig(format!(
                "dtinvh = {} is not finite",
                self.dtinvh
            )));
        }
        Ok(())
    }
}
