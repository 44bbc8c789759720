//! Error types for the convection kernel.

use std::fmt;

use thiserror::Error;

use crate::types::{Axis, Quantity};

/// Position inside a block pass where an error was detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    /// Sweep direction for face errors, `None` for cell errors.
    pub axis: Option<Axis>,
    /// First tile index.
    pub i: usize,
    /// Second tile index.
    pub j: usize,
    /// Output z slice being processed, or the face index for z faces.
    pub slice: usize,
}

impl Location {
    /// A face in the tile of a directional sweep.
    pub fn face(axis: Axis, i: usize, j: usize, slice: usize) -> Self {
        Self {
            axis: Some(axis),
            i,
            j,
            slice,
        }
    }

    /// A block cell.
    pub fn cell(i: usize, j: usize, slice: usize) -> Self {
        Self {
            axis: None,
            i,
            j,
            slice,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.axis {
            Some(axis) => write!(
                f,
                "{axis} face ({}, {}) of slice {}",
                self.i, self.j, self.slice
            ),
            None => write!(f, "cell ({}, {}, {})", self.i, self.j, self.slice),
        }
    }
}

/// Pipeline stage that produced a non-finite value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    RiemannFlux,
    WriteBack,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::RiemannFlux => "Riemann flux",
            Stage::WriteBack => "write-back",
        })
    }
}

/// Physical invariant broken by a reconstructed face state.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateViolation {
    #[error("density is not positive")]
    NonPositiveDensity,

    #[error("Γ is not positive")]
    NonPositiveGamma,

    #[error("squared sound speed is negative")]
    NegativeSoundSpeed,

    #[error("wave speed is NaN")]
    NotANumber,
}

/// Errors that abort a block pass.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ConvectionError {
    /// A reconstructed state violates positivity.
    #[error("Non-physical state at {location}: {violation}")]
    NonPhysicalState {
        location: Location,
        violation: StateViolation,
    },

    /// A flux or RHS value is NaN.
    #[error("NaN in {quantity} during {stage} at {location}")]
    NotANumber {
        stage: Stage,
        quantity: Quantity,
        location: Location,
    },

    /// Caller memory does not match the declared layout or block size.
    #[error("Invalid block layout: {0}")]
    InvalidLayout(String),

    /// Invalid kernel configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ConvectionError {
    /// Create a non-physical state error at a face.
    pub fn non_physical(location: Location, violation: StateViolation) -> Self {
        Self::NonPhysicalState {
            location,
            violation,
        }
    }

    /// Create a NaN error.
    pub fn not_a_number(stage: Stage, quantity: Quantity, location: Location) -> Self {
        Self::NotANumber {
            stage,
            quantity,
            location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = ConvectionError::non_physical(
            Location::face(Axis::Y, 3, 4, 1),
            StateViolation::NonPositiveDensity,
        );
        assert_eq!(
            e.to_string(),
            "Non-physical state at y face (3, 4) of slice 1: density is not positive"
        );

        let e = ConvectionError::not_a_number(
            Stage::WriteBack,
            Quantity::P,
            Location::cell(0, 1, 2),
        );
        assert_eq!(
            e.to_string(),
            "NaN in energy during write-back at cell (0, 1, 2)"
        );
    }
}
