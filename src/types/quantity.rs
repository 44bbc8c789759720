//! The seven transported fields.

use std::fmt;

/// Index of a transported field.
///
/// The same slot names the primitive value (ρ, u, v, w, p, Γ, Π) in the input
/// and face tiles and the conserved value (ρ, ρu, ρv, ρw, E, Γ, Π) in the flux
/// and RHS tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Quantity {
    Rho = 0,
    U = 1,
    V = 2,
    W = 3,
    /// Pressure in primitive tiles, total energy in conserved tiles.
    P = 4,
    G = 5,
    Pi = 6,
}

impl Quantity {
    /// All quantities in record order.
    pub const ALL: [Quantity; 7] = [
        Quantity::Rho,
        Quantity::U,
        Quantity::V,
        Quantity::W,
        Quantity::P,
        Quantity::G,
        Quantity::Pi,
    ];

    /// Slot in a record or tile array.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether the quantity is one of the two EOS parameters.
    #[inline]
    pub const fn is_eos_parameter(self) -> bool {
        matches!(self, Quantity::G | Quantity::Pi)
    }

    /// Name of the conserved quantity.
    pub fn name(self) -> &'static str {
        match self {
            Quantity::Rho => "rho",
            Quantity::U => "rho_u",
            Quantity::V => "rho_v",
            Quantity::W => "rho_w",
            Quantity::P => "energy",
            Quantity::G => "gamma",
            Quantity::Pi => "pi",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
