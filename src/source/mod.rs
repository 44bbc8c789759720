//! Source terms of the two-phase system.
//!
//! The only source handled by the convection kernel is the non-conservative
//! `φ ∇·v` term of the advected EOS parameters Γ and Π.

mod nonconservative;

pub use nonconservative::{
    ExtraTermMode, SourceTiles, extra_term_x, extra_term_y, extra_term_z,
};
