//! Cell and face states of the two-phase Euler system.
//!
//! # Example
//!
//! ```
//! use mpcf_rs::state::{ConservedState, PrimitiveState};
//!
//! let w = PrimitiveState::new(1.0, 0.5, 0.0, 0.0, 1.0, 2.5, 0.0);
//! let q = ConservedState::from_primitive(&w);
//! let back = q.to_primitive();
//! assert!((back.p - w.p).abs() < 1e-5);
//! ```

mod conserved;
mod convert;
mod primitive;

pub use conserved::ConservedState;
pub use convert::PrimitiveSlice;
pub use primitive::{FacePrimitive, PrimitiveState};
