//! Core scalar and index types.
//!
//! # Design Philosophy
//!
//! - **One storage scalar**: every tile and block value is a [`Real`]
//! - **Named slots over magic numbers**: [`Quantity`] indexes the seven fields
//! - **Direction as data**: [`Axis`] carries the velocity rotation and tile
//!   shape of each sweep, so one kernel serves x, y and z
//!
//! # Example
//!
//! ```
//! use mpcf_rs::types::{Axis, Quantity};
//!
//! let (vn, vt1, vt2) = Axis::Y.rotate(1.0, 2.0, 3.0);
//! assert_eq!((vn, vt1, vt2), (2.0, 1.0, 3.0));
//! assert_eq!(Quantity::P.index(), 4);
//! ```

mod axis;
mod quantity;
mod real;

pub use axis::Axis;
pub use quantity::Quantity;
pub use real::{HALO, NQUANTITIES, Real, Work};
