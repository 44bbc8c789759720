//! Memory layout: tiles, the z ring and caller block views.
//!
//! # Example
//!
//! ```
//! use mpcf_rs::layout::{InputSoA, Ring};
//!
//! let mut ring = Ring::from_fn(6, |_| InputSoA::new(4));
//! ring.current_mut().set(-3, 0, 1.0);
//! ring.advance();
//! assert_eq!(ring.get(-1).at(-3, 0), 1.0);
//! ```

mod block;
mod ring;
mod tiles;

pub use block::{BlockBuffer, BlockLayout, BlockView, BlockViewMut};
pub use ring::Ring;
pub use tiles::{InputSoA, OutputSoA, TempSoA, Tile};
