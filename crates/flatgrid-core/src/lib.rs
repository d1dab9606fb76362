//! **flatgrid-core** — a 2D character/integer grid as a flat, indexable
//! coordinate space.
//!
//! The central type is [`Grid`], which stores cell values in row-major order
//! keyed by a flat integer index (`index = x + y * width`). It provides:
//!
//! - construction from multiline text or a solid fill
//! - coordinate transforms (x/y ↔ index)
//! - neighbor enumeration (4- and 8-connected, plus a diagnostic
//!   [`probe4`](Grid::probe4) that reports off-board directions)
//! - structural transforms (transpose, digit coercion)
//! - boundary queries per cardinal [`Direction`]
//!
//! Grids are immutable after construction; every transform returns a new
//! value.

pub mod dir;
pub mod grid;

pub use dir::Direction;
pub use grid::{DigitCell, Grid, GridError, Probe};
