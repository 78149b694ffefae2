//! Board generation and the live board.
//!
//! - `BoardGenerator`: Deals a shuffled grid of paired identities
//! - `Board`: Card instances of the running session
//! - `GridCell` / `Position`: Where a card sits

mod grid;
pub mod generator;
pub mod layout;

pub use grid::Board;
pub use generator::{BoardGenerator, LayoutEntry};
pub use layout::{cell_position, cells, GridCell, Position};
