//! N×N×N twisty puzzle engine and layer-by-layer solver.
//!
//! [`Cube`] tracks the colors of every piece, applies quarter turns issued
//! through move notation or as [`geometry::Turn`] values, and queues one
//! animation entry per move for a renderer to play back. [`solve`] drives a
//! 2x2 or 3x3 cube to the solved state with a fixed beginner's method, using
//! the case tables in [`cases`] for the last layer.

pub mod cases;
pub mod cube;
pub mod geometry;
pub mod grid;
pub mod notation;
pub mod pattern;
pub mod pieces;
pub mod solver;

pub use cube::Cube;
pub use solver::{solve, Solution, SolveError, Stage};
