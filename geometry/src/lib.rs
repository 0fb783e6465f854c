#![deny(clippy::all)]

//! Two dimensional grids, and pathfinding across them with any of the
//! `searcher` algorithms.

pub mod coord2d;
pub mod grid;

/// Data type used for coordinates
pub type Position = i32;
