//! Core Suguru (Tectonic) engine.
//!
//! A Suguru grid is partitioned into irregular contiguous regions; each
//! region of size n holds the values 1..=n exactly once, and no two cells
//! touching horizontally, vertically, or diagonally may hold the same value.
//!
//! The crate covers the constraint engine behind a playable game:
//! - [`random_partition`] carves a grid into random contiguous regions;
//! - [`Solver`] fills a partitioned grid by backtracking with MRV ordering
//!   and forward checking, or proves it unsolvable within a budget;
//! - [`Generator`] retries partitions until one solves, then reveals one
//!   given per region;
//! - [`check_conflicts`] validates arbitrary (partial) assignments for
//!   interactive play.
//!
//! Everything is synchronous and blocking; callers wanting a responsive UI
//! run these calls on a worker thread. All randomness is seedable and
//! instance-owned, so a fixed seed reproduces an entire generation pipeline.

mod conflict;
mod error;
mod generator;
mod grid;
mod partition;
mod puzzle;
mod region;
mod rng;
mod solver;
mod value_set;

pub use conflict::check_conflicts;
pub use error::{GenerationFailed, InvalidPuzzle, SolveError};
pub use generator::{GeneratedPuzzle, Generator, GeneratorConfig};
pub use grid::{Cell, Topology};
pub use partition::random_partition;
pub use puzzle::{Assignment, Puzzle, PuzzleData};
pub use region::{RegionId, RegionMap};
pub use solver::{Solver, SolverConfig, ValueOrder};
pub use value_set::ValueSet;
