use crate::grid::Cell;
use crate::region::RegionId;
use thiserror::Error;

/// Why a solve call returned no solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SolveError {
    /// No assignment satisfies the puzzle constraints.
    #[error("no assignment satisfies the puzzle constraints")]
    Unsatisfiable,
    /// The node or wall-clock budget ran out before the search resolved.
    /// Callers cannot distinguish this from unsatisfiable without a larger
    /// budget, so decisions should treat both the same.
    #[error("search budget exhausted before a solution or refutation was found")]
    BudgetExceeded,
}

/// The puzzle generator exhausted its attempt budget without finding a
/// solvable partition. Expected under adversarial parameters; surface it to
/// the user as "try again", not as a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("failed to generate a solvable puzzle after {attempts} attempts")]
pub struct GenerationFailed {
    pub attempts: usize,
}

/// Malformed puzzle data: a region map that is not a total disjoint
/// partition of the grid, or givens outside the legal range. Raised at
/// construction time, before any search runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPuzzle {
    #[error("grid dimensions must be nonzero, got {rows}x{cols}")]
    ZeroDimensions { rows: usize, cols: usize },
    #[error("region {region} contains cell {cell}, outside the {rows}x{cols} grid")]
    CellOutOfBounds {
        region: RegionId,
        cell: Cell,
        rows: usize,
        cols: usize,
    },
    #[error("cell {cell} belongs to both region {first} and region {second}")]
    OverlappingRegions {
        cell: Cell,
        first: RegionId,
        second: RegionId,
    },
    #[error("cell {cell} is not covered by any region")]
    UncoveredCell { cell: Cell },
    #[error("region {region} is empty")]
    EmptyRegion { region: RegionId },
    #[error("region {region} has {size} cells, more than the {max} the engine supports")]
    RegionTooLarge {
        region: RegionId,
        size: usize,
        max: usize,
    },
    #[error("given references cell {cell}, which is not on the grid")]
    UnknownGivenCell { cell: Cell },
    #[error("given value {value} at {cell} is outside [1, {max}] for its region")]
    GivenOutOfRange { cell: Cell, value: u8, max: u8 },
    #[error("malformed given key {key:?}, expected \"row,col\"")]
    BadGivenKey { key: String },
}
