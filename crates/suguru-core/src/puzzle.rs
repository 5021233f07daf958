use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::error::InvalidPuzzle;
use crate::grid::{Cell, Topology};
use crate::region::{RegionId, RegionMap};

/// A (possibly partial) mapping of cells to values. Row-major iteration
/// order, so equal assignments compare and print identically.
pub type Assignment = BTreeMap<Cell, u8>;

/// A region map plus validated givens, ready to solve.
///
/// Construction rejects givens on unknown cells or outside a region's value
/// range, so a solver never sees malformed input. The topology cache is built
/// once here and shared by every solve of the same puzzle.
#[derive(Debug, Clone)]
pub struct Puzzle {
    region_map: RegionMap,
    givens: Assignment,
    topology: Topology,
}

impl Puzzle {
    pub fn new(region_map: RegionMap, givens: Assignment) -> Result<Self, InvalidPuzzle> {
        for (&cell, &value) in &givens {
            if cell.row >= region_map.rows() || cell.col >= region_map.cols() {
                return Err(InvalidPuzzle::UnknownGivenCell { cell });
            }
            let max = region_map.region_size_of(cell);
            if value == 0 || value > max {
                return Err(InvalidPuzzle::GivenOutOfRange { cell, value, max });
            }
        }
        let topology = Topology::new(region_map.rows(), region_map.cols());
        Ok(Self {
            region_map,
            givens,
            topology,
        })
    }

    /// A puzzle with no givens; used by the generator to solve fresh
    /// partitions. Cannot fail since there is nothing to validate.
    pub fn blank(region_map: RegionMap) -> Self {
        let topology = Topology::new(region_map.rows(), region_map.cols());
        Self {
            region_map,
            givens: Assignment::new(),
            topology,
        }
    }

    pub fn region_map(&self) -> &RegionMap {
        &self.region_map
    }

    pub fn givens(&self) -> &Assignment {
        &self.givens
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn rows(&self) -> usize {
        self.region_map.rows()
    }

    pub fn cols(&self) -> usize {
        self.region_map.cols()
    }

    pub fn into_region_map(self) -> RegionMap {
        self.region_map
    }

    /// Conflict check reusing this puzzle's cached topology. Same result as
    /// [`check_conflicts`](crate::check_conflicts) on the region map, without
    /// rebuilding adjacency, so it suits per-edit validation during play.
    pub fn check_conflicts(&self, assignment: &Assignment) -> BTreeSet<Cell> {
        crate::conflict::check_with_topology(&self.topology, &self.region_map, assignment)
    }

    /// Render an assignment over this puzzle's grid, `.` for empty cells.
    pub fn render(&self, assignment: &Assignment) -> String {
        let mut out = String::new();
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                if col > 0 {
                    out.push(' ');
                }
                match assignment.get(&Cell::new(row, col)) {
                    Some(value) => {
                        let _ = write!(out, "{value}");
                    }
                    None => out.push('.'),
                }
            }
            out.push('\n');
        }
        out
    }

    /// Build a puzzle from the flat serialized shape, validating everything.
    pub fn from_data(data: &PuzzleData) -> Result<Self, InvalidPuzzle> {
        let regions = data
            .regions
            .iter()
            .map(|(&rid, cells)| {
                let cells = cells.iter().map(|&(r, c)| Cell::new(r, c)).collect();
                (rid, cells)
            })
            .collect();
        let region_map = RegionMap::new(data.rows, data.cols, regions)?;

        let mut givens = Assignment::new();
        for (key, &value) in &data.givens {
            let cell = parse_cell_key(key)?;
            givens.insert(cell, value);
        }
        Self::new(region_map, givens)
    }

    /// Convert back to the flat serialized shape. Lossless: region ids and
    /// cell list order are preserved verbatim.
    pub fn to_data(&self) -> PuzzleData {
        PuzzleData {
            rows: self.rows(),
            cols: self.cols(),
            regions: self
                .region_map
                .regions()
                .map(|(rid, cells)| {
                    (rid, cells.iter().map(|c| (c.row, c.col)).collect())
                })
                .collect(),
            givens: self
                .givens
                .iter()
                .map(|(cell, &value)| (format!("{},{}", cell.row, cell.col), value))
                .collect(),
        }
    }
}

/// Flat, serde-friendly puzzle shape: regions keyed by id, givens keyed by
/// `"row,col"` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleData {
    pub rows: usize,
    pub cols: usize,
    pub regions: BTreeMap<RegionId, Vec<(usize, usize)>>,
    pub givens: BTreeMap<String, u8>,
}

fn parse_cell_key(key: &str) -> Result<Cell, InvalidPuzzle> {
    let bad = || InvalidPuzzle::BadGivenKey {
        key: key.to_string(),
    };
    let (row, col) = key.split_once(',').ok_or_else(bad)?;
    let row = row.trim().parse().map_err(|_| bad())?;
    let col = col.trim().parse().map_err(|_| bad())?;
    Ok(Cell::new(row, col))
}
