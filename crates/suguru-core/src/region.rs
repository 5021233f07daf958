use std::collections::BTreeMap;
use std::fmt;

use crate::error::InvalidPuzzle;
use crate::grid::Cell;
use crate::value_set::ValueSet;

/// Identifier of a region within one region map.
pub type RegionId = u32;

/// A total, disjoint partition of the grid into regions.
///
/// Validated at construction: every cell belongs to exactly one region, no
/// region is empty or exceeds the 64-cell engine limit, and all cells are in
/// bounds. The cell-to-region index is derived once here and never mutated.
/// Region cell lists keep their supplied order so serialized puzzles round-trip
/// losslessly.
#[derive(Debug, Clone)]
pub struct RegionMap {
    rows: usize,
    cols: usize,
    regions: BTreeMap<RegionId, Vec<Cell>>,
    region_of: Vec<RegionId>,
}

impl RegionMap {
    /// Build a region map from untrusted parts, validating the partition
    /// invariant.
    pub fn new(
        rows: usize,
        cols: usize,
        regions: BTreeMap<RegionId, Vec<Cell>>,
    ) -> Result<Self, InvalidPuzzle> {
        if rows == 0 || cols == 0 {
            return Err(InvalidPuzzle::ZeroDimensions { rows, cols });
        }

        let mut claimed: Vec<Option<RegionId>> = vec![None; rows * cols];
        for (&rid, cells) in &regions {
            if cells.is_empty() {
                return Err(InvalidPuzzle::EmptyRegion { region: rid });
            }
            if cells.len() > ValueSet::MAX_VALUE as usize {
                return Err(InvalidPuzzle::RegionTooLarge {
                    region: rid,
                    size: cells.len(),
                    max: ValueSet::MAX_VALUE as usize,
                });
            }
            for &cell in cells {
                if cell.row >= rows || cell.col >= cols {
                    return Err(InvalidPuzzle::CellOutOfBounds {
                        region: rid,
                        cell,
                        rows,
                        cols,
                    });
                }
                let slot = &mut claimed[cell.row * cols + cell.col];
                if let Some(first) = *slot {
                    return Err(InvalidPuzzle::OverlappingRegions {
                        cell,
                        first,
                        second: rid,
                    });
                }
                *slot = Some(rid);
            }
        }

        let mut region_of = Vec::with_capacity(rows * cols);
        for (index, slot) in claimed.into_iter().enumerate() {
            match slot {
                Some(rid) => region_of.push(rid),
                None => {
                    return Err(InvalidPuzzle::UncoveredCell {
                        cell: Cell::new(index / cols, index % cols),
                    })
                }
            }
        }

        Ok(Self {
            rows,
            cols,
            regions,
            region_of,
        })
    }

    /// Build from parts already known to satisfy the partition invariant.
    /// Only the partition generator calls this.
    pub(crate) fn from_verified_parts(
        rows: usize,
        cols: usize,
        regions: BTreeMap<RegionId, Vec<Cell>>,
        region_of: Vec<RegionId>,
    ) -> Self {
        debug_assert_eq!(region_of.len(), rows * cols);
        Self {
            rows,
            cols,
            regions,
            region_of,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Regions in ascending id order.
    pub fn regions(&self) -> impl Iterator<Item = (RegionId, &[Cell])> {
        self.regions.iter().map(|(&rid, cells)| (rid, cells.as_slice()))
    }

    pub fn region_cells(&self, region: RegionId) -> Option<&[Cell]> {
        self.regions.get(&region).map(Vec::as_slice)
    }

    /// Region owning an in-bounds cell.
    pub fn region_of(&self, cell: Cell) -> RegionId {
        debug_assert!(cell.row < self.rows && cell.col < self.cols);
        self.region_of[cell.row * self.cols + cell.col]
    }

    /// Size of the region owning an in-bounds cell. Always in [1, 64].
    pub fn region_size_of(&self, cell: Cell) -> u8 {
        self.regions[&self.region_of(cell)].len() as u8
    }
}

impl fmt::Display for RegionMap {
    /// Grid of region ids, one row per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .regions
            .keys()
            .next_back()
            .map_or(1, |rid| rid.to_string().len());
        for row in 0..self.rows {
            for col in 0..self.cols {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>width$}", self.region_of(Cell::new(row, col)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
