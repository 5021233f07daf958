use std::fmt;

/// A cell coordinate on the grid, 0-indexed, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Precomputed 8-directional (king-move) adjacency for a grid.
///
/// Built once per (rows, cols) pair; all queries answer from the cache.
#[derive(Debug, Clone)]
pub struct Topology {
    rows: usize,
    cols: usize,
    neighbors: Vec<Vec<Cell>>,
}

impl Topology {
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut neighbors = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let mut nbs = Vec::with_capacity(8);
                for dr in -1i64..=1 {
                    for dc in -1i64..=1 {
                        if dr == 0 && dc == 0 {
                            continue;
                        }
                        let nr = row as i64 + dr;
                        let nc = col as i64 + dc;
                        if nr >= 0 && (nr as usize) < rows && nc >= 0 && (nc as usize) < cols {
                            nbs.push(Cell::new(nr as usize, nc as usize));
                        }
                    }
                }
                neighbors.push(nbs);
            }
        }
        Self {
            rows,
            cols,
            neighbors,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells on the grid.
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Flat row-major index of a cell.
    pub fn index(&self, cell: Cell) -> usize {
        cell.row * self.cols + cell.col
    }

    /// Cell at a flat row-major index.
    pub fn cell_at(&self, index: usize) -> Cell {
        Cell::new(index / self.cols, index % self.cols)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// All in-bounds king-move neighbors of a cell.
    pub fn neighbors(&self, cell: Cell) -> &[Cell] {
        &self.neighbors[self.index(cell)]
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.cell_count()).map(|i| self.cell_at(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_has_three_neighbors() {
        let topo = Topology::new(3, 3);
        let nbs = topo.neighbors(Cell::new(0, 0));
        assert_eq!(nbs.len(), 3);
        assert!(nbs.contains(&Cell::new(0, 1)));
        assert!(nbs.contains(&Cell::new(1, 0)));
        assert!(nbs.contains(&Cell::new(1, 1)));
    }

    #[test]
    fn test_edge_has_five_neighbors() {
        let topo = Topology::new(3, 3);
        assert_eq!(topo.neighbors(Cell::new(0, 1)).len(), 5);
    }

    #[test]
    fn test_interior_has_eight_neighbors() {
        let topo = Topology::new(3, 3);
        assert_eq!(topo.neighbors(Cell::new(1, 1)).len(), 8);
    }

    #[test]
    fn test_neighbors_in_bounds() {
        let topo = Topology::new(4, 6);
        for cell in topo.cells() {
            for &nb in topo.neighbors(cell) {
                assert!(topo.contains(nb));
                assert_ne!(nb, cell);
            }
        }
    }

    #[test]
    fn test_neighbors_symmetric() {
        let topo = Topology::new(4, 5);
        for cell in topo.cells() {
            for &nb in topo.neighbors(cell) {
                assert!(topo.neighbors(nb).contains(&cell));
            }
        }
    }

    #[test]
    fn test_index_round_trip() {
        let topo = Topology::new(5, 7);
        for (i, cell) in topo.cells().enumerate() {
            assert_eq!(topo.index(cell), i);
            assert_eq!(topo.cell_at(i), cell);
        }
    }

    #[test]
    fn test_single_cell_grid() {
        let topo = Topology::new(1, 1);
        assert!(topo.neighbors(Cell::new(0, 0)).is_empty());
    }
}
