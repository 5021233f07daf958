use std::collections::BTreeSet;

use crate::grid::{Cell, Topology};
use crate::puzzle::Assignment;
use crate::region::RegionMap;

/// Report every assigned cell that violates a constraint: a value outside
/// [1, region size], a duplicate within its region, or an equal value on an
/// 8-adjacent cell. Cells without a value never appear; cells outside the
/// grid are themselves reported as conflicts.
///
/// Pure and stateless, so the presentation layer can call it after every
/// single-cell edit. It re-derives everything from scratch and shares nothing
/// with the solver.
pub fn check_conflicts(region_map: &RegionMap, assignment: &Assignment) -> BTreeSet<Cell> {
    let topo = Topology::new(region_map.rows(), region_map.cols());
    check_with_topology(&topo, region_map, assignment)
}

/// Same check against a caller-supplied topology cache.
/// [`Puzzle::check_conflicts`](crate::Puzzle::check_conflicts) uses this so
/// per-edit validation skips the adjacency rebuild.
pub(crate) fn check_with_topology(
    topo: &Topology,
    region_map: &RegionMap,
    assignment: &Assignment,
) -> BTreeSet<Cell> {
    let mut conflicts = BTreeSet::new();

    for (&cell, &value) in assignment {
        if !topo.contains(cell) {
            conflicts.insert(cell);
            continue;
        }
        if value == 0 || value > region_map.region_size_of(cell) {
            conflicts.insert(cell);
            continue;
        }
        let region = region_map.region_of(cell);
        let duplicate_in_region = region_map
            .region_cells(region)
            .into_iter()
            .flatten()
            .any(|&mate| mate != cell && assignment.get(&mate) == Some(&value));
        let duplicate_adjacent = topo
            .neighbors(cell)
            .iter()
            .any(|nb| assignment.get(nb) == Some(&value));
        if duplicate_in_region || duplicate_adjacent {
            conflicts.insert(cell);
        }
    }
    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Puzzle;
    use crate::region::RegionId;
    use crate::solver::Solver;
    use std::collections::BTreeMap;

    fn fixture_map() -> RegionMap {
        let mut regions: BTreeMap<RegionId, Vec<Cell>> = BTreeMap::new();
        regions.insert(
            0,
            vec![
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(0, 2),
                Cell::new(1, 1),
            ],
        );
        regions.insert(1, vec![Cell::new(1, 0), Cell::new(2, 0), Cell::new(2, 1)]);
        regions.insert(2, vec![Cell::new(1, 2), Cell::new(2, 2)]);
        RegionMap::new(3, 3, regions).unwrap()
    }

    #[test]
    fn test_solved_assignment_has_no_conflicts() {
        let map = fixture_map();
        let solution = Solver::new().solve(&Puzzle::blank(map.clone())).unwrap();
        assert!(check_conflicts(&map, &solution).is_empty());
    }

    #[test]
    fn test_region_duplicate_flags_both_cells() {
        let map = fixture_map();
        // Same region, not adjacent: (0,0) and (0,2).
        let assignment = Assignment::from([(Cell::new(0, 0), 3), (Cell::new(0, 2), 3)]);
        let conflicts = check_conflicts(&map, &assignment);
        assert_eq!(
            conflicts,
            BTreeSet::from([Cell::new(0, 0), Cell::new(0, 2)])
        );
    }

    #[test]
    fn test_adjacent_duplicate_flags_both_cells() {
        let map = fixture_map();
        // Different regions, diagonally adjacent.
        let assignment = Assignment::from([(Cell::new(1, 1), 2), (Cell::new(2, 2), 2)]);
        let conflicts = check_conflicts(&map, &assignment);
        assert_eq!(
            conflicts,
            BTreeSet::from([Cell::new(1, 1), Cell::new(2, 2)])
        );
    }

    #[test]
    fn test_out_of_range_flagged_without_duplicate() {
        let map = fixture_map();
        // Region 2 has two cells, so 3 is out of range even though unique.
        let assignment = Assignment::from([(Cell::new(2, 2), 3)]);
        assert_eq!(
            check_conflicts(&map, &assignment),
            BTreeSet::from([Cell::new(2, 2)])
        );
    }

    #[test]
    fn test_zero_value_flagged() {
        let map = fixture_map();
        let assignment = Assignment::from([(Cell::new(0, 0), 0)]);
        assert_eq!(
            check_conflicts(&map, &assignment),
            BTreeSet::from([Cell::new(0, 0)])
        );
    }

    #[test]
    fn test_partial_assignment_ignores_empty_cells() {
        let map = fixture_map();
        let assignment = Assignment::from([(Cell::new(0, 0), 1)]);
        assert!(check_conflicts(&map, &assignment).is_empty());
    }

    #[test]
    fn test_off_grid_cell_flagged() {
        let map = fixture_map();
        let assignment = Assignment::from([(Cell::new(7, 7), 1)]);
        assert_eq!(
            check_conflicts(&map, &assignment),
            BTreeSet::from([Cell::new(7, 7)])
        );
    }

    #[test]
    fn test_puzzle_method_matches_free_function() {
        let map = fixture_map();
        let puzzle = Puzzle::blank(map.clone());
        let assignment = Assignment::from([(Cell::new(1, 1), 2), (Cell::new(2, 2), 2)]);
        let via_puzzle = puzzle.check_conflicts(&assignment);
        assert_eq!(via_puzzle, check_conflicts(&map, &assignment));
        assert_eq!(
            via_puzzle,
            BTreeSet::from([Cell::new(1, 1), Cell::new(2, 2)])
        );
    }

    #[test]
    fn test_idempotent() {
        let map = fixture_map();
        let assignment = Assignment::from([
            (Cell::new(0, 0), 3),
            (Cell::new(0, 2), 3),
            (Cell::new(2, 2), 1),
        ]);
        let first = check_conflicts(&map, &assignment);
        let second = check_conflicts(&map, &assignment);
        assert_eq!(first, second);
    }
}
