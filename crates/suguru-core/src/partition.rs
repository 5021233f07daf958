use std::collections::BTreeMap;

use crate::grid::{Cell, Topology};
use crate::region::{RegionId, RegionMap};
use crate::rng::SimpleRng;
use crate::value_set::ValueSet;

const UNCLAIMED: RegionId = RegionId::MAX;

/// Carve a grid into random contiguous regions of size 1..=max_region_size.
///
/// Greedy blob growth: seed a region at a random unassigned cell, pick a
/// target size uniformly from what the remaining cells allow, then absorb
/// random orthogonal unassigned neighbors of a random frontier cell until the
/// target is hit or the frontier dies. An exhausted frontier just yields a
/// smaller region. Region ids count up from 0 in creation order.
///
/// Always produces a valid partition; whether it admits a legal assignment is
/// the solver's concern. With `seed` supplied the partition is reproducible.
pub fn random_partition(
    rows: usize,
    cols: usize,
    max_region_size: usize,
    seed: Option<u64>,
) -> RegionMap {
    debug_assert!(rows > 0 && cols > 0);
    debug_assert!(max_region_size >= 1);

    let mut rng = match seed {
        Some(seed) => SimpleRng::with_seed(seed),
        None => SimpleRng::new(),
    };
    let topo = Topology::new(rows, cols);
    let cell_count = topo.cell_count();
    let size_cap = max_region_size.min(ValueSet::MAX_VALUE as usize);

    // Unassigned pool with O(1) random pick and removal: `slot[i]` is the
    // position of cell index i inside `unassigned`, or usize::MAX once claimed.
    let mut unassigned: Vec<usize> = (0..cell_count).collect();
    let mut slot: Vec<usize> = (0..cell_count).collect();
    let claim = |unassigned: &mut Vec<usize>, slot: &mut Vec<usize>, index: usize| {
        let pos = slot[index];
        let last = *unassigned.last().unwrap_or(&index);
        unassigned.swap_remove(pos);
        if pos < unassigned.len() {
            slot[last] = pos;
        }
        slot[index] = usize::MAX;
    };

    let mut regions: BTreeMap<RegionId, Vec<Cell>> = BTreeMap::new();
    let mut region_of: Vec<RegionId> = vec![UNCLAIMED; cell_count];
    let mut rid: RegionId = 0;

    while !unassigned.is_empty() {
        let seed_index = unassigned[rng.next_usize(unassigned.len())];
        claim(&mut unassigned, &mut slot, seed_index);

        // Target size counts the seed cell, so the remaining pool allows
        // unassigned.len() + 1 at most.
        let max_size = size_cap.min(unassigned.len() + 1);
        let target = 1 + rng.next_usize(max_size);

        let mut region = vec![seed_index];
        let mut frontier = vec![seed_index];
        while region.len() < target && !frontier.is_empty() {
            let pick = rng.next_usize(frontier.len());
            let cell = topo.cell_at(frontier[pick]);

            // Orthogonal growth only; diagonal contiguity is not enough.
            let mut candidates = [0usize; 4];
            let mut count = 0;
            for (dr, dc) in [(-1i64, 0i64), (1, 0), (0, -1), (0, 1)] {
                let nr = cell.row as i64 + dr;
                let nc = cell.col as i64 + dc;
                if nr < 0 || nr as usize >= rows || nc < 0 || nc as usize >= cols {
                    continue;
                }
                let index = nr as usize * cols + nc as usize;
                if slot[index] != usize::MAX {
                    candidates[count] = index;
                    count += 1;
                }
            }
            if count == 0 {
                frontier.swap_remove(pick);
                continue;
            }
            let next = candidates[rng.next_usize(count)];
            claim(&mut unassigned, &mut slot, next);
            region.push(next);
            frontier.push(next);
        }

        for &index in &region {
            region_of[index] = rid;
        }
        regions.insert(rid, region.into_iter().map(|i| topo.cell_at(i)).collect());
        rid += 1;
    }

    log::trace!(
        "partitioned {}x{} grid into {} regions",
        rows,
        cols,
        regions.len()
    );
    RegionMap::from_verified_parts(rows, cols, regions, region_of)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn assert_valid_partition(map: &RegionMap, rows: usize, cols: usize, max_size: usize) {
        assert_eq!(map.rows(), rows);
        assert_eq!(map.cols(), cols);

        // Total and disjoint cover.
        let mut seen = BTreeSet::new();
        for (_, cells) in map.regions() {
            for &cell in cells {
                assert!(cell.row < rows && cell.col < cols);
                assert!(seen.insert(cell), "cell {cell} claimed twice");
            }
        }
        assert_eq!(seen.len(), rows * cols);

        // Size bounds and orthogonal contiguity.
        for (rid, cells) in map.regions() {
            assert!(!cells.is_empty());
            assert!(cells.len() <= max_size, "region {rid} too large");

            let members: BTreeSet<Cell> = cells.iter().copied().collect();
            let mut reached = BTreeSet::from([cells[0]]);
            let mut stack = vec![cells[0]];
            while let Some(cell) = stack.pop() {
                for (dr, dc) in [(-1i64, 0i64), (1, 0), (0, -1), (0, 1)] {
                    let nr = cell.row as i64 + dr;
                    let nc = cell.col as i64 + dc;
                    if nr < 0 || nc < 0 {
                        continue;
                    }
                    let nb = Cell::new(nr as usize, nc as usize);
                    if members.contains(&nb) && reached.insert(nb) {
                        stack.push(nb);
                    }
                }
            }
            assert_eq!(reached.len(), members.len(), "region {rid} not contiguous");
        }
    }

    #[test]
    fn test_partition_properties() {
        for seed in [0, 1, 42, 1234, 99999] {
            let map = random_partition(8, 8, 5, Some(seed));
            assert_valid_partition(&map, 8, 8, 5);
        }
    }

    #[test]
    fn test_partition_non_square() {
        let map = random_partition(5, 9, 4, Some(17));
        assert_valid_partition(&map, 5, 9, 4);
    }

    #[test]
    fn test_same_seed_same_partition() {
        let a = random_partition(6, 6, 5, Some(42));
        let b = random_partition(6, 6, 5, Some(42));
        let collect = |m: &RegionMap| {
            m.regions()
                .map(|(rid, cells)| (rid, cells.to_vec()))
                .collect::<Vec<_>>()
        };
        assert_eq!(collect(&a), collect(&b));
    }

    #[test]
    fn test_max_size_one_gives_singletons() {
        let map = random_partition(4, 4, 1, Some(3));
        assert_eq!(map.region_count(), 16);
        for (_, cells) in map.regions() {
            assert_eq!(cells.len(), 1);
        }
    }

    #[test]
    fn test_region_ids_dense_from_zero() {
        let map = random_partition(7, 7, 5, Some(8));
        let ids: Vec<RegionId> = map.regions().map(|(rid, _)| rid).collect();
        assert_eq!(ids, (0..map.region_count() as RegionId).collect::<Vec<_>>());
    }

    #[test]
    fn test_single_cell_grid() {
        let map = random_partition(1, 1, 5, Some(0));
        assert_eq!(map.region_count(), 1);
        assert_eq!(map.region_size_of(Cell::new(0, 0)), 1);
    }
}
